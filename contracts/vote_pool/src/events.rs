use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub ledger: Address,
    pub vote_token: Address,
}

/// Shared by vote and unvote.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteChangedEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
    pub pool_votes: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyncedEvent {
    pub pool_id: u32,
    pub epoch: u64,
    pub block: u32,
}

pub fn publish_initialized(env: &Env, ledger: Address, vote_token: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent { ledger, vote_token },
    );
}

pub fn publish_vote_changed(
    env: &Env,
    pool_id: u32,
    user: Address,
    amount: i128,
    pool_votes: i128,
    is_vote: bool,
) {
    let topic = if is_vote {
        symbol_short!("VOTE")
    } else {
        symbol_short!("UNVOTE")
    };
    env.events().publish(
        (topic, pool_id, user.clone()),
        VoteChangedEvent {
            pool_id,
            user,
            amount,
            pool_votes,
        },
    );
}

pub fn publish_synced(env: &Env, pool_id: u32, epoch: u64, block: u32) {
    env.events().publish(
        (symbol_short!("SYNCED"), pool_id),
        SyncedEvent {
            pool_id,
            epoch,
            block,
        },
    );
}
