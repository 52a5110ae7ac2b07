use soroban_sdk::{contracttype, symbol_short, Address, Env, I256};

// ── Payloads ────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub reward_token: Address,
    pub reward_per_block: i128,
    pub fee_numerator: i128,
    pub fee_denominator: i128,
    pub fee_recipient: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolRegisteredEvent {
    pub pool_id: u32,
    pub deposit_token: Address,
    pub provider: Address,
    pub weight: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SettledEvent {
    pub pool_id: u32,
    pub block: u32,
    pub net_reward: i128,
    pub fee: i128,
    pub acc_reward_per_contribution: I256,
    pub unshared_reward: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolWeightSetEvent {
    pub pool_id: u32,
    pub weight: i128,
}

/// Shared by deposit and withdraw.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionChangedEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
    pub contribution: i128,
    pub total_contribution: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
}

/// Shared by vote and unvote.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteChangedEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
    pub contribution: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeesCollectedEvent {
    pub recipient: Address,
    pub amount: i128,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    reward_token: Address,
    reward_per_block: i128,
    fee_numerator: i128,
    fee_denominator: i128,
    fee_recipient: Address,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            reward_token,
            reward_per_block,
            fee_numerator,
            fee_denominator,
            fee_recipient,
        },
    );
}

pub fn publish_pool_registered(
    env: &Env,
    pool_id: u32,
    deposit_token: Address,
    provider: Address,
    weight: i128,
) {
    env.events().publish(
        (symbol_short!("POOL_NEW"), pool_id),
        PoolRegisteredEvent {
            pool_id,
            deposit_token,
            provider,
            weight,
        },
    );
}

pub fn publish_pool_weight_set(env: &Env, pool_id: u32, weight: i128) {
    env.events().publish(
        (symbol_short!("WEIGHT"), pool_id),
        PoolWeightSetEvent { pool_id, weight },
    );
}

pub fn publish_settled(
    env: &Env,
    pool_id: u32,
    block: u32,
    net_reward: i128,
    fee: i128,
    acc_reward_per_contribution: I256,
    unshared_reward: i128,
) {
    env.events().publish(
        (symbol_short!("SETTLED"), pool_id),
        SettledEvent {
            pool_id,
            block,
            net_reward,
            fee,
            acc_reward_per_contribution,
            unshared_reward,
        },
    );
}

pub fn publish_deposited(
    env: &Env,
    pool_id: u32,
    user: Address,
    amount: i128,
    contribution: i128,
    total_contribution: i128,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), pool_id, user.clone()),
        PositionChangedEvent {
            pool_id,
            user,
            amount,
            contribution,
            total_contribution,
        },
    );
}

pub fn publish_withdrawn(
    env: &Env,
    pool_id: u32,
    user: Address,
    amount: i128,
    contribution: i128,
    total_contribution: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), pool_id, user.clone()),
        PositionChangedEvent {
            pool_id,
            user,
            amount,
            contribution,
            total_contribution,
        },
    );
}

pub fn publish_reward_claimed(env: &Env, pool_id: u32, user: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("CLAIM"), pool_id, user.clone()),
        RewardClaimedEvent {
            pool_id,
            user,
            amount,
        },
    );
}

pub fn publish_vote_changed(
    env: &Env,
    pool_id: u32,
    user: Address,
    amount: i128,
    contribution: i128,
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
            contribution,
        },
    );
}

pub fn publish_fees_collected(env: &Env, recipient: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("FEES"), recipient.clone()),
        FeesCollectedEvent { recipient, amount },
    );
}
