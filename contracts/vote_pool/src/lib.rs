#![no_std]

pub mod boost;
pub mod events;

use common::{ContributionProvider, ProviderError};
use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

const LEDGER: Symbol = symbol_short!("LEDGER");
const VOTE_TOKEN: Symbol = symbol_short!("VOTE_TOK");
const INITIALIZED: Symbol = symbol_short!("INIT");

// Per-pool and per-user persistent storage uses tuple keys
const POOL_VOTES: Symbol = symbol_short!("VOTES");
const USER_VOTES: Symbol = symbol_short!("U_VOTES");
const DEPOSIT: Symbol = symbol_short!("DEP");
const TOTAL_DEPOSIT: Symbol = symbol_short!("TOT_DEP");
const SYNC: Symbol = symbol_short!("SYNC");

/// Settlement bookkeeping for one pool.
///
/// `open` is set between `will_update` and `did_update`; `epoch` counts
/// completed settlements and `last_synced` is the ledger sequence of the
/// latest one.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SyncState {
    pub open: bool,
    pub epoch: u64,
    pub last_synced: u32,
}

// ── Contract ─────────────────────────────────────────────────────────────────

/// Contribution provider that boosts deposits by staked votes.
///
/// Users lock a vote token against a pool through the ledger. The pool's
/// allocation weight is the total locked against it, and each user's
/// contribution is their deposit scaled by `boost::boosted_contribution`.
#[contract]
pub struct VotePoolContract;

#[contractimpl]
impl VotePoolContract {
    /// Bind the provider to `ledger`, staking votes in `vote_token`.
    pub fn initialize(env: Env, ledger: Address, vote_token: Address) -> Result<(), ProviderError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ProviderError::AlreadyInitialized);
        }

        env.storage().instance().set(&LEDGER, &ledger);
        env.storage().instance().set(&VOTE_TOKEN, &vote_token);
        env.storage().instance().set(&INITIALIZED, &true);

        events::publish_initialized(&env, ledger, vote_token);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Votes `user` has locked against `pool_id`.
    pub fn user_weight(env: Env, pool_id: u32, user: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(USER_VOTES, pool_id, user))
            .unwrap_or(0)
    }

    pub fn deposit_of(env: Env, pool_id: u32, user: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(DEPOSIT, pool_id, user))
            .unwrap_or(0)
    }

    pub fn total_deposit(env: Env, pool_id: u32) -> i128 {
        env.storage()
            .persistent()
            .get(&(TOTAL_DEPOSIT, pool_id))
            .unwrap_or(0)
    }

    /// The user's contribution under the current deposit and vote totals.
    ///
    /// The ledger only picks this up when the user next deposits, withdraws
    /// or votes.
    pub fn contribution_of(env: Env, pool_id: u32, user: Address) -> Result<i128, ProviderError> {
        Self::compute_contribution(&env, pool_id, &user)
    }

    /// Number of settlements the ledger has completed for `pool_id`.
    pub fn epoch(env: Env, pool_id: u32) -> u64 {
        Self::sync_state(&env, pool_id).epoch
    }

    /// Ledger sequence of the latest completed settlement of `pool_id`.
    pub fn last_synced(env: Env, pool_id: u32) -> u32 {
        Self::sync_state(&env, pool_id).last_synced
    }

    pub fn vote_token(env: Env) -> Result<Address, ProviderError> {
        env.storage()
            .instance()
            .get(&VOTE_TOKEN)
            .ok_or(ProviderError::NotInitialized)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert unless the bound ledger authorised this call.
    fn require_ledger(env: &Env) -> Result<(), ProviderError> {
        let ledger: Address = env
            .storage()
            .instance()
            .get(&LEDGER)
            .ok_or(ProviderError::NotInitialized)?;
        ledger.require_auth();
        Ok(())
    }

    fn sync_state(env: &Env, pool_id: u32) -> SyncState {
        env.storage()
            .persistent()
            .get(&(SYNC, pool_id))
            .unwrap_or_default()
    }

    fn compute_contribution(env: &Env, pool_id: u32, user: &Address) -> Result<i128, ProviderError> {
        let deposit = Self::deposit_of(env.clone(), pool_id, user.clone());
        let total_deposit = Self::total_deposit(env.clone(), pool_id);
        let user_votes = Self::user_weight(env.clone(), pool_id, user.clone());
        let total_votes = Self::weight(env.clone(), pool_id);
        boost::boosted_contribution(deposit, total_deposit, user_votes, total_votes)
            .ok_or(ProviderError::ArithmeticOverflow)
    }
}

#[contractimpl]
impl ContributionProvider for VotePoolContract {
    fn ledger(env: Env) -> Result<Address, ProviderError> {
        env.storage()
            .instance()
            .get(&LEDGER)
            .ok_or(ProviderError::NotInitialized)
    }

    /// Total votes locked against `pool_id`.
    fn weight(env: Env, pool_id: u32) -> i128 {
        env.storage()
            .persistent()
            .get(&(POOL_VOTES, pool_id))
            .unwrap_or(0)
    }

    /// Pool weight is the vote total and cannot be set directly.
    fn set_weight(_env: Env, _pool_id: u32, _weight: i128) -> Result<(), ProviderError> {
        Err(ProviderError::WeightUnsupported)
    }

    fn report_change(
        env: Env,
        pool_id: u32,
        user: Address,
        delta: i128,
        is_deposit: bool,
    ) -> Result<i128, ProviderError> {
        Self::require_ledger(&env)?;
        if delta < 0 {
            return Err(ProviderError::InvalidInput);
        }

        let deposit = Self::deposit_of(env.clone(), pool_id, user.clone());
        let total = Self::total_deposit(env.clone(), pool_id);
        let (deposit, total) = if is_deposit {
            (
                deposit.checked_add(delta).ok_or(ProviderError::ArithmeticOverflow)?,
                total.checked_add(delta).ok_or(ProviderError::ArithmeticOverflow)?,
            )
        } else {
            if deposit < delta {
                return Err(ProviderError::InsufficientBalance);
            }
            (deposit - delta, total - delta)
        };

        env.storage()
            .persistent()
            .set(&(DEPOSIT, pool_id, user.clone()), &deposit);
        env.storage()
            .persistent()
            .set(&(TOTAL_DEPOSIT, pool_id), &total);

        Self::compute_contribution(&env, pool_id, &user)
    }

    fn report_vote(
        env: Env,
        pool_id: u32,
        user: Address,
        amount: i128,
        is_vote: bool,
    ) -> Result<i128, ProviderError> {
        Self::require_ledger(&env)?;
        if amount <= 0 {
            return Err(ProviderError::InvalidInput);
        }

        let user_votes = Self::user_weight(env.clone(), pool_id, user.clone());
        let pool_votes = Self::weight(env.clone(), pool_id);
        let vote_token = token::Client::new(&env, &Self::vote_token(env.clone())?);

        let (user_votes, pool_votes) = if is_vote {
            vote_token.transfer(&user, &env.current_contract_address(), &amount);
            (
                user_votes.checked_add(amount).ok_or(ProviderError::ArithmeticOverflow)?,
                pool_votes.checked_add(amount).ok_or(ProviderError::ArithmeticOverflow)?,
            )
        } else {
            if user_votes < amount {
                return Err(ProviderError::InsufficientBalance);
            }
            vote_token.transfer(&env.current_contract_address(), &user, &amount);
            (user_votes - amount, pool_votes - amount)
        };

        env.storage()
            .persistent()
            .set(&(USER_VOTES, pool_id, user.clone()), &user_votes);
        env.storage()
            .persistent()
            .set(&(POOL_VOTES, pool_id), &pool_votes);

        events::publish_vote_changed(&env, pool_id, user.clone(), amount, pool_votes, is_vote);

        Self::compute_contribution(&env, pool_id, &user)
    }

    /// Opens a settlement round. A round left open means the ledger skipped
    /// `did_update`, which is rejected.
    fn will_update(env: Env, pool_id: u32) -> Result<(), ProviderError> {
        Self::require_ledger(&env)?;

        let mut state = Self::sync_state(&env, pool_id);
        if state.open {
            return Err(ProviderError::HookOutOfOrder);
        }
        state.open = true;
        env.storage().persistent().set(&(SYNC, pool_id), &state);

        Ok(())
    }

    /// Closes the round opened by `will_update` and records the sync.
    fn did_update(env: Env, pool_id: u32) -> Result<(), ProviderError> {
        Self::require_ledger(&env)?;

        let mut state = Self::sync_state(&env, pool_id);
        if !state.open {
            return Err(ProviderError::HookOutOfOrder);
        }
        state.open = false;
        state.epoch = state
            .epoch
            .checked_add(1)
            .ok_or(ProviderError::ArithmeticOverflow)?;
        state.last_synced = env.ledger().sequence();
        env.storage().persistent().set(&(SYNC, pool_id), &state);

        events::publish_synced(&env, pool_id, state.epoch, state.last_synced);

        Ok(())
    }
}

#[cfg(test)]
mod test;
