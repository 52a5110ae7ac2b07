use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, I256};

use crate::LedgerError;

// ── Storage key constants ───────────────────────────────────────────────────

pub const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");
const POOL_CTR: Symbol = symbol_short!("POOL_CTR");
const ACCRUED_FEES: Symbol = symbol_short!("FEES");

// Persistent records use tuple keys: (prefix, pool_id[, user])
const POOL: Symbol = symbol_short!("POOL");
const POSITION: Symbol = symbol_short!("POS");

const TTL_THRESHOLD: u32 = 518_400; // ~30 days
const TTL_EXTEND_TO: u32 = 2_073_600; // ~120 days

// ── Types ───────────────────────────────────────────────────────────────────

/// Process-wide parameters, written once by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    pub reward_token: Address,
    /// Reward minted per ledger sequence across all pools.
    pub reward_per_block: i128,
    pub fee_numerator: i128,
    pub fee_denominator: i128,
    pub fee_recipient: Address,
}

/// Reward state of one registered pool.
///
/// `deposit_token` and `provider` are fixed at registration. The counters
/// only move forward: `acc_reward_per_contribution` and `last_settled_block`
/// never decrease, and `unshared_reward` only grows.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    pub deposit_token: Address,
    pub provider: Address,
    /// Provider weight as read at the last settlement (or registration).
    pub weight: i128,
    /// Reward per unit of contribution, scaled by `PRECISION`.
    pub acc_reward_per_contribution: I256,
    /// Sum of every position's `contribution` in this pool.
    pub total_contribution: i128,
    /// Reward minted while `total_contribution` was zero.
    pub unshared_reward: i128,
    pub last_settled_block: u32,
}

/// One user's standing in one pool. Created on first deposit or vote, never
/// removed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserPosition {
    /// Raw deposit held in ledger custody.
    pub amount: i128,
    /// Contribution last reported by the pool's provider.
    pub contribution: i128,
    /// The pool accumulator this position was last paid up to.
    pub acc_paid: I256,
    /// Reward credited but not yet paid out.
    pub claimable: i128,
}

impl UserPosition {
    pub fn empty(env: &Env) -> Self {
        UserPosition {
            amount: 0,
            contribution: 0,
            acc_paid: I256::from_i32(env, 0),
            claimable: 0,
        }
    }
}

// ── Config ──────────────────────────────────────────────────────────────────

pub fn store_config(env: &Env, config: &Config) {
    env.storage().instance().set(&CONFIG, config);
    env.storage().instance().set(&INITIALIZED, &true);
}

pub fn get_config(env: &Env) -> Result<Config, LedgerError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(LedgerError::NotInitialized)
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

// ── Protocol fees ───────────────────────────────────────────────────────────

pub fn accrued_fees(env: &Env) -> i128 {
    env.storage().instance().get(&ACCRUED_FEES).unwrap_or(0)
}

pub fn set_accrued_fees(env: &Env, amount: i128) {
    env.storage().instance().set(&ACCRUED_FEES, &amount);
}

// ── Pool registry ───────────────────────────────────────────────────────────

fn pool_key(pool_id: u32) -> (Symbol, u32) {
    (POOL, pool_id)
}

/// Number of registered pools. Ids are `0..pool_count`.
pub fn pool_count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_CTR).unwrap_or(0)
}

/// Append `pool` to the registry and return its id.
pub fn push_pool(env: &Env, pool: &PoolState) -> Result<u32, LedgerError> {
    let pool_id = pool_count(env);
    let next = pool_id
        .checked_add(1)
        .ok_or(LedgerError::ArithmeticOverflow)?;
    store_pool(env, pool_id, pool);
    env.storage().instance().set(&POOL_CTR, &next);
    Ok(pool_id)
}

pub fn get_pool(env: &Env, pool_id: u32) -> Result<PoolState, LedgerError> {
    env.storage()
        .persistent()
        .get(&pool_key(pool_id))
        .ok_or(LedgerError::InvalidPool)
}

pub fn store_pool(env: &Env, pool_id: u32, pool: &PoolState) {
    let key = pool_key(pool_id);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Positions ───────────────────────────────────────────────────────────────

fn position_key(pool_id: u32, user: &Address) -> (Symbol, u32, Address) {
    (POSITION, pool_id, user.clone())
}

/// The user's position, or an empty one if they never deposited or voted.
pub fn get_position(env: &Env, pool_id: u32, user: &Address) -> UserPosition {
    env.storage()
        .persistent()
        .get(&position_key(pool_id, user))
        .unwrap_or_else(|| UserPosition::empty(env))
}

pub fn has_position(env: &Env, pool_id: u32, user: &Address) -> bool {
    env.storage().persistent().has(&position_key(pool_id, user))
}

pub fn store_position(env: &Env, pool_id: u32, user: &Address, position: &UserPosition) {
    let key = position_key(pool_id, user);
    env.storage().persistent().set(&key, position);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
