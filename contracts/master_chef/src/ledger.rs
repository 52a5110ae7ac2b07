//! Reward settlement and the provider callback protocol.
//!
//! A settlement advances one pool to the current ledger sequence:
//!
//! ```text
//! will_update → read weights → accrue → persist → did_update
//! ```
//!
//! The two hooks are issued exactly once per settlement that moves time
//! forward and never for an idle (same-block) one. Every provider call goes
//! through a `try_` client method, so a provider that traps or returns
//! garbage surfaces as `LedgerError::ProviderFailed` and the host discards
//! the whole invocation.

use common::{ContributionProviderClient, ProviderError};
use soroban_sdk::{Address, Env};

use crate::events;
use crate::rewards;
use crate::storage::{self, PoolState, UserPosition};
use crate::LedgerError;

// ── Provider calls ──────────────────────────────────────────────────────────

/// Unwrap a `try_` call to a fallible provider method.
///
/// `InsufficientBalance` is passed through so that a rejected vote
/// retraction reads the same at the ledger boundary; every other failure is
/// the provider's fault.
fn provider_result<T, C, I>(
    result: Result<Result<T, C>, Result<ProviderError, I>>,
) -> Result<T, LedgerError> {
    match result {
        Ok(Ok(value)) => Ok(value),
        Err(Ok(ProviderError::InsufficientBalance)) => Err(LedgerError::InsufficientBalance),
        _ => Err(LedgerError::ProviderFailed),
    }
}

/// Unwrap a `try_weight` call, rejecting negative weights.
fn weight_result<C, E>(result: Result<Result<i128, C>, E>) -> Result<i128, LedgerError> {
    match result {
        Ok(Ok(weight)) if weight >= 0 => Ok(weight),
        _ => Err(LedgerError::ProviderFailed),
    }
}

pub fn read_weight(env: &Env, provider: &Address, pool_id: u32) -> Result<i128, LedgerError> {
    weight_result(ContributionProviderClient::new(env, provider).try_weight(&pool_id))
}

/// Check that `provider` speaks the provider interface and is bound to this
/// ledger, returning its weight for the id it is about to be registered at.
pub fn bind_provider(env: &Env, provider: &Address, pool_id: u32) -> Result<i128, LedgerError> {
    let client = ContributionProviderClient::new(env, provider);
    match client.try_ledger() {
        Ok(Ok(ledger)) if ledger == env.current_contract_address() => {}
        _ => return Err(LedgerError::InvalidProvider),
    }
    weight_result(client.try_weight(&pool_id)).map_err(|_| LedgerError::InvalidProvider)
}

pub fn report_change(
    env: &Env,
    pool: &PoolState,
    pool_id: u32,
    user: &Address,
    delta: i128,
    is_deposit: bool,
) -> Result<i128, LedgerError> {
    let client = ContributionProviderClient::new(env, &pool.provider);
    provider_result(client.try_report_change(&pool_id, user, &delta, &is_deposit))
}

pub fn report_vote(
    env: &Env,
    pool: &PoolState,
    pool_id: u32,
    user: &Address,
    amount: i128,
    is_vote: bool,
) -> Result<i128, LedgerError> {
    let client = ContributionProviderClient::new(env, &pool.provider);
    provider_result(client.try_report_vote(&pool_id, user, &amount, &is_vote))
}

/// Hand a new allocation weight for `pool_id` to its provider.
pub fn set_weight(
    env: &Env,
    pool: &PoolState,
    pool_id: u32,
    weight: i128,
) -> Result<(), LedgerError> {
    let client = ContributionProviderClient::new(env, &pool.provider);
    provider_result(client.try_set_weight(&pool_id, &weight))
}

// ── Settlement ──────────────────────────────────────────────────────────────

/// Sum of every registered pool's live weight. `settling_weight` stands in
/// for `settling_id`, which has already been read this settlement.
fn total_weight(env: &Env, settling_id: u32, settling_weight: i128) -> Result<i128, LedgerError> {
    let mut total = 0i128;
    for pool_id in 0..storage::pool_count(env) {
        let weight = if pool_id == settling_id {
            settling_weight
        } else {
            let pool = storage::get_pool(env, pool_id)?;
            read_weight(env, &pool.provider, pool_id)?
        };
        total = total
            .checked_add(weight)
            .ok_or(LedgerError::ArithmeticOverflow)?;
    }
    Ok(total)
}

/// Advance `pool_id` to the current ledger sequence and return its state.
///
/// A second call in the same block finds nothing elapsed and returns the
/// stored state untouched, without invoking the provider.
pub fn settle(env: &Env, pool_id: u32) -> Result<PoolState, LedgerError> {
    let mut pool = storage::get_pool(env, pool_id)?;
    let now = env.ledger().sequence();
    let elapsed = now.saturating_sub(pool.last_settled_block);
    if elapsed == 0 {
        return Ok(pool);
    }

    let client = ContributionProviderClient::new(env, &pool.provider);
    provider_result(client.try_will_update(&pool_id))?;

    let weight = weight_result(client.try_weight(&pool_id))?;
    let total_weight = total_weight(env, pool_id, weight)?;

    let config = storage::get_config(env)?;
    let gross = rewards::pool_reward(config.reward_per_block, elapsed, weight, total_weight)
        .ok_or(LedgerError::ArithmeticOverflow)?;
    let (fee, net) = rewards::split_fee(gross, config.fee_numerator, config.fee_denominator)
        .ok_or(LedgerError::ArithmeticOverflow)?;
    let (acc, unshared) = rewards::accrue(
        env,
        &pool.acc_reward_per_contribution,
        pool.unshared_reward,
        pool.total_contribution,
        net,
    )
    .ok_or(LedgerError::ArithmeticOverflow)?;

    if fee > 0 {
        let fees = storage::accrued_fees(env)
            .checked_add(fee)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        storage::set_accrued_fees(env, fees);
    }

    pool.acc_reward_per_contribution = acc;
    pool.unshared_reward = unshared;
    pool.weight = weight;
    pool.last_settled_block = now;
    storage::store_pool(env, pool_id, &pool);

    provider_result(client.try_did_update(&pool_id))?;

    events::publish_settled(
        env,
        pool_id,
        now,
        net,
        fee,
        pool.acc_reward_per_contribution.clone(),
        unshared,
    );

    Ok(pool)
}

/// Settle every registered pool in id order.
pub fn settle_all(env: &Env) -> Result<(), LedgerError> {
    for pool_id in 0..storage::pool_count(env) {
        settle(env, pool_id)?;
    }
    Ok(())
}

// ── Positions ───────────────────────────────────────────────────────────────

/// Reward `position` has earned since its snapshot, against `pool`'s stored
/// accumulator.
pub fn owed(env: &Env, pool: &PoolState, position: &UserPosition) -> Result<i128, LedgerError> {
    // The accumulator never decreases; a snapshot ahead of it is corruption,
    // not overflow.
    if position.acc_paid > pool.acc_reward_per_contribution {
        return Err(LedgerError::CorruptedPosition);
    }
    rewards::earned(
        env,
        position.contribution,
        &pool.acc_reward_per_contribution,
        &position.acc_paid,
    )
    .ok_or(LedgerError::ArithmeticOverflow)
}

/// Credit everything `position` earned at its current contribution and move
/// its snapshot up to the pool's accumulator.
///
/// Adds to `claimable` rather than overwriting it. Must run before every
/// contribution change so the new level only earns from here on.
pub fn settle_user(
    env: &Env,
    pool: &PoolState,
    position: &mut UserPosition,
) -> Result<i128, LedgerError> {
    let owed = owed(env, pool, position)?;
    position.claimable = position
        .claimable
        .checked_add(owed)
        .ok_or(LedgerError::ArithmeticOverflow)?;
    position.acc_paid = pool.acc_reward_per_contribution.clone();
    Ok(owed)
}

/// Move a freshly settled `position` to `contribution` and keep the pool
/// total in step.
///
/// The pool total is derived from the old/new pair, never taken from the
/// provider, so it always equals the sum of the stored positions.
pub fn apply_contribution(
    pool: &mut PoolState,
    position: &mut UserPosition,
    contribution: i128,
) -> Result<(), LedgerError> {
    if contribution < 0 {
        return Err(LedgerError::ProviderFailed);
    }
    pool.total_contribution = pool
        .total_contribution
        .checked_sub(position.contribution)
        .and_then(|total| total.checked_add(contribution))
        .ok_or(LedgerError::ArithmeticOverflow)?;
    position.contribution = contribution;
    Ok(())
}
