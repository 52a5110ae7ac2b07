use common::math::{mul_div, PRECISION};
use soroban_sdk::{Env, I256};

// ── Pool allocation ─────────────────────────────────────────────────────────

/// Gross reward owed to one pool for `elapsed` blocks.
///
/// ```text
/// gross = reward_per_block × elapsed × weight / total_weight
/// ```
///
/// A pool with zero weight, or a registry whose weights sum to zero, earns
/// nothing. Division floors; the remainder is never minted.
pub fn pool_reward(
    reward_per_block: i128,
    elapsed: u32,
    weight: i128,
    total_weight: i128,
) -> Option<i128> {
    if weight == 0 || total_weight == 0 {
        return Some(0);
    }
    let emitted = reward_per_block.checked_mul(i128::from(elapsed))?;
    mul_div(emitted, weight, total_weight)
}

/// Split `gross` into `(fee, net)` using a `numerator / denominator` fee.
pub fn split_fee(gross: i128, numerator: i128, denominator: i128) -> Option<(i128, i128)> {
    let fee = mul_div(gross, numerator, denominator)?;
    let net = gross.checked_sub(fee)?;
    Some((fee, net))
}

// ── Accumulator ─────────────────────────────────────────────────────────────
//
// The accumulator is a host `I256`. With a dust total contribution a single
// block can move it by `net × PRECISION`, which would exhaust an `i128` within
// days of ledger time.

/// Fold `net` reward into a pool's accumulator.
///
/// Returns the new `(acc_reward_per_contribution, unshared_reward)` pair.
///
/// ```text
/// total == 0  →  unshared += net
/// total  > 0  →  acc += net × PRECISION / total
/// ```
///
/// With nobody to credit, the reward is parked in `unshared` rather than
/// divided by zero or dropped. The flooring remainder of the second branch is
/// dust that stays unminted.
pub fn accrue(
    env: &Env,
    acc: &I256,
    unshared: i128,
    total_contribution: i128,
    net: i128,
) -> Option<(I256, i128)> {
    if net < 0 || total_contribution < 0 {
        return None;
    }
    if total_contribution == 0 {
        return Some((acc.clone(), unshared.checked_add(net)?));
    }
    let delta = I256::from_i128(env, net)
        .mul(&I256::from_i128(env, PRECISION))
        .div(&I256::from_i128(env, total_contribution));
    Some((acc.add(&delta), unshared))
}

/// Reward a contribution earned while the accumulator moved from `acc_paid`
/// to `acc`.
///
/// ```text
/// earned = contribution × (acc − acc_paid) / PRECISION
/// ```
///
/// Only the window since the position's last snapshot is multiplied, so the
/// product is bounded by the reward actually minted in that window. Returns
/// `None` if the snapshot is ahead of the accumulator or the result does not
/// fit in `i128`.
pub fn earned(env: &Env, contribution: i128, acc: &I256, acc_paid: &I256) -> Option<i128> {
    if contribution < 0 || acc < acc_paid {
        return None;
    }
    I256::from_i128(env, contribution)
        .mul(&acc.sub(acc_paid))
        .div(&I256::from_i128(env, PRECISION))
        .to_i128()
}

// ── Unit tests ──────────────────────────────────────────────────────────────
