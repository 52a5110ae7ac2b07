//! Vote-boosted contribution.
//!
//! ```text
//! floor   = deposit × 40 / 100
//! bonus   = total_deposit × user_votes / total_votes
//! contrib = min(floor + bonus, deposit)
//! ```
//!
//! A depositor with no votes counts at 0.4× their deposit. Votes lift that
//! toward 1.0× (2.5× the unboosted contribution) in proportion to the user's
//! share of the pool's votes, scaled by the pool's total deposit, so a small
//! depositor holding a large vote share reaches the cap quickly.
//!
//! The result is non-decreasing in `user_votes` and always lies in
//! `[floor, deposit]`.

use common::math::mul_div;

pub const FLOOR_NUMERATOR: i128 = 40;
pub const BOOST_DENOMINATOR: i128 = 100;

/// Contribution of a `deposit` given the user's and the pool's votes.
///
/// Returns `None` on negative inputs or overflow.
pub fn boosted_contribution(
    deposit: i128,
    total_deposit: i128,
    user_votes: i128,
    total_votes: i128,
) -> Option<i128> {
    let floor = mul_div(deposit, FLOOR_NUMERATOR, BOOST_DENOMINATOR)?;
    if total_votes == 0 {
        return Some(floor);
    }
    let bonus = mul_div(total_deposit, user_votes, total_votes)?;
    Some(floor.checked_add(bonus)?.min(deposit))
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;

    const ETHER: i128 = 1_000_000_000_000_000_000;

    #[test]
    fn no_votes_yields_the_floor() {
        assert_eq!(boosted_contribution(ETHER, ETHER, 0, 0), Some(ETHER * 4 / 10));
        assert_eq!(boosted_contribution(ETHER, ETHER, 0, 5), Some(ETHER * 4 / 10));
    }

    #[test]
    fn full_vote_share_caps_at_the_deposit() {
        assert_eq!(boosted_contribution(ETHER, ETHER, 1, 1), Some(ETHER));
        assert_eq!(boosted_contribution(ETHER / 2, ETHER / 2, ETHER, ETHER), Some(ETHER / 2));
    }

    #[test]
    fn partial_vote_share_boosts_partially() {
        // Half the votes over a 1-token pool: 0.4 + 0.5.
        assert_eq!(
            boosted_contribution(ETHER, ETHER, ETHER, 2 * ETHER),
            Some(ETHER * 9 / 10)
        );
    }

    #[test]
    fn empty_deposit_contributes_nothing() {
        assert_eq!(boosted_contribution(0, ETHER, ETHER, ETHER), Some(0));
    }

    #[test]
    fn negative_inputs_are_rejected() {
        assert_eq!(boosted_contribution(-1, 0, 0, 0), None);
        assert_eq!(boosted_contribution(1, 1, -1, 1), None);
    }
}
