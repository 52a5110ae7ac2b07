use common::math::PRECISION;
use master_chef::rewards::{accrue, earned, pool_reward, split_fee};
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::{Env, I256};

const ETHER: i128 = 1_000_000_000_000_000_000;

/// A pool allocation request within realistic token magnitudes.
#[derive(Arbitrary, Debug)]
struct Allocation {
    #[proptest(strategy = "0i128..=1_000_000 * ETHER")]
    reward_per_block: i128,
    #[proptest(strategy = "0u32..=1_000_000")]
    elapsed: u32,
    #[proptest(strategy = "0i128..=1_000_000 * ETHER")]
    weight: i128,
    #[proptest(strategy = "0i128..=1_000_000 * ETHER")]
    other_weight: i128,
}

proptest! {
    #[test]
    fn pool_reward_never_exceeds_emission(a in any::<Allocation>()) {
        let total = a.weight + a.other_weight;
        let gross = pool_reward(a.reward_per_block, a.elapsed, a.weight, total).unwrap();
        prop_assert!(gross >= 0);
        prop_assert!(gross <= a.reward_per_block * i128::from(a.elapsed));
    }

    #[test]
    fn two_pools_never_share_more_than_emitted(a in any::<Allocation>()) {
        let total = a.weight + a.other_weight;
        let first = pool_reward(a.reward_per_block, a.elapsed, a.weight, total).unwrap();
        let second = pool_reward(a.reward_per_block, a.elapsed, a.other_weight, total).unwrap();
        prop_assert!(first + second <= a.reward_per_block * i128::from(a.elapsed));
    }

    #[test]
    fn fee_and_net_add_up(
        gross in 0i128..=1_000_000_000 * ETHER,
        denominator in 1i128..=1_000_000,
        share in 0u32..=100,
    ) {
        let numerator = denominator * i128::from(share) / 100;
        let (fee, net) = split_fee(gross, numerator, denominator).unwrap();
        prop_assert_eq!(fee + net, gross);
        prop_assert!(fee >= 0 && net >= 0);
    }

    #[test]
    fn contributors_never_receive_more_than_accrued(
        net in 0i128..=1_000_000 * ETHER,
        shares in prop::collection::vec(1i128..=1_000_000 * ETHER, 1..8),
    ) {
        let env = Env::default();
        let zero = I256::from_i32(&env, 0);
        let total: i128 = shares.iter().sum();
        let (acc, unshared) = accrue(&env, &zero, 0, total, net).unwrap();
        prop_assert_eq!(unshared, 0);

        let paid: i128 = shares.iter().map(|c| earned(&env, *c, &acc, &zero).unwrap()).sum();
        prop_assert!(paid <= net);
    }

    #[test]
    fn late_contributor_at_huge_accumulator_earns_at_most_net(
        dust_blocks in 1u32..=1_000_000,
        net in 0i128..=1_000_000 * ETHER,
        contribution in 1i128..=1_000_000_000 * ETHER,
    ) {
        let env = Env::default();
        let zero = I256::from_i32(&env, 0);

        // A single base unit alone in the pool for a long stretch.
        let per_block = 1_000_000 * ETHER;
        let (dusty, _) = accrue(&env, &zero, 0, 1, per_block).unwrap();
        let start = dusty.mul(&I256::from_i128(&env, i128::from(dust_blocks)));

        let (acc, _) = accrue(&env, &start, 0, contribution + 1, net).unwrap();
        let late = earned(&env, contribution, &acc, &start).unwrap();
        let dust = earned(&env, 1, &acc, &start).unwrap();
        prop_assert!(late >= 0);
        prop_assert!(late + dust <= net);
        prop_assert_eq!(earned(&env, contribution, &acc, &acc), Some(0));
    }

    #[test]
    fn accumulator_only_grows(
        acc in 0i128..=i128::MAX / 2,
        total in 0i128..=1_000_000 * ETHER,
        net in 0i128..=1_000_000 * ETHER,
    ) {
        let env = Env::default();
        let acc = I256::from_i128(&env, acc).mul(&I256::from_i128(&env, PRECISION));
        let (next, unshared) = accrue(&env, &acc, 0, total, net).unwrap();
        prop_assert!(next >= acc);
        if total == 0 {
            prop_assert_eq!(unshared, net);
        }
    }
}
