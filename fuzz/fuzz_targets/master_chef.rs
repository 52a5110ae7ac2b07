#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use master_chef::{MasterChefContract, MasterChefContractClient};
use simple_pool::{SimplePoolContract, SimplePoolContractClient};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::{StellarAssetClient, TokenClient},
    Address, Env, I256,
};

const USERS: usize = 3;
const POOLS: u32 = 2;
const REWARD_PER_BLOCK: i128 = 1_000_000_000;
const START_BLOCK: u32 = 100;

#[derive(Arbitrary, Debug)]
enum Op {
    Deposit { user: u8, pool: u8, amount: u32 },
    Withdraw { user: u8, pool: u8, amount: u32 },
    Claim { user: u8, pool: u8 },
    Advance { blocks: u8 },
    Settle { pool: u8 },
    SettleAll,
    CollectFees,
    SetWeight { pool: u8, weight: u16 },
}

#[derive(Arbitrary, Debug)]
struct Input {
    weights: [u16; POOLS as usize],
    fee_numerator: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    if input.ops.len() > 64 {
        return;
    }

    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(START_BLOCK);

    let admin = Address::generate(&env);
    let reward_token = env.register_stellar_asset_contract_v2(admin.clone()).address();
    let lp_token = env.register_stellar_asset_contract_v2(admin.clone()).address();

    let chef = MasterChefContractClient::new(&env, &env.register(MasterChefContract, ()));
    chef.initialize(
        &admin,
        &reward_token,
        &REWARD_PER_BLOCK,
        &i128::from(input.fee_numerator),
        &i128::from(u8::MAX),
        &admin,
    );
    // Enough for every block the op budget can reach.
    let budget = REWARD_PER_BLOCK * 64 * i128::from(u8::MAX);
    StellarAssetClient::new(&env, &reward_token).mint(&chef.address, &budget);

    for (pool_id, weight) in (0..POOLS).zip(input.weights) {
        let provider = env.register(SimplePoolContract, ());
        let simple = SimplePoolContractClient::new(&env, &provider);
        simple.initialize(&chef.address);
        chef.register_pool(&admin, &lp_token, &provider);
        chef.set_pool_weight(&admin, &pool_id, &i128::from(weight));
    }

    let users: Vec<Address> = (0..USERS).map(|_| Address::generate(&env)).collect();
    let lp = StellarAssetClient::new(&env, &lp_token);
    for user in &users {
        lp.mint(user, &i128::from(u32::MAX));
    }

    let pick_user = |index: u8| &users[usize::from(index) % USERS];
    let pick_pool = |index: u8| u32::from(index) % POOLS;

    let mut last_acc: Vec<I256> = (0..POOLS).map(|_| I256::from_i32(&env, 0)).collect();
    let mut last_unshared = [0i128; POOLS as usize];

    for op in input.ops {
        match op {
            Op::Deposit { user, pool, amount } => {
                let _ = chef.try_deposit(pick_user(user), &pick_pool(pool), &i128::from(amount));
            }
            Op::Withdraw { user, pool, amount } => {
                let _ = chef.try_withdraw(pick_user(user), &pick_pool(pool), &i128::from(amount));
            }
            Op::Claim { user, pool } => {
                let _ = chef.try_claim_reward(pick_user(user), &pick_pool(pool));
            }
            Op::Advance { blocks } => {
                let now = env.ledger().sequence();
                env.ledger().set_sequence_number(now + u32::from(blocks));
            }
            Op::Settle { pool } => {
                chef.settle(&pick_pool(pool));
            }
            Op::SettleAll => chef.settle_all(),
            Op::CollectFees => {
                chef.collect_fees();
            }
            Op::SetWeight { pool, weight } => {
                chef.set_pool_weight(&admin, &pick_pool(pool), &i128::from(weight));
            }
        }

        for pool_id in 0..POOLS {
            let info = chef.pool_info(&pool_id);
            let slot = pool_id as usize;

            let sum: i128 = users
                .iter()
                .map(|user| chef.contribution(&pool_id, user))
                .sum();
            assert_eq!(info.total_contribution, sum, "pool total drifted from positions");
            assert!(info.acc_reward_per_contribution >= last_acc[slot], "accumulator decreased");
            assert!(info.unshared_reward >= last_unshared[slot], "unshared reward decreased");

            last_acc[slot] = info.acc_reward_per_contribution;
            last_unshared[slot] = info.unshared_reward;
        }
    }

    chef.settle_all();
    let elapsed = i128::from(env.ledger().sequence() - START_BLOCK);
    let reward = TokenClient::new(&env, &reward_token);
    let mut owed = chef.accrued_fees() + reward.balance(&admin);
    for user in &users {
        owed += reward.balance(user);
        for pool_id in 0..POOLS {
            owed += chef.claimable_reward(&pool_id, user);
        }
    }
    for pool_id in 0..POOLS {
        owed += chef.pool_info(&pool_id).unshared_reward;
    }
    assert!(owed <= REWARD_PER_BLOCK * elapsed, "more reward owed than emitted");
});
