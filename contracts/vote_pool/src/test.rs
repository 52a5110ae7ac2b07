use crate::{VotePoolContract, VotePoolContractClient};
use common::ProviderError;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::{StellarAssetClient, TokenClient},
    Address, Env,
};

const ETHER: i128 = 1_000_000_000_000_000_000;

struct Setup<'a> {
    client: VotePoolContractClient<'a>,
    vote_token: Address,
    alice: Address,
    bob: Address,
}

fn setup(env: &Env) -> Setup<'_> {
    env.mock_all_auths_allowing_non_root_auth();

    let token_admin = Address::generate(env);
    let vote_token = env
        .register_stellar_asset_contract_v2(token_admin)
        .address();

    let contract_id = env.register(VotePoolContract, ());
    let client = VotePoolContractClient::new(env, &contract_id);
    let ledger = Address::generate(env);
    client.initialize(&ledger, &vote_token);

    let alice = Address::generate(env);
    let bob = Address::generate(env);
    let minter = StellarAssetClient::new(env, &vote_token);
    minter.mint(&alice, &(10 * ETHER));
    minter.mint(&bob, &(10 * ETHER));

    Setup {
        client,
        vote_token,
        alice,
        bob,
    }
}

#[test]
fn test_initialize_twice_fails() {
    let env = Env::default();
    let s = setup(&env);

    let ledger = Address::generate(&env);
    let result = s.client.try_initialize(&ledger, &s.vote_token);
    assert_eq!(result, Err(Ok(ProviderError::AlreadyInitialized)));
}

#[test]
fn test_deposit_without_votes_hits_the_floor() {
    let env = Env::default();
    let s = setup(&env);

    assert_eq!(s.client.contribution_of(&1, &s.alice), 0);

    let c = s.client.report_change(&1, &s.alice, &ETHER, &true);
    assert_eq!(c, ETHER * 4 / 10);
    assert_eq!(s.client.deposit_of(&1, &s.alice), ETHER);

    let c = s.client.report_change(&1, &s.alice, &(ETHER / 2), &false);
    assert_eq!(c, ETHER / 2 * 4 / 10);
    assert_eq!(s.client.deposit_of(&1, &s.alice), ETHER / 2);
}

#[test]
fn test_vote_raises_pool_weight() {
    let env = Env::default();
    let s = setup(&env);

    assert_eq!(s.client.weight(&1), 0);

    s.client.report_vote(&1, &s.alice, &ETHER, &true);

    assert_eq!(s.client.user_weight(&1, &s.alice), ETHER);
    assert_eq!(s.client.weight(&1), ETHER);
    assert_eq!(
        TokenClient::new(&env, &s.vote_token).balance(&s.alice),
        9 * ETHER
    );
}

#[test]
fn test_weight_follows_votes_only() {
    let env = Env::default();
    let s = setup(&env);

    s.client.report_vote(&1, &s.alice, &ETHER, &true);

    let result = s.client.try_set_weight(&1, &(5 * ETHER));
    assert_eq!(result, Err(Ok(ProviderError::WeightUnsupported)));
    assert_eq!(s.client.weight(&1), ETHER);
}

#[test]
fn test_vote_and_deposit_boost() {
    let env = Env::default();
    let s = setup(&env);

    s.client.report_change(&1, &s.alice, &ETHER, &true);

    // Sole voter over a pool she alone deposits in: fully boosted.
    let c = s.client.report_vote(&1, &s.alice, &ETHER, &true);
    assert_eq!(c, ETHER);

    let c = s.client.report_change(&1, &s.alice, &(ETHER / 2), &false);
    assert_eq!(c, ETHER / 2);

    // Bob takes half the votes without depositing.
    let c = s.client.report_vote(&1, &s.bob, &ETHER, &true);
    assert_eq!(c, 0);

    let c = s.client.report_change(&1, &s.alice, &(ETHER / 2), &true);
    assert_eq!(c, ETHER * 4 / 10 + ETHER / 2);
}

#[test]
fn test_retract_vote() {
    let env = Env::default();
    let s = setup(&env);

    s.client.report_change(&0, &s.alice, &ETHER, &true);
    s.client.report_vote(&0, &s.alice, &(2 * ETHER), &true);

    let c = s.client.report_vote(&0, &s.alice, &(2 * ETHER), &false);
    assert_eq!(c, ETHER * 4 / 10);
    assert_eq!(s.client.weight(&0), 0);
    assert_eq!(
        TokenClient::new(&env, &s.vote_token).balance(&s.alice),
        10 * ETHER
    );
}

#[test]
fn test_retract_more_than_voted_fails() {
    let env = Env::default();
    let s = setup(&env);

    s.client.report_vote(&0, &s.alice, &ETHER, &true);

    let result = s.client.try_report_vote(&0, &s.alice, &(ETHER + 1), &false);
    assert_eq!(result, Err(Ok(ProviderError::InsufficientBalance)));
    assert_eq!(s.client.user_weight(&0, &s.alice), ETHER);
}

#[test]
fn test_settlement_round_pairs_hooks() {
    let env = Env::default();
    let s = setup(&env);

    env.ledger().set_sequence_number(42);

    s.client.will_update(&0);
    assert_eq!(
        s.client.try_will_update(&0),
        Err(Ok(ProviderError::HookOutOfOrder))
    );
    s.client.did_update(&0);

    assert_eq!(s.client.epoch(&0), 1);
    assert_eq!(s.client.last_synced(&0), 42);
    assert_eq!(
        s.client.try_did_update(&0),
        Err(Ok(ProviderError::HookOutOfOrder))
    );
}

#[test]
fn test_only_ledger_may_report() {
    let env = Env::default();
    let token_admin = Address::generate(&env);
    let vote_token = env
        .register_stellar_asset_contract_v2(token_admin)
        .address();
    let contract_id = env.register(VotePoolContract, ());
    let client = VotePoolContractClient::new(&env, &contract_id);
    client.initialize(&Address::generate(&env), &vote_token);

    let user = Address::generate(&env);
    assert!(client.try_report_change(&0, &user, &ETHER, &true).is_err());
    assert!(client.try_report_vote(&0, &user, &ETHER, &true).is_err());
    assert!(client.try_will_update(&0).is_err());
    assert_eq!(client.deposit_of(&0, &user), 0);
}
