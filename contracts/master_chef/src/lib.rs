#![no_std]

pub mod events;
pub mod ledger;
pub mod rewards;
pub mod storage;

use soroban_sdk::{contract, contractimpl, token, Address, Env, I256};

pub use storage::{Config, PoolState, UserPosition};

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum LedgerError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidPool = 4,
    InvalidProvider = 5,
    InvalidInput = 6,
    InsufficientContribution = 7,
    InsufficientBalance = 8,
    ArithmeticOverflow = 9,
    ProviderFailed = 10,
    CorruptedPosition = 11,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct MasterChefContract;

#[contractimpl]
impl MasterChefContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `reward_token`     – token paid out on `claim_reward`; the ledger
    ///   must be funded with it.
    /// * `reward_per_block` – reward minted per ledger sequence, split across
    ///   all pools by weight.
    /// * `fee_numerator` / `fee_denominator` – protocol fee skimmed from every
    ///   pool's gross reward and owed to `fee_recipient`.
    pub fn initialize(
        env: Env,
        admin: Address,
        reward_token: Address,
        reward_per_block: i128,
        fee_numerator: i128,
        fee_denominator: i128,
        fee_recipient: Address,
    ) -> Result<(), LedgerError> {
        if storage::is_initialized(&env) {
            return Err(LedgerError::AlreadyInitialized);
        }
        if reward_per_block < 0
            || fee_denominator <= 0
            || fee_numerator < 0
            || fee_numerator > fee_denominator
        {
            return Err(LedgerError::InvalidInput);
        }

        let config = Config {
            admin: admin.clone(),
            reward_token: reward_token.clone(),
            reward_per_block,
            fee_numerator,
            fee_denominator,
            fee_recipient: fee_recipient.clone(),
        };
        storage::store_config(&env, &config);

        events::publish_initialized(
            &env,
            admin,
            reward_token,
            reward_per_block,
            fee_numerator,
            fee_denominator,
            fee_recipient,
        );

        Ok(())
    }

    // ── Pool registry ───────────────────────────────────────────────────────

    /// Register a pool backed by `provider` and return its id.
    ///
    /// Ids are dense and assigned in registration order starting at 0. Every
    /// existing pool is settled first, so the newcomer's weight only dilutes
    /// allocation from this block on.
    pub fn register_pool(
        env: Env,
        admin: Address,
        deposit_token: Address,
        provider: Address,
    ) -> Result<u32, LedgerError> {
        Self::require_initialized(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;

        let pool_id = storage::pool_count(&env);
        let weight = ledger::bind_provider(&env, &provider, pool_id)?;

        ledger::settle_all(&env)?;

        let pool = PoolState {
            deposit_token: deposit_token.clone(),
            provider: provider.clone(),
            weight,
            acc_reward_per_contribution: I256::from_i32(&env, 0),
            total_contribution: 0,
            unshared_reward: 0,
            last_settled_block: env.ledger().sequence(),
        };
        let pool_id = storage::push_pool(&env, &pool)?;

        events::publish_pool_registered(&env, pool_id, deposit_token, provider, weight);

        Ok(pool_id)
    }

    /// Change the allocation weight of `pool_id` through its provider.
    ///
    /// Every pool is settled first, so the old weights cover all blocks up to
    /// this one and the new weight only applies from here on. Providers that
    /// derive their weight from votes reject the call (`ProviderFailed`).
    pub fn set_pool_weight(
        env: Env,
        admin: Address,
        pool_id: u32,
        weight: i128,
    ) -> Result<(), LedgerError> {
        Self::require_initialized(&env)?;
        admin.require_auth();
        Self::require_admin(&env, &admin)?;
        if weight < 0 {
            return Err(LedgerError::InvalidInput);
        }

        storage::get_pool(&env, pool_id)?;
        ledger::settle_all(&env)?;
        let mut pool = storage::get_pool(&env, pool_id)?;

        ledger::set_weight(&env, &pool, pool_id, weight)?;
        pool.weight = ledger::read_weight(&env, &pool.provider, pool_id)?;
        storage::store_pool(&env, pool_id, &pool);

        events::publish_pool_weight_set(&env, pool_id, pool.weight);

        Ok(())
    }

    // ── Positions ───────────────────────────────────────────────────────────

    /// Deposit `amount` of the pool's deposit token.
    ///
    /// The pool is settled and the user's reward at the old contribution is
    /// credited before the provider recomputes the contribution, so the new
    /// level only earns from this block on.
    pub fn deposit(env: Env, user: Address, pool_id: u32, amount: i128) -> Result<(), LedgerError> {
        Self::require_initialized(&env)?;
        user.require_auth();
        if amount <= 0 {
            return Err(LedgerError::InvalidInput);
        }

        let mut pool = ledger::settle(&env, pool_id)?;

        token::Client::new(&env, &pool.deposit_token).transfer(
            &user,
            &env.current_contract_address(),
            &amount,
        );

        let mut position = storage::get_position(&env, pool_id, &user);
        ledger::settle_user(&env, &pool, &mut position)?;
        position.amount = position
            .amount
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        let contribution = ledger::report_change(&env, &pool, pool_id, &user, amount, true)?;
        ledger::apply_contribution(&mut pool, &mut position, contribution)?;

        storage::store_pool(&env, pool_id, &pool);
        storage::store_position(&env, pool_id, &user, &position);

        events::publish_deposited(
            &env,
            pool_id,
            user,
            amount,
            position.contribution,
            pool.total_contribution,
        );

        Ok(())
    }

    /// Withdraw `amount` of the user's raw deposit.
    ///
    /// Fails with `InsufficientContribution` if the user holds less than
    /// `amount`. Pending reward stays credited and can be claimed later.
    pub fn withdraw(env: Env, user: Address, pool_id: u32, amount: i128) -> Result<(), LedgerError> {
        Self::require_initialized(&env)?;
        user.require_auth();
        if amount <= 0 {
            return Err(LedgerError::InvalidInput);
        }

        let mut pool = ledger::settle(&env, pool_id)?;

        let mut position = storage::get_position(&env, pool_id, &user);
        if position.amount < amount {
            return Err(LedgerError::InsufficientContribution);
        }
        ledger::settle_user(&env, &pool, &mut position)?;
        position.amount -= amount;

        let contribution = ledger::report_change(&env, &pool, pool_id, &user, amount, false)?;
        ledger::apply_contribution(&mut pool, &mut position, contribution)?;

        storage::store_pool(&env, pool_id, &pool);
        storage::store_position(&env, pool_id, &user, &position);

        token::Client::new(&env, &pool.deposit_token).transfer(
            &env.current_contract_address(),
            &user,
            &amount,
        );

        events::publish_withdrawn(
            &env,
            pool_id,
            user,
            amount,
            position.contribution,
            pool.total_contribution,
        );

        Ok(())
    }

    /// Pay out everything the user has earned in `pool_id` and return it.
    ///
    /// Returns 0 without transferring when nothing is owed.
    pub fn claim_reward(env: Env, user: Address, pool_id: u32) -> Result<i128, LedgerError> {
        Self::require_initialized(&env)?;
        user.require_auth();

        let pool = ledger::settle(&env, pool_id)?;

        if !storage::has_position(&env, pool_id, &user) {
            events::publish_reward_claimed(&env, pool_id, user, 0);
            return Ok(0);
        }

        let mut position = storage::get_position(&env, pool_id, &user);
        ledger::settle_user(&env, &pool, &mut position)?;

        let amount = position.claimable;
        position.claimable = 0;
        storage::store_position(&env, pool_id, &user, &position);

        if amount > 0 {
            let config = storage::get_config(&env)?;
            token::Client::new(&env, &config.reward_token).transfer(
                &env.current_contract_address(),
                &user,
                &amount,
            );
        }

        events::publish_reward_claimed(&env, pool_id, user, amount);

        Ok(amount)
    }

    // ── Votes ───────────────────────────────────────────────────────────────

    /// Stake `amount` of the vote token on `pool_id` through its provider.
    ///
    /// Raises the pool's weight and the user's boost. All pools are settled
    /// first because a weight change shifts every pool's share.
    pub fn vote_for_pool_weight(
        env: Env,
        user: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<(), LedgerError> {
        Self::change_vote(&env, user, pool_id, amount, true)
    }

    /// Unstake `amount` of previously cast votes. Fails with
    /// `InsufficientBalance` if the user has fewer votes on the pool.
    pub fn retract_vote(
        env: Env,
        user: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<(), LedgerError> {
        Self::change_vote(&env, user, pool_id, amount, false)
    }

    // ── Settlement ──────────────────────────────────────────────────────────

    /// Force accrual of `pool_id` up to the current block.
    pub fn settle(env: Env, pool_id: u32) -> Result<(), LedgerError> {
        Self::require_initialized(&env)?;
        ledger::settle(&env, pool_id)?;
        Ok(())
    }

    /// Force accrual of every registered pool.
    pub fn settle_all(env: Env) -> Result<(), LedgerError> {
        Self::require_initialized(&env)?;
        ledger::settle_all(&env)
    }

    /// Pay the accrued protocol fee to the configured recipient.
    ///
    /// Only fees from settlements that already happened are paid.
    pub fn collect_fees(env: Env) -> Result<i128, LedgerError> {
        let config = storage::get_config(&env)?;

        let amount = storage::accrued_fees(&env);
        if amount > 0 {
            storage::set_accrued_fees(&env, 0);
            token::Client::new(&env, &config.reward_token).transfer(
                &env.current_contract_address(),
                &config.fee_recipient,
                &amount,
            );
        }

        events::publish_fees_collected(&env, config.fee_recipient, amount);

        Ok(amount)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Snapshot of a pool's reward state as of its last settlement.
    pub fn pool_info(env: Env, pool_id: u32) -> Result<PoolState, LedgerError> {
        storage::get_pool(&env, pool_id)
    }

    pub fn pool_count(env: Env) -> u32 {
        storage::pool_count(&env)
    }

    pub fn position(env: Env, pool_id: u32, user: Address) -> Result<UserPosition, LedgerError> {
        storage::get_pool(&env, pool_id)?;
        Ok(storage::get_position(&env, pool_id, &user))
    }

    /// The user's contribution as last reported by the pool's provider.
    pub fn contribution(env: Env, pool_id: u32, user: Address) -> Result<i128, LedgerError> {
        Ok(Self::position(env, pool_id, user)?.contribution)
    }

    /// The user's raw deposit held by the ledger.
    pub fn user_amount(env: Env, pool_id: u32, user: Address) -> Result<i128, LedgerError> {
        Ok(Self::position(env, pool_id, user)?.amount)
    }

    /// Reward earned since the user's last snapshot, against the stored
    /// accumulator. Settle first for reward up to the current block.
    pub fn pending_reward(env: Env, pool_id: u32, user: Address) -> Result<i128, LedgerError> {
        let pool = storage::get_pool(&env, pool_id)?;
        let position = storage::get_position(&env, pool_id, &user);
        ledger::owed(&env, &pool, &position)
    }

    /// What `claim_reward` would pay against the stored accumulator:
    /// credited reward plus `pending_reward`.
    pub fn claimable_reward(env: Env, pool_id: u32, user: Address) -> Result<i128, LedgerError> {
        let pending = Self::pending_reward(env.clone(), pool_id, user.clone())?;
        storage::get_position(&env, pool_id, &user)
            .claimable
            .checked_add(pending)
            .ok_or(LedgerError::ArithmeticOverflow)
    }

    pub fn accrued_fees(env: Env) -> i128 {
        storage::accrued_fees(&env)
    }

    pub fn get_config(env: Env) -> Result<Config, LedgerError> {
        storage::get_config(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, LedgerError> {
        Ok(storage::get_config(&env)?.admin)
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), LedgerError> {
        if !storage::is_initialized(env) {
            return Err(LedgerError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the configured admin.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), LedgerError> {
        if storage::get_config(env)?.admin != *caller {
            return Err(LedgerError::Unauthorized);
        }
        Ok(())
    }

    fn change_vote(
        env: &Env,
        user: Address,
        pool_id: u32,
        amount: i128,
        is_vote: bool,
    ) -> Result<(), LedgerError> {
        Self::require_initialized(env)?;
        user.require_auth();
        if amount <= 0 {
            return Err(LedgerError::InvalidInput);
        }

        storage::get_pool(env, pool_id)?;
        ledger::settle_all(env)?;
        let mut pool = storage::get_pool(env, pool_id)?;

        let mut position = storage::get_position(env, pool_id, &user);
        ledger::settle_user(env, &pool, &mut position)?;

        let contribution = ledger::report_vote(env, &pool, pool_id, &user, amount, is_vote)?;
        ledger::apply_contribution(&mut pool, &mut position, contribution)?;

        storage::store_pool(env, pool_id, &pool);
        storage::store_position(env, pool_id, &user, &position);

        events::publish_vote_changed(env, pool_id, user, amount, position.contribution, is_vote);

        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
