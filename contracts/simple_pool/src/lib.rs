#![no_std]

pub mod events;

use common::{ContributionProvider, ProviderError};
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol};

/// Storage keys for the contract
const LEDGER: Symbol = symbol_short!("LEDGER");
const INITIALIZED: Symbol = symbol_short!("INIT");

// Per-pool and per-user persistent storage uses tuple keys
const WEIGHT: Symbol = symbol_short!("WEIGHT");
const DEPOSIT: Symbol = symbol_short!("DEP");
const TOTAL_DEPOSIT: Symbol = symbol_short!("TOT_DEP");

/// Contribution provider whose contribution is the raw deposit, 1:1.
///
/// Pool weights start at zero and only change when the ledger forwards an
/// admin's `set_pool_weight`.
#[contract]
pub struct SimplePoolContract;

#[contractimpl]
impl SimplePoolContract {
    /// Bind the provider to `ledger`.
    pub fn initialize(env: Env, ledger: Address) -> Result<(), ProviderError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ProviderError::AlreadyInitialized);
        }

        env.storage().instance().set(&LEDGER, &ledger);
        env.storage().instance().set(&INITIALIZED, &true);

        events::publish_initialized(&env, ledger);

        Ok(())
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
}

#[contractimpl]
impl ContributionProvider for SimplePoolContract {
    fn ledger(env: Env) -> Result<Address, ProviderError> {
        env.storage()
            .instance()
            .get(&LEDGER)
            .ok_or(ProviderError::NotInitialized)
    }

    fn weight(env: Env, pool_id: u32) -> i128 {
        env.storage()
            .persistent()
            .get(&(WEIGHT, pool_id))
            .unwrap_or(0)
    }

    fn set_weight(env: Env, pool_id: u32, weight: i128) -> Result<(), ProviderError> {
        Self::require_ledger(&env)?;
        if weight < 0 {
            return Err(ProviderError::InvalidInput);
        }

        env.storage().persistent().set(&(WEIGHT, pool_id), &weight);

        events::publish_weight_set(&env, pool_id, weight);

        Ok(())
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

        let old = Self::deposit_of(env.clone(), pool_id, user.clone());
        let total = Self::total_deposit(env.clone(), pool_id);
        let (new, new_total) = if is_deposit {
            (
                old.checked_add(delta).ok_or(ProviderError::ArithmeticOverflow)?,
                total.checked_add(delta).ok_or(ProviderError::ArithmeticOverflow)?,
            )
        } else {
            if old < delta {
                return Err(ProviderError::InsufficientBalance);
            }
            (old - delta, total - delta)
        };

        env.storage()
            .persistent()
            .set(&(DEPOSIT, pool_id, user), &new);
        env.storage()
            .persistent()
            .set(&(TOTAL_DEPOSIT, pool_id), &new_total);

        Ok(new)
    }

    fn report_vote(
        _env: Env,
        _pool_id: u32,
        _user: Address,
        _amount: i128,
        _is_vote: bool,
    ) -> Result<i128, ProviderError> {
        Err(ProviderError::VotingUnsupported)
    }

    fn will_update(env: Env, _pool_id: u32) -> Result<(), ProviderError> {
        Self::require_ledger(&env)
    }

    fn did_update(env: Env, _pool_id: u32) -> Result<(), ProviderError> {
        Self::require_ledger(&env)
    }
}
