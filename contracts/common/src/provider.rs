use soroban_sdk::{contractclient, contracterror, Address, Env};

/// Errors a contribution provider may return to the ledger.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ProviderError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    InsufficientBalance = 5,
    ArithmeticOverflow = 6,
    VotingUnsupported = 7,
    HookOutOfOrder = 8,
    WeightUnsupported = 9,
}

/// Interface every pool implementation exposes to the reward ledger.
///
/// A provider owns the per-user deposit book for the pools it serves and
/// turns it into a *contribution*, the quantity the ledger splits reward by.
/// Pool ids are the ledger's own ids; a provider serving several pools keys
/// its state by them and otherwise treats them as opaque.
///
/// Everything except the views is ledger-only: implementations must call
/// `ledger.require_auth()` before mutating state.
#[contractclient(name = "ContributionProviderClient")]
pub trait ContributionProvider {
    /// The ledger this provider is bound to.
    fn ledger(env: Env) -> Result<Address, ProviderError>;

    /// Current allocation weight of `pool_id`. Read at every settlement.
    fn weight(env: Env, pool_id: u32) -> i128;

    /// Replace the allocation weight of `pool_id`.
    ///
    /// Only the ledger calls this, after settling every pool, so a new weight
    /// never reaches back into an unsettled window. Providers that derive
    /// their weight from their own book return
    /// `ProviderError::WeightUnsupported`.
    fn set_weight(env: Env, pool_id: u32, weight: i128) -> Result<(), ProviderError>;

    /// Apply a deposit (`is_deposit`) or withdrawal of `delta` to `user`'s
    /// book and return the user's recomputed contribution.
    ///
    /// Called after the ledger has settled the pool and captured the user's
    /// pending reward at the old contribution. The result may depend only on
    /// provider state and `delta`.
    fn report_change(
        env: Env,
        pool_id: u32,
        user: Address,
        delta: i128,
        is_deposit: bool,
    ) -> Result<i128, ProviderError>;

    /// Stake (`is_vote`) or unstake `amount` of vote weight for `user` and
    /// return the user's recomputed contribution. Providers without a vote
    /// book return `ProviderError::VotingUnsupported`.
    fn report_vote(
        env: Env,
        pool_id: u32,
        user: Address,
        amount: i128,
        is_vote: bool,
    ) -> Result<i128, ProviderError>;

    /// Called by the ledger before it accrues reward for `pool_id`.
    fn will_update(env: Env, pool_id: u32) -> Result<(), ProviderError>;

    /// Called by the ledger once reward up to the current block is final.
    fn did_update(env: Env, pool_id: u32) -> Result<(), ProviderError>;
}
