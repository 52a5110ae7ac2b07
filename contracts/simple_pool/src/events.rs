use soroban_sdk::{contracttype, symbol_short, Address, Env};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub ledger: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeightSetEvent {
    pub pool_id: u32,
    pub weight: i128,
}

pub fn publish_initialized(env: &Env, ledger: Address) {
    env.events().publish((symbol_short!("INIT"),), InitializedEvent { ledger });
}

pub fn publish_weight_set(env: &Env, pool_id: u32, weight: i128) {
    env.events().publish(
        (symbol_short!("WEIGHT"), pool_id),
        WeightSetEvent { pool_id, weight },
    );
}
