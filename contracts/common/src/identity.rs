use soroban_sdk::{Address, Env, String};

/// Strkey of the all-zero ed25519 account, the closest Stellar analogue of
/// a null address. Nobody holds its secret key.
pub const NULL_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

pub fn null_address(env: &Env) -> Address {
    Address::from_string(&String::from_str(env, NULL_ACCOUNT))
}

/// Returns `true` if `address` is the null identity.
pub fn is_null(env: &Env, address: &Address) -> bool {
    *address == null_address(env)
}
