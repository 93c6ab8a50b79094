//! Cross-contract interfaces consumed by the pool.
//!
//! Declared here rather than in the contract crates so a pool can call its
//! registry (and any flash borrower) without linking the other contract's
//! exported functions into its own wasm.

use soroban_sdk::{contractclient, Address, Bytes, Env};

/// Callback implemented by flash-loan borrowers.
///
/// The pool transfers `amount` of `token` out, then calls `exec_op`. Before
/// returning, the receiver must have sent `amount + fee` of `token` back to
/// the pool, otherwise the whole invocation is rolled back.
#[contractclient(name = "FlashLoanReceiverClient")]
pub trait FlashLoanReceiver {
    fn exec_op(env: Env, initiator: Address, token: Address, amount: i128, fee: i128, data: Bytes);
}

/// The slice of the registry a pool needs at run time.
#[contractclient(name = "RegistryClient")]
pub trait FeeExemptionRegistry {
    fn is_free_flash_loan(env: Env, account: Address) -> bool;
}
