//! Two-phase, time-delayed handoff of the governor role.
//!
//! The incumbent proposes a successor; once `transfer_delay` seconds have
//! passed since the proposal, anyone may finalize it. A new proposal replaces
//! the pending one and restarts the clock. There is no cancel.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::RegistryError;

const GOVERNOR: Symbol = symbol_short!("GOV");
const PENDING: Symbol = symbol_short!("PEND_GOV");
const DELAY: Symbol = symbol_short!("GOV_DLY");

/// A proposed governor and the ledger timestamp of the proposal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingTransfer {
    pub candidate: Address,
    pub requested_at: u64,
}

impl PendingTransfer {
    pub fn unlocks_at(&self, delay: u64) -> u64 {
        self.requested_at.saturating_add(delay)
    }
}

pub fn init(env: &Env, governor: &Address, delay: u64) {
    env.storage().instance().set(&GOVERNOR, governor);
    env.storage().instance().set(&DELAY, &delay);
}

pub fn incumbent(env: &Env) -> Result<Address, RegistryError> {
    env.storage()
        .instance()
        .get(&GOVERNOR)
        .ok_or(RegistryError::NotInitialized)
}

pub fn delay(env: &Env) -> u64 {
    env.storage().instance().get(&DELAY).unwrap_or(0)
}

pub fn pending(env: &Env) -> Option<PendingTransfer> {
    env.storage().instance().get(&PENDING)
}

/// Guard: `caller` must be the current governor and must have signed.
pub fn require_incumbent(env: &Env, caller: &Address) -> Result<(), RegistryError> {
    caller.require_auth();
    if *caller != incumbent(env)? {
        return Err(RegistryError::NotAuthorized);
    }
    Ok(())
}

/// Phase one: record `candidate` as the pending governor.
pub fn propose(
    env: &Env,
    caller: &Address,
    candidate: &Address,
) -> Result<PendingTransfer, RegistryError> {
    require_incumbent(env, caller)?;
    if common::is_null(env, candidate) {
        return Err(RegistryError::ZeroAddress);
    }

    let pending = PendingTransfer {
        candidate: candidate.clone(),
        requested_at: env.ledger().timestamp(),
    };
    env.storage().instance().set(&PENDING, &pending);
    Ok(pending)
}

/// Phase two: promote the pending candidate once the delay has elapsed.
///
/// Returns `(previous_governor, new_governor)`.
pub fn finalize(env: &Env) -> Result<(Address, Address), RegistryError> {
    let pending = pending(env).ok_or(RegistryError::NoPendingTransfer)?;
    if env.ledger().timestamp() < pending.unlocks_at(delay(env)) {
        return Err(RegistryError::TooEarly);
    }

    let previous = incumbent(env)?;
    env.storage().instance().set(&GOVERNOR, &pending.candidate);
    env.storage().instance().remove(&PENDING);
    Ok((previous, pending.candidate))
}
