//! Caller authorization policy.
//!
//! Every mutating entry point consults one of these checks instead of
//! comparing sender addresses inline. The policy is parameterized by the
//! pool's owner, its optional service account and the public-finalize
//! flag from [`PoolConfig`].

use soroban_sdk::Address;

use crate::storage::PoolConfig;

/// Require the pool owner's authorization for the current invocation.
pub fn require_owner(config: &PoolConfig) {
    config.owner.require_auth();
}

/// Whether `caller` may finalize the pool.
///
/// The owner always may; any account may once the pool was configured
/// for public finalization. The raise-gating conditions are checked
/// separately by the caller.
pub fn may_finalize(config: &PoolConfig, caller: &Address) -> bool {
    *caller == config.owner || config.public_finalize
}

/// Whether `caller` may relay calls to the crowdsale after finalization.
pub fn may_forward_calls(config: &PoolConfig, caller: &Address) -> bool {
    *caller == config.owner || config.service_account.as_ref() == Some(caller)
}
