//! Storage time-to-live conventions shared by every contract in the workspace.

use soroban_sdk::{Env, IntoVal, Val};

/// Remaining-ledger count below which an entry's TTL gets bumped (~1 day).
pub const TTL_THRESHOLD: u32 = 17_280;
/// Ledger count an entry is extended to once it drops below the threshold (~30 days).
pub const TTL_EXTEND_TO: u32 = 518_400;

/// Extends the TTL of a persistent entry.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the TTL of the contract instance and all its instance entries.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
