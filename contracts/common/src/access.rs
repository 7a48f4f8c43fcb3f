use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::ttl::extend_persistent;

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ROLE_PREFIX: Symbol = symbol_short!("ROLE");
const MEMBERS_PREFIX: Symbol = symbol_short!("ROLE_MEM");

// ── Role Enum ────────────────────────────────────────────────────────────────

/// Roles recognised by the access registry.
///
/// - `Admin` – May change reward rates, add ranks, sweep excess liquidity,
///             and grant or revoke roles (including `Admin` itself).
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Admin = 1,
}

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn role_key(role: Role, account: &Address) -> (Symbol, Role, Address) {
    (ROLE_PREFIX, role, account.clone())
}

fn members_key(role: Role) -> (Symbol, Role) {
    (MEMBERS_PREFIX, role)
}

fn set_role(env: &Env, role: Role, account: &Address) {
    let key = role_key(role, account);
    env.storage().persistent().set(&key, &true);
    extend_persistent(env, &key);
    track_member(env, role, account);
}

fn remove_role(env: &Env, role: Role, account: &Address) {
    env.storage().persistent().remove(&role_key(role, account));
    untrack_member(env, role, account);
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Returns `true` if `account` currently holds `role`.
pub fn has_role(env: &Env, role: Role, account: &Address) -> bool {
    let key = role_key(role, account);
    let held: bool = env.storage().persistent().get(&key).unwrap_or(false);
    if held {
        extend_persistent(env, &key);
    }
    held
}

/// Assigns `role` to `account` without any caller check.
///
/// Only used while bootstrapping a contract; the caller must make sure it
/// runs exactly once.
pub fn bootstrap_role(env: &Env, role: Role, account: &Address) {
    set_role(env, role, account);
}

/// Grants `role` to `account`.
///
/// The caller must already have been authenticated via `require_auth()`.
/// Returns `false` if the caller does not hold `Admin`.
pub fn grant_role(env: &Env, caller: &Address, role: Role, account: &Address) -> bool {
    if !has_role(env, Role::Admin, caller) {
        return false;
    }
    set_role(env, role, account);
    true
}

/// Revokes `role` from `account`.
///
/// Returns `false` if the caller does not hold `Admin`.
pub fn revoke_role(env: &Env, caller: &Address, role: Role, account: &Address) -> bool {
    if !has_role(env, Role::Admin, caller) {
        return false;
    }
    remove_role(env, role, account);
    true
}

/// Drops `role` from the authenticated `account` itself.
///
/// Returns `false` if the account did not hold the role.
pub fn renounce_role(env: &Env, account: &Address, role: Role) -> bool {
    if !has_role(env, role, account) {
        return false;
    }
    remove_role(env, role, account);
    true
}

// ── Member Tracking ──────────────────────────────────────────────────────────

/// Returns every address currently holding `role`.
pub fn role_members(env: &Env, role: Role) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&members_key(role))
        .unwrap_or(Vec::new(env))
}

fn track_member(env: &Env, role: Role, account: &Address) {
    let key = members_key(role);
    let mut members = role_members(env, role);
    if members.contains(account) {
        return;
    }
    members.push_back(account.clone());
    env.storage().persistent().set(&key, &members);
    extend_persistent(env, &key);
}

fn untrack_member(env: &Env, role: Role, account: &Address) {
    let key = members_key(role);
    let mut remaining = Vec::new(env);
    for member in role_members(env, role).iter() {
        if member != *account {
            remaining.push_back(member);
        }
    }
    env.storage().persistent().set(&key, &remaining);
    extend_persistent(env, &key);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
