#![allow(deprecated)] // events().publish migration tracked separately

use common::access::Role;
use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub token: Address,
    pub treasury: Address,
    pub decimals: u32,
    pub timestamp: u64,
}

/// Fired when a user deposits stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub staked: i128,
    pub pool: i128,
    pub timestamp: u64,
}

/// Fired on a partial (or exact) principal withdrawal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub remaining: i128,
    pub pool: i128,
    pub timestamp: u64,
}

/// Fired when a user exits with principal and reward in one transfer.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedAllEvent {
    pub staker: Address,
    pub principal: i128,
    pub reward: i128,
    pub pool: i128,
    pub timestamp: u64,
}

/// Fired when a user claims accumulated rewards.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub staker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateChangedEvent {
    pub rank: u32,
    pub old_rate: u32,
    pub new_rate: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RankAddedEvent {
    pub rank: u32,
    pub min_amount: i128,
    pub min_days: u32,
    pub rate: u32,
    pub timestamp: u64,
}

/// Fired when excess liquidity is swept to the treasury.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LiquiditySweptEvent {
    pub treasury: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreasurySetEvent {
    pub old_treasury: Address,
    pub new_treasury: Address,
    pub timestamp: u64,
}

/// Fired when a role is granted or revoked.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleChangedEvent {
    pub role: Role,
    pub account: Address,
    pub sender: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    token: Address,
    treasury: Address,
    decimals: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            token,
            treasury,
            decimals,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(env: &Env, staker: Address, amount: i128, staked: i128, pool: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            amount,
            staked,
            pool,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(env: &Env, staker: Address, amount: i128, remaining: i128, pool: i128) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), staker.clone()),
        UnstakedEvent {
            staker,
            amount,
            remaining,
            pool,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked_all(
    env: &Env,
    staker: Address,
    principal: i128,
    reward: i128,
    pool: i128,
) {
    env.events().publish(
        (symbol_short!("UNSTK_ALL"), staker.clone()),
        UnstakedAllEvent {
            staker,
            principal,
            reward,
            pool,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_claimed(env: &Env, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("CLMD"), staker.clone()),
        RewardClaimedEvent {
            staker,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rate_changed(env: &Env, rank: u32, old_rate: u32, new_rate: u32) {
    env.events().publish(
        (symbol_short!("RATE_SET"), rank),
        RateChangedEvent {
            rank,
            old_rate,
            new_rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rank_added(env: &Env, rank: u32, min_amount: i128, min_days: u32, rate: u32) {
    env.events().publish(
        (symbol_short!("RANK_ADD"), rank),
        RankAddedEvent {
            rank,
            min_amount,
            min_days,
            rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_liquidity_swept(env: &Env, treasury: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("SWEPT"), treasury.clone()),
        LiquiditySweptEvent {
            treasury,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_treasury_set(env: &Env, old_treasury: Address, new_treasury: Address) {
    env.events().publish(
        (symbol_short!("TRSY_SET"),),
        TreasurySetEvent {
            old_treasury,
            new_treasury,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_granted(env: &Env, role: Role, account: Address, sender: Address) {
    env.events().publish(
        (symbol_short!("ROLE_GRNT"), account.clone()),
        RoleChangedEvent {
            role,
            account,
            sender,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_revoked(env: &Env, role: Role, account: Address, sender: Address) {
    env.events().publish(
        (symbol_short!("ROLE_RVK"), account.clone()),
        RoleChangedEvent {
            role,
            account,
            sender,
            timestamp: env.ledger().timestamp(),
        },
    );
}
