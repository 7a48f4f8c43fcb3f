//! Reward rate table, duration tiers and the rate resolver.
//!
//! Every rank pairs an amount threshold with a duration threshold. A stake
//! reaches level `min(rank, tier)` where `rank` is the highest rank whose
//! `min_amount` the principal covers and `tier` the highest rank whose
//! `min_days` the staking duration covers. Read as a 2-D table, rank `r`
//! carries the tier row `[rate_0, …, rate_r, rate_r, …]`, so every rank
//! starts at the base rate and larger stakes unlock longer tier ladders.
//!
//! Rates are annual percentages scaled by `10^5` (13.579% = `13579`).

use soroban_sdk::{contracttype, symbol_short, Env, Symbol, Vec};

use crate::ContractError;

const RATE_TABLE: Symbol = symbol_short!("RATE_TBL");

pub const SECONDS_PER_DAY: u64 = 86_400;

/// Upper bound of a rate: 100% in the `10^5` scale.
pub const MAX_RATE: u32 = 100_000;

/// Default ranks as `(min whole tokens, min days, rate)`.
///
/// Patron, Iron, Silver, Gold, Platinum, Diamond.
pub const DEFAULT_RANKS: [(i128, u32, u32); 6] = [
    (0, 0, 13_579),
    (500, 30, 14_579),
    (10_000, 45, 15_079),
    (25_000, 90, 15_579),
    (50_000, 180, 15_829),
    (100_000, 365, 16_079),
];

/// Number of ranks that exist before any `add_rank` call.
pub const BASE_RANK_COUNT: u32 = DEFAULT_RANKS.len() as u32;

/// One row of the rate table.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rank {
    /// Minimum principal, in the token's smallest unit.
    pub min_amount: i128,
    /// Minimum staking duration in whole days for the matching tier.
    pub min_days: u32,
    /// Annual rate, `10^5`-scaled.
    pub rate: u32,
}

/// Ordered rank table. Thresholds ascend strictly in both columns.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RateTable {
    pub ranks: Vec<Rank>,
}

/// Rejects rates outside `(0, MAX_RATE]`.
pub fn validate_rate(rate: u32) -> Result<(), ContractError> {
    if rate == 0 || rate > MAX_RATE {
        return Err(ContractError::InvalidRateParameter);
    }
    Ok(())
}

impl RateTable {
    /// Builds the default table with amount thresholds scaled to `decimals`.
    pub fn with_defaults(env: &Env, decimals: u32) -> Result<Self, ContractError> {
        let unit = 10i128
            .checked_pow(decimals)
            .ok_or(ContractError::ArithmeticOverflow)?;

        let mut ranks = Vec::new(env);
        for (tokens, min_days, rate) in DEFAULT_RANKS {
            let min_amount = tokens
                .checked_mul(unit)
                .ok_or(ContractError::ArithmeticOverflow)?;
            ranks.push_back(Rank {
                min_amount,
                min_days,
                rate,
            });
        }
        Ok(Self { ranks })
    }

    pub fn load(env: &Env) -> Result<Self, ContractError> {
        env.storage()
            .instance()
            .get(&RATE_TABLE)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn save(&self, env: &Env) {
        env.storage().instance().set(&RATE_TABLE, self);
    }

    // ── Lookups ──────────────────────────────────────────────────────────────

    /// Highest rank whose `min_amount <= amount`; rank 0 when below all.
    pub fn rank_for_amount(&self, amount: i128) -> u32 {
        let mut rank = 0;
        for (i, entry) in self.ranks.iter().enumerate() {
            if entry.min_amount <= amount {
                rank = i as u32;
            }
        }
        rank
    }

    /// Highest tier whose day threshold `<= elapsed_seconds / 86400`.
    ///
    /// A duration sitting exactly on a threshold belongs to the higher tier.
    pub fn duration_tier(&self, elapsed_seconds: u64) -> u32 {
        let days = elapsed_seconds / SECONDS_PER_DAY;
        let mut tier = 0;
        for (i, entry) in self.ranks.iter().enumerate() {
            if u64::from(entry.min_days) <= days {
                tier = i as u32;
            }
        }
        tier
    }

    /// Rate in cell `(rank, tier)` of the rank × tier view.
    pub fn rate_at(&self, rank: u32, tier: u32) -> u32 {
        let level = rank.min(tier);
        self.ranks.get(level).map(|entry| entry.rate).unwrap_or(0)
    }

    /// Rate applicable to `amount` staked for `elapsed_seconds`.
    pub fn resolve_rate(&self, amount: i128, elapsed_seconds: u64) -> u32 {
        self.rate_at(
            self.rank_for_amount(amount),
            self.duration_tier(elapsed_seconds),
        )
    }

    /// All rates, lowest rank first.
    pub fn rates(&self, env: &Env) -> Vec<u32> {
        let mut out = Vec::new(env);
        for entry in self.ranks.iter() {
            out.push_back(entry.rate);
        }
        out
    }

    /// Rates of the ranks added above the default table.
    pub fn extension_rates(&self, env: &Env) -> Vec<u32> {
        let mut out = Vec::new(env);
        for entry in self.ranks.iter().skip(BASE_RANK_COUNT as usize) {
            out.push_back(entry.rate);
        }
        out
    }

    /// Day thresholds, one per tier.
    pub fn day_thresholds(&self, env: &Env) -> Vec<u32> {
        let mut out = Vec::new(env);
        for entry in self.ranks.iter() {
            out.push_back(entry.min_days);
        }
        out
    }

    // ── Admin mutations ──────────────────────────────────────────────────────

    /// Replaces the rate of an existing rank. Returns the previous rate.
    pub fn change_rate(&mut self, rank: u32, rate: u32) -> Result<u32, ContractError> {
        validate_rate(rate)?;
        let mut entry = self
            .ranks
            .get(rank)
            .ok_or(ContractError::InvalidRateParameter)?;
        let old_rate = entry.rate;
        entry.rate = rate;
        self.ranks.set(rank, entry);
        Ok(old_rate)
    }

    /// Appends or redefines an extension rank.
    ///
    /// `index` counts ranks above the default table. `index` equal to the
    /// current extension count appends; one less redefines the topmost
    /// extension rank. Thresholds must stay strictly above the rank below.
    /// Returns the absolute rank index written.
    pub fn add_rank(
        &mut self,
        index: u32,
        min_amount: i128,
        min_days: u32,
        rate: u32,
    ) -> Result<u32, ContractError> {
        validate_rate(rate)?;

        let extensions = self.ranks.len().saturating_sub(BASE_RANK_COUNT);
        let replacing = extensions > 0 && index == extensions - 1;
        if index != extensions && !replacing {
            return Err(ContractError::InvalidRateParameter);
        }

        let position = BASE_RANK_COUNT
            .checked_add(index)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let below = self
            .ranks
            .get(position - 1)
            .ok_or(ContractError::InvalidRateParameter)?;
        if min_amount <= below.min_amount || min_days <= below.min_days {
            return Err(ContractError::InvalidRateParameter);
        }

        let entry = Rank {
            min_amount,
            min_days,
            rate,
        };
        if replacing {
            self.ranks.set(position, entry);
        } else {
            self.ranks.push_back(entry);
        }
        Ok(position)
    }
}

// ── Unit tests ──────────────────────────────────────────────────────────────
