use soroban_sdk::{Env, U256};

use crate::ContractError;

/// 365 days; leap years are not special-cased.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Rates are percentages carrying three decimals, i.e. scaled by `10^5`.
pub const RATE_SCALE_DECIMALS: u32 = 5;

/// Largest token precision accepted at `initialize`.
///
/// At 18 decimals the worst case `i128::MAX × rate_per_second(MAX_RATE) ×
/// u64::MAX` stays below `2^256`, so the `U256` product cannot trap.
pub const MAX_DECIMALS: u32 = 18;

// ── Core accrual ────────────────────────────────────────────────────────────

/// Per-second rate for a `10^5`-scaled annual `rate`, scaled by `10^decimals`.
///
/// ```text
/// rate_per_second = rate × 10^decimals / SECONDS_PER_YEAR
/// ```
pub fn rate_per_second(rate: u32, decimals: u32) -> Result<u128, ContractError> {
    let scale = 10u128
        .checked_pow(decimals)
        .ok_or(ContractError::ArithmeticOverflow)?;
    let scaled = scale
        .checked_mul(u128::from(rate))
        .ok_or(ContractError::ArithmeticOverflow)?;
    Ok(scaled / u128::from(SECONDS_PER_YEAR))
}

/// Reward owed on `principal` over `elapsed` seconds at annual `rate`.
///
/// ```text
/// reward = principal × rate_per_second × elapsed / 10^(decimals + 5)
/// ```
///
/// The product is carried in 256 bits and floored once at the end. A zero
/// principal, rate or interval yields zero. `decimals` above
/// [`MAX_DECIMALS`] is rejected up front: a `U256` overflow traps the host
/// rather than returning an error.
pub fn compute_reward(
    env: &Env,
    principal: i128,
    rate: u32,
    elapsed: u64,
    decimals: u32,
) -> Result<i128, ContractError> {
    if decimals > MAX_DECIMALS {
        return Err(ContractError::UnsupportedDecimals);
    }
    if principal <= 0 || rate == 0 || elapsed == 0 {
        return Ok(0);
    }

    let per_second = rate_per_second(rate, decimals)?;
    let normalizer = decimals
        .checked_add(RATE_SCALE_DECIMALS)
        .and_then(|exp| 10u128.checked_pow(exp))
        .ok_or(ContractError::ArithmeticOverflow)?;

    let product = U256::from_u128(env, principal as u128)
        .mul(&U256::from_u128(env, per_second))
        .mul(&U256::from_u128(env, u128::from(elapsed)));
    let reward = product
        .div(&U256::from_u128(env, normalizer))
        .to_u128()
        .ok_or(ContractError::ArithmeticOverflow)?;

    i128::try_from(reward).map_err(|_| ContractError::ArithmeticOverflow)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
