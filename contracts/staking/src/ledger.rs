//! Per-account staking records and the transitions that mutate them.
//!
//! Every transition settles pending reward first, then changes principal,
//! then moves `last_claim_time` to `now`. Callers work on a loaded copy and
//! only write it back once every check has passed.

use common::ttl::extend_persistent;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::rates::RateTable;
use crate::rewards;
use crate::ContractError;

const STAKER: Symbol = symbol_short!("STAKER");

/// Staking position of one account.
///
/// Unknown accounts read as the zero record. An account is staked while
/// `amount > 0`; the entry outlives a full unstake.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StakerRecord {
    pub amount: i128,
    pub reward: i128,
    pub staking_time: u64,
    pub last_claim_time: u64,
}

/// Everything a settlement needs besides the record itself.
pub struct Accrual<'a> {
    pub env: &'a Env,
    pub table: &'a RateTable,
    pub decimals: u32,
    pub now: u64,
}

fn staker_key(staker: &Address) -> (Symbol, Address) {
    (STAKER, staker.clone())
}

pub fn load(env: &Env, staker: &Address) -> StakerRecord {
    env.storage()
        .persistent()
        .get(&staker_key(staker))
        .unwrap_or_default()
}

pub fn store(env: &Env, staker: &Address, record: &StakerRecord) {
    let key = staker_key(staker);
    env.storage().persistent().set(&key, record);
    extend_persistent(env, &key);
}

impl StakerRecord {
    pub fn is_staked(&self) -> bool {
        self.amount > 0
    }

    /// Staked, or still holding reward left over from unstaking to zero.
    pub fn is_known(&self) -> bool {
        self.amount > 0 || self.reward > 0
    }

    /// Reward accrued since `last_claim_time`, not yet folded in.
    ///
    /// The rate is resolved from the total staking duration while the
    /// interval accrued over starts at the last settlement.
    pub fn pending(&self, ctx: &Accrual) -> Result<i128, ContractError> {
        if !self.is_staked() {
            return Ok(0);
        }
        let staked_for = ctx.now.saturating_sub(self.staking_time);
        let rate = ctx.table.resolve_rate(self.amount, staked_for);
        let interval = ctx.now.saturating_sub(self.last_claim_time);
        rewards::compute_reward(ctx.env, self.amount, rate, interval, ctx.decimals)
    }

    /// Stored reward plus pending reward.
    pub fn projected_reward(&self, ctx: &Accrual) -> Result<i128, ContractError> {
        self.reward
            .checked_add(self.pending(ctx)?)
            .ok_or(ContractError::ArithmeticOverflow)
    }

    /// Folds pending reward into `reward` and advances `last_claim_time`.
    pub fn settle(&mut self, ctx: &Accrual) -> Result<i128, ContractError> {
        let delta = self.pending(ctx)?;
        self.reward = self
            .reward
            .checked_add(delta)
            .ok_or(ContractError::ArithmeticOverflow)?;
        self.last_claim_time = ctx.now;
        Ok(delta)
    }

    /// Adds `amount` to the principal.
    ///
    /// A first stake (or a stake after returning to zero) starts a new
    /// staking period; leftover reward is kept.
    pub fn deposit(&mut self, ctx: &Accrual, amount: i128) -> Result<(), ContractError> {
        if self.is_staked() {
            self.settle(ctx)?;
        } else {
            self.staking_time = ctx.now;
            self.last_claim_time = ctx.now;
        }
        self.amount = self
            .amount
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Removes `amount` from the principal. Reward stays in the record.
    pub fn withdraw(&mut self, ctx: &Accrual, amount: i128) -> Result<(), ContractError> {
        if !self.is_staked() {
            return Err(ContractError::UnknownStaker);
        }
        if amount > self.amount {
            return Err(ContractError::ExcessiveUnstake);
        }
        self.settle(ctx)?;
        self.amount -= amount;
        if self.amount == 0 {
            self.staking_time = self.last_claim_time;
        }
        Ok(())
    }

    /// Settles and empties the position. Returns `(principal, reward)`.
    pub fn withdraw_all(&mut self, ctx: &Accrual) -> Result<(i128, i128), ContractError> {
        if !self.is_staked() {
            return Err(ContractError::UnknownStaker);
        }
        self.settle(ctx)?;
        let payout = (self.amount, self.reward);
        self.amount = 0;
        self.reward = 0;
        self.staking_time = 0;
        Ok(payout)
    }

    /// Settles and takes the whole reward out of the record.
    pub fn take_reward(&mut self, ctx: &Accrual) -> Result<i128, ContractError> {
        if !self.is_known() {
            return Err(ContractError::UnknownStaker);
        }
        self.settle(ctx)?;
        let reward = self.reward;
        self.reward = 0;
        Ok(reward)
    }
}

// ── Unit tests ──────────────────────────────────────────────────────────────
