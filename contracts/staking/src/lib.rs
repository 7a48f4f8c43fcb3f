#![no_std]

pub mod events;
pub mod ledger;
pub mod rates;
pub mod rewards;

use common::access::{self, Role};
use common::ttl::extend_instance;
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol, Vec,
};

use ledger::{Accrual, StakerRecord};
use rates::{Rank, RateTable};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");
const POOL: Symbol = symbol_short!("POOL");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    InsufficientBalance = 5,
    UnknownStaker = 6,
    ExcessiveUnstake = 7,
    InvalidRateParameter = 8,
    NoExcessLiquidity = 9,
    ArithmeticOverflow = 10,
    UnsupportedDecimals = 11,
}

// ── Configuration ────────────────────────────────────────────────────────────

/// Contract-wide settings fixed at `initialize` (treasury is adjustable).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingConfig {
    /// Token staked and paid out as reward.
    pub token: Address,
    /// Recipient of swept excess liquidity.
    pub treasury: Address,
    /// Decimals reported by the token.
    pub decimals: u32,
    /// Smallest accepted stake: one whole token.
    pub min_stake: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct TieredStakingContract;

#[contractimpl]
impl TieredStakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract.
    ///
    /// * `admin`    – receives the `Admin` role.
    /// * `token`    – SAC address of the staked token; rewards are paid in it too.
    /// * `treasury` – receives excess liquidity swept by `transfer_all_tokens`.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        treasury: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        let decimals = token::Client::new(&env, &token).decimals();
        if decimals > rewards::MAX_DECIMALS {
            return Err(ContractError::UnsupportedDecimals);
        }
        let min_stake = 10i128
            .checked_pow(decimals)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let table = RateTable::with_defaults(&env, decimals)?;

        let config = StakingConfig {
            token: token.clone(),
            treasury: treasury.clone(),
            decimals,
            min_stake,
        };

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&CONFIG, &config);
        table.save(&env);
        // POOL starts at zero; unwrap_or(0) covers the absent key.

        access::bootstrap_role(&env, Role::Admin, &admin);
        extend_instance(&env);

        events::publish_initialized(&env, admin, token, treasury, decimals);

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` tokens.
    ///
    /// An existing position is settled first so the added principal never
    /// earns retroactively. The staking period keeps its original start.
    pub fn stake_tokens(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        let config = Self::load_config(&env)?;
        staker.require_auth();

        if amount <= 0 || amount < config.min_stake {
            return Err(ContractError::InvalidAmount);
        }

        let token = token::Client::new(&env, &config.token);
        if token.balance(&staker) < amount {
            return Err(ContractError::InsufficientBalance);
        }

        // 1. Settle and grow the position on a local copy.
        let table = RateTable::load(&env)?;
        let mut record = ledger::load(&env, &staker);
        record.deposit(&Self::accrual(&env, &table, &config), amount)?;

        let pool = Self::pool(&env)
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        // 2. Commit.
        ledger::store(&env, &staker, &record);
        env.storage().instance().set(&POOL, &pool);
        extend_instance(&env);

        // 3. Pull tokens from the staker into the pool.
        token.transfer(&staker, &env.current_contract_address(), &amount);

        events::publish_staked(&env, staker, amount, record.amount, pool);

        Ok(())
    }

    // ── Unstaking ───────────────────────────────────────────────────────────

    /// Withdraw `amount` of principal.
    ///
    /// Reward is settled into the record but not paid; it stays claimable
    /// even when the principal drops to zero.
    pub fn unstake_tokens(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        let config = Self::load_config(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let table = RateTable::load(&env)?;
        let mut record = ledger::load(&env, &staker);
        record.withdraw(&Self::accrual(&env, &table, &config), amount)?;

        let token = token::Client::new(&env, &config.token);
        Self::require_solvent(&env, &token, record.reward)?;

        let pool = Self::pool(&env)
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        ledger::store(&env, &staker, &record);
        env.storage().instance().set(&POOL, &pool);
        extend_instance(&env);

        token.transfer(&env.current_contract_address(), &staker, &amount);

        events::publish_unstaked(&env, staker, amount, record.amount, pool);

        Ok(())
    }

    /// Exit completely: principal and every unclaimed reward in one transfer.
    ///
    /// Returns the total paid out.
    pub fn unstake_all(env: Env, staker: Address) -> Result<i128, ContractError> {
        let config = Self::load_config(&env)?;
        staker.require_auth();

        let table = RateTable::load(&env)?;
        let mut record = ledger::load(&env, &staker);
        let (principal, reward) = record.withdraw_all(&Self::accrual(&env, &table, &config))?;

        let token = token::Client::new(&env, &config.token);
        Self::require_solvent(&env, &token, reward)?;

        let payout = principal
            .checked_add(reward)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let pool = Self::pool(&env)
            .checked_sub(principal)
            .ok_or(ContractError::ArithmeticOverflow)?;

        ledger::store(&env, &staker, &record);
        env.storage().instance().set(&POOL, &pool);
        extend_instance(&env);

        token.transfer(&env.current_contract_address(), &staker, &payout);

        events::publish_unstaked_all(&env, staker, principal, reward, pool);

        Ok(payout)
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Claim all accumulated rewards for `staker`. Returns the amount paid.
    ///
    /// Rewards come out of the contract's excess liquidity, never out of
    /// other stakers' principal.
    pub fn claim_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        let config = Self::load_config(&env)?;
        staker.require_auth();

        let table = RateTable::load(&env)?;
        let mut record = ledger::load(&env, &staker);
        let reward = record.take_reward(&Self::accrual(&env, &table, &config))?;

        let token = token::Client::new(&env, &config.token);
        Self::require_solvent(&env, &token, reward)?;

        ledger::store(&env, &staker, &record);
        extend_instance(&env);

        if reward > 0 {
            token.transfer(&env.current_contract_address(), &staker, &reward);
        }

        events::publish_reward_claimed(&env, staker, reward);

        Ok(reward)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Stored reward plus everything accrued since the last settlement.
    pub fn show_reward(env: Env, account: Address) -> Result<i128, ContractError> {
        let config = Self::load_config(&env)?;
        let table = RateTable::load(&env)?;
        ledger::load(&env, &account).projected_reward(&Self::accrual(&env, &table, &config))
    }

    /// Raw staking record; unknown accounts read as all zeros.
    pub fn get_staker_data(env: Env, account: Address) -> StakerRecord {
        ledger::load(&env, &account)
    }

    /// Sum of all staked principal.
    pub fn get_pool(env: Env) -> i128 {
        Self::pool(&env)
    }

    /// Rate that applies to `amount` staked since `staking_time`.
    pub fn get_reward_rate(
        env: Env,
        amount: i128,
        staking_time: u64,
    ) -> Result<u32, ContractError> {
        let table = RateTable::load(&env)?;
        let elapsed = env.ledger().timestamp().saturating_sub(staking_time);
        Ok(table.resolve_rate(amount, elapsed))
    }

    /// Every rank's rate, Patron first.
    pub fn get_reward_rates(env: Env) -> Result<Vec<u32>, ContractError> {
        Ok(RateTable::load(&env)?.rates(&env))
    }

    /// Rates of ranks added above Diamond.
    pub fn get_new_reward_rates(env: Env) -> Result<Vec<u32>, ContractError> {
        Ok(RateTable::load(&env)?.extension_rates(&env))
    }

    pub fn get_ranks(env: Env) -> Result<Vec<Rank>, ContractError> {
        Ok(RateTable::load(&env)?.ranks)
    }

    /// Day thresholds of the duration tiers.
    pub fn get_duration_tiers(env: Env) -> Result<Vec<u32>, ContractError> {
        Ok(RateTable::load(&env)?.day_thresholds(&env))
    }

    pub fn get_config(env: Env) -> Result<StakingConfig, ContractError> {
        Self::load_config(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Replace the rate of an existing rank.
    ///
    /// Open positions are not settled; the new rate applies to every
    /// interval settled afterwards.
    pub fn change_rate(
        env: Env,
        caller: Address,
        rank: u32,
        rate: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let mut table = RateTable::load(&env)?;
        let old_rate = table.change_rate(rank, rate)?;
        table.save(&env);
        extend_instance(&env);

        events::publish_rate_changed(&env, rank, old_rate, rate);

        Ok(())
    }

    /// Append a rank above the current top, or redefine the topmost added rank.
    ///
    /// `index` counts ranks above the default table; `min_amount` is in the
    /// token's smallest unit.
    pub fn add_rank(
        env: Env,
        caller: Address,
        index: u32,
        min_amount: i128,
        min_days: u32,
        rate: u32,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let mut table = RateTable::load(&env)?;
        let rank = table.add_rank(index, min_amount, min_days, rate)?;
        table.save(&env);
        extend_instance(&env);

        events::publish_rank_added(&env, rank, min_amount, min_days, rate);

        Ok(rank)
    }

    /// Sweep everything above the staked principal to the treasury.
    ///
    /// Returns the amount swept.
    pub fn transfer_all_tokens(env: Env, caller: Address) -> Result<i128, ContractError> {
        let config = Self::load_config(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let token = token::Client::new(&env, &config.token);
        let excess = Self::excess_liquidity(&env, &token)?;
        if excess <= 0 {
            return Err(ContractError::NoExcessLiquidity);
        }

        extend_instance(&env);
        token.transfer(&env.current_contract_address(), &config.treasury, &excess);

        events::publish_liquidity_swept(&env, config.treasury, excess);

        Ok(excess)
    }

    pub fn set_treasury(env: Env, caller: Address, treasury: Address) -> Result<(), ContractError> {
        let mut config = Self::load_config(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let old_treasury = config.treasury.clone();
        config.treasury = treasury.clone();
        env.storage().instance().set(&CONFIG, &config);
        extend_instance(&env);

        events::publish_treasury_set(&env, old_treasury, treasury);

        Ok(())
    }

    // ── Role management ──────────────────────────────────────────────────────

    /// Grant `role` to `account`. Only an `Admin` may call this.
    pub fn grant_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !access::grant_role(&env, &caller, role, &account) {
            return Err(ContractError::Unauthorized);
        }
        extend_instance(&env);
        events::publish_role_granted(&env, role, account, caller);
        Ok(())
    }

    /// Revoke `role` from `account`. Only an `Admin` may call this.
    ///
    /// Revoking a role the account does not hold succeeds without an event.
    pub fn revoke_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        let held = access::has_role(&env, role, &account);
        if !access::revoke_role(&env, &caller, role, &account) {
            return Err(ContractError::Unauthorized);
        }
        if held {
            events::publish_role_revoked(&env, role, account, caller);
        }
        extend_instance(&env);
        Ok(())
    }

    /// Drop one of the caller's own roles.
    pub fn renounce_role(env: Env, caller: Address, role: Role) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !access::renounce_role(&env, &caller, role) {
            return Err(ContractError::Unauthorized);
        }
        extend_instance(&env);
        events::publish_role_revoked(&env, role, caller.clone(), caller);
        Ok(())
    }

    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        access::has_role(&env, role, &account)
    }

    pub fn get_role_members(env: Env, role: Role) -> Vec<Address> {
        access::role_members(&env, role)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` does not hold the `Admin` role.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if !access::has_role(env, Role::Admin, caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn load_config(env: &Env) -> Result<StakingConfig, ContractError> {
        env.storage()
            .instance()
            .get(&CONFIG)
            .ok_or(ContractError::NotInitialized)
    }

    fn pool(env: &Env) -> i128 {
        env.storage().instance().get(&POOL).unwrap_or(0)
    }

    fn accrual<'a>(env: &'a Env, table: &'a RateTable, config: &StakingConfig) -> Accrual<'a> {
        Accrual {
            env,
            table,
            decimals: config.decimals,
            now: env.ledger().timestamp(),
        }
    }

    /// Contract balance above the staked principal.
    fn excess_liquidity(env: &Env, token: &token::Client) -> Result<i128, ContractError> {
        token
            .balance(&env.current_contract_address())
            .checked_sub(Self::pool(env))
            .ok_or(ContractError::ArithmeticOverflow)
    }

    /// Guard: the excess liquidity must cover `reward` before any payout.
    fn require_solvent(
        env: &Env,
        token: &token::Client,
        reward: i128,
    ) -> Result<(), ContractError> {
        if Self::excess_liquidity(env, token)? < reward {
            return Err(ContractError::InsufficientBalance);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_access;
