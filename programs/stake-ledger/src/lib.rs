use anchor_lang::prelude::*;

declare_id!("DjfTcjgXyb78aBoGvTNp31rzfW9hcNvQb54EZ5VJdnFn");

pub mod admin {
    use anchor_lang::prelude::declare_id;
    declare_id!("CNvvyDoMW6oFxafkpVvsrRbFQc7NhQQgcCWNF9Yywwwg");
}

#[cfg(not(feature = "no-entrypoint"))]
solana_security_txt::security_txt! {
    name: "Stake Ledger",
    project_url: "https://github.com/stake-ledger/stake-ledger",
    contacts: "email:security@stake-ledger.dev",
    policy: "https://github.com/stake-ledger/stake-ledger/blob/main/SECURITY.md"
}

pub const AUTH_SEED: &str = "vault_auth";
pub const STAKE_VAULT_SEED: &str = "stake_vault";
pub const REWARD_VAULT_SEED: &str = "reward_vault";
pub const POOL_VAULT_SEED: &str = "pool_vault";

/// Fixed-point scale of `LedgerState::acc_reward_per_share`.
pub const ACC_PRECISION: u128 = 1_000_000_000_000;
/// 10000 bps = 1.0x / 100%.
pub const BASIS_POINTS_DENOMINATOR: u64 = 10_000;
/// Share of every revenue deposit that is burned (10%).
pub const BURN_RATE_BPS: u64 = 1_000;

/// Lifetime positions per identity. Closed positions keep their slot.
pub const MAX_POSITIONS: usize = 64;
pub const MAX_POOL_ENTRIES: usize = 64;
pub const MAX_POOL_NAME_LEN: usize = 32;
pub const MAX_POOL_TAG_LEN: usize = 16;

pub mod error;
pub mod instructions;
pub mod ledger;
pub mod states;
pub mod utils;

use instructions::*;

#[program]
pub mod stake_ledger {

    use super::*;

    pub fn initialise_configs(
        ctx: Context<InitialiseConfigs>,
        admin: Pubkey,
        premium_threshold: u64,
        staking_enabled: bool,
        pool_enabled: bool,
    ) -> Result<()> {
        instructions::initialise_configs(
            ctx,
            admin,
            premium_threshold,
            staking_enabled,
            pool_enabled,
        )
    }

    pub fn update_config(ctx: Context<UpdateConfig>, param: u8, value: u64) -> Result<()> {
        instructions::update_config(ctx, param, value)
    }

    pub fn open_stake(ctx: Context<OpenStake>, amount: u64, lock_period: u8) -> Result<()> {
        instructions::open_stake(ctx, amount, lock_period)
    }

    pub fn close_stake(ctx: Context<CloseStake>, position_index: u32) -> Result<()> {
        instructions::close_stake(ctx, position_index)
    }

    pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
        instructions::claim_rewards(ctx)
    }

    pub fn claim_position(ctx: Context<ClaimRewards>, position_index: u32) -> Result<()> {
        instructions::claim_position(ctx, position_index)
    }

    pub fn deposit_revenue(ctx: Context<DepositRevenue>, amount: u64) -> Result<()> {
        instructions::deposit_revenue(ctx, amount)
    }

    pub fn join_pool(
        ctx: Context<JoinPool>,
        amount: u64,
        name: String,
        tag: String,
    ) -> Result<()> {
        instructions::join_pool(ctx, amount, name, tag)
    }

    pub fn increase_pool_entry(ctx: Context<IncreasePoolEntry>, extra: u64) -> Result<()> {
        instructions::increase_pool_entry(ctx, extra)
    }

    pub fn leave_pool(ctx: Context<LeavePool>) -> Result<()> {
        instructions::leave_pool(ctx)
    }
}
