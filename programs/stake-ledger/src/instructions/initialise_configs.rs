use crate::error::ErrorCode;
use crate::{states::*, POOL_VAULT_SEED, REWARD_VAULT_SEED, STAKE_VAULT_SEED};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};
use std::ops::DerefMut;

/// Accounts context for `initialise_configs`.
///
/// This handler:
/// - Initializes the global configuration.
/// - Creates the aggregate ledger account and the (empty) priority pool.
/// - Creates the three program vaults (stake, reward, pool), all owned by the
///   authority PDA.
#[derive(Accounts)]
pub struct InitialiseConfigs<'info> {
    /// Admin signer (must match the program-level admin id). Pays for every
    /// account created here.
    #[account(
        mut,
        address = crate::admin::id() @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    /// Program authority PDA, token authority of all vaults.
    ///
    /// CHECK: PDA derivation enforced via seeds. Not read as an account; used as Pubkey.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(
        init,
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump,
        payer = owner,
        space = GlobalConfig::LEN
    )]
    pub global_config: Account<'info, GlobalConfig>,

    /// Weighted totals, reward accumulator and protocol counters.
    #[account(
        init,
        seeds = [LEDGER_STATE_SEED.as_bytes()],
        bump,
        payer = owner,
        space = LedgerState::LEN
    )]
    pub ledger_state: Account<'info, LedgerState>,

    #[account(
        init,
        seeds = [PRIORITY_POOL_SEED.as_bytes()],
        bump,
        payer = owner,
        space = PriorityPool::LEN
    )]
    pub priority_pool: Box<Account<'info, PriorityPool>>,

    /// Token that is staked, pooled and deposited as revenue.
    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Custody of open stake principal.
    #[account(
        init,
        seeds = [STAKE_VAULT_SEED.as_bytes()],
        bump,
        payer = owner,
        token::mint = stake_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub stake_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Custody of distributable revenue; pays out rewards.
    #[account(
        init,
        seeds = [REWARD_VAULT_SEED.as_bytes()],
        bump,
        payer = owner,
        token::mint = stake_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Custody of priority pool entries.
    #[account(
        init,
        seeds = [POOL_VAULT_SEED.as_bytes()],
        bump,
        payer = owner,
        token::mint = stake_mint,
        token::authority = authority,
        token::token_program = token_program,
    )]
    pub pool_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

/// Initializes the protocol.
///
/// # Parameters
/// - `admin`: admin stored in the config (may differ from the deploying key).
/// - `premium_threshold`: summed principal that grants premium access. Must be
///   nonzero and cannot be changed afterwards.
/// - `staking_enabled` / `pool_enabled`: initial feature switches.
pub fn initialise_configs(
    ctx: Context<InitialiseConfigs>,
    admin: Pubkey,
    premium_threshold: u64,
    staking_enabled: bool,
    pool_enabled: bool,
) -> Result<()> {
    require_keys_neq!(admin, Pubkey::default());
    require_gt!(premium_threshold, 0, ErrorCode::InvalidParam);

    let global_config = ctx.accounts.global_config.deref_mut();
    global_config.bump = ctx.bumps.global_config;
    global_config.admin = admin;
    global_config.stake_mint = ctx.accounts.stake_mint.key();
    global_config.stake_vault = ctx.accounts.stake_vault.key();
    global_config.reward_vault = ctx.accounts.reward_vault.key();
    global_config.pool_vault = ctx.accounts.pool_vault.key();
    global_config.ledger_state = ctx.accounts.ledger_state.key();
    global_config.priority_pool = ctx.accounts.priority_pool.key();
    global_config.premium_threshold = premium_threshold;
    global_config.staking_enabled = staking_enabled;
    global_config.pool_enabled = pool_enabled;
    msg!("Global Config initialized");

    let ledger_state = ctx.accounts.ledger_state.deref_mut();
    ledger_state.bump = ctx.bumps.ledger_state;
    ledger_state.last_update_timestamp = Clock::get()?.unix_timestamp;

    ctx.accounts.priority_pool.bump = ctx.bumps.priority_pool;

    emit!(GlobalConfigInitialized {
        admin,
        stake_mint: ctx.accounts.stake_mint.key(),
        stake_vault: ctx.accounts.stake_vault.key(),
        reward_vault: ctx.accounts.reward_vault.key(),
        pool_vault: ctx.accounts.pool_vault.key(),
        premium_threshold,
        staking_enabled,
        pool_enabled,
    });
    Ok(())
}
