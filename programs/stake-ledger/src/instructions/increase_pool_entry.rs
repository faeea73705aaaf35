use crate::error::ErrorCode;
use crate::ledger::PoolBook;
use crate::states::*;
use crate::utils::transfer_from_user_to_vault;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

#[derive(Accounts)]
pub struct IncreasePoolEntry<'info> {
    pub identity: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump,
        constraint = global_config.pool_enabled @ ErrorCode::PoolDisabled,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
        mut,
        address = global_config.priority_pool,
    )]
    pub priority_pool: Box<Account<'info, PriorityPool>>,

    #[account(
        seeds = [
            POOL_MEMBERSHIP_SEED.as_bytes(),
            identity.key().as_ref()
        ],
        bump = pool_membership.bump,
    )]
    pub pool_membership: Account<'info, PoolMembership>,

    #[account(address = global_config.stake_mint @ ErrorCode::InvalidStakeMint)]
    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = stake_mint,
        token::authority = identity,
        token::token_program = token_program,
    )]
    pub identity_token: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, address = global_config.pool_vault)]
    pub pool_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Grows the signer's pool entry by `extra` in place; its slot does not move.
///
/// # Fails
/// - `PoolDisabled`, `NotInPool`, `ZeroAmount`.
pub fn increase_pool_entry(ctx: Context<IncreasePoolEntry>, extra: u64) -> Result<()> {
    let identity = ctx.accounts.identity.key();
    let amount = PoolBook::increase(
        &mut ctx.accounts.priority_pool,
        &*ctx.accounts.pool_membership,
        &identity,
        extra,
    )?;
    msg!("Pool entry grown to {}", amount);

    transfer_from_user_to_vault(
        ctx.accounts.identity.to_account_info(),
        ctx.accounts.identity_token.to_account_info(),
        ctx.accounts.pool_vault.to_account_info(),
        ctx.accounts.stake_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        extra,
        ctx.accounts.stake_mint.decimals,
    )?;

    emit!(PoolEntryIncreased {
        identity,
        amount,
        extra,
    });
    Ok(())
}
