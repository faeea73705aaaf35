use crate::error::ErrorCode;
use crate::ledger::{MembershipSlots, PoolBook};
use crate::states::*;
use crate::utils::transfer_from_user_to_vault;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts for adding the signer's entry to the priority pool.
///
/// The identity's `PoolMembership` is created on first join and reused after a
/// leave, so rejoining costs no rent.
#[derive(Accounts)]
pub struct JoinPool<'info> {
    #[account(mut)]
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
        init_if_needed,
        seeds = [
            POOL_MEMBERSHIP_SEED.as_bytes(),
            identity.key().as_ref()
        ],
        bump,
        payer = identity,
        space = PoolMembership::LEN
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

    pub system_program: Program<'info, System>,
}

/// Appends an entry of `amount` labelled `name` / `tag` and locks the amount in
/// the pool vault.
///
/// # Fails
/// - `PoolDisabled`, `AlreadyInPool`, `PoolFull`.
/// - `ZeroAmount`, `NameTooLong` (> 32 bytes), `TagTooLong` (> 16 bytes).
pub fn join_pool(ctx: Context<JoinPool>, amount: u64, name: String, tag: String) -> Result<()> {
    let identity = ctx.accounts.identity.key();
    let membership = &mut ctx.accounts.pool_membership;
    if membership.identity == Pubkey::default() {
        membership.identity = identity;
        membership.bump = ctx.bumps.pool_membership;
    }

    let entry = PoolEntry {
        identity,
        amount,
        name: name.clone(),
        tag,
        joined_at: Clock::get()?.unix_timestamp,
    };
    let mut slots = MembershipSlots::new(vec![&mut **membership]);
    let slot = PoolBook::insert(&mut ctx.accounts.priority_pool, &mut slots, entry)?;
    msg!("Pool entry added at slot {}", slot);

    transfer_from_user_to_vault(
        ctx.accounts.identity.to_account_info(),
        ctx.accounts.identity_token.to_account_info(),
        ctx.accounts.pool_vault.to_account_info(),
        ctx.accounts.stake_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.stake_mint.decimals,
    )?;

    emit!(PoolEntryAdded {
        identity,
        name,
        amount,
    });
    Ok(())
}
