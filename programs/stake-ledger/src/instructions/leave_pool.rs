use crate::error::ErrorCode;
use crate::ledger::{MembershipSlots, PoolBook};
use crate::states::*;
use crate::utils::transfer_from_vault_to_user;
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

/// Accounts for removing the signer's pool entry.
///
/// Removal is swap-with-last: unless the signer's entry is the last one, the
/// last entry moves into the vacated slot and its membership must be passed as
/// `moved_membership` so its slot can be rewritten in the same instruction.
/// Clients read `priority_pool.entries.last()` to find it.
#[derive(Accounts)]
pub struct LeavePool<'info> {
    #[account(mut)]
    pub identity: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
        mut,
        address = global_config.priority_pool,
    )]
    pub priority_pool: Box<Account<'info, PriorityPool>>,

    #[account(
        mut,
        seeds = [
            POOL_MEMBERSHIP_SEED.as_bytes(),
            identity.key().as_ref()
        ],
        bump = pool_membership.bump,
    )]
    pub pool_membership: Account<'info, PoolMembership>,

    /// Membership of the pool's last entry, when that entry is not the signer's.
    #[account(mut)]
    pub moved_membership: Option<Account<'info, PoolMembership>>,

    /// CHECK: PDA derivation enforced by seeds; used only as a signer.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(address = global_config.stake_mint @ ErrorCode::InvalidStakeMint)]
    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = identity,
        associated_token::mint = stake_mint,
        associated_token::authority = identity,
        associated_token::token_program = token_program,
    )]
    pub identity_token: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, address = global_config.pool_vault)]
    pub pool_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

/// Removes the signer's entry and returns its amount from the pool vault.
///
/// Leaving stays available while the pool is disabled.
///
/// # Fails
/// - `NotInPool` if the signer has no entry.
/// - `MissingMembership` if the moved entry's membership was not supplied.
/// - `MembershipMismatch` if a supplied membership is stale or is the signer's own.
pub fn leave_pool(ctx: Context<LeavePool>) -> Result<()> {
    let identity = ctx.accounts.identity.key();
    let accounts = &mut *ctx.accounts;

    let mut memberships = vec![&mut *accounts.pool_membership];
    if let Some(moved) = accounts.moved_membership.as_mut() {
        require_keys_neq!(moved.identity, identity, ErrorCode::MembershipMismatch);
        memberships.push(&mut **moved);
    }
    let mut slots = MembershipSlots::new(memberships);
    let removed = PoolBook::remove(&mut accounts.priority_pool, &mut slots, &identity)?;
    msg!("Pool entry removed, returning {}", removed.amount);

    transfer_from_vault_to_user(
        accounts.authority.to_account_info(),
        accounts.pool_vault.to_account_info(),
        accounts.identity_token.to_account_info(),
        accounts.stake_mint.to_account_info(),
        accounts.token_program.to_account_info(),
        removed.amount,
        accounts.stake_mint.decimals,
        &[&[crate::AUTH_SEED.as_bytes(), &[ctx.bumps.authority]]],
    )?;

    emit!(PoolEntryRemoved {
        identity,
        amount: removed.amount,
    });
    Ok(())
}
