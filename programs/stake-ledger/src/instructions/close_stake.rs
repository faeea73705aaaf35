use crate::error::ErrorCode;
use crate::instructions::open_stake::emit_premium_transition;
use crate::ledger::{PremiumTracker, StakeBook};
use crate::states::*;
use crate::utils::transfer_from_vault_to_user;
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

/// Closes one unlocked position: returns its principal from the stake vault and
/// pays its settled reward from the reward vault.
///
/// The position itself stays in `user_stake_info` as closed history.
#[derive(Accounts)]
pub struct CloseStake<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
        mut,
        address = global_config.ledger_state,
    )]
    pub ledger_state: Account<'info, LedgerState>,

    #[account(
        mut,
        seeds = [
            USER_STAKE_INFO_SEED.as_bytes(),
            owner.key().as_ref()
        ],
        bump = user_stake_info.bump,
    )]
    pub user_stake_info: Box<Account<'info, UserStakeInfo>>,

    /// Program authority PDA (token authority for vault transfers).
    ///
    /// CHECK: PDA derivation enforced by seeds; used only as a signer.
    #[account(
        seeds = [crate::AUTH_SEED.as_bytes()],
        bump,
    )]
    pub authority: UncheckedAccount<'info>,

    #[account(address = global_config.stake_mint @ ErrorCode::InvalidStakeMint)]
    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Owner's ATA; created on demand to receive principal and reward.
    #[account(
        init_if_needed,
        payer = owner,
        associated_token::mint = stake_mint,
        associated_token::authority = owner,
        associated_token::token_program = token_program,
    )]
    pub owner_token: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, address = global_config.stake_vault)]
    pub stake_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, address = global_config.reward_vault)]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

/// Closes position `position_index` of the signer.
///
/// # Fails
/// - `InvalidPositionIndex`, `PositionAlreadyClosed`, `StillLocked` from the
///   ledger; nothing is transferred in that case.
pub fn close_stake(ctx: Context<CloseStake>, position_index: u32) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let owner = ctx.accounts.owner.key();
    let ledger_state = &mut ctx.accounts.ledger_state;
    let user_stake_info = &mut ctx.accounts.user_stake_info;

    let closed = StakeBook::close(ledger_state, user_stake_info, position_index, now)?;
    let transition = PremiumTracker::refresh(
        ledger_state,
        user_stake_info,
        ctx.accounts.global_config.premium_threshold,
    )?;
    msg!(
        "Position {} closed: principal {}, reward {}",
        position_index,
        closed.principal,
        closed.reward
    );

    let auth_bump = ctx.bumps.authority;
    let seeds: &[&[u8]] = &[crate::AUTH_SEED.as_bytes(), &[auth_bump]];
    let signer_seeds = &[seeds];
    transfer_from_vault_to_user(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.stake_vault.to_account_info(),
        ctx.accounts.owner_token.to_account_info(),
        ctx.accounts.stake_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        closed.principal,
        ctx.accounts.stake_mint.decimals,
        signer_seeds,
    )?;
    transfer_from_vault_to_user(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.reward_vault.to_account_info(),
        ctx.accounts.owner_token.to_account_info(),
        ctx.accounts.stake_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        closed.reward,
        ctx.accounts.stake_mint.decimals,
        signer_seeds,
    )?;

    emit!(StakeClosed {
        owner,
        amount: closed.principal,
        position_index,
    });
    if closed.reward > 0 {
        emit!(RewardsClaimed {
            owner,
            amount: closed.reward,
        });
    }
    emit_premium_transition(owner, transition);
    Ok(())
}
