use crate::error::ErrorCode;
use crate::ledger::StakeBook;
use crate::states::*;
use crate::utils::transfer_from_vault_to_user;
use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

/// Accounts shared by `claim_rewards` (all open positions) and
/// `claim_position` (a single one).
///
/// Reward math overview:
/// - Global index: `ledger_state.acc_reward_per_share`, scaled by `ACC_PRECISION`.
/// - Per-position checkpoint: `reward_debt`.
/// - Pending = `weighted * acc / ACC_PRECISION - reward_debt`; paid from the
///   reward vault, after which the checkpoint equals the accrued value.
#[derive(Accounts)]
pub struct ClaimRewards<'info> {
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
        payer = owner,
        associated_token::mint = stake_mint,
        associated_token::authority = owner,
        associated_token::token_program = token_program,
    )]
    pub owner_token: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, address = global_config.reward_vault)]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,

    pub system_program: Program<'info, System>,
}

/// Settles every open position of the signer and pays the total.
///
/// A claim with nothing pending succeeds without a transfer or event.
pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
    let amount = StakeBook::claim_all(
        &mut ctx.accounts.ledger_state,
        &mut ctx.accounts.user_stake_info,
    )?;
    payout(ctx, amount)
}

/// Settles position `position_index` only and pays its reward.
///
/// # Fails
/// - `InvalidPositionIndex` if the index is out of range. A closed position
///   settles to 0.
pub fn claim_position(ctx: Context<ClaimRewards>, position_index: u32) -> Result<()> {
    let amount = StakeBook::claim_position(
        &mut ctx.accounts.ledger_state,
        &mut ctx.accounts.user_stake_info,
        position_index,
    )?;
    payout(ctx, amount)
}

fn payout(ctx: Context<ClaimRewards>, amount: u64) -> Result<()> {
    if amount == 0 {
        msg!("Nothing to claim");
        return Ok(());
    }
    msg!("Claiming {} rewards", amount);

    transfer_from_vault_to_user(
        ctx.accounts.authority.to_account_info(),
        ctx.accounts.reward_vault.to_account_info(),
        ctx.accounts.owner_token.to_account_info(),
        ctx.accounts.stake_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.stake_mint.decimals,
        &[&[crate::AUTH_SEED.as_bytes(), &[ctx.bumps.authority]]],
    )?;

    emit!(RewardsClaimed {
        owner: ctx.accounts.owner.key(),
        amount,
    });
    Ok(())
}
