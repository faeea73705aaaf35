use crate::error::ErrorCode;
use crate::ledger::{PremiumTracker, PremiumTransition, StakeBook};
use crate::states::*;
use crate::utils::transfer_from_user_to_vault;
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts required to open a new stake position.
///
/// Flow summary:
/// 1) Append the position to `user_stake_info` and fold its weighted amount
///    into `ledger_state` (reward debt taken at the current accumulator).
/// 2) Recompute the owner's premium flag.
/// 3) Move the principal from the owner's token account into the stake vault.
/// 4) Emit `StakeOpened` (and `PremiumGranted` on a flip).
#[derive(Accounts)]
pub struct OpenStake<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Global configuration; staking must be enabled.
    #[account(
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump,
        constraint = global_config.staking_enabled @ ErrorCode::StakingDisabled,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    #[account(
        mut,
        address = global_config.ledger_state,
    )]
    pub ledger_state: Account<'info, LedgerState>,

    /// Per-identity position list (created lazily).
    #[account(
        init_if_needed,
        seeds = [
            USER_STAKE_INFO_SEED.as_bytes(),
            owner.key().as_ref()
        ],
        bump,
        payer = owner,
        space = UserStakeInfo::LEN
    )]
    pub user_stake_info: Box<Account<'info, UserStakeInfo>>,

    #[account(address = global_config.stake_mint @ ErrorCode::InvalidStakeMint)]
    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Source of the principal.
    #[account(
        mut,
        token::mint = stake_mint,
        token::authority = owner,
        token::token_program = token_program,
    )]
    pub owner_token: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        address = global_config.stake_vault,
    )]
    pub stake_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

/// Opens a stake position of `amount` with lock class `lock_period`
/// (0 unlocked, 1 = 30d, 2 = 90d, 3 = 180d, 4 = 365d).
///
/// # Fails
/// - `StakingDisabled` if staking is switched off.
/// - `ZeroAmount`, `InvalidLockPeriod`, `PositionLimitReached` from the ledger.
/// - Token program errors (e.g. insufficient balance) abort the whole
///   transaction, including the ledger update.
pub fn open_stake(ctx: Context<OpenStake>, amount: u64, lock_period: u8) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let owner = ctx.accounts.owner.key();
    let ledger_state = &mut ctx.accounts.ledger_state;
    let user_stake_info = &mut ctx.accounts.user_stake_info;

    if user_stake_info.owner == Pubkey::default() {
        user_stake_info.owner = owner;
        user_stake_info.bump = ctx.bumps.user_stake_info;
    }

    let position_index = StakeBook::open(ledger_state, user_stake_info, amount, lock_period, now)?;
    let weighted = user_stake_info.positions[position_index as usize].weighted();
    let transition = PremiumTracker::refresh(
        ledger_state,
        user_stake_info,
        ctx.accounts.global_config.premium_threshold,
    )?;
    msg!(
        "Position {} opened: principal {}, weighted {}",
        position_index,
        amount,
        weighted
    );

    transfer_from_user_to_vault(
        ctx.accounts.owner.to_account_info(),
        ctx.accounts.owner_token.to_account_info(),
        ctx.accounts.stake_vault.to_account_info(),
        ctx.accounts.stake_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
        ctx.accounts.stake_mint.decimals,
    )?;

    emit!(StakeOpened {
        owner,
        amount,
        weighted,
        lock_period,
        position_index,
    });
    emit_premium_transition(owner, transition);
    Ok(())
}

/// Emits the event matching a premium flag flip, if there was one.
pub(crate) fn emit_premium_transition(owner: Pubkey, transition: Option<PremiumTransition>) {
    match transition {
        Some(PremiumTransition::Granted) => emit!(PremiumGranted { owner }),
        Some(PremiumTransition::Revoked) => emit!(PremiumRevoked { owner }),
        None => {}
    }
}
