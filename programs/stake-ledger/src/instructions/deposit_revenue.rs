use crate::error::ErrorCode;
use crate::ledger::RevenueDistributor;
use crate::states::*;
use crate::utils::{burn_from_user, transfer_from_user_to_vault};
use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Accounts for injecting external revenue.
///
/// Any signer may deposit. 10% of the amount is burned from the depositor's
/// account; the rest moves into the reward vault and is credited to open stake
/// through the accumulator.
#[derive(Accounts)]
pub struct DepositRevenue<'info> {
    pub depositor: Signer<'info>,

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

    /// Mutable: the burn reduces its supply.
    #[account(
        mut,
        address = global_config.stake_mint @ ErrorCode::InvalidStakeMint
    )]
    pub stake_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = stake_mint,
        token::authority = depositor,
        token::token_program = token_program,
    )]
    pub depositor_token: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut, address = global_config.reward_vault)]
    pub reward_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Splits `amount` into burn and distributable portions and folds the latter
/// into the reward accumulator.
///
/// With no open stake the distributable portion is stranded: it is still moved
/// into the reward vault and counted in `stranded_revenue`, but the accumulator
/// does not change and no position can ever claim it.
///
/// # Fails
/// - `ZeroAmount` if `amount == 0`.
pub fn deposit_revenue(ctx: Context<DepositRevenue>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let split = RevenueDistributor::deposit(&mut ctx.accounts.ledger_state, amount, now)?;
    if split.stranded {
        msg!("No open stake; {} stranded in reward vault", split.distributed);
    }
    msg!(
        "Revenue {}: burned {}, distributed {}",
        amount,
        split.burned,
        split.distributed
    );

    transfer_from_user_to_vault(
        ctx.accounts.depositor.to_account_info(),
        ctx.accounts.depositor_token.to_account_info(),
        ctx.accounts.reward_vault.to_account_info(),
        ctx.accounts.stake_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        split.distributed,
        ctx.accounts.stake_mint.decimals,
    )?;
    burn_from_user(
        ctx.accounts.depositor.to_account_info(),
        ctx.accounts.depositor_token.to_account_info(),
        ctx.accounts.stake_mint.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        split.burned,
    )?;

    emit!(RevenueDeposited {
        amount,
        burned: split.burned,
        distributed: split.distributed,
        stranded: split.stranded,
    });
    Ok(())
}
