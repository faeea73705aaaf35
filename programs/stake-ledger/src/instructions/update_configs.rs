use crate::error::ErrorCode;
use crate::states::{ConfigUpdated, GlobalConfig, GLOBAL_CONFIG_SEED};
use anchor_lang::prelude::*;

/// Accounts context for the `update_config` instruction.
///
/// Only the current `admin` in `global_config` or the program-level admin
/// (`crate::admin::id()`) may update configuration.
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    /// Authorized signer: must be the stored admin or the hardcoded program admin.
    #[account(
        constraint = (owner.key() == global_config.admin || owner.key() == crate::admin::id()) @ ErrorCode::InvalidOwner
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [GLOBAL_CONFIG_SEED.as_bytes()],
        bump,
    )]
    pub global_config: Account<'info, GlobalConfig>,

    pub system_program: Program<'info, System>,
}

/// Updates one field of the global configuration.
///
/// # Param Mapping
/// - `0`: **Admin change** → new admin Pubkey passed via `remaining_accounts[0]`.
/// - `1`: **staking_enabled** → toggles new stakes (bool, from nonzero value).
/// - `2`: **pool_enabled** → toggles pool joins/increases (bool, from nonzero value).
///
/// The premium threshold has no selector; it is fixed at initialization.
///
/// # Errors
/// - `InvalidOwner`: caller is not an authorized admin.
/// - `MissingRemainingAccount`: admin change without a Pubkey.
/// - `InvalidParam`: unknown `param`.
///
/// # Example
/// ```ignore
/// // Pause new stakes
/// update_config(ctx, 1, 0)?;
/// ```
pub fn update_config(ctx: Context<UpdateConfig>, param: u8, value: u64) -> Result<()> {
    let global_config = &mut ctx.accounts.global_config;
    match param {
        0 => {
            let new_admin = *ctx
                .remaining_accounts
                .iter()
                .next()
                .ok_or(error!(ErrorCode::MissingRemainingAccount))?
                .key;
            require_keys_neq!(new_admin, Pubkey::default());
            global_config.admin = new_admin;
        }
        1 => {
            global_config.staking_enabled = value != 0;
        }
        2 => {
            global_config.pool_enabled = value != 0;
        }
        _ => return Err(error!(ErrorCode::InvalidParam)),
    }
    msg!("Config param {} updated", param);

    emit!(ConfigUpdated {
        admin: global_config.admin,
        staking_enabled: global_config.staking_enabled,
        pool_enabled: global_config.pool_enabled,
    });
    Ok(())
}
