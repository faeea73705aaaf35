use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Global Configuration Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive the global configuration account.
pub const GLOBAL_CONFIG_SEED: &str = "global_config";

/// Protocol-wide parameters and the fixed addresses every instruction checks
/// against.
///
/// Created once by `initialise_configs`. The premium threshold is fixed at
/// initialization: changing it later would leave stored premium flags (and
/// `LedgerState::premium_holder_count`) stale until each identity is touched.
#[account]
#[derive(Default, Debug)]
pub struct GlobalConfig {
    /// PDA bump for this account.
    pub bump: u8,

    /// Current admin of the protocol (authorized to update config).
    pub admin: Pubkey,

    /// Mint of the token that is staked, pooled and paid out as revenue.
    pub stake_mint: Pubkey,

    /// Custody of open stake principal.
    pub stake_vault: Pubkey,

    /// Custody of distributable revenue (pays rewards).
    pub reward_vault: Pubkey,

    /// Custody of priority pool entries.
    pub pool_vault: Pubkey,

    /// Aggregate ledger account (weighted totals and reward accumulator).
    pub ledger_state: Pubkey,

    /// Priority pool account.
    pub priority_pool: Pubkey,

    /// Raw principal an identity must hold (summed across positions) to be premium.
    pub premium_threshold: u64,

    /// Global switch: if `false`, new stakes are rejected. Closing and claiming stay open.
    pub staking_enabled: bool,

    /// Global switch: if `false`, joining or growing pool entries is rejected.
    pub pool_enabled: bool,
}

impl GlobalConfig {
    /// Fixed serialized size of the account.
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 1: bump
    /// - 32 * 7: seven Pubkeys
    /// - 8: premium threshold
    /// - 1 + 1: two booleans
    pub const LEN: usize = 8 + 1 + 32 * 7 + 8 + 1 + 1;
}
