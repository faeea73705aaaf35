use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// Events: Emitted for off-chain indexers/clients to track ledger state changes
// ──────────────────────────────────────────────────────────────────────────────
//

/// Emitted once when the global configuration is initialized.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct GlobalConfigInitialized {
    /// Protocol admin pubkey (may later be updated).
    pub admin: Pubkey,
    /// Token staked, pooled and distributed.
    pub stake_mint: Pubkey,
    pub stake_vault: Pubkey,
    pub reward_vault: Pubkey,
    pub pool_vault: Pubkey,
    /// Summed principal required for premium access.
    pub premium_threshold: u64,
    pub staking_enabled: bool,
    pub pool_enabled: bool,
}

/// Emitted whenever configuration parameters are modified via `update_config`.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct ConfigUpdated {
    pub admin: Pubkey,
    pub staking_enabled: bool,
    pub pool_enabled: bool,
}

/// Emitted when an identity opens a new stake position.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct StakeOpened {
    pub owner: Pubkey,
    /// Raw principal deposited (base units).
    pub amount: u64,
    /// Principal after the lock multiplier.
    pub weighted: u128,
    /// `LockPeriod` code.
    pub lock_period: u8,
    /// Stable handle of the new position.
    pub position_index: u32,
}

/// Emitted when a position is closed and its principal returned.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct StakeClosed {
    pub owner: Pubkey,
    pub amount: u64,
    pub position_index: u32,
}

/// Emitted whenever settled rewards are paid out (claim or close).
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct RewardsClaimed {
    pub owner: Pubkey,
    pub amount: u64,
}

/// Emitted for every revenue deposit.
///
/// `stranded` is set when no stake was open: the distributable portion then
/// stays in the reward vault without reaching the accumulator.
#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct RevenueDeposited {
    pub amount: u64,
    pub burned: u64,
    pub distributed: u64,
    pub stranded: bool,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PoolEntryAdded {
    pub identity: Pubkey,
    pub name: String,
    pub amount: u64,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PoolEntryIncreased {
    pub identity: Pubkey,
    /// Entry amount after the increase.
    pub amount: u64,
    pub extra: u64,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PoolEntryRemoved {
    pub identity: Pubkey,
    pub amount: u64,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PremiumGranted {
    pub owner: Pubkey,
}

#[event]
#[cfg_attr(feature = "client", derive(Debug))]
pub struct PremiumRevoked {
    pub owner: Pubkey,
}
