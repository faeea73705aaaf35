use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// LedgerState Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive the global ledger account.
pub const LEDGER_STATE_SEED: &str = "ledger_state";

/// Aggregate accounting for every stake position in the protocol.
///
/// This account tracks:
/// - The sum of weighted stake over all open positions.
/// - The reward-per-weighted-share accumulator, scaled by `ACC_PRECISION`.
/// - Lifetime totals of distributed, claimed, burned and stranded revenue.
/// - The number of identities currently holding premium access.
///
/// Every mutation goes through `crate::ledger`; instructions never write these
/// fields directly.
#[account]
#[derive(Default, Debug)]
pub struct LedgerState {
    /// PDA bump for this account.
    pub bump: u8,

    /// Σ `weighted` over all open positions.
    pub total_weighted_stake: u128,

    /// Cumulative reward per unit of weighted stake, scaled by `ACC_PRECISION`.
    /// Never decreases.
    pub acc_reward_per_share: u128,

    /// Σ `principal` over all open positions.
    pub total_principal_staked: u64,

    /// Revenue folded into the accumulator (after burn).
    pub total_rewards_distributed: u64,

    /// Rewards actually paid out to stakers.
    pub total_rewards_claimed: u64,

    /// Revenue burned on deposit.
    pub total_burned: u64,

    /// Distributable revenue that arrived while no stake was open. It sits in the
    /// reward vault but is not reflected in the accumulator.
    pub stranded_revenue: u64,

    /// Identities whose summed principal is at or above the premium threshold.
    pub premium_holder_count: u64,

    /// Positions ever opened, across all identities.
    pub total_positions_opened: u64,

    /// Last UNIX timestamp (seconds) at which any stake or revenue update was made.
    pub last_update_timestamp: i64,
}

impl LedgerState {
    /// Fixed serialized size of the account.
    ///
    /// Breakdown:
    /// - 8: account discriminator
    /// - 1: bump
    /// - 16 * 2: two `u128` fields
    /// - 8 * 7: seven `u64` fields
    /// - 8: one `i64` timestamp
    pub const LEN: usize = 8 + 1 + 16 * 2 + 8 * 7 + 8;

    pub fn stats(&self, pool_size: usize) -> LedgerStats {
        LedgerStats {
            total_weighted_stake: self.total_weighted_stake,
            total_rewards_distributed: self.total_rewards_distributed,
            total_burned: self.total_burned,
            premium_holder_count: self.premium_holder_count,
            pool_size: pool_size as u64,
            total_principal_staked: self.total_principal_staked,
            total_rewards_claimed: self.total_rewards_claimed,
            stranded_revenue: self.stranded_revenue,
        }
    }
}

/// Read-only aggregate view over the ledger and the priority pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LedgerStats {
    pub total_weighted_stake: u128,
    pub total_rewards_distributed: u64,
    pub total_burned: u64,
    pub premium_holder_count: u64,
    pub pool_size: u64,
    pub total_principal_staked: u64,
    pub total_rewards_claimed: u64,
    pub stranded_revenue: u64,
}
