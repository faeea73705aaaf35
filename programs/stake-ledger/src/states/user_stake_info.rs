use crate::ledger::math::U256;
use crate::ledger::LockPeriod;
use crate::MAX_POSITIONS;
use anchor_lang::prelude::*;

//
// ──────────────────────────────────────────────────────────────────────────────
// UserStakeInfo Account
// ──────────────────────────────────────────────────────────────────────────────
//

/// PDA seed string used to derive each identity's stake account.
pub const USER_STAKE_INFO_SEED: &str = "user_stake_info";

/// All stake positions of one identity, derived from
/// `USER_STAKE_INFO_SEED + owner`.
///
/// Positions are only ever appended. A position's index in `positions` is its
/// handle for the lifetime of the account; closing a position switches it to
/// `PositionStatus::Closed` but never removes it.
#[account]
#[derive(Default, Debug, PartialEq, InitSpace)]
pub struct UserStakeInfo {
    /// PDA bump for this account.
    pub bump: u8,

    /// Identity to whom this record belongs.
    pub owner: Pubkey,

    /// Cached premium flag. Only `ledger::PremiumTracker::refresh` writes it.
    pub premium: bool,

    /// Lifetime rewards paid out to this identity.
    pub total_claimed: u64,

    #[max_len(MAX_POSITIONS)]
    pub positions: Vec<StakePosition>,
}

impl UserStakeInfo {
    pub const LEN: usize = 8 + Self::INIT_SPACE;
}

/// A single deposit with its lock and reward checkpoint.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, InitSpace)]
pub struct StakePosition {
    /// Duration class chosen at open, retained for audit.
    pub lock_period: LockPeriod,

    /// Absolute UNIX timestamp before which the position cannot be closed.
    /// `None` for unlocked positions.
    pub lock_expiry: Option<i64>,

    pub opened_at: i64,

    /// Accrued reward (`weighted * acc / ACC_PRECISION`) already settled, as
    /// little-endian 64-bit limbs. The value can exceed u128 once the
    /// accumulator is large; read and write it through `reward_debt()` and
    /// `set_reward_debt`.
    pub reward_debt: [u64; 4],

    pub status: PositionStatus,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum PositionStatus {
    Open {
        principal: u64,
        /// `principal * multiplier / BASIS_POINTS_DENOMINATOR`, truncated.
        weighted: u128,
    },
    Closed {
        /// Principal returned when the position was closed.
        principal: u64,
        closed_at: i64,
    },
}

impl StakePosition {
    /// Principal currently at stake; 0 once closed.
    pub fn principal(&self) -> u64 {
        match self.status {
            PositionStatus::Open { principal, .. } => principal,
            PositionStatus::Closed { .. } => 0,
        }
    }

    /// Weighted stake currently earning rewards; 0 once closed.
    pub fn weighted(&self) -> u128 {
        match self.status {
            PositionStatus::Open { weighted, .. } => weighted,
            PositionStatus::Closed { .. } => 0,
        }
    }

    pub fn reward_debt(&self) -> U256 {
        U256(self.reward_debt)
    }

    pub fn set_reward_debt(&mut self, value: U256) {
        self.reward_debt = value.0;
    }

    pub fn is_open(&self) -> bool {
        matches!(self.status, PositionStatus::Open { .. })
    }

    pub fn is_locked(&self, now: i64) -> bool {
        self.lock_expiry.is_some_and(|expiry| now < expiry)
    }
}
