//! Lock-duration classes and their reward weighting.

use crate::error::ErrorCode;
use crate::BASIS_POINTS_DENOMINATOR;
use anchor_lang::prelude::*;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Lock-duration class chosen when a position is opened.
///
/// Declaration order is the wire code accepted by `open_stake` (0..=4).
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace,
)]
#[repr(u8)]
pub enum LockPeriod {
    /// No lock, 1.0x.
    #[default]
    Unlocked,
    /// 30 days, 1.25x.
    Short,
    /// 90 days, 1.5x.
    Medium,
    /// 180 days, 2.0x.
    Long,
    /// 365 days, 3.0x.
    Extended,
}

impl LockPeriod {
    pub const ALL: [LockPeriod; 5] = [
        LockPeriod::Unlocked,
        LockPeriod::Short,
        LockPeriod::Medium,
        LockPeriod::Long,
        LockPeriod::Extended,
    ];

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|period| period.code() == code)
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Reward weighting in basis points (10000 = 1.0x).
    pub fn multiplier_bps(self) -> u64 {
        match self {
            LockPeriod::Unlocked => 10_000,
            LockPeriod::Short => 12_500,
            LockPeriod::Medium => 15_000,
            LockPeriod::Long => 20_000,
            LockPeriod::Extended => 30_000,
        }
    }

    pub fn duration_seconds(self) -> i64 {
        let days = match self {
            LockPeriod::Unlocked => 0,
            LockPeriod::Short => 30,
            LockPeriod::Medium => 90,
            LockPeriod::Long => 180,
            LockPeriod::Extended => 365,
        };
        days * SECONDS_PER_DAY
    }

    /// Absolute expiry for a position opened at `now`; `None` when unlocked.
    pub fn lock_expiry(self, now: i64) -> Result<Option<i64>> {
        if self == LockPeriod::Unlocked {
            return Ok(None);
        }
        now.checked_add(self.duration_seconds())
            .map(Some)
            .ok_or(error!(ErrorCode::MathOverflow))
    }

    /// `principal * multiplier / BASIS_POINTS_DENOMINATOR`, rounded down.
    ///
    /// Cannot overflow: a u64 times at most 30000 fits comfortably in u128.
    pub fn weighted(self, principal: u64) -> u128 {
        u128::from(principal) * u128::from(self.multiplier_bps())
            / u128::from(BASIS_POINTS_DENOMINATOR)
    }
}

impl TryFrom<u8> for LockPeriod {
    type Error = anchor_lang::error::Error;

    fn try_from(code: u8) -> Result<Self> {
        Self::from_code(code).ok_or(error!(ErrorCode::InvalidLockPeriod))
    }
}

/// Multiplier for a raw duration code.
///
/// Unknown codes get the unlocked (1.0x) factor instead of an error, so callers
/// that omit or garble the class still see a sensible weighting. Opening a
/// position goes through `LockPeriod::try_from` and stays strict.
pub fn multiplier_bps(code: u8) -> u64 {
    LockPeriod::from_code(code)
        .unwrap_or(LockPeriod::Unlocked)
        .multiplier_bps()
}
