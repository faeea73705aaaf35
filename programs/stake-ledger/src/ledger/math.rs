//! Fixed-point helpers for the reward accumulator.

use crate::error::ErrorCode;
use crate::{ACC_PRECISION, BASIS_POINTS_DENOMINATOR};
use anchor_lang::prelude::*;

// Kept out of the prelude's one-parameter `Result` alias.
mod wide {
    uint::construct_uint! {
        pub struct U256(4);
    }
}

pub use wide::U256;

/// Reward accrued by `weighted` stake at accumulator value `acc`:
/// `weighted * acc / ACC_PRECISION`, rounded down.
///
/// Both factors are below 2^128, so the product always fits 256 bits.
pub fn accrued(weighted: u128, acc: u128) -> U256 {
    U256::from(weighted) * U256::from(acc) / U256::from(ACC_PRECISION)
}

/// `accrued - reward_debt` in token units.
///
/// # Fails
/// - `RewardDebtExceedsAccrued` if the checkpoint is ahead of `accrued`.
/// - `MathOverflow` if the difference does not fit a token amount.
pub fn pending(accrued: U256, reward_debt: U256) -> Result<u64> {
    let pending = accrued
        .checked_sub(reward_debt)
        .ok_or(ErrorCode::RewardDebtExceedsAccrued)?;
    if pending > U256::from(u64::MAX) {
        return err!(ErrorCode::MathOverflow);
    }
    Ok(pending.low_u64())
}

/// Accumulator increment for `distributed` rewards shared by `total_weighted`:
/// `distributed * ACC_PRECISION / total_weighted`, rounded down.
pub fn reward_per_share(distributed: u64, total_weighted: u128) -> Result<u128> {
    u128::from(distributed)
        .checked_mul(ACC_PRECISION)
        .ok_or(error!(ErrorCode::MathOverflow))?
        .checked_div(total_weighted)
        .ok_or(error!(ErrorCode::MathOverflow))
}

/// `amount * bps / BASIS_POINTS_DENOMINATOR`, rounded down.
pub fn bps_of(amount: u64, bps: u64) -> Result<u64> {
    let value = u128::from(amount) * u128::from(bps) / u128::from(BASIS_POINTS_DENOMINATOR);
    to_token_amount(value)
}

pub fn to_token_amount(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| error!(ErrorCode::MathOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accrued_scales_down_by_precision() {
        assert_eq!(accrued(15_000, 6_000_000_000_000), U256::from(90_000u64));
        assert_eq!(accrued(0, u128::MAX), U256::zero());
    }

    #[test]
    fn accrued_keeps_results_wider_than_u128() {
        let scaled = accrued(u128::MAX, ACC_PRECISION * 2);
        assert_eq!(scaled, U256::from(u128::MAX) * U256::from(2u64));
    }

    #[test]
    fn pending_checks_both_directions() {
        let debt = U256::from(u128::MAX) + U256::from(5u64);
        assert_eq!(pending(debt + U256::from(7u64), debt).unwrap(), 7);
        assert_eq!(
            pending(U256::from(1u64), U256::from(2u64)).unwrap_err(),
            error!(ErrorCode::RewardDebtExceedsAccrued)
        );
        assert_eq!(
            pending(U256::from(u64::MAX) + U256::one(), U256::zero()).unwrap_err(),
            error!(ErrorCode::MathOverflow)
        );
    }

    #[test]
    fn reward_per_share_needs_stake() {
        assert!(reward_per_share(1, 0).is_err());
        assert_eq!(reward_per_share(90_000, 15_000).unwrap(), 6 * ACC_PRECISION);
    }

    #[test]
    fn burn_share_rounds_down() {
        assert_eq!(bps_of(100_000, 1_000).unwrap(), 10_000);
        assert_eq!(bps_of(9, 1_000).unwrap(), 0);
        assert_eq!(bps_of(u64::MAX, 10_000).unwrap(), u64::MAX);
    }

    proptest! {
        #[test]
        fn distributing_never_pays_more_than_deposited(
            distributed in 1u64..=u64::MAX / 2,
            total_weighted in 1u128..=u128::from(u64::MAX),
        ) {
            let delta = reward_per_share(distributed, total_weighted).unwrap();
            let paid = accrued(total_weighted, delta);
            prop_assert!(paid <= U256::from(distributed));
        }
    }
}
