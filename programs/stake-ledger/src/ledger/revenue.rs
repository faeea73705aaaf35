//! Revenue intake: burn a fixed share, fold the rest into the accumulator.

use crate::error::ErrorCode;
use crate::ledger::math;
use crate::states::LedgerState;
use crate::BURN_RATE_BPS;
use anchor_lang::prelude::*;

/// Outcome of a revenue deposit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevenueSplit {
    /// Portion sent to the burn sink.
    pub burned: u64,
    /// Portion kept for stakers (`amount - burned`).
    pub distributed: u64,
    /// `true` when no stake was open, so `distributed` never reached the
    /// accumulator and is not claimable by anyone.
    pub stranded: bool,
}

pub struct RevenueDistributor;

impl RevenueDistributor {
    /// Splits `amount` into `(burned, distributed)` at `BURN_RATE_BPS`,
    /// rounding the burn down.
    pub fn split(amount: u64) -> Result<(u64, u64)> {
        let burned = math::bps_of(amount, BURN_RATE_BPS)?;
        let distributed = amount
            .checked_sub(burned)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok((burned, distributed))
    }

    /// Accounts for `amount` of incoming revenue.
    ///
    /// With open stake, `distributed * ACC_PRECISION / total_weighted_stake` is
    /// added to the accumulator. Without, the accumulator is left alone and the
    /// distributable portion is recorded in `stranded_revenue`; later stakers do
    /// not inherit it.
    ///
    /// The increment is floored, while each position's checkpoint is floored
    /// separately, so claims can exceed the distributed total by up to one
    /// unit per position ever opened. The reward vault can run that much short
    /// for the last claimers.
    ///
    /// # Fails
    /// - `ZeroAmount` if `amount == 0`.
    pub fn deposit(ledger: &mut LedgerState, amount: u64, now: i64) -> Result<RevenueSplit> {
        require_gt!(amount, 0, ErrorCode::ZeroAmount);
        let (burned, distributed) = Self::split(amount)?;

        let total_burned = ledger
            .total_burned
            .checked_add(burned)
            .ok_or(ErrorCode::MathOverflow)?;

        let stranded = ledger.total_weighted_stake == 0;
        if stranded {
            let stranded_revenue = ledger
                .stranded_revenue
                .checked_add(distributed)
                .ok_or(ErrorCode::MathOverflow)?;
            ledger.stranded_revenue = stranded_revenue;
        } else if distributed > 0 {
            let delta = math::reward_per_share(distributed, ledger.total_weighted_stake)?;
            let acc_reward_per_share = ledger
                .acc_reward_per_share
                .checked_add(delta)
                .ok_or(ErrorCode::MathOverflow)?;
            let total_rewards_distributed = ledger
                .total_rewards_distributed
                .checked_add(distributed)
                .ok_or(ErrorCode::MathOverflow)?;
            ledger.acc_reward_per_share = acc_reward_per_share;
            ledger.total_rewards_distributed = total_rewards_distributed;
        }

        ledger.total_burned = total_burned;
        ledger.last_update_timestamp = now;
        Ok(RevenueSplit {
            burned,
            distributed,
            stranded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ACC_PRECISION;

    #[test]
    fn burns_ten_percent() {
        assert_eq!(RevenueDistributor::split(100_000).unwrap(), (10_000, 90_000));
        assert_eq!(RevenueDistributor::split(15).unwrap(), (1, 14));
        assert_eq!(RevenueDistributor::split(1).unwrap(), (0, 1));
    }

    #[test]
    fn deposit_moves_accumulator_when_stake_is_open() {
        let mut ledger = LedgerState {
            total_weighted_stake: 15_000,
            ..Default::default()
        };
        let split = RevenueDistributor::deposit(&mut ledger, 100_000, 7).unwrap();

        assert_eq!(
            split,
            RevenueSplit {
                burned: 10_000,
                distributed: 90_000,
                stranded: false
            }
        );
        assert_eq!(ledger.acc_reward_per_share, 90_000 * ACC_PRECISION / 15_000);
        assert_eq!(ledger.total_rewards_distributed, 90_000);
        assert_eq!(ledger.total_burned, 10_000);
        assert_eq!(ledger.last_update_timestamp, 7);
    }

    #[test]
    fn deposit_without_stake_is_stranded() {
        let mut ledger = LedgerState::default();
        let split = RevenueDistributor::deposit(&mut ledger, 1_000, 0).unwrap();

        assert!(split.stranded);
        assert_eq!(ledger.acc_reward_per_share, 0);
        assert_eq!(ledger.total_rewards_distributed, 0);
        assert_eq!(ledger.stranded_revenue, 900);
        assert_eq!(ledger.total_burned, 100);
    }

    #[test]
    fn zero_deposit_is_rejected() {
        let mut ledger = LedgerState::default();
        assert_eq!(
            RevenueDistributor::deposit(&mut ledger, 0, 0).unwrap_err(),
            error!(ErrorCode::ZeroAmount)
        );
        assert_eq!(ledger.total_burned, 0);
    }

    #[test]
    fn accumulator_never_decreases() {
        let mut ledger = LedgerState {
            total_weighted_stake: 3,
            ..Default::default()
        };
        let mut last = 0;
        for amount in [1, 7, 1_000, u64::MAX / 4] {
            RevenueDistributor::deposit(&mut ledger, amount, 0).unwrap();
            assert!(ledger.acc_reward_per_share >= last);
            last = ledger.acc_reward_per_share;
        }
    }
}
