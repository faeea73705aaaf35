//! Multi-position stake lifecycle and lazy reward settlement.
//!
//! Reward math overview:
//! - Global index: `LedgerState::acc_reward_per_share` accumulates reward per
//!   unit of weighted stake, scaled by `ACC_PRECISION`.
//! - Per-position checkpoint: `StakePosition::reward_debt` stores
//!   `weighted * acc / ACC_PRECISION` as of the last settlement.
//! - Pending = `weighted * acc / ACC_PRECISION - reward_debt`.
//!
//! A new position starts with its debt at the current accumulator, so it only
//! earns from deposits made after it was opened.
//!
//! Both the debt and the accrued value are floored, so over its whole life a
//! position can be paid up to one token unit more than its exact share of the
//! deposits it saw. Across the ledger, paid plus outstanding rewards stay
//! within `total_rewards_distributed + total_positions_opened`.

use crate::error::ErrorCode;
use crate::ledger::math;
use crate::ledger::LockPeriod;
use crate::states::{LedgerState, PositionStatus, StakePosition, UserStakeInfo};
use crate::MAX_POSITIONS;
use anchor_lang::prelude::*;

/// Principal and settled reward released by `StakeBook::close`. The caller
/// transfers both after the ledger has been updated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClosedStake {
    pub principal: u64,
    pub reward: u64,
}

pub struct StakeBook;

impl StakeBook {
    /// Opens a position and returns its stable index.
    ///
    /// # Fails
    /// - `ZeroAmount` if `principal == 0`.
    /// - `InvalidLockPeriod` for an unknown duration code.
    /// - `PositionLimitReached` once the identity has `MAX_POSITIONS` positions.
    pub fn open(
        ledger: &mut LedgerState,
        account: &mut UserStakeInfo,
        principal: u64,
        lock_period: u8,
        now: i64,
    ) -> Result<u32> {
        require_gt!(principal, 0, ErrorCode::ZeroAmount);
        let lock_period = LockPeriod::try_from(lock_period)?;
        require!(
            account.positions.len() < MAX_POSITIONS,
            ErrorCode::PositionLimitReached
        );

        let weighted = lock_period.weighted(principal);
        let lock_expiry = lock_period.lock_expiry(now)?;
        let reward_debt = math::accrued(weighted, ledger.acc_reward_per_share).0;

        let total_weighted_stake = ledger
            .total_weighted_stake
            .checked_add(weighted)
            .ok_or(ErrorCode::MathOverflow)?;
        let total_principal_staked = ledger
            .total_principal_staked
            .checked_add(principal)
            .ok_or(ErrorCode::MathOverflow)?;
        let total_positions_opened = ledger
            .total_positions_opened
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;

        let index = account.positions.len() as u32;
        account.positions.push(StakePosition {
            lock_period,
            lock_expiry,
            opened_at: now,
            reward_debt,
            status: PositionStatus::Open {
                principal,
                weighted,
            },
        });

        ledger.total_weighted_stake = total_weighted_stake;
        ledger.total_principal_staked = total_principal_staked;
        ledger.total_positions_opened = total_positions_opened;
        ledger.last_update_timestamp = now;
        Ok(index)
    }

    /// Closes an unlocked open position, settling its reward first.
    ///
    /// The position stays in the list as `PositionStatus::Closed`.
    ///
    /// # Fails
    /// - `InvalidPositionIndex` if `index` is out of range.
    /// - `PositionAlreadyClosed` if the position was closed before.
    /// - `StillLocked` if `now` is before the position's lock expiry.
    pub fn close(
        ledger: &mut LedgerState,
        account: &mut UserStakeInfo,
        index: u32,
        now: i64,
    ) -> Result<ClosedStake> {
        let position = Self::position(account, index)?;
        let PositionStatus::Open {
            principal,
            weighted,
        } = position.status
        else {
            return err!(ErrorCode::PositionAlreadyClosed);
        };
        require!(!position.is_locked(now), ErrorCode::StillLocked);

        let accrued = math::accrued(weighted, ledger.acc_reward_per_share);
        let reward = math::pending(accrued, position.reward_debt())?;

        let total_weighted_stake = ledger
            .total_weighted_stake
            .checked_sub(weighted)
            .ok_or(ErrorCode::MathOverflow)?;
        let total_principal_staked = ledger
            .total_principal_staked
            .checked_sub(principal)
            .ok_or(ErrorCode::MathOverflow)?;
        let (ledger_claimed, account_claimed) = Self::claimed_totals(ledger, account, reward)?;

        let position = &mut account.positions[index as usize];
        position.set_reward_debt(accrued);
        position.status = PositionStatus::Closed {
            principal,
            closed_at: now,
        };
        account.total_claimed = account_claimed;

        ledger.total_weighted_stake = total_weighted_stake;
        ledger.total_principal_staked = total_principal_staked;
        ledger.total_rewards_claimed = ledger_claimed;
        ledger.last_update_timestamp = now;

        Ok(ClosedStake { principal, reward })
    }

    /// Brings one position's checkpoint up to the current accumulator and
    /// returns what it had accrued since the previous checkpoint.
    ///
    /// Returns 0 for a closed position. Calling it twice without a revenue
    /// deposit in between returns 0 the second time. Payout bookkeeping is left
    /// to the caller; see `claim_position` / `claim_all`.
    pub fn settle(ledger: &LedgerState, account: &mut UserStakeInfo, index: u32) -> Result<u64> {
        let acc = ledger.acc_reward_per_share;
        let position = account
            .positions
            .get_mut(index as usize)
            .ok_or(ErrorCode::InvalidPositionIndex)?;
        if !position.is_open() {
            return Ok(0);
        }
        let accrued = math::accrued(position.weighted(), acc);
        let pending = math::pending(accrued, position.reward_debt())?;
        position.set_reward_debt(accrued);
        Ok(pending)
    }

    /// Settles a single position and records the payout.
    pub fn claim_position(
        ledger: &mut LedgerState,
        account: &mut UserStakeInfo,
        index: u32,
    ) -> Result<u64> {
        let pending = Self::position_pending(ledger, Self::position(account, index)?)?;
        let (ledger_claimed, account_claimed) = Self::claimed_totals(ledger, account, pending)?;

        let settled = Self::settle(ledger, account, index)?;
        debug_assert_eq!(settled, pending);

        account.total_claimed = account_claimed;
        ledger.total_rewards_claimed = ledger_claimed;
        Ok(pending)
    }

    /// Settles every open position in index order and returns the total.
    ///
    /// With no open positions this returns 0 and changes nothing.
    pub fn claim_all(ledger: &mut LedgerState, account: &mut UserStakeInfo) -> Result<u64> {
        let acc = ledger.acc_reward_per_share;

        let mut checkpoints = Vec::new();
        let mut total: u64 = 0;
        for (index, position) in account.positions.iter().enumerate() {
            if !position.is_open() {
                continue;
            }
            let accrued = math::accrued(position.weighted(), acc);
            let pending = math::pending(accrued, position.reward_debt())?;
            total = total.checked_add(pending).ok_or(ErrorCode::MathOverflow)?;
            checkpoints.push((index, accrued));
        }
        if checkpoints.is_empty() {
            return Ok(0);
        }
        let (ledger_claimed, account_claimed) = Self::claimed_totals(ledger, account, total)?;

        for (index, accrued) in checkpoints {
            account.positions[index].set_reward_debt(accrued);
        }
        account.total_claimed = account_claimed;
        ledger.total_rewards_claimed = ledger_claimed;
        Ok(total)
    }

    // ── read-only views ────────────────────────────────────────────────────

    /// Σ principal over the identity's open positions.
    pub fn total_staked(account: &UserStakeInfo) -> Result<u64> {
        account
            .positions
            .iter()
            .try_fold(0u64, |sum, position| sum.checked_add(position.principal()))
            .ok_or(error!(ErrorCode::MathOverflow))
    }

    /// Σ weighted over the identity's open positions.
    pub fn total_weighted(account: &UserStakeInfo) -> u128 {
        account.positions.iter().map(StakePosition::weighted).sum()
    }

    /// What `claim_all` would pay right now, without touching any checkpoint.
    pub fn pending_rewards(ledger: &LedgerState, account: &UserStakeInfo) -> Result<u64> {
        account.positions.iter().try_fold(0u64, |sum, position| {
            let pending = Self::position_pending(ledger, position)?;
            sum.checked_add(pending)
                .ok_or(error!(ErrorCode::MathOverflow))
        })
    }

    /// What `settle` would return for `position` right now.
    pub fn position_pending(ledger: &LedgerState, position: &StakePosition) -> Result<u64> {
        if !position.is_open() {
            return Ok(0);
        }
        let accrued = math::accrued(position.weighted(), ledger.acc_reward_per_share);
        math::pending(accrued, position.reward_debt())
    }

    /// Open positions with their stable indices.
    pub fn open_positions(account: &UserStakeInfo) -> impl Iterator<Item = (u32, &StakePosition)> {
        account
            .positions
            .iter()
            .enumerate()
            .filter(|(_, position)| position.is_open())
            .map(|(index, position)| (index as u32, position))
    }

    fn position(account: &UserStakeInfo, index: u32) -> Result<&StakePosition> {
        account
            .positions
            .get(index as usize)
            .ok_or(error!(ErrorCode::InvalidPositionIndex))
    }

    fn claimed_totals(
        ledger: &LedgerState,
        account: &UserStakeInfo,
        amount: u64,
    ) -> Result<(u64, u64)> {
        let ledger_claimed = ledger
            .total_rewards_claimed
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        let account_claimed = account
            .total_claimed
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok((ledger_claimed, account_claimed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{multiplier::SECONDS_PER_DAY, RevenueDistributor};
    use crate::ACC_PRECISION;
    use proptest::prelude::*;

    const NOW: i64 = 1_700_000_000;

    fn account() -> UserStakeInfo {
        UserStakeInfo {
            owner: Pubkey::new_unique(),
            ..Default::default()
        }
    }

    fn open_weighted_sum(accounts: &[UserStakeInfo]) -> u128 {
        accounts.iter().map(StakeBook::total_weighted).sum()
    }

    #[test]
    fn open_records_weighted_position() {
        let mut ledger = LedgerState::default();
        let mut alice = account();

        let index =
            StakeBook::open(&mut ledger, &mut alice, 10_000, LockPeriod::Medium.code(), NOW)
                .unwrap();

        assert_eq!(index, 0);
        let position = &alice.positions[0];
        assert_eq!(position.weighted(), 15_000);
        assert_eq!(position.principal(), 10_000);
        assert_eq!(position.lock_expiry, Some(NOW + 90 * SECONDS_PER_DAY));
        assert_eq!(position.lock_period, LockPeriod::Medium);
        assert_eq!(ledger.total_weighted_stake, 15_000);
        assert_eq!(ledger.total_principal_staked, 10_000);
        assert_eq!(ledger.total_positions_opened, 1);
    }

    #[test]
    fn open_rejects_zero_and_unknown_period_without_changes() {
        let mut ledger = LedgerState::default();
        let mut alice = account();

        assert_eq!(
            StakeBook::open(&mut ledger, &mut alice, 0, 0, NOW).unwrap_err(),
            error!(ErrorCode::ZeroAmount)
        );
        assert_eq!(
            StakeBook::open(&mut ledger, &mut alice, 10, 7, NOW).unwrap_err(),
            error!(ErrorCode::InvalidLockPeriod)
        );
        assert!(alice.positions.is_empty());
        assert_eq!(ledger.total_weighted_stake, 0);
    }

    #[test]
    fn open_enforces_position_limit() {
        let mut ledger = LedgerState::default();
        let mut alice = account();
        for _ in 0..MAX_POSITIONS {
            StakeBook::open(&mut ledger, &mut alice, 1, 0, NOW).unwrap();
        }
        assert_eq!(
            StakeBook::open(&mut ledger, &mut alice, 1, 0, NOW).unwrap_err(),
            error!(ErrorCode::PositionLimitReached)
        );
        assert_eq!(ledger.total_weighted_stake, MAX_POSITIONS as u128);
    }

    #[test]
    fn new_position_does_not_earn_past_revenue() {
        let mut ledger = LedgerState::default();
        let mut alice = account();
        let mut bob = account();

        StakeBook::open(&mut ledger, &mut alice, 1_000, 0, NOW).unwrap();
        RevenueDistributor::deposit(&mut ledger, 10_000, NOW).unwrap();
        StakeBook::open(&mut ledger, &mut bob, 1_000, 0, NOW).unwrap();

        assert_eq!(StakeBook::pending_rewards(&ledger, &bob).unwrap(), 0);
        assert_eq!(StakeBook::pending_rewards(&ledger, &alice).unwrap(), 9_000);
    }

    #[test]
    fn sole_staker_receives_whole_distribution() {
        let mut ledger = LedgerState::default();
        let mut alice = account();
        StakeBook::open(&mut ledger, &mut alice, 10_000, LockPeriod::Medium.code(), NOW).unwrap();

        let before = ledger.acc_reward_per_share;
        RevenueDistributor::deposit(&mut ledger, 100_000, NOW).unwrap();

        assert_eq!(
            ledger.acc_reward_per_share - before,
            90_000 * ACC_PRECISION / 15_000
        );
        assert_eq!(StakeBook::pending_rewards(&ledger, &alice).unwrap(), 90_000);
    }

    #[test]
    fn settle_is_idempotent_between_deposits() {
        let mut ledger = LedgerState::default();
        let mut alice = account();
        StakeBook::open(&mut ledger, &mut alice, 5_000, 0, NOW).unwrap();
        RevenueDistributor::deposit(&mut ledger, 1_000, NOW).unwrap();

        assert_eq!(StakeBook::settle(&ledger, &mut alice, 0).unwrap(), 900);
        assert_eq!(StakeBook::settle(&ledger, &mut alice, 0).unwrap(), 0);

        RevenueDistributor::deposit(&mut ledger, 1_000, NOW).unwrap();
        assert_eq!(StakeBook::settle(&ledger, &mut alice, 0).unwrap(), 900);
    }

    #[test]
    fn settle_rejects_unknown_index() {
        let ledger = LedgerState::default();
        let mut alice = account();
        assert_eq!(
            StakeBook::settle(&ledger, &mut alice, 3).unwrap_err(),
            error!(ErrorCode::InvalidPositionIndex)
        );
    }

    #[test]
    fn rewards_split_by_weight() {
        let mut ledger = LedgerState::default();
        let mut alice = account();
        let mut bob = account();

        // 1000 @ 3.0x vs 1000 @ 1.0x: alice holds 3/4 of the weight.
        StakeBook::open(&mut ledger, &mut alice, 1_000, LockPeriod::Extended.code(), NOW).unwrap();
        StakeBook::open(&mut ledger, &mut bob, 1_000, LockPeriod::Unlocked.code(), NOW).unwrap();
        RevenueDistributor::deposit(&mut ledger, 40_000, NOW).unwrap();

        assert_eq!(StakeBook::claim_all(&mut ledger, &mut alice).unwrap(), 27_000);
        assert_eq!(StakeBook::claim_all(&mut ledger, &mut bob).unwrap(), 9_000);
        assert_eq!(ledger.total_rewards_claimed, 36_000);
        assert_eq!(alice.total_claimed, 27_000);
    }

    #[test]
    fn close_is_blocked_until_expiry() {
        let mut ledger = LedgerState::default();
        let mut alice = account();
        StakeBook::open(&mut ledger, &mut alice, 1_000, LockPeriod::Short.code(), NOW).unwrap();
        let expiry = NOW + 30 * SECONDS_PER_DAY;

        assert_eq!(
            StakeBook::close(&mut ledger, &mut alice, 0, expiry - 1).unwrap_err(),
            error!(ErrorCode::StillLocked)
        );
        assert!(alice.positions[0].is_open());

        let closed = StakeBook::close(&mut ledger, &mut alice, 0, expiry).unwrap();
        assert_eq!(closed.principal, 1_000);
    }

    #[test]
    fn close_settles_and_keeps_history() {
        let mut ledger = LedgerState::default();
        let mut alice = account();
        StakeBook::open(&mut ledger, &mut alice, 2_000, 0, NOW).unwrap();
        StakeBook::open(&mut ledger, &mut alice, 2_000, 0, NOW).unwrap();
        RevenueDistributor::deposit(&mut ledger, 10_000, NOW).unwrap();

        let closed = StakeBook::close(&mut ledger, &mut alice, 0, NOW + 1).unwrap();

        assert_eq!(closed, ClosedStake { principal: 2_000, reward: 4_500 });
        assert_eq!(alice.positions.len(), 2);
        assert_eq!(
            alice.positions[0].status,
            PositionStatus::Closed { principal: 2_000, closed_at: NOW + 1 }
        );
        assert_eq!(alice.positions[0].principal(), 0);
        assert_eq!(ledger.total_weighted_stake, 2_000);
        assert_eq!(ledger.total_principal_staked, 2_000);
        assert_eq!(StakeBook::total_staked(&alice).unwrap(), 2_000);

        // The closed handle stays readable but pays nothing more.
        RevenueDistributor::deposit(&mut ledger, 10_000, NOW).unwrap();
        assert_eq!(StakeBook::settle(&ledger, &mut alice, 0).unwrap(), 0);
        assert_eq!(
            StakeBook::close(&mut ledger, &mut alice, 0, NOW + 2).unwrap_err(),
            error!(ErrorCode::PositionAlreadyClosed)
        );
        assert_eq!(StakeBook::pending_rewards(&ledger, &alice).unwrap(), 13_500);
    }

    #[test]
    fn claim_all_without_open_positions_is_a_no_op() {
        let mut ledger = LedgerState::default();
        let mut alice = account();
        assert_eq!(StakeBook::claim_all(&mut ledger, &mut alice).unwrap(), 0);

        StakeBook::open(&mut ledger, &mut alice, 10, 0, NOW).unwrap();
        StakeBook::close(&mut ledger, &mut alice, 0, NOW).unwrap();
        let snapshot = alice.positions.clone();

        assert_eq!(StakeBook::claim_all(&mut ledger, &mut alice).unwrap(), 0);
        assert_eq!(alice.positions, snapshot);
        assert_eq!(ledger.total_rewards_claimed, 0);
    }

    #[test]
    fn claim_position_only_touches_that_position() {
        let mut ledger = LedgerState::default();
        let mut alice = account();
        StakeBook::open(&mut ledger, &mut alice, 1_000, 0, NOW).unwrap();
        StakeBook::open(&mut ledger, &mut alice, 1_000, 0, NOW).unwrap();
        RevenueDistributor::deposit(&mut ledger, 2_000, NOW).unwrap();

        assert_eq!(StakeBook::claim_position(&mut ledger, &mut alice, 1).unwrap(), 900);
        assert_eq!(StakeBook::pending_rewards(&ledger, &alice).unwrap(), 900);
        assert_eq!(alice.total_claimed, 900);
    }

    #[test]
    fn pending_view_does_not_mutate() {
        let mut ledger = LedgerState::default();
        let mut alice = account();
        StakeBook::open(&mut ledger, &mut alice, 1_000, 0, NOW).unwrap();
        RevenueDistributor::deposit(&mut ledger, 1_000, NOW).unwrap();
        let snapshot = alice.positions.clone();

        assert_eq!(StakeBook::pending_rewards(&ledger, &alice).unwrap(), 900);
        assert_eq!(StakeBook::pending_rewards(&ledger, &alice).unwrap(), 900);
        assert_eq!(alice.positions, snapshot);
    }

    #[test]
    fn rounding_dust_is_bounded_by_one_unit_per_position() {
        let mut ledger = LedgerState::default();
        let mut alice = account();
        let mut bob = account();

        StakeBook::open(&mut ledger, &mut alice, 3, 0, NOW).unwrap();
        RevenueDistributor::deposit(&mut ledger, 2, NOW).unwrap();
        assert_eq!(ledger.acc_reward_per_share, 666_666_666_666);

        // 3 * acc / 1e12 = 1.999999999998: each debt is floored to 1.
        for _ in 0..10 {
            StakeBook::open(&mut ledger, &mut bob, 3, 0, NOW).unwrap();
        }
        assert!(bob.positions.iter().all(|p| p.reward_debt() == math::U256::one()));

        RevenueDistributor::deposit(&mut ledger, 1, NOW).unwrap();
        assert_eq!(ledger.acc_reward_per_share, 696_969_696_969);
        assert_eq!(ledger.total_rewards_distributed, 3);

        let alice_reward = StakeBook::claim_all(&mut ledger, &mut alice).unwrap();
        let bob_reward = StakeBook::claim_all(&mut ledger, &mut bob).unwrap();
        assert_eq!((alice_reward, bob_reward), (2, 10));

        let paid = alice_reward + bob_reward;
        assert!(paid > ledger.total_rewards_distributed);
        assert!(paid <= ledger.total_rewards_distributed + ledger.total_positions_opened);
    }

    #[test]
    fn large_position_opens_after_accumulator_outgrows_u128_products() {
        let mut ledger = LedgerState::default();
        let mut dust = account();
        let mut whale = account();

        StakeBook::open(&mut ledger, &mut dust, 1, LockPeriod::Unlocked.code(), NOW).unwrap();
        let first = RevenueDistributor::deposit(&mut ledger, u64::MAX, NOW).unwrap();
        assert_eq!(ledger.acc_reward_per_share, u128::from(first.distributed) * ACC_PRECISION);

        let principal = u64::MAX / 2;
        let index =
            StakeBook::open(&mut ledger, &mut whale, principal, LockPeriod::Extended.code(), NOW)
                .unwrap();
        assert!(whale.positions[0].reward_debt() > math::U256::from(u128::MAX));
        assert_eq!(StakeBook::pending_rewards(&ledger, &whale).unwrap(), 0);

        let second = RevenueDistributor::deposit(&mut ledger, 10_000_000_000_000, NOW).unwrap();
        let whale_pending = StakeBook::pending_rewards(&ledger, &whale).unwrap();
        assert!(whale_pending > 0 && whale_pending <= second.distributed);
        assert_eq!(StakeBook::pending_rewards(&ledger, &dust).unwrap(), first.distributed);

        let late = NOW + 365 * SECONDS_PER_DAY;
        let closed = StakeBook::close(&mut ledger, &mut whale, index, late).unwrap();
        assert_eq!(closed, ClosedStake { principal, reward: whale_pending });
        assert_eq!(StakeBook::claim_all(&mut ledger, &mut dust).unwrap(), first.distributed);
    }

    #[derive(Clone, Debug)]
    enum Op {
        Open { who: usize, amount: u64, period: u8 },
        Close { who: usize, index: u32 },
        Claim { who: usize },
        Deposit { amount: u64 },
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..3usize, 1..1_000_000u64, 0..5u8)
                .prop_map(|(who, amount, period)| Op::Open { who, amount, period }),
            (0..3usize, 0..8u32).prop_map(|(who, index)| Op::Close { who, index }),
            (0..3usize).prop_map(|who| Op::Claim { who }),
            (1..10_000_000u64).prop_map(|amount| Op::Deposit { amount }),
        ]
    }

    proptest! {
        #[test]
        fn ledger_invariants_hold_for_any_interleaving(ops in prop::collection::vec(op(), 1..60)) {
            let mut ledger = LedgerState::default();
            let mut accounts = vec![account(), account(), account()];
            let mut paid: u128 = 0;
            let mut last_acc = 0u128;
            // Every lock class has expired by then.
            let late = NOW + 400 * SECONDS_PER_DAY;

            for op in ops {
                let before = (ledger.total_weighted_stake, accounts.clone());
                let result = match op {
                    Op::Open { who, amount, period } => {
                        StakeBook::open(&mut ledger, &mut accounts[who], amount, period, NOW).map(|_| ())
                    }
                    Op::Close { who, index } => {
                        StakeBook::close(&mut ledger, &mut accounts[who], index, late)
                            .map(|closed| paid += u128::from(closed.reward))
                    }
                    Op::Claim { who } => {
                        StakeBook::claim_all(&mut ledger, &mut accounts[who])
                            .map(|amount| paid += u128::from(amount))
                    }
                    Op::Deposit { amount } => {
                        RevenueDistributor::deposit(&mut ledger, amount, NOW).map(|_| ())
                    }
                };
                if result.is_err() {
                    prop_assert_eq!(before.0, ledger.total_weighted_stake);
                    prop_assert_eq!(&before.1, &accounts);
                }

                // conservation of weighted stake
                prop_assert_eq!(ledger.total_weighted_stake, open_weighted_sum(&accounts));
                // monotone accumulator
                prop_assert!(ledger.acc_reward_per_share >= last_acc);
                last_acc = ledger.acc_reward_per_share;
                // no position ever owes a negative amount
                for account in &accounts {
                    prop_assert!(StakeBook::pending_rewards(&ledger, account).is_ok());
                }
            }

            // At most one unit of dust per position over its lifetime.
            let outstanding: u128 = accounts
                .iter()
                .map(|a| u128::from(StakeBook::pending_rewards(&ledger, a).unwrap()))
                .sum();
            let ceiling = u128::from(ledger.total_rewards_distributed)
                + u128::from(ledger.total_positions_opened);
            prop_assert!(paid + outstanding <= ceiling);
            prop_assert_eq!(paid, u128::from(ledger.total_rewards_claimed));
        }
    }

    #[test]
    fn long_seeded_simulation_conserves_stake_and_rewards() {
        use crate::ledger::PremiumTracker;
        use rand::{rngs::StdRng, Rng, SeedableRng};

        const THRESHOLD: u64 = 50_000;
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut ledger = LedgerState::default();
        let mut accounts: Vec<UserStakeInfo> = (0..5).map(|_| account()).collect();
        let mut paid: u128 = 0;
        let mut now = NOW;

        for _ in 0..5_000 {
            now += rng.random_range(0..5 * SECONDS_PER_DAY);
            let who = rng.random_range(0..accounts.len());
            match rng.random_range(0..10) {
                0..=3 => {
                    let amount = rng.random_range(1..40_000u64);
                    let period = rng.random_range(0..5u8);
                    if StakeBook::open(&mut ledger, &mut accounts[who], amount, period, now).is_ok() {
                        PremiumTracker::refresh(&mut ledger, &mut accounts[who], THRESHOLD).unwrap();
                    }
                }
                4..=5 => {
                    let open: Vec<u32> = StakeBook::open_positions(&accounts[who])
                        .map(|(index, _)| index)
                        .collect();
                    if open.is_empty() {
                        continue;
                    }
                    let index = open[rng.random_range(0..open.len())];
                    if let Ok(closed) = StakeBook::close(&mut ledger, &mut accounts[who], index, now) {
                        paid += u128::from(closed.reward);
                        PremiumTracker::refresh(&mut ledger, &mut accounts[who], THRESHOLD).unwrap();
                    }
                }
                6..=7 => {
                    paid += u128::from(StakeBook::claim_all(&mut ledger, &mut accounts[who]).unwrap());
                }
                _ => {
                    let amount = rng.random_range(1..1_000_000u64);
                    RevenueDistributor::deposit(&mut ledger, amount, now).unwrap();
                }
            }

            assert_eq!(ledger.total_weighted_stake, open_weighted_sum(&accounts));
        }

        let outstanding: u128 = accounts
            .iter()
            .map(|a| u128::from(StakeBook::pending_rewards(&ledger, a).unwrap()))
            .sum();
        let ceiling = u128::from(ledger.total_rewards_distributed)
            + u128::from(ledger.total_positions_opened);
        assert!(paid + outstanding <= ceiling);
        let premium = accounts.iter().filter(|a| a.premium).count() as u64;
        assert_eq!(ledger.premium_holder_count, premium);
        let principal: u64 = accounts
            .iter()
            .map(|a| StakeBook::total_staked(a).unwrap())
            .sum();
        assert_eq!(ledger.total_principal_staked, principal);
    }
}
