//! Premium access derived from an identity's summed principal.

use crate::error::ErrorCode;
use crate::ledger::StakeBook;
use crate::states::{LedgerState, UserStakeInfo};
use anchor_lang::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PremiumTransition {
    Granted,
    Revoked,
}

pub struct PremiumTracker;

impl PremiumTracker {
    /// Recomputes `account.premium` against `threshold` (inclusive).
    ///
    /// Must run after every open and close of `account`, so that
    /// `ledger.premium_holder_count` always equals the number of identities at
    /// or above the threshold. Returns the transition, if the flag flipped, so
    /// the caller can emit it.
    pub fn refresh(
        ledger: &mut LedgerState,
        account: &mut UserStakeInfo,
        threshold: u64,
    ) -> Result<Option<PremiumTransition>> {
        let eligible = StakeBook::total_staked(account)? >= threshold;
        if eligible == account.premium {
            return Ok(None);
        }

        let (count, transition) = if eligible {
            (
                ledger.premium_holder_count.checked_add(1),
                PremiumTransition::Granted,
            )
        } else {
            (
                ledger.premium_holder_count.checked_sub(1),
                PremiumTransition::Revoked,
            )
        };
        ledger.premium_holder_count = count.ok_or(ErrorCode::MathOverflow)?;
        account.premium = eligible;
        Ok(Some(transition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::multiplier::SECONDS_PER_DAY;
    use proptest::prelude::*;

    const THRESHOLD: u64 = 10_000;
    const NOW: i64 = 1_700_000_000;

    fn account() -> UserStakeInfo {
        UserStakeInfo {
            owner: Pubkey::new_unique(),
            ..Default::default()
        }
    }

    fn open(ledger: &mut LedgerState, account: &mut UserStakeInfo, amount: u64) -> Option<PremiumTransition> {
        StakeBook::open(ledger, account, amount, 0, NOW).unwrap();
        PremiumTracker::refresh(ledger, account, THRESHOLD).unwrap()
    }

    fn close(ledger: &mut LedgerState, account: &mut UserStakeInfo, index: u32) -> Option<PremiumTransition> {
        StakeBook::close(ledger, account, index, NOW + SECONDS_PER_DAY).unwrap();
        PremiumTracker::refresh(ledger, account, THRESHOLD).unwrap()
    }

    #[test]
    fn staking_exactly_the_threshold_grants() {
        let mut ledger = LedgerState::default();
        let mut alice = account();
        assert_eq!(open(&mut ledger, &mut alice, THRESHOLD), Some(PremiumTransition::Granted));
        assert!(alice.premium);
        assert_eq!(ledger.premium_holder_count, 1);
    }

    #[test]
    fn one_unit_short_does_not_grant() {
        let mut ledger = LedgerState::default();
        let mut alice = account();
        assert_eq!(open(&mut ledger, &mut alice, THRESHOLD - 1), None);
        assert!(!alice.premium);
        assert_eq!(ledger.premium_holder_count, 0);
    }

    #[test]
    fn positions_add_up_and_closing_below_revokes() {
        let mut ledger = LedgerState::default();
        let mut alice = account();
        assert_eq!(open(&mut ledger, &mut alice, THRESHOLD - 1), None);
        assert_eq!(open(&mut ledger, &mut alice, 1), Some(PremiumTransition::Granted));
        assert_eq!(open(&mut ledger, &mut alice, 5), None);

        // Left with THRESHOLD - 1 + 5.
        assert_eq!(close(&mut ledger, &mut alice, 1), None);
        assert!(alice.premium);
        // Left with exactly one unit below.
        assert_eq!(close(&mut ledger, &mut alice, 2), Some(PremiumTransition::Revoked));
        assert!(!alice.premium);
        assert_eq!(ledger.premium_holder_count, 0);
    }

    #[test]
    fn refresh_is_a_no_op_when_nothing_changed() {
        let mut ledger = LedgerState::default();
        let mut alice = account();
        open(&mut ledger, &mut alice, THRESHOLD);
        assert_eq!(PremiumTracker::refresh(&mut ledger, &mut alice, THRESHOLD).unwrap(), None);
        assert_eq!(ledger.premium_holder_count, 1);
    }

    proptest! {
        #[test]
        fn holder_count_tracks_flags(
            ops in prop::collection::vec((0..4usize, any::<bool>(), 1..THRESHOLD), 1..80)
        ) {
            let mut ledger = LedgerState::default();
            let mut accounts: Vec<UserStakeInfo> = (0..4).map(|_| account()).collect();

            for (who, opening, amount) in ops {
                let account = &mut accounts[who];
                if opening {
                    let _ = StakeBook::open(&mut ledger, account, amount, 0, NOW);
                } else {
                    let first = StakeBook::open_positions(account).next().map(|(index, _)| index);
                    if let Some(index) = first {
                        StakeBook::close(&mut ledger, account, index, NOW).unwrap();
                    }
                }
                PremiumTracker::refresh(&mut ledger, account, THRESHOLD).unwrap();

                let holders = accounts.iter().filter(|a| a.premium).count() as u64;
                prop_assert_eq!(ledger.premium_holder_count, holders);
                for account in &accounts {
                    let total = StakeBook::total_staked(account).unwrap();
                    prop_assert_eq!(account.premium, total >= THRESHOLD);
                }
            }
        }
    }
}
