//! Read-only reports over fetched account data.

use anyhow::Result;
use colorful::{Color, Colorful};
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use stake_ledger::ledger::{PoolBook, StakeBook};
use stake_ledger::states::{LedgerState, PositionStatus, PriorityPool, UserStakeInfo};

#[derive(Debug, Serialize)]
pub struct PositionReport {
    pub index: u32,
    pub lock_period: u8,
    pub principal: u64,
    /// Decimal string: JSON numbers cannot carry a full `u128`.
    pub weighted: String,
    pub lock_expiry: Option<i64>,
    pub opened_at: i64,
    pub open: bool,
    pub pending: u64,
}

#[derive(Debug, Serialize)]
pub struct StakesReport {
    pub owner: String,
    pub premium: bool,
    pub total_staked: u64,
    pub pending_rewards: u64,
    pub total_claimed: u64,
    pub positions: Vec<PositionReport>,
}

impl StakesReport {
    pub fn build(owner: &Pubkey, ledger: &LedgerState, account: &UserStakeInfo) -> Result<Self> {
        let positions = account
            .positions
            .iter()
            .enumerate()
            .map(|(index, position)| {
                let principal = match position.status {
                    PositionStatus::Open { principal, .. } => principal,
                    PositionStatus::Closed { principal, .. } => principal,
                };
                Ok(PositionReport {
                    index: index as u32,
                    lock_period: position.lock_period.code(),
                    principal,
                    weighted: position.weighted().to_string(),
                    lock_expiry: position.lock_expiry,
                    opened_at: position.opened_at,
                    open: position.is_open(),
                    pending: StakeBook::position_pending(ledger, position)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            owner: owner.to_string(),
            premium: account.premium,
            total_staked: StakeBook::total_staked(account)?,
            pending_rewards: StakeBook::pending_rewards(ledger, account)?,
            total_claimed: account.total_claimed,
            positions,
        })
    }

    pub fn print(&self) {
        println!("{}", format!("Stakes of {}", self.owner).color(Color::Cyan).bold());
        for position in &self.positions {
            let status = if position.open {
                "open".color(Color::Green)
            } else {
                "closed".color(Color::DarkGray)
            };
            println!(
                "  #{:<3} {:<6} lock {} principal {:>14} weighted {:>16} pending {:>12} expiry {}",
                position.index,
                status,
                position.lock_period,
                position.principal,
                position.weighted,
                position.pending,
                position
                    .lock_expiry
                    .map_or_else(|| "-".to_string(), |expiry| expiry.to_string()),
            );
        }
        println!(
            "  staked {}  pending {}  claimed {}  premium {}",
            self.total_staked, self.pending_rewards, self.total_claimed, self.premium
        );
    }
}

#[derive(Debug, Serialize)]
pub struct PoolEntryReport {
    pub identity: String,
    pub amount: u64,
    pub name: String,
    pub tag: String,
    pub joined_at: i64,
}

pub fn pool_report(pool: &PriorityPool, ranked: bool) -> Vec<PoolEntryReport> {
    let entries = if ranked {
        PoolBook::rank(pool)
    } else {
        PoolBook::snapshot(pool)
    };
    entries
        .into_iter()
        .map(|entry| PoolEntryReport {
            identity: entry.identity.to_string(),
            amount: entry.amount,
            name: entry.name,
            tag: entry.tag,
            joined_at: entry.joined_at,
        })
        .collect()
}

pub fn print_pool(entries: &[PoolEntryReport], ranked: bool) {
    let title = if ranked { "Priority pool (ranked)" } else { "Priority pool" };
    println!("{}", title.color(Color::Cyan).bold());
    for (position, entry) in entries.iter().enumerate() {
        println!(
            "  {:>3}. {:<44} {:>14}  {} [{}]",
            position + 1,
            entry.identity,
            entry.amount,
            entry.name,
            entry.tag
        );
    }
}

#[derive(Debug, Serialize)]
pub struct StatsReport {
    pub total_weighted_stake: String,
    pub total_principal_staked: u64,
    pub total_rewards_distributed: u64,
    pub total_rewards_claimed: u64,
    pub total_burned: u64,
    pub stranded_revenue: u64,
    pub premium_holder_count: u64,
    pub pool_size: u64,
}

impl StatsReport {
    pub fn build(ledger: &LedgerState, pool: &PriorityPool) -> Self {
        let stats = ledger.stats(pool.entries.len());
        Self {
            total_weighted_stake: stats.total_weighted_stake.to_string(),
            total_principal_staked: stats.total_principal_staked,
            total_rewards_distributed: stats.total_rewards_distributed,
            total_rewards_claimed: stats.total_rewards_claimed,
            total_burned: stats.total_burned,
            stranded_revenue: stats.stranded_revenue,
            premium_holder_count: stats.premium_holder_count,
            pool_size: stats.pool_size,
        }
    }

    pub fn print(&self) {
        println!("{}", "Ledger".color(Color::Cyan).bold());
        println!("  total weighted stake      {}", self.total_weighted_stake);
        println!("  total principal staked    {}", self.total_principal_staked);
        println!("  rewards distributed       {}", self.total_rewards_distributed);
        println!("  rewards claimed           {}", self.total_rewards_claimed);
        println!("  burned                    {}", self.total_burned);
        println!("  stranded                  {}", self.stranded_revenue);
        println!("  premium holders           {}", self.premium_holder_count);
        println!("  pool size                 {}", self.pool_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stake_ledger::ledger::RevenueDistributor;

    #[test]
    fn stakes_report_shows_closed_principal_and_pending() {
        let owner = Pubkey::new_unique();
        let mut ledger = LedgerState::default();
        let mut account = UserStakeInfo {
            owner,
            ..Default::default()
        };
        StakeBook::open(&mut ledger, &mut account, 10_000, 2, 0).unwrap();
        StakeBook::open(&mut ledger, &mut account, 500, 0, 0).unwrap();
        StakeBook::close(&mut ledger, &mut account, 1, 0).unwrap();
        RevenueDistributor::deposit(&mut ledger, 100_000, 1).unwrap();

        let report = StakesReport::build(&owner, &ledger, &account).unwrap();
        assert_eq!(report.total_staked, 10_000);
        assert_eq!(report.pending_rewards, 90_000);
        assert_eq!(report.positions[0].weighted, "15000");
        assert!(!report.positions[1].open);
        assert_eq!(report.positions[1].principal, 500);
        assert_eq!(report.positions[1].pending, 0);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["positions"][0]["pending"], 90_000);
    }

    #[test]
    fn stats_report_counts_pool() {
        let mut ledger = LedgerState::default();
        RevenueDistributor::deposit(&mut ledger, 1_000, 0).unwrap();
        let report = StatsReport::build(&ledger, &PriorityPool::default());
        assert_eq!(report.stranded_revenue, 900);
        assert_eq!(report.total_burned, 100);
        assert_eq!(report.pool_size, 0);
    }
}
