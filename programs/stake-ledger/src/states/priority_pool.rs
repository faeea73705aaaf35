use crate::{MAX_POOL_ENTRIES, MAX_POOL_NAME_LEN, MAX_POOL_TAG_LEN};
use anchor_lang::prelude::*;

/// PDA seed string used to derive the priority pool account.
pub const PRIORITY_POOL_SEED: &str = "priority_pool";

/// Dense, unordered list of single-entry-per-identity stakes used for ranking.
///
/// Slot order is insertion order disturbed only by swap-with-last removals; a
/// ranked view is computed on demand by `ledger::PoolBook::rank`. The matching
/// index map lives in one `PoolMembership` account per identity.
#[account]
#[derive(Default, Debug, PartialEq, InitSpace)]
pub struct PriorityPool {
    pub bump: u8,

    #[max_len(MAX_POOL_ENTRIES)]
    pub entries: Vec<PoolEntry>,
}

impl PriorityPool {
    pub const LEN: usize = 8 + Self::INIT_SPACE;
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq, InitSpace)]
pub struct PoolEntry {
    pub identity: Pubkey,
    pub amount: u64,
    #[max_len(MAX_POOL_NAME_LEN)]
    pub name: String,
    #[max_len(MAX_POOL_TAG_LEN)]
    pub tag: String,
    pub joined_at: i64,
}
