//! Priority pool: dense entry list plus an identity → slot index map.
//!
//! Slots in the index are 1-based; 0 means "no entry". Removal moves the last
//! entry into the vacated slot, so the index entry of that moved identity has
//! to be rewritten in the same operation.

use crate::error::ErrorCode;
use crate::states::{PoolEntry, PoolMembership, PriorityPool};
use crate::{MAX_POOL_ENTRIES, MAX_POOL_NAME_LEN, MAX_POOL_TAG_LEN};
use anchor_lang::prelude::*;

/// Identity → 1-based slot lookup backing the pool.
pub trait SlotLookup {
    fn slot_of(&self, identity: &Pubkey) -> Result<u32>;
}

/// A `SlotLookup` that insert and remove can write back to.
pub trait SlotIndex: SlotLookup {
    fn set_slot(&mut self, identity: &Pubkey, slot: u32) -> Result<()>;
}

/// A single membership account answers for its own identity only.
impl SlotLookup for PoolMembership {
    fn slot_of(&self, identity: &Pubkey) -> Result<u32> {
        require_keys_eq!(self.identity, *identity, ErrorCode::MissingMembership);
        Ok(self.slot)
    }
}

/// The membership accounts an instruction was given, viewed as a slot index.
///
/// Only identities whose membership account is present can be looked up or
/// written; anything else fails with `MissingMembership`.
pub struct MembershipSlots<'a> {
    memberships: Vec<&'a mut PoolMembership>,
}

impl<'a> MembershipSlots<'a> {
    pub fn new(memberships: Vec<&'a mut PoolMembership>) -> Self {
        Self { memberships }
    }

    fn find(&self, identity: &Pubkey) -> Result<&PoolMembership> {
        self.memberships
            .iter()
            .find(|membership| membership.identity == *identity)
            .map(|membership| &**membership)
            .ok_or(error!(ErrorCode::MissingMembership))
    }
}

impl SlotLookup for MembershipSlots<'_> {
    fn slot_of(&self, identity: &Pubkey) -> Result<u32> {
        Ok(self.find(identity)?.slot)
    }
}

impl SlotIndex for MembershipSlots<'_> {
    fn set_slot(&mut self, identity: &Pubkey, slot: u32) -> Result<()> {
        let membership = self
            .memberships
            .iter_mut()
            .find(|membership| membership.identity == *identity)
            .ok_or(ErrorCode::MissingMembership)?;
        membership.slot = slot;
        Ok(())
    }
}

pub struct PoolBook;

impl PoolBook {
    /// Appends `entry` and records its slot. Returns the 1-based slot.
    ///
    /// # Fails
    /// - `AlreadyInPool` if the identity already has an entry.
    /// - `ZeroAmount`, `NameTooLong`, `TagTooLong` on bad input.
    /// - `PoolFull` at `MAX_POOL_ENTRIES`.
    pub fn insert(
        pool: &mut PriorityPool,
        index: &mut impl SlotIndex,
        entry: PoolEntry,
    ) -> Result<u32> {
        require!(
            index.slot_of(&entry.identity)? == 0,
            ErrorCode::AlreadyInPool
        );
        require_gt!(entry.amount, 0, ErrorCode::ZeroAmount);
        require!(entry.name.len() <= MAX_POOL_NAME_LEN, ErrorCode::NameTooLong);
        require!(entry.tag.len() <= MAX_POOL_TAG_LEN, ErrorCode::TagTooLong);
        require!(pool.entries.len() < MAX_POOL_ENTRIES, ErrorCode::PoolFull);

        let identity = entry.identity;
        pool.entries.push(entry);
        let slot = pool.entries.len() as u32;
        index.set_slot(&identity, slot)?;
        Ok(slot)
    }

    /// Adds `extra` to an existing entry in place. Returns the new amount.
    ///
    /// # Fails
    /// - `ZeroAmount` if `extra == 0`.
    /// - `NotInPool` if the identity has no entry.
    pub fn increase(
        pool: &mut PriorityPool,
        index: &impl SlotLookup,
        identity: &Pubkey,
        extra: u64,
    ) -> Result<u64> {
        require_gt!(extra, 0, ErrorCode::ZeroAmount);
        let position = Self::position_of(pool, index, identity)?;
        let entry = &mut pool.entries[position];
        entry.amount = entry
            .amount
            .checked_add(extra)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(entry.amount)
    }

    /// Removes the identity's entry with swap-with-last and repairs the index.
    ///
    /// # Fails
    /// - `NotInPool` if the identity has no entry.
    /// - `MissingMembership` / `MembershipMismatch` if the moved entry's index
    ///   record is absent or stale. Checked before anything is modified.
    pub fn remove(
        pool: &mut PriorityPool,
        index: &mut impl SlotIndex,
        identity: &Pubkey,
    ) -> Result<PoolEntry> {
        let position = Self::position_of(pool, index, identity)?;
        let last = pool.entries.len() - 1;
        if position != last {
            let moved = pool.entries[last].identity;
            require!(
                index.slot_of(&moved)? as usize == last + 1,
                ErrorCode::MembershipMismatch
            );
        }

        let removed = pool.entries.swap_remove(position);
        if let Some(moved) = pool.entries.get(position) {
            index.set_slot(&moved.identity, position as u32 + 1)?;
        }
        index.set_slot(identity, 0)?;
        Ok(removed)
    }

    /// Entries in slot order.
    pub fn snapshot(pool: &PriorityPool) -> Vec<PoolEntry> {
        pool.entries.clone()
    }

    /// Entries by amount, largest first.
    ///
    /// Stable sort, O(n log n): equal amounts keep their slot order, so the
    /// ranking is deterministic for a given pool state.
    pub fn rank(pool: &PriorityPool) -> Vec<PoolEntry> {
        let mut ranked = pool.entries.clone();
        ranked.sort_by(|a, b| b.amount.cmp(&a.amount));
        ranked
    }

    /// Entry of `identity`, if any.
    pub fn entry<'p>(
        pool: &'p PriorityPool,
        index: &impl SlotLookup,
        identity: &Pubkey,
    ) -> Result<Option<&'p PoolEntry>> {
        match index.slot_of(identity)? {
            0 => Ok(None),
            slot => Ok(pool.entries.get(slot as usize - 1)),
        }
    }

    fn position_of(pool: &PriorityPool, index: &impl SlotLookup, identity: &Pubkey) -> Result<usize> {
        let slot = index.slot_of(identity)?;
        require!(slot != 0, ErrorCode::NotInPool);
        let position = slot as usize - 1;
        require!(
            pool.entries
                .get(position)
                .is_some_and(|entry| entry.identity == *identity),
            ErrorCode::MembershipMismatch
        );
        Ok(position)
    }
}
