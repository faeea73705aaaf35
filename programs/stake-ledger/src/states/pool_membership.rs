use anchor_lang::prelude::*;

pub const POOL_MEMBERSHIP_SEED: &str = "pool_membership";

/// Index-map entry of the priority pool for one identity.
///
/// `slot` is the 1-based position of the identity's entry in
/// `PriorityPool::entries`, or 0 when the identity has no entry. The account
/// outlives the entry so an identity can leave and rejoin.
#[account]
#[derive(Default, Debug)]
pub struct PoolMembership {
    pub bump: u8,
    pub identity: Pubkey,
    pub slot: u32,
}

impl PoolMembership {
    /// 8 discriminator + 1 bump + 32 identity + 4 slot
    pub const LEN: usize = 8 + 1 + 32 + 4;
}
