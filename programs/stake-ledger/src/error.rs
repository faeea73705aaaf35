use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Signer is not an authorized admin")]
    InvalidOwner,

    #[msg("Mint does not match the configured stake mint")]
    InvalidStakeMint,

    #[msg("Invalid parameter provided")]
    InvalidParam,

    #[msg("Missing remaining account")]
    MissingRemainingAccount,

    // ── invalid arguments ──────────────────────────────────────────────

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Invalid lock period")]
    InvalidLockPeriod,

    #[msg("Position index is out of range")]
    InvalidPositionIndex,

    #[msg("Pool entry name is too long")]
    NameTooLong,

    #[msg("Pool entry tag is too long")]
    TagTooLong,

    // ── precondition violations ────────────────────────────────────────

    #[msg("Position is already closed")]
    PositionAlreadyClosed,

    #[msg("Position is still locked")]
    StillLocked,

    #[msg("Maximum number of positions reached for this account")]
    PositionLimitReached,

    #[msg("Identity already has a pool entry")]
    AlreadyInPool,

    #[msg("Identity has no pool entry")]
    NotInPool,

    #[msg("Priority pool is full")]
    PoolFull,

    #[msg("Pool membership account for a touched entry was not supplied")]
    MissingMembership,

    #[msg("Pool membership account does not belong to the expected identity")]
    MembershipMismatch,

    #[msg("Staking is currently disabled")]
    StakingDisabled,

    #[msg("Priority pool is currently disabled")]
    PoolDisabled,

    // ── arithmetic ─────────────────────────────────────────────────────

    #[msg("Math operation overflowed or underflowed")]
    MathOverflow,

    #[msg("Reward debt exceeds accrued rewards")]
    RewardDebtExceedsAccrued,
}
