//! Accounting engine.
//!
//! Everything in here operates on plain account structs and never performs a
//! CPI, so instructions can run every check and mutation first and move
//! tokens last. Each operation validates all of its preconditions before the
//! first write: a rejected call leaves the ledger, the identity account and
//! the pool exactly as they were.

pub mod math;
pub mod multiplier;
pub mod pool_book;
pub mod premium;
pub mod revenue;
pub mod stake_book;

pub use multiplier::*;
pub use pool_book::*;
pub use premium::*;
pub use revenue::*;
pub use stake_book::*;
