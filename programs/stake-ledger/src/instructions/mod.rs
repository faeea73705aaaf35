pub mod initialise_configs;
pub use initialise_configs::*;

pub mod update_configs;
pub use update_configs::*;

pub mod open_stake;
pub use open_stake::*;

pub mod close_stake;
pub use close_stake::*;

pub mod claim_rewards;
pub use claim_rewards::*;

pub mod deposit_revenue;
pub use deposit_revenue::*;

pub mod join_pool;
pub use join_pool::*;

pub mod increase_pool_entry;
pub use increase_pool_entry::*;

pub mod leave_pool;
pub use leave_pool::*;
