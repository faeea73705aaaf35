pub mod events;
pub use events::*;

pub mod global_config;
pub use global_config::*;

pub mod ledger_state;
pub use ledger_state::*;

pub mod user_stake_info;
pub use user_stake_info::*;

pub mod priority_pool;
pub use priority_pool::*;

pub mod pool_membership;
pub use pool_membership::*;
