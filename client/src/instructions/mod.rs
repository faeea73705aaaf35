pub mod ledger_instructions;
pub mod rpc;
pub mod utils;
