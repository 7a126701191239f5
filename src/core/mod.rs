pub mod connectivity;
pub mod errors;
pub mod ledger_store;
pub mod services;
pub mod time;
pub mod utils;

pub use ledger_store::LedgerStore;
