#![doc(test(attr(deny(warnings))))]

//! Personal transaction tracker: an ordered income/expense ledger persisted
//! through a key-value store, with filtering, totals, JSON export/import and
//! an online/offline indicator.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Transaction tracker tracing initialized.");
    });
}
