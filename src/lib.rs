#![doc(test(attr(deny(warnings))))]

//! Finance Reports turns recorded transactions, categories and budgets into
//! the chart-ready views of a personal finance dashboard.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod reports;
pub mod storage;
pub mod store;
pub mod utils;

pub use errors::{FinanceError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Finance Reports tracing initialized.");
    });
}
