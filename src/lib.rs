#![doc(test(attr(deny(warnings))))]

//! Treasury Core provides the recurrence projection, override resolution, and
//! treasury-plan aggregation primitives behind a personal finance tracker.

pub mod config;
pub mod errors;
pub mod ledger;
pub mod plan;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Treasury Core tracing initialized.");
    });
}
