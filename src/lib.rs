#![doc(test(attr(deny(warnings))))]

//! Fee Ledger tracks students, their monthly fee obligations and payment
//! history, and prepares reminder messages for whoever is overdue.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod messaging;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Fee Ledger tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
