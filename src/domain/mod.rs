//! Pure fee-ledger models. No I/O, no CLI, no storage.

pub(crate) mod common;
pub mod ledger;
pub mod payment;
pub mod student;

pub use ledger::Ledger;
pub use payment::Payment;
pub use student::{Student, StudentDraft, StudentStatus};
