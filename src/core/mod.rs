//! Fee ledger business logic: due dates, the ledger store and its services.

pub mod clock;
pub mod due_date;
pub mod ledger_store;
pub mod services;
pub mod session;
pub mod utils;

pub use clock::{Clock, FixedClock, SystemClock};
pub use due_date::{compute_next_due_date, current_due_date, is_payment_due, PaymentStatus};
pub use ledger_store::{LedgerStore, LoadReport, PAYMENTS_KEY, STUDENTS_KEY};
pub use session::Session;
