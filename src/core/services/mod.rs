pub mod payment_service;
pub mod recipient_service;
pub mod roster_service;
pub mod student_service;

pub use payment_service::PaymentService;
pub use recipient_service::RecipientSelector;
pub use roster_service::{ClassGroup, RosterEntry, RosterService};
pub use student_service::StudentService;
