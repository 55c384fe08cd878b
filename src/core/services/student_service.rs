use chrono::NaiveDate;

use crate::{
    domain::StudentDraft,
    errors::{LedgerError, Result},
};

pub struct StudentService;

impl StudentService {
    /// Checks every required field and returns the admission date on success.
    pub fn validate(draft: &StudentDraft) -> Result<NaiveDate> {
        let mut missing = Vec::new();
        if draft.name.trim().is_empty() {
            missing.push("name");
        }
        if draft.phone.trim().is_empty() {
            missing.push("phone");
        }
        if draft.class_name.trim().is_empty() {
            missing.push("class");
        }
        if draft.admission_date.is_none() {
            missing.push("admission date");
        }
        if !missing.is_empty() {
            return Err(LedgerError::Validation(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }
        if !draft.monthly_fee.is_finite() || draft.monthly_fee <= 0.0 {
            return Err(LedgerError::Validation(
                "monthly fee must be greater than zero".into(),
            ));
        }
        draft
            .admission_date
            .ok_or_else(|| LedgerError::Validation("missing admission date".into()))
    }
}
