use chrono::{DateTime, Utc};

use crate::{
    domain::{Ledger, Payment},
    errors::{LedgerError, Result},
};

pub struct PaymentService;

impl PaymentService {
    /// Applies a payment to `ledger`: appends the record, bumps the student's
    /// running total and stamps the payment day. All checks run before any
    /// field is touched, so a failure leaves the ledger unchanged.
    pub fn apply(
        ledger: &mut Ledger,
        payment_id: i64,
        student_id: i64,
        amount: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<Payment> {
        Self::validate_amount(amount)?;
        let student = ledger
            .student_mut(student_id)
            .ok_or(LedgerError::NotFound(student_id))?;

        student.total_paid += amount;
        student.last_payment_date = Some(timestamp.date_naive());

        let payment = Payment::new(payment_id, student_id, amount, timestamp);
        ledger.payments.push(payment.clone());
        Ok(payment)
    }

    pub fn validate_amount(amount: f64) -> Result<()> {
        if amount.is_finite() && amount > 0.0 {
            Ok(())
        } else {
            Err(LedgerError::Validation(
                "payment amount must be greater than zero".into(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;
    use crate::domain::{Student, StudentDraft};

    fn ledger() -> Ledger {
        let admission = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let draft = StudentDraft::new("Asha", "9800000001", "5", Some(admission), 500.0);
        Ledger::new(vec![Student::admit(7, draft, admission)], Vec::new())
    }

    #[test]
    fn apply_updates_student_and_history() {
        let mut ledger = ledger();
        let at = Utc.with_ymd_and_hms(2024, 3, 16, 23, 30, 0).unwrap();
        let payment = PaymentService::apply(&mut ledger, 100, 7, 500.0, at).unwrap();

        assert_eq!(payment.amount, 500.0);
        assert_eq!(payment.student_id, 7);
        let student = ledger.student(7).unwrap();
        assert_eq!(student.total_paid, 500.0);
        assert_eq!(student.last_payment_date, NaiveDate::from_ymd_opt(2024, 3, 16));
        assert_eq!(ledger.payments.len(), 1);
    }

    #[test]
    fn unknown_student_leaves_ledger_untouched() {
        let mut ledger = ledger();
        let before = ledger.clone();
        let err = PaymentService::apply(&mut ledger, 100, 99, 50.0, Utc::now()).unwrap_err();
        assert!(matches!(err, LedgerError::NotFound(99)));
        assert_eq!(ledger, before);
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let mut ledger = ledger();
        let before = ledger.clone();
        for amount in [0.0, -5.0, f64::INFINITY] {
            let err = PaymentService::apply(&mut ledger, 100, 7, amount, Utc::now()).unwrap_err();
            assert!(matches!(err, LedgerError::Validation(_)));
        }
        assert_eq!(ledger, before);
    }
}
