//! Monthly due-date arithmetic and payment-status classification.
//!
//! All comparisons happen at calendar-day granularity. A due date that falls
//! on the reference day counts as reached.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::Student;

/// Whether a student owes the fee for the current cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Due,
    Paid,
}

impl PaymentStatus {
    pub fn classify(student: &Student, reference: NaiveDate) -> Self {
        if is_payment_due(student, reference) {
            PaymentStatus::Due
        } else {
            PaymentStatus::Paid
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentStatus::Due => "Due",
            PaymentStatus::Paid => "Paid",
        };
        f.write_str(label)
    }
}

/// First due date on or after `reference`, anchored on the admission day of month.
pub fn compute_next_due_date(admission: NaiveDate, reference: NaiveDate) -> NaiveDate {
    let day = admission.day();
    let candidate = due_in_month(reference.year(), reference.month(), day);
    if candidate < reference {
        let (year, month) = shift_month(reference.year(), reference.month(), 1);
        due_in_month(year, month, day)
    } else {
        candidate
    }
}

/// Due date governing the cycle that contains `reference`: the latest due
/// date on or before it.
pub fn current_due_date(admission: NaiveDate, reference: NaiveDate) -> NaiveDate {
    let next = compute_next_due_date(admission, reference);
    if next == reference {
        return next;
    }
    let (year, month) = shift_month(next.year(), next.month(), -1);
    due_in_month(year, month, admission.day())
}

/// A student is due once the cycle's due date is reached and no payment
/// dated on or after it exists. Never-paid students are always due.
pub fn is_payment_due(student: &Student, reference: NaiveDate) -> bool {
    let Some(last_payment) = student.last_payment_date else {
        return true;
    };
    let due = current_due_date(student.admission_date, reference);
    reference >= due && last_payment < due
}

/// Day `day` of the given month, clamped to the month's last day.
fn due_in_month(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MAX)
}

fn shift_month(year: i32, month: u32, months: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + months;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = shift_month(year, month, 1);
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|first_next| (first_next - Duration::days(1)).day())
        .unwrap_or(28)
}
