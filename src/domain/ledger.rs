use std::collections::HashMap;

use super::{Payment, Student};

/// The combined student and payment collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    pub students: Vec<Student>,
    pub payments: Vec<Payment>,
}

impl Ledger {
    pub fn new(students: Vec<Student>, payments: Vec<Payment>) -> Self {
        Self { students, payments }
    }

    pub fn student(&self, id: i64) -> Option<&Student> {
        self.students.iter().find(|student| student.id == id)
    }

    pub fn student_mut(&mut self, id: i64) -> Option<&mut Student> {
        self.students.iter_mut().find(|student| student.id == id)
    }

    /// Payments recorded for `student_id`, oldest first.
    pub fn payments_for(&self, student_id: i64) -> Vec<&Payment> {
        let mut payments: Vec<&Payment> = self
            .payments
            .iter()
            .filter(|payment| payment.student_id == student_id)
            .collect();
        payments.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        payments
    }

    /// Largest id issued to any student or payment.
    pub fn max_id(&self) -> Option<i64> {
        let students = self.students.iter().map(|student| student.id);
        let payments = self.payments.iter().map(|payment| payment.id);
        students.chain(payments).max()
    }

    pub fn sort_by_id(&mut self) {
        self.students.sort_by_key(|student| student.id);
        self.payments.sort_by_key(|payment| payment.id);
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty() && self.payments.is_empty()
    }

    /// Detects dangling payment references and running totals that disagree
    /// with the recorded payments.
    pub fn integrity_warnings(&self) -> Vec<String> {
        let mut sums: HashMap<i64, f64> = HashMap::new();
        let mut warnings = Vec::new();

        for payment in &self.payments {
            if self.student(payment.student_id).is_none() {
                warnings.push(format!(
                    "payment {} references unknown student {}",
                    payment.id, payment.student_id
                ));
            }
            *sums.entry(payment.student_id).or_insert(0.0) += payment.amount;
        }

        for student in &self.students {
            let recorded = sums.get(&student.id).copied().unwrap_or(0.0);
            if (recorded - student.total_paid).abs() > 1e-6 {
                warnings.push(format!(
                    "student {} total paid {} differs from recorded payments {}",
                    student.id, student.total_paid, recorded
                ));
            }
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;
    use crate::domain::StudentDraft;

    fn student(id: i64, total_paid: f64) -> Student {
        let draft = StudentDraft::new("Mina", "9800000000", "3", None, 400.0);
        let mut student = Student::admit(id, draft, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        student.total_paid = total_paid;
        student
    }

    fn payment(id: i64, student_id: i64, amount: f64, day: u32) -> Payment {
        let date = Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap();
        Payment::new(id, student_id, amount, date)
    }

    #[test]
    fn payments_for_orders_by_date() {
        let ledger = Ledger::new(
            vec![student(1, 300.0)],
            vec![payment(12, 1, 200.0, 20), payment(10, 1, 100.0, 2), payment(11, 2, 50.0, 3)],
        );
        let history: Vec<i64> = ledger.payments_for(1).iter().map(|p| p.id).collect();
        assert_eq!(history, vec![10, 12]);
        assert_eq!(ledger.max_id(), Some(12));
    }

    #[test]
    fn integrity_warnings_flag_orphans_and_mismatches() {
        let ledger = Ledger::new(
            vec![student(1, 500.0)],
            vec![payment(10, 1, 100.0, 2), payment(11, 9, 50.0, 3)],
        );
        let warnings = ledger.integrity_warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("unknown student 9"));
        assert!(warnings[1].contains("student 1"));
    }

    #[test]
    fn consistent_ledger_has_no_warnings() {
        let ledger = Ledger::new(vec![student(1, 100.0)], vec![payment(10, 1, 100.0, 2)]);
        assert!(ledger.integrity_warnings().is_empty());
    }
}
