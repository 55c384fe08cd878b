use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
    core::due_date::{compute_next_due_date, PaymentStatus},
    domain::Student,
};

const NO_CLASS: &str = "No Class";

/// A student together with the figures shown on listings.
#[derive(Debug, Clone)]
pub struct RosterEntry<'a> {
    pub student: &'a Student,
    pub next_due: NaiveDate,
    pub status: PaymentStatus,
}

/// Students sharing a class label.
#[derive(Debug, Clone)]
pub struct ClassGroup<'a> {
    pub class_name: String,
    pub entries: Vec<RosterEntry<'a>>,
}

pub struct RosterService;

impl RosterService {
    pub fn entry(student: &Student, reference: NaiveDate) -> RosterEntry<'_> {
        RosterEntry {
            student,
            next_due: compute_next_due_date(student.admission_date, reference),
            status: PaymentStatus::classify(student, reference),
        }
    }

    /// Groups students by class. Classes sort by their leading number, then by name.
    pub fn by_class(students: &[Student], reference: NaiveDate) -> Vec<ClassGroup<'_>> {
        let mut grouped: BTreeMap<String, Vec<RosterEntry<'_>>> = BTreeMap::new();
        for student in students {
            let label = match student.class_name.trim() {
                "" => NO_CLASS.to_string(),
                other => other.to_string(),
            };
            grouped
                .entry(label)
                .or_default()
                .push(Self::entry(student, reference));
        }

        let mut groups: Vec<ClassGroup<'_>> = grouped
            .into_iter()
            .map(|(class_name, entries)| ClassGroup {
                class_name,
                entries,
            })
            .collect();
        groups.sort_by(|a, b| compare_class_labels(&a.class_name, &b.class_name));
        groups
    }

    pub fn due_entries(students: &[Student], reference: NaiveDate) -> Vec<RosterEntry<'_>> {
        students
            .iter()
            .map(|student| Self::entry(student, reference))
            .filter(|entry| entry.status == PaymentStatus::Due)
            .collect()
    }
}

fn compare_class_labels(a: &str, b: &str) -> Ordering {
    leading_number(a)
        .cmp(&leading_number(b))
        .then_with(|| a.cmp(b))
}

/// Integer formed by the label's leading digits (after an optional sign), or 0.
fn leading_number(label: &str) -> i64 {
    let trimmed = label.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<i64>().map(|value| sign * value).unwrap_or(0)
}
