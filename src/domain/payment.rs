use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::lenient_amount;

/// A single fee payment. Payments are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub student_id: i64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    pub date: DateTime<Utc>,
}

impl Payment {
    pub fn new(id: i64, student_id: i64, amount: f64, date: DateTime<Utc>) -> Self {
        Self {
            id,
            student_id,
            amount,
            date,
        }
    }
}
