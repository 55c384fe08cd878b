use std::fmt;

use chrono::NaiveDate;
use serde::{de::Deserializer, Deserialize, Serialize};

use super::common::lenient_amount;

/// A student enrolled on a fixed monthly fee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub phone: String,
    #[serde(rename = "class", default)]
    pub class_name: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub monthly_fee: f64,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_paid: f64,
    pub admission_date: NaiveDate,
    #[serde(default)]
    pub last_payment_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: StudentStatus,
}

impl Student {
    /// Builds a freshly admitted student from validated form input.
    pub fn admit(id: i64, draft: StudentDraft, admission_date: NaiveDate) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            class_name: draft.class_name.trim().to_string(),
            monthly_fee: draft.monthly_fee,
            total_paid: 0.0,
            admission_date,
            last_payment_date: None,
            status: StudentStatus::Active,
        }
    }

    /// Day of month that anchors the billing cycle.
    pub fn billing_day(&self) -> u32 {
        chrono::Datelike::day(&self.admission_date)
    }
}

/// Unvalidated input for a new student.
#[derive(Debug, Clone, Default)]
pub struct StudentDraft {
    pub name: String,
    pub phone: String,
    pub class_name: String,
    pub admission_date: Option<NaiveDate>,
    pub monthly_fee: f64,
}

impl StudentDraft {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        class_name: impl Into<String>,
        admission_date: Option<NaiveDate>,
        monthly_fee: f64,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            class_name: class_name.into(),
            admission_date,
            monthly_fee,
        }
    }
}

/// Lifecycle flag kept on every student. Not enforced anywhere yet.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    #[default]
    Active,
    Withdrawn,
}

impl StudentStatus {
    pub fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "withdrawn" => StudentStatus::Withdrawn,
            _ => StudentStatus::Active,
        }
    }
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StudentStatus::Active => "active",
            StudentStatus::Withdrawn => "withdrawn",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for StudentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .map(|raw| StudentStatus::from_str(&raw))
            .unwrap_or_default())
    }
}
