use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    core::services::{PaymentService, StudentService},
    domain::{Ledger, Payment, Student, StudentDraft},
    errors::{LedgerError, Result},
    storage::BlobStore,
};

/// Blob holding the JSON-encoded student collection.
pub const STUDENTS_KEY: &str = "students";
/// Blob holding the JSON-encoded payment collection.
pub const PAYMENTS_KEY: &str = "payments";

/// Outcome of restoring the ledger from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub students: usize,
    pub payments: usize,
    pub warnings: Vec<String>,
}

/// Owns the in-memory ledger and writes the full collections back to the
/// blob store after every mutation.
pub struct LedgerStore {
    ledger: Ledger,
    storage: Box<dyn BlobStore>,
    last_id: i64,
}

impl LedgerStore {
    /// Creates an empty store. Call [`LedgerStore::load`] to restore saved data.
    pub fn new(storage: Box<dyn BlobStore>) -> Self {
        Self {
            ledger: Ledger::default(),
            storage,
            last_id: 0,
        }
    }

    /// Creates a store and immediately loads whatever the blob store holds.
    pub fn open(storage: Box<dyn BlobStore>) -> (Self, LoadReport) {
        let mut store = Self::new(storage);
        let report = store.load();
        (store, report)
    }

    /// Replaces memory with the persisted collections. A collection that is
    /// unreadable or malformed comes back empty; the problem is logged and
    /// listed in the report rather than raised.
    pub fn load(&mut self) -> LoadReport {
        let mut warnings = Vec::new();
        let students: Vec<Student> = self.load_collection(STUDENTS_KEY, &mut warnings);
        let payments: Vec<Payment> = self.load_collection(PAYMENTS_KEY, &mut warnings);

        self.ledger = Ledger::new(students, payments);
        self.ledger.sort_by_id();
        self.last_id = self.ledger.max_id().unwrap_or(0);

        for warning in self.ledger.integrity_warnings() {
            tracing::warn!("{warning}");
            warnings.push(warning);
        }
        tracing::info!(
            students = self.ledger.students.len(),
            payments = self.ledger.payments.len(),
            "ledger loaded"
        );

        LoadReport {
            students: self.ledger.students.len(),
            payments: self.ledger.payments.len(),
            warnings,
        }
    }

    /// Writes both collections as a replace-all pair. Memory is never rolled
    /// back when this fails.
    pub fn save(&self) -> Result<()> {
        let result = self.write_all();
        match &result {
            Ok(()) => tracing::debug!("ledger saved"),
            Err(err) => tracing::error!(error = %err, "failed to save ledger"),
        }
        result
    }

    /// Validates and admits a new student, then persists.
    pub fn add_student(&mut self, draft: StudentDraft, now: DateTime<Utc>) -> Result<Student> {
        let admission_date = StudentService::validate(&draft)?;
        let id = self.next_id(now);
        let student = Student::admit(id, draft, admission_date);
        self.ledger.students.push(student.clone());
        tracing::info!(student_id = id, name = %student.name, "student added");
        self.save()?;
        Ok(student)
    }

    /// Records a payment and persists. If persisting fails the payment stays
    /// applied in memory and the error is returned.
    pub fn record_payment(
        &mut self,
        student_id: i64,
        amount: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<Payment> {
        PaymentService::validate_amount(amount)?;
        if self.ledger.student(student_id).is_none() {
            return Err(LedgerError::NotFound(student_id));
        }
        let id = self.next_id(timestamp);
        let payment = PaymentService::apply(&mut self.ledger, id, student_id, amount, timestamp)?;
        tracing::info!(student_id, amount, payment_id = id, "payment recorded");
        self.save()?;
        Ok(payment)
    }

    /// Drops every student and payment, in memory and in storage.
    pub fn clear(&mut self) -> Result<()> {
        self.ledger = Ledger::default();
        self.storage.remove(STUDENTS_KEY)?;
        self.storage.remove(PAYMENTS_KEY)?;
        tracing::info!("ledger cleared");
        Ok(())
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn students(&self) -> &[Student] {
        &self.ledger.students
    }

    pub fn payments(&self) -> &[Payment] {
        &self.ledger.payments
    }

    pub fn student(&self, id: i64) -> Option<&Student> {
        self.ledger.student(id)
    }

    pub fn payments_for(&self, student_id: i64) -> Vec<&Payment> {
        self.ledger.payments_for(student_id)
    }

    /// Millisecond timestamp of `now`, bumped past every id issued so far.
    fn next_id(&mut self, now: DateTime<Utc>) -> i64 {
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    fn write_all(&self) -> Result<()> {
        let students = encode(&self.ledger.students)?;
        let payments = encode(&self.ledger.payments)?;
        self.storage.write(STUDENTS_KEY, &students)?;
        self.storage.write(PAYMENTS_KEY, &payments)?;
        Ok(())
    }

    fn load_collection<T: DeserializeOwned>(&self, key: &str, warnings: &mut Vec<String>) -> Vec<T> {
        let raw = match self.storage.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(key, error = %err, "could not read collection, starting empty");
                warnings.push(format!("{key}: {err}"));
                return Vec::new();
            }
        };
        if raw.trim().is_empty() {
            return Vec::new();
        }
        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(key, error = %err, "malformed collection, starting empty");
                warnings.push(format!("{key}: malformed data ({err})"));
                Vec::new()
            }
        }
    }
}

fn encode<T: Serialize>(items: &[T]) -> Result<String> {
    serde_json::to_string_pretty(items).map_err(LedgerError::from)
}
