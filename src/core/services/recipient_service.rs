use chrono::NaiveDate;

use crate::{
    core::{due_date::is_payment_due, session::Session},
    domain::Student,
    errors::{LedgerError, Result},
    messaging::{DispatchReport, MessageRequest, MessagingGateway, RecipientGroup},
};

/// Read-only partitioning of students into messaging groups.
pub struct RecipientSelector;

impl RecipientSelector {
    pub fn select_due(students: &[Student], reference: NaiveDate) -> Vec<&Student> {
        students
            .iter()
            .filter(|student| is_payment_due(student, reference))
            .collect()
    }

    pub fn select_paid(students: &[Student], reference: NaiveDate) -> Vec<&Student> {
        students
            .iter()
            .filter(|student| !is_payment_due(student, reference))
            .collect()
    }

    /// Resolves `ids` in order, dropping any that no longer match a student.
    pub fn select_by_ids<'a>(students: &'a [Student], ids: &[i64]) -> Vec<&'a Student> {
        ids.iter()
            .filter_map(|id| students.iter().find(|student| student.id == *id))
            .collect()
    }

    pub fn select<'a>(
        group: RecipientGroup,
        students: &'a [Student],
        selection: &[i64],
        reference: NaiveDate,
    ) -> Vec<&'a Student> {
        match group {
            RecipientGroup::Due => Self::select_due(students, reference),
            RecipientGroup::Paid => Self::select_paid(students, reference),
            RecipientGroup::Selected => Self::select_by_ids(students, selection),
        }
    }

    /// Builds the single request covering every student in `group`.
    pub fn compose(
        group: RecipientGroup,
        students: &[Student],
        selection: &[i64],
        body: &str,
        reference: NaiveDate,
    ) -> Result<MessageRequest> {
        let recipients: Vec<String> = Self::select(group, students, selection, reference)
            .into_iter()
            .map(|student| student.phone.clone())
            .collect();
        if recipients.is_empty() {
            let message = match group {
                RecipientGroup::Due => "No students with due payments.",
                RecipientGroup::Paid => "No students with paid fees.",
                RecipientGroup::Selected => "No students selected.",
            };
            return Err(LedgerError::Validation(message.into()));
        }
        let body = body.trim();
        if body.is_empty() {
            return Err(LedgerError::Validation("Please enter a message.".into()));
        }
        Ok(MessageRequest {
            group,
            recipients,
            body: body.to_string(),
        })
    }

    /// Dispatches `request` and clears the session selection once a message
    /// to the selected group went out.
    pub fn send(
        gateway: &dyn MessagingGateway,
        session: &mut Session,
        request: &MessageRequest,
    ) -> Result<DispatchReport> {
        let report = gateway.dispatch(request)?;
        tracing::info!(
            group = %request.group,
            delivered = report.delivered_count(),
            rejected = report.rejected().count(),
            "message dispatched"
        );
        if request.group == RecipientGroup::Selected && report.is_success() {
            session.clear_selection();
        }
        Ok(report)
    }
}
