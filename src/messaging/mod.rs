//! Outbound reminder messages: the request contract and gateway implementations.

pub mod simulated;
pub mod sms_uri;

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

pub use simulated::SimulatedGateway;
pub use sms_uri::{sms_uri, SmsUriGateway};

/// Named subset of students targeted by a messaging action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientGroup {
    Due,
    Paid,
    Selected,
}

impl fmt::Display for RecipientGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecipientGroup::Due => "due",
            RecipientGroup::Paid => "paid",
            RecipientGroup::Selected => "selected",
        };
        f.write_str(label)
    }
}

impl FromStr for RecipientGroup {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "due" | "unpaid" => Ok(RecipientGroup::Due),
            "paid" => Ok(RecipientGroup::Paid),
            "selected" => Ok(RecipientGroup::Selected),
            other => Err(LedgerError::Validation(format!(
                "unknown recipient group `{other}` (expected due, paid or selected)"
            ))),
        }
    }
}

/// One dispatch covering every recipient of a messaging action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRequest {
    pub group: RecipientGroup,
    pub recipients: Vec<String>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Accepted,
    Simulated,
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientOutcome {
    pub phone: String,
    pub status: DeliveryStatus,
    pub message_id: Option<String>,
}

impl RecipientOutcome {
    pub fn rejected(phone: &str, reason: impl Into<String>) -> Self {
        Self {
            phone: phone.to_string(),
            status: DeliveryStatus::Rejected(reason.into()),
            message_id: None,
        }
    }
}

/// Per-recipient result of a dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub outcomes: Vec<RecipientOutcome>,
    /// Gateway-specific artifact handed to the operator, such as an `sms:` URI.
    pub handoff: Option<String>,
}

impl DispatchReport {
    pub fn delivered_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| !matches!(outcome.status, DeliveryStatus::Rejected(_)))
            .count()
    }

    pub fn rejected(&self) -> impl Iterator<Item = &RecipientOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome.status, DeliveryStatus::Rejected(_)))
    }

    pub fn is_success(&self) -> bool {
        self.delivered_count() > 0
    }
}

/// Delivers a message body to a list of phone numbers.
pub trait MessagingGateway: Send + Sync {
    fn dispatch(&self, request: &MessageRequest) -> Result<DispatchReport>;
}

/// Which gateway the CLI wires up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GatewayMode {
    #[default]
    Simulated,
    SmsUri,
}

impl GatewayMode {
    pub fn build(self) -> Box<dyn MessagingGateway> {
        match self {
            GatewayMode::Simulated => Box::new(SimulatedGateway::new()),
            GatewayMode::SmsUri => Box::new(SmsUriGateway),
        }
    }
}

/// Basic E.164 shape check: optional `+`, a non-zero leading digit, 2 to 15
/// digits in total. Whitespace is ignored.
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);
    let mut chars = digits.chars();
    match chars.next() {
        Some(first) if ('1'..='9').contains(&first) => {}
        _ => return false,
    }
    (2..=15).contains(&digits.len()) && chars.all(|c| c.is_ascii_digit())
}
