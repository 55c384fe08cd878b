use super::{
    is_valid_phone, DeliveryStatus, DispatchReport, MessageRequest, MessagingGateway,
    RecipientOutcome,
};
use crate::errors::{LedgerError, Result};

/// Gateway that hands the whole batch to the device messaging app as a
/// single `sms:` URI, letting the app fan out to every number.
#[derive(Debug, Default, Clone, Copy)]
pub struct SmsUriGateway;

impl MessagingGateway for SmsUriGateway {
    fn dispatch(&self, request: &MessageRequest) -> Result<DispatchReport> {
        let mut accepted = Vec::new();
        let mut outcomes = Vec::new();
        for phone in &request.recipients {
            if is_valid_phone(phone) {
                accepted.push(phone.as_str());
                outcomes.push(RecipientOutcome {
                    phone: phone.clone(),
                    status: DeliveryStatus::Accepted,
                    message_id: None,
                });
            } else {
                outcomes.push(RecipientOutcome::rejected(phone, "invalid phone number format"));
            }
        }
        if accepted.is_empty() {
            return Err(LedgerError::Dispatch(
                "no recipient has a valid phone number".into(),
            ));
        }
        let uri = sms_uri(&accepted, &request.body);
        tracing::info!(recipients = accepted.len(), group = %request.group, "prepared sms hand-off");
        Ok(DispatchReport {
            outcomes,
            handoff: Some(uri),
        })
    }
}

/// Builds `sms:<p1>,<p2>?body=<encoded>`.
pub fn sms_uri<S: AsRef<str>>(recipients: &[S], body: &str) -> String {
    let numbers: Vec<&str> = recipients.iter().map(|phone| phone.as_ref().trim()).collect();
    format!("sms:{}?body={}", numbers.join(","), encode_component(body))
}

/// Percent-encodes everything outside the URI-component unreserved set.
fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            other => encoded.push_str(&format!("%{:02X}", other)),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::RecipientGroup;

    #[test]
    fn encodes_body_like_a_uri_component() {
        assert_eq!(encode_component("Fee due: ₹500 & more"), "Fee%20due%3A%20%E2%82%B9500%20%26%20more");
        assert_eq!(encode_component("it's (ok)!"), "it's%20(ok)!");
    }

    #[test]
    fn builds_single_uri_for_all_recipients() {
        let uri = sms_uri(&["9800000001", " 9800000002 "], "Pay now");
        assert_eq!(uri, "sms:9800000001,9800000002?body=Pay%20now");
    }

    #[test]
    fn dispatch_skips_invalid_numbers() {
        let request = MessageRequest {
            group: RecipientGroup::Selected,
            recipients: vec!["9800000001".into(), "n/a".into()],
            body: "Hello".into(),
        };
        let report = SmsUriGateway.dispatch(&request).unwrap();
        assert_eq!(report.handoff.as_deref(), Some("sms:9800000001?body=Hello"));
        assert_eq!(report.delivered_count(), 1);
        assert_eq!(report.rejected().count(), 1);
    }

    #[test]
    fn dispatch_fails_without_any_valid_number() {
        let request = MessageRequest {
            group: RecipientGroup::Paid,
            recipients: vec!["n/a".into()],
            body: "Hello".into(),
        };
        assert!(matches!(
            SmsUriGateway.dispatch(&request),
            Err(LedgerError::Dispatch(_))
        ));
    }
}
