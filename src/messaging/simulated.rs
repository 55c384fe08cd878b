use chrono::Utc;

use super::{
    is_valid_phone, DeliveryStatus, DispatchReport, MessageRequest, MessagingGateway,
    RecipientOutcome,
};
use crate::errors::Result;

/// Gateway that logs messages instead of contacting a provider.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedGateway;

impl SimulatedGateway {
    pub fn new() -> Self {
        Self
    }
}

impl MessagingGateway for SimulatedGateway {
    fn dispatch(&self, request: &MessageRequest) -> Result<DispatchReport> {
        let stamp = Utc::now().timestamp_millis();
        let outcomes = request
            .recipients
            .iter()
            .enumerate()
            .map(|(index, phone)| {
                if !is_valid_phone(phone) {
                    tracing::warn!(phone = %phone, "rejecting invalid phone number");
                    return RecipientOutcome::rejected(phone, "invalid phone number format");
                }
                tracing::info!(
                    group = %request.group,
                    to = %phone,
                    "[SIMULATED SMS] {}",
                    request.body
                );
                RecipientOutcome {
                    phone: phone.clone(),
                    status: DeliveryStatus::Simulated,
                    message_id: Some(format!("simulated_{stamp}_{index}")),
                }
            })
            .collect();
        Ok(DispatchReport {
            outcomes,
            handoff: None,
        })
    }
}
