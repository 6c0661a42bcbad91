//! Resolution alerts published to the maintenance SNS topic.
use async_trait::async_trait;
use aws_sdk_sns::{Client, error::DisplayErrorContext};
use serde_json::Value;

use crate::error::TicketError;
use crate::models::Ticket;

/// Fire-and-forget publisher; delivery is SNS's problem.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), TicketError>;
}

pub struct SnsNotifier {
    client: Client,
    topic_arn: String,
}

impl SnsNotifier {
    pub fn new(client: Client, topic_arn: String) -> Self {
        Self { client, topic_arn }
    }
}

#[async_trait]
impl Notifier for SnsNotifier {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), TicketError> {
        self.client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject)
            .message(message)
            .send()
            .await
            .map_err(|e| TicketError::Notification(format!("Failed to publish to {}: {}", self.topic_arn, DisplayErrorContext(&e))))?;

        Ok(())
    }
}

/// Strings go in bare; numbers and other values use their JSON text.
fn attribute_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Subject and body of the "ticket resolved" alert.
///
/// `existing` is `None` when the ticket couldn't be found; the alert still goes out with placeholders.
pub fn resolution_notice(ticket_id: &str, existing: Option<&Ticket>) -> (String, String) {
    let equipment_id = existing
        .and_then(|t| t.equipment_id.as_ref())
        .map(attribute_text)
        .unwrap_or_else(|| "Unknown Equipment".to_string());
    let program = existing
        .and_then(|t| t.aircraft_program.as_ref())
        .map(attribute_text)
        .unwrap_or_default();

    let subject = format!("RESOLVED: {} - {}", program, equipment_id);
    let message = format!(
        "Good news!\n\nThe maintenance request for {} ({}) has been marked as COMPLETE by the technician.\n\nTicket ID: {}",
        equipment_id, program, ticket_id
    );
    (subject, message)
}
