//! Record store for tickets (DynamoDB).
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client, error::DisplayErrorContext, types::AttributeValue};

use crate::error::TicketError;
use crate::models::Ticket;

/// Keyed access to ticket records.
#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn get(&self, ticket_id: &str) -> Result<Option<Ticket>, TicketError>;

    /// Writes a brand new record. Fails rather than overwrite an existing `ticketId`.
    async fn put(&self, ticket: &Ticket) -> Result<(), TicketError>;

    /// Partial update: only the `status` attribute changes.
    async fn update_status(&self, ticket_id: &str, status: &str) -> Result<(), TicketError>;

    /// Deleting a missing record is not an error.
    async fn delete(&self, ticket_id: &str) -> Result<(), TicketError>;

    async fn scan_all(&self) -> Result<Vec<Ticket>, TicketError>;
}

pub struct DynamoTicketStore {
    client: Client,
    table_name: String,
}

impl DynamoTicketStore {
    pub fn new(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

fn key_of(ticket_id: &str) -> AttributeValue {
    AttributeValue::S(ticket_id.to_string())
}

#[async_trait]
impl TicketStore for DynamoTicketStore {
    /// # Database Interactions
    /// - **`MaintenanceRequests` Table**: Direct `GetItem` on `ticketId`.
    async fn get(&self, ticket_id: &str) -> Result<Option<Ticket>, TicketError> {
        let output = self.client.get_item()
            .table_name(&self.table_name)
            .key("ticketId", key_of(ticket_id))
            .send()
            .await
            .map_err(|e| TicketError::RecordStore(format!("Failed to get ticket {:?}: {}", ticket_id, DisplayErrorContext(&e))))?;

        match output.item {
            Some(item) => serde_dynamo::from_item(item)
                .map(Some)
                .map_err(|e| TicketError::RecordStore(format!("Failed to deserialize ticket: {}", e))),
            None => Ok(None),
        }
    }

    /// # Database Interactions
    /// - **`MaintenanceRequests` Table**: `PutItem` guarded by `attribute_not_exists(ticketId)`.
    async fn put(&self, ticket: &Ticket) -> Result<(), TicketError> {
        let item: HashMap<String, AttributeValue> = serde_dynamo::to_item(ticket)
            .map_err(|e| TicketError::RecordStore(format!("Failed to serialize ticket: {}", e)))?;

        self.client.put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(ticketId)")
            .send()
            .await
            .map_err(|e| {
                if let Some(service_err) = e.as_service_error() && service_err.is_conditional_check_failed_exception() {
                    return TicketError::RecordStore(format!("Ticket {:?} already exists", ticket.ticket_id));
                }
                TicketError::RecordStore(format!("Failed to create ticket: {}", DisplayErrorContext(&e)))
            })?;

        Ok(())
    }

    /// # Database Interactions
    /// - **`MaintenanceRequests` Table**: `UpdateItem` with `SET #s = :stat`.
    ///
    /// # Logic
    /// - `status` is a DynamoDB reserved word, hence the attribute name alias.
    /// - No existence condition, so updating a missing ticket upserts a bare `{ticketId, status}` row.
    async fn update_status(&self, ticket_id: &str, status: &str) -> Result<(), TicketError> {
        self.client.update_item()
            .table_name(&self.table_name)
            .key("ticketId", key_of(ticket_id))
            .update_expression("SET #s = :stat")
            .expression_attribute_names("#s", "status")
            .expression_attribute_values(":stat", AttributeValue::S(status.to_string()))
            .send()
            .await
            .map_err(|e| TicketError::RecordStore(format!("Failed to update status of {:?}: {}", ticket_id, DisplayErrorContext(&e))))?;

        Ok(())
    }

    async fn delete(&self, ticket_id: &str) -> Result<(), TicketError> {
        self.client.delete_item()
            .table_name(&self.table_name)
            .key("ticketId", key_of(ticket_id))
            .send()
            .await
            .map_err(|e| TicketError::RecordStore(format!("Failed to delete ticket {:?}: {}", ticket_id, DisplayErrorContext(&e))))?;

        Ok(())
    }

    /// # Database Interactions
    /// - **`MaintenanceRequests` Table**: Full `Scan`, following `LastEvaluatedKey` until exhausted.
    ///
    /// # Logic
    /// - No filtering or pagination is exposed to the caller; fine while the catalog stays small.
    async fn scan_all(&self) -> Result<Vec<Ticket>, TicketError> {
        let mut tickets = Vec::new();
        let mut last_evaluated_key = None;

        loop {
            let output = self.client.scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(last_evaluated_key)
                .send()
                .await
                .map_err(|e| TicketError::RecordStore(format!("Failed to scan tickets: {}", DisplayErrorContext(&e))))?;

            let page: Vec<Ticket> = serde_dynamo::from_items(output.items.unwrap_or_default())
                .map_err(|e| TicketError::RecordStore(format!("Failed to deserialize tickets: {}", e)))?;
            tickets.extend(page);

            last_evaluated_key = output.last_evaluated_key;
            if last_evaluated_key.is_none() {
                break;
            }
        }

        Ok(tickets)
    }
}
