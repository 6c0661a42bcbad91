//! Ticket handlers (create, list, update status, delete).
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::TicketError;
use crate::handlers::AppClients;
use crate::images::{decode_image_payload, image_key_for, IMAGE_CONTENT_TYPE, IMAGE_URL_EXPIRY};
use crate::models::{
    CreateTicketRequest, DeleteTicketRequest, ListedTicket, Ticket, UpdateTicketRequest,
    STATUS_COMPLETE, STATUS_PENDING,
};
use crate::notify::resolution_notice;

/// Creates a new ticket, uploading its photo first if one was sent.
///
/// # Logic
/// - The `ticketId` is always generated here, never taken from the caller.
/// - **Photo**: decoded and stored as `{ticketId}.jpg` before the record is written, so a bad
///   payload or failed upload leaves no record behind.
/// - Missing attributes fall back to `"Unknown"`, `""` (description) and `"Low"` (priority).
///   Supplied ones are stored as sent, whatever their JSON type.
pub async fn handle_create_ticket(
    req: CreateTicketRequest,
    clients: &AppClients,
) -> Result<Value, TicketError> {
    let ticket_id = Uuid::new_v4().to_string();

    let mut image_key = None;
    if let Some(image_data) = req.image_base64.as_deref().filter(|d| !d.is_empty()) {
        let bytes = decode_image_payload(image_data)?;
        let key = image_key_for(&ticket_id);
        clients.images.put_image(&key, bytes, IMAGE_CONTENT_TYPE).await?;
        image_key = Some(key);
    }

    let ticket = Ticket {
        ticket_id: ticket_id.clone(),
        aircraft_program: Some(req.aircraft_program.unwrap_or_else(|| json!("Unknown"))),
        equipment_type: Some(req.equipment_type.unwrap_or_else(|| json!("Unknown"))),
        equipment_id: Some(req.equipment_id.unwrap_or_else(|| json!("Unknown"))),
        description: Some(req.description.unwrap_or_else(|| json!(""))),
        priority: Some(req.priority.unwrap_or_else(|| json!("Low"))),
        status: Some(STATUS_PENDING.to_string()),
        timestamp: Some(Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()),
        image_key,
    };

    clients.tickets.put(&ticket).await?;
    tracing::info!(ticket_id = %ticket_id, has_image = ticket.image_key.is_some(), "Ticket created");

    Ok(json!({"message": "Ticket created", "ticketId": ticket_id}))
}

/// Lists every ticket, newest first.
///
/// # Logic
/// - **Photos**: tickets with an `imageKey` get an `imageUrl` presigned for one hour.
/// - **Ordering**: `timestamp` descending; tickets without one sort last.
pub async fn handle_list_tickets(clients: &AppClients) -> Result<Value, TicketError> {
    let tickets = clients.tickets.scan_all().await?;

    let mut listed = Vec::with_capacity(tickets.len());
    for ticket in tickets {
        let image_url = match ticket.image_key.as_deref() {
            Some(key) => Some(clients.images.presigned_get_url(key, IMAGE_URL_EXPIRY).await?),
            None => None,
        };
        listed.push(ListedTicket { ticket, image_url });
    }

    listed.sort_by(|a, b| {
        let a_ts = a.ticket.timestamp.as_deref().unwrap_or("");
        let b_ts = b.ticket.timestamp.as_deref().unwrap_or("");
        b_ts.cmp(a_ts)
    });

    tracing::info!(count = listed.len(), "Tickets listed");
    Ok(json!(listed))
}

/// Changes a ticket's status, cleaning up its photo and alerting subscribers on completion.
///
/// # Logic
/// - A missing ticket is not an error; the alert then uses placeholder text.
/// - **Photo cleanup**: on `Complete`, the photo is deleted before the status write. A failed
///   delete is logged and ignored. The `imageKey` attribute itself is left as is.
/// - **Alert**: exactly one publish when `sendEmail` is set and the status is `Complete`.
/// - Only the `status` attribute is written.
pub async fn handle_update_ticket(
    req: UpdateTicketRequest,
    clients: &AppClients,
) -> Result<Value, TicketError> {
    let existing = clients.tickets.get(&req.ticket_id).await?;
    let completing = req.status == STATUS_COMPLETE;

    if completing
        && let Some(key) = existing.as_ref().and_then(|t| t.image_key.as_deref())
        && let Err(e) = clients.images.delete_image(key).await
    {
        tracing::warn!(ticket_id = %req.ticket_id, image_key = %key, error = %e, "S3 Delete Error");
    }

    if req.send_email && completing {
        let (subject, message) = resolution_notice(&req.ticket_id, existing.as_ref());
        clients.notifier.publish(&subject, &message).await?;
        tracing::info!(ticket_id = %req.ticket_id, "Resolution notice published");
    }

    clients.tickets.update_status(&req.ticket_id, &req.status).await?;
    tracing::info!(ticket_id = %req.ticket_id, status = %req.status, "Ticket status updated");

    Ok(json!({"message": "Status updated"}))
}

/// Deletes a ticket and, best effort, its photo.
///
/// # Logic
/// - Any photo delete failure is ignored; the record goes regardless.
/// - Deleting a ticket that doesn't exist still succeeds.
pub async fn handle_delete_ticket(
    req: DeleteTicketRequest,
    clients: &AppClients,
) -> Result<Value, TicketError> {
    let existing = clients.tickets.get(&req.ticket_id).await?;

    if let Some(key) = existing.as_ref().and_then(|t| t.image_key.as_deref())
        && let Err(e) = clients.images.delete_image(key).await
    {
        tracing::warn!(ticket_id = %req.ticket_id, image_key = %key, error = %e, "S3 Delete Error");
    }

    clients.tickets.delete(&req.ticket_id).await?;
    tracing::info!(ticket_id = %req.ticket_id, "Ticket deleted");

    Ok(json!({"message": "Deleted"}))
}
