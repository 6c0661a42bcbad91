use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_COMPLETE: &str = "Complete";

/// A maintenance ticket as stored in the `MaintenanceRequests` table.
///
/// Everything but `ticketId` is optional on read so rows written by older
/// clients still list cleanly. The caller-supplied attributes are free-form:
/// a numeric `priority` is stored and listed as a number.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub ticket_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft_program: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_key: Option<String>,
}

/// A ticket as returned by the list endpoint, with a short-lived photo link.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListedTicket {
    #[serde(flatten)]
    pub ticket: Ticket,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

// Request Bodies
#[derive(Debug, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    pub aircraft_program: Option<Value>,
    pub equipment_type: Option<Value>,
    pub equipment_id: Option<Value>,
    pub description: Option<Value>,
    pub priority: Option<Value>,
    pub image_base64: Option<String>,
}

/// `sendEmail` must be a JSON boolean; `"true"` or `1` fail the request.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketRequest {
    pub ticket_id: String,
    pub status: String,
    #[serde(default)]
    pub send_email: bool,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTicketRequest {
    pub ticket_id: String,
}
