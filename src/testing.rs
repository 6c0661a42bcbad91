//! In-memory stand-ins for DynamoDB, S3 and SNS.
//!
//! Each fake is a cheap `Clone` over shared state, so a test keeps one handle
//! for assertions and boxes another into [`AppClients`]. Fakes built from the
//! same [`CallLog`] also append to it, which orders calls across services.
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use lambda_http::{Body, Response};

use crate::error::TicketError;
use crate::handlers::AppClients;
use crate::images::ImageStore;
use crate::models::Ticket;
use crate::notify::Notifier;
use crate::store::TicketStore;

// ===== CallLog =====

#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn push(&self, entry: String) {
        self.0.lock().expect("log lock").push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().expect("log lock").clone()
    }
}

// ===== InMemoryTicketStore =====

#[derive(Clone, Default)]
pub struct InMemoryTicketStore {
    tickets: Arc<Mutex<HashMap<String, Ticket>>>,
    calls: Arc<Mutex<Vec<String>>>,
    log: CallLog,
}

impl InMemoryTicketStore {
    pub fn with_log(log: &CallLog) -> Self {
        Self { log: log.clone(), ..Default::default() }
    }

    /// Seeds a row without recording a call.
    pub fn insert(&self, ticket: Ticket) {
        self.tickets.lock().expect("store lock").insert(ticket.ticket_id.clone(), ticket);
    }

    pub fn ticket(&self, ticket_id: &str) -> Option<Ticket> {
        self.tickets.lock().expect("store lock").get(ticket_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.tickets.lock().expect("store lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: String) {
        self.log.push(format!("dynamodb {}", call));
        self.calls.lock().expect("calls lock").push(call);
    }
}

#[async_trait]
impl TicketStore for InMemoryTicketStore {
    async fn get(&self, ticket_id: &str) -> Result<Option<Ticket>, TicketError> {
        self.record(format!("get {}", ticket_id));
        Ok(self.ticket(ticket_id))
    }

    async fn put(&self, ticket: &Ticket) -> Result<(), TicketError> {
        self.record(format!("put {}", ticket.ticket_id));
        let mut tickets = self.tickets.lock().expect("store lock");
        if tickets.contains_key(&ticket.ticket_id) {
            return Err(TicketError::RecordStore(format!("Ticket {:?} already exists", ticket.ticket_id)));
        }
        tickets.insert(ticket.ticket_id.clone(), ticket.clone());
        Ok(())
    }

    async fn update_status(&self, ticket_id: &str, status: &str) -> Result<(), TicketError> {
        self.record(format!("update_status {} {}", ticket_id, status));
        let mut tickets = self.tickets.lock().expect("store lock");
        let ticket = tickets.entry(ticket_id.to_string()).or_insert_with(|| Ticket {
            ticket_id: ticket_id.to_string(),
            aircraft_program: None,
            equipment_type: None,
            equipment_id: None,
            description: None,
            priority: None,
            status: None,
            timestamp: None,
            image_key: None,
        });
        ticket.status = Some(status.to_string());
        Ok(())
    }

    async fn delete(&self, ticket_id: &str) -> Result<(), TicketError> {
        self.record(format!("delete {}", ticket_id));
        self.tickets.lock().expect("store lock").remove(ticket_id);
        Ok(())
    }

    async fn scan_all(&self) -> Result<Vec<Ticket>, TicketError> {
        self.record("scan".to_string());
        Ok(self.tickets.lock().expect("store lock").values().cloned().collect())
    }
}

// ===== FakeImageStore =====

#[derive(Clone, Default)]
pub struct FakeImageStore {
    objects: Arc<Mutex<HashMap<String, (Vec<u8>, String)>>>,
    calls: Arc<Mutex<Vec<String>>>,
    fail_puts: Arc<Mutex<bool>>,
    fail_deletes: Arc<Mutex<bool>>,
    log: CallLog,
}

impl FakeImageStore {
    pub fn with_log(log: &CallLog) -> Self {
        Self { log: log.clone(), ..Default::default() }
    }

    pub fn insert(&self, key: &str, bytes: Vec<u8>) {
        self.objects.lock().expect("objects lock").insert(key.to_string(), (bytes, "image/jpeg".to_string()));
    }

    pub fn object(&self, key: &str) -> Option<(Vec<u8>, String)> {
        self.objects.lock().expect("objects lock").get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().expect("objects lock").keys().cloned().collect()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn fail_puts(&self) {
        *self.fail_puts.lock().expect("flag lock") = true;
    }

    /// Deletes report an error. The object is still removed, like S3 timing out after acting.
    pub fn fail_deletes(&self) {
        *self.fail_deletes.lock().expect("flag lock") = true;
    }

    fn record(&self, call: String) {
        self.log.push(format!("s3 {}", call));
        self.calls.lock().expect("calls lock").push(call);
    }
}

#[async_trait]
impl ImageStore for FakeImageStore {
    async fn put_image(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), TicketError> {
        self.record(format!("put {}", key));
        if *self.fail_puts.lock().expect("flag lock") {
            return Err(TicketError::ObjectStore(format!("Failed to upload {:?}: AccessDenied", key)));
        }
        self.objects.lock().expect("objects lock").insert(key.to_string(), (bytes, content_type.to_string()));
        Ok(())
    }

    async fn delete_image(&self, key: &str) -> Result<(), TicketError> {
        self.record(format!("delete {}", key));
        self.objects.lock().expect("objects lock").remove(key);
        if *self.fail_deletes.lock().expect("flag lock") {
            return Err(TicketError::ObjectStore(format!("Failed to delete {:?}: timeout", key)));
        }
        Ok(())
    }

    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> Result<String, TicketError> {
        self.record(format!("presign {}", key));
        Ok(format!(
            "https://ticket-images.s3.amazonaws.com/{}?X-Amz-Expires={}&X-Amz-Signature=fake",
            key,
            expires_in.as_secs()
        ))
    }
}

// ===== RecordingNotifier =====

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    published: Arc<Mutex<Vec<(String, String)>>>,
    log: CallLog,
}

impl RecordingNotifier {
    pub fn with_log(log: &CallLog) -> Self {
        Self { log: log.clone(), ..Default::default() }
    }

    pub fn published(&self) -> Vec<(String, String)> {
        self.published.lock().expect("published lock").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), TicketError> {
        self.log.push(format!("sns publish {}", subject));
        self.published.lock().expect("published lock").push((subject.to_string(), message.to_string()));
        Ok(())
    }
}

pub fn fake_clients(store: &InMemoryTicketStore, images: &FakeImageStore, notifier: &RecordingNotifier) -> AppClients {
    AppClients::new(Box::new(store.clone()), Box::new(images.clone()), Box::new(notifier.clone()))
}

pub fn body_text(response: &Response<Body>) -> String {
    match response.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).into_owned(),
        _ => String::new(),
    }
}
