//! Handler modules for Lambda function

pub mod tickets;

use crate::images::ImageStore;
use crate::notify::Notifier;
use crate::store::TicketStore;

// Re-export handler functions for convenience
pub use tickets::{handle_create_ticket, handle_delete_ticket, handle_list_tickets, handle_update_ticket};

/// The three AWS collaborators, built once per cold start and shared by every request.
pub struct AppClients {
    pub tickets: Box<dyn TicketStore>,
    pub images: Box<dyn ImageStore>,
    pub notifier: Box<dyn Notifier>,
}

impl AppClients {
    pub fn new(tickets: Box<dyn TicketStore>, images: Box<dyn ImageStore>, notifier: Box<dyn Notifier>) -> Self {
        Self { tickets, images, notifier }
    }
}
