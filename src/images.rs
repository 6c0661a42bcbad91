//! Ticket photos in S3: upload, cleanup, and presigned links.
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{Client, error::DisplayErrorContext, presigning::PresigningConfig, primitives::ByteStream};
use base64::Engine;

use crate::error::TicketError;

pub const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Lifetime of the links handed out by the list endpoint.
pub const IMAGE_URL_EXPIRY: Duration = Duration::from_secs(3600);

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn put_image(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), TicketError>;

    async fn delete_image(&self, key: &str) -> Result<(), TicketError>;

    /// Time-limited GET link; the object itself stays private.
    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> Result<String, TicketError>;
}

pub struct S3ImageStore {
    client: Client,
    bucket_name: String,
}

impl S3ImageStore {
    pub fn new(client: Client, bucket_name: String) -> Self {
        Self { client, bucket_name }
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    async fn put_image(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), TicketError> {
        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| TicketError::ObjectStore(format!("Failed to upload {:?}: {}", key, DisplayErrorContext(&e))))?;

        Ok(())
    }

    async fn delete_image(&self, key: &str) -> Result<(), TicketError> {
        self.client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(key)
            .send()
            .await
            .map_err(|e| TicketError::ObjectStore(format!("Failed to delete {:?}: {}", key, DisplayErrorContext(&e))))?;

        Ok(())
    }

    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> Result<String, TicketError> {
        let presign_config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| TicketError::ObjectStore(format!("Invalid presigning config: {}", e)))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket_name)
            .key(key)
            .presigned(presign_config)
            .await
            .map_err(|e| TicketError::ObjectStore(format!("Failed to presign {:?}: {}", key, DisplayErrorContext(&e))))?;

        Ok(presigned.uri().to_string())
    }
}

/// Object key for a ticket's photo.
pub fn image_key_for(ticket_id: &str) -> String {
    format!("{}.jpg", ticket_id)
}

/// Decodes a browser-supplied image, dropping any `data:image/...;base64,` prefix.
///
/// Line breaks from MIME-wrapped base64 are ignored.
pub fn decode_image_payload(image_data: &str) -> Result<Vec<u8>, TicketError> {
    let base64_data = match image_data.split_once(',') {
        Some((_, data)) => data,
        None => image_data,
    };
    let base64_data: String = base64_data.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    Ok(base64::engine::general_purpose::STANDARD.decode(base64_data)?)
}
