//! Environment configuration, read once per cold start.
use crate::error::TicketError;

const DEFAULT_TABLE_NAME: &str = "MaintenanceRequests";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub table_name: String,
    pub bucket_name: String,
    pub topic_arn: String,
}

impl Config {
    pub fn from_env() -> Result<Self, TicketError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup so tests don't have to touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TicketError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| TicketError::Config(format!("{} environment variable not set", key)))
        };

        Ok(Self {
            table_name: lookup("TICKETS_TABLE_NAME")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
            bucket_name: required("IMAGES_BUCKET_NAME")?,
            topic_arn: required("ALERTS_TOPIC_ARN")?,
        })
    }
}
