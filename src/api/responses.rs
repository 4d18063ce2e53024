//! API response structures

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::SessionSnapshot;

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub field: Option<String>,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: &str, message: impl Into<String>) -> Self {
        Self {
            status: status.to_string(),
            message: message.into(),
            timestamp: Utc::now(),
            field: None,
        }
    }

    /// The event was queued for the session
    pub fn accepted(message: impl Into<String>) -> Self {
        Self::new("accepted", message)
    }

    /// The session processed the request
    pub fn ok(message: impl Into<String>) -> Self {
        Self::new("ok", message)
    }

    /// A request field was rejected
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.to_string()),
            ..Self::new("invalid", message)
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self::new("error", message)
    }
}

/// Body of `POST /reminder/confirm`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmRequest {
    pub close: bool,
}

/// Session snapshot plus surface metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(flatten)]
    pub session: SessionSnapshot,
    pub tooltip: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tray_icon: Option<PathBuf>,
    pub uptime: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
