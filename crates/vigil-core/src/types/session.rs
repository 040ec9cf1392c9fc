//! Session records
//!
//! A session is the envelope that groups the signals from one user
//! interaction window. Sessions are created by the ingestion path and
//! mutated exactly once, when they are completed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Request to create a new session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// Caller-assigned client identifier (max 256 chars)
    pub client_id: String,

    /// Device fingerprint hash reported by the capture SDK (max 512 chars)
    pub device_fingerprint: String,

    /// Optional free-form metadata attached to the session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

/// A tracked user session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,

    pub client_id: String,

    pub device_fingerprint: String,

    pub created_at: DateTime<Utc>,

    /// Set when the client marks the session complete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<HashMap<String, serde_json::Value>>,
}

impl Session {
    /// Whether the session has been marked complete
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}
