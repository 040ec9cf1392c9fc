//! Request validation
//!
//! Schema, size, and enum checks applied before anything reaches
//! storage. Failures accumulate per field so a single response can
//! report every problem in a request.

use std::collections::HashMap;
use vigil_core::{CreateSessionRequest, IncomingSignal};

/// Maximum length of a client identifier
pub const MAX_CLIENT_ID_LEN: usize = 256;

/// Maximum length of a device fingerprint
pub const MAX_DEVICE_FINGERPRINT_LEN: usize = 512;

/// Maximum signals accepted per batch
pub const MAX_BATCH_SIZE: usize = 1000;

/// Field-keyed validation failure messages
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    fields: HashMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> HashMap<String, Vec<String>> {
        self.fields
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Validate a session creation request
pub fn validate_create_session(request: &CreateSessionRequest) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if request.client_id.is_empty() {
        errors.add("clientId", "clientId is required");
    } else if request.client_id.len() > MAX_CLIENT_ID_LEN {
        errors.add(
            "clientId",
            format!("clientId must be at most {MAX_CLIENT_ID_LEN} characters"),
        );
    }

    if request.device_fingerprint.is_empty() {
        errors.add("deviceFingerprint", "deviceFingerprint is required");
    } else if request.device_fingerprint.len() > MAX_DEVICE_FINGERPRINT_LEN {
        errors.add(
            "deviceFingerprint",
            format!("deviceFingerprint must be at most {MAX_DEVICE_FINGERPRINT_LEN} characters"),
        );
    }

    errors.into_result()
}

/// Validate a signal batch before conversion and append
pub fn validate_signal_batch(signals: &[IncomingSignal]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if signals.is_empty() {
        errors.add("signals", "signals must contain at least one entry");
    } else if signals.len() > MAX_BATCH_SIZE {
        errors.add(
            "signals",
            format!("signals must contain at most {MAX_BATCH_SIZE} entries"),
        );
    }

    for (index, signal) in signals.iter().enumerate() {
        if signal.signal_type.is_empty() {
            errors.add(format!("signals[{index}].type"), "type is required");
        }
        if signal.timestamp <= 0 {
            errors.add(
                format!("signals[{index}].timestamp"),
                "timestamp must be a positive Unix-millisecond value",
            );
        }
        if signal.payload.is_none() {
            errors.add(format!("signals[{index}].payload"), "payload is required");
        }
    }

    errors.into_result()
}
