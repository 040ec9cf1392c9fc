//! Behavioral signals and the canonical signal taxonomy

use crate::error::CoreError;
use crate::types::SignalPayload;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Canonical signal taxonomy
///
/// The taxonomy is closed: wire-format names outside this set map to
/// [`SignalType::Unknown`] and are still accepted by the ingestion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    MouseMove,
    MouseClick,
    Keystroke,
    KeystrokeDynamics,
    Scroll,
    Touch,
    Visibility,
    Focus,
    Paste,
    Device,
    Performance,
    Fingerprint,
    FormInteraction,
    Accelerometer,
    Gyroscope,
    AppLifecycle,
    JailbreakDetection,
    RootDetection,
    Unknown,
}

impl SignalType {
    /// Map a wire-format type name onto the taxonomy.
    ///
    /// The wire accepts both snake_case (`keystroke_dynamics`) and
    /// camelCase (`keystrokeDynamics`); unrecognized names map to
    /// `Unknown`. Normalization is idempotent.
    pub fn from_wire(raw: &str) -> Self {
        raw.parse().unwrap_or(Self::Unknown)
    }

    /// Canonical snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MouseMove => "mouse_move",
            Self::MouseClick => "mouse_click",
            Self::Keystroke => "keystroke",
            Self::KeystrokeDynamics => "keystroke_dynamics",
            Self::Scroll => "scroll",
            Self::Touch => "touch",
            Self::Visibility => "visibility",
            Self::Focus => "focus",
            Self::Paste => "paste",
            Self::Device => "device",
            Self::Performance => "performance",
            Self::Fingerprint => "fingerprint",
            Self::FormInteraction => "form_interaction",
            Self::Accelerometer => "accelerometer",
            Self::Gyroscope => "gyroscope",
            Self::AppLifecycle => "app_lifecycle",
            Self::JailbreakDetection => "jailbreak_detection",
            Self::RootDetection => "root_detection",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Strip underscores and lower-case so snake_case and camelCase
        // spellings of the same name collapse to one key.
        let folded: String = s
            .chars()
            .filter(|c| *c != '_')
            .collect::<String>()
            .to_lowercase();

        let signal_type = match folded.as_str() {
            "mousemove" => Self::MouseMove,
            "mouseclick" => Self::MouseClick,
            "keystroke" => Self::Keystroke,
            "keystrokedynamics" => Self::KeystrokeDynamics,
            "scroll" => Self::Scroll,
            "touch" => Self::Touch,
            "visibility" => Self::Visibility,
            "focus" => Self::Focus,
            "paste" => Self::Paste,
            "device" => Self::Device,
            "performance" => Self::Performance,
            "fingerprint" => Self::Fingerprint,
            "forminteraction" => Self::FormInteraction,
            "accelerometer" => Self::Accelerometer,
            "gyroscope" => Self::Gyroscope,
            "applifecycle" => Self::AppLifecycle,
            "jailbreakdetection" => Self::JailbreakDetection,
            "rootdetection" => Self::RootDetection,
            "unknown" => Self::Unknown,
            _ => return Err(CoreError::UnknownSignalType(s.to_string())),
        };

        Ok(signal_type)
    }
}

/// A single behavioral measurement belonging to a session
///
/// Signals are immutable after append. Within a session they form an
/// unordered multiset on write; reads return them sorted ascending by
/// `timestamp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub id: Uuid,

    pub session_id: Uuid,

    #[serde(rename = "type")]
    pub signal_type: SignalType,

    /// Client-reported capture time, Unix milliseconds
    pub timestamp: i64,

    pub payload: SignalPayload,
}

impl Signal {
    /// Create a signal with a freshly generated ID
    pub fn new(
        session_id: Uuid,
        signal_type: SignalType,
        timestamp: i64,
        payload: SignalPayload,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            signal_type,
            timestamp,
            payload,
        }
    }
}

/// Wire form of a signal, before validation and taxonomy normalization
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingSignal {
    #[serde(rename = "type", default)]
    pub signal_type: String,

    /// Unix milliseconds; zero/negative values are rejected by validation
    #[serde(default)]
    pub timestamp: i64,

    #[serde(default)]
    pub payload: Option<HashMap<String, serde_json::Value>>,
}

impl IncomingSignal {
    /// Convert into a stored signal for the given session
    pub fn into_signal(self, session_id: Uuid) -> Signal {
        Signal::new(
            session_id,
            SignalType::from_wire(&self.signal_type),
            self.timestamp,
            SignalPayload::from(self.payload.unwrap_or_default()),
        )
    }
}
