// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types for toast activity tracking.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Stage a toast reached, as seen by the bus or the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStage {
    Created,
    Updated,
    MarkedForDeletion,
    Mounted,
    Paused,
    Resumed,
    AutoClosed,
    Dismissed,
    SwipedOut,
    Removed,
}

/// A diagnostic event with timestamp.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }

    /// Creates a new diagnostic event with a specific timestamp.
    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: Instant) -> Self {
        Self { timestamp, kind }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// A toast moved to a new lifecycle stage.
    Toast {
        id: String,
        stage: LifecycleStage,
    },

    /// Non-critical warning.
    Warning { message: String },

    /// A failure that was isolated, e.g. a subscriber returning an error.
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostic_event_new_creates_with_current_timestamp() {
        let before = Instant::now();
        let event = DiagnosticEvent::new(DiagnosticEventKind::Warning {
            message: "late update".to_string(),
        });
        let after = Instant::now();

        assert!(event.timestamp >= before);
        assert!(event.timestamp <= after);
    }

    #[test]
    fn toast_event_serializes_to_json() {
        let event = DiagnosticEventKind::Toast {
            id: "1".to_string(),
            stage: LifecycleStage::AutoClosed,
        };

        let json = serde_json::to_string(&event).expect("serialization should succeed");
        assert!(json.contains("\"type\":\"toast\""));
        assert!(json.contains("\"stage\":\"auto_closed\""));
    }

    #[test]
    fn error_event_deserializes_from_json() {
        let json = r#"{"type":"error","message":"subscriber 2 failed"}"#;
        let event: DiagnosticEventKind =
            serde_json::from_str(json).expect("deserialization should succeed");

        match event {
            DiagnosticEventKind::Error { message } => {
                assert_eq!(message, "subscriber 2 failed");
            }
            _ => panic!("expected Error variant"),
        }
    }
}
