// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector and the handle used to feed it.

use std::time::Instant;

use chrono::{DateTime, Utc};
use crossbeam_channel::{bounded, Receiver, Sender};
use serde::Serialize;

use super::{BufferCapacity, CircularBuffer, DiagnosticEvent, DiagnosticEventKind, LifecycleStage};
use crate::notifications::ToastId;

/// Default channel capacity for event buffering.
const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Cloneable sender for diagnostic events.
///
/// Every method is non-blocking and drops the event if the channel is full
/// (backpressure protection), so reporting can never stall the bus.
#[derive(Debug, Clone)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Records a lifecycle stage for a toast.
    pub fn log_toast(&self, id: &ToastId, stage: LifecycleStage) {
        self.send(DiagnosticEventKind::Toast {
            id: id.to_string(),
            stage,
        });
    }

    pub fn log_warning(&self, message: impl Into<String>) {
        self.send(DiagnosticEventKind::Warning {
            message: message.into(),
        });
    }

    pub fn log_error(&self, message: impl Into<String>) {
        self.send(DiagnosticEventKind::Error {
            message: message.into(),
        });
    }

    fn send(&self, kind: DiagnosticEventKind) {
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }
}

/// Event as it appears in an exported report.
#[derive(Debug, Clone, Serialize)]
pub struct SerializableEvent {
    /// Milliseconds since collection started.
    pub at_ms: u64,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

/// JSON report of everything currently buffered.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticReport {
    pub generated_at: DateTime<Utc>,
    pub collection_started_at: DateTime<Utc>,
    pub event_count: usize,
    pub events: Vec<SerializableEvent>,
}

/// Central collector for diagnostic events.
///
/// The collector receives events through a channel and stores them in a
/// memory-bounded circular buffer. Old events are automatically evicted
/// when the buffer reaches capacity.
pub struct DiagnosticsCollector {
    buffer: CircularBuffer<DiagnosticEvent>,
    event_rx: Receiver<DiagnosticEvent>,
    event_tx: Sender<DiagnosticEvent>,
    collection_started_at: Instant,
    collection_started_at_utc: DateTime<Utc>,
}

impl DiagnosticsCollector {
    /// Creates a new diagnostics collector with the specified buffer capacity.
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        let (event_tx, event_rx) = bounded(DEFAULT_CHANNEL_CAPACITY);

        Self {
            buffer: CircularBuffer::new(capacity),
            event_rx,
            event_tx,
            collection_started_at: Instant::now(),
            collection_started_at_utc: Utc::now(),
        }
    }

    /// Creates a handle for sending events to this collector.
    #[must_use]
    pub fn handle(&self) -> DiagnosticsHandle {
        DiagnosticsHandle {
            event_tx: self.event_tx.clone(),
        }
    }

    /// Drains the channel into the buffer.
    ///
    /// Call this periodically (e.g., on each UI tick).
    pub fn process_pending(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns an iterator over all stored events (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Exports all collected events as a pretty-printed JSON report.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn export_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.build_report())
    }

    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    fn build_report(&self) -> DiagnosticReport {
        let events: Vec<SerializableEvent> = self
            .buffer
            .iter()
            .map(|event| SerializableEvent {
                at_ms: event
                    .timestamp
                    .saturating_duration_since(self.collection_started_at)
                    .as_millis() as u64,
                kind: event.kind.clone(),
            })
            .collect();

        DiagnosticReport {
            generated_at: Utc::now(),
            collection_started_at: self.collection_started_at_utc,
            event_count: events.len(),
            events,
        }
    }
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::new(BufferCapacity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_events_reach_buffer_after_processing() {
        let mut collector = DiagnosticsCollector::default();
        let handle = collector.handle();

        handle.log_toast(&ToastId::Num(1), LifecycleStage::Created);
        handle.log_error("subscriber failed");
        assert!(collector.is_empty());

        collector.process_pending();
        assert_eq!(collector.len(), 2);

        let kinds: Vec<_> = collector.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds[0],
            DiagnosticEventKind::Toast {
                id: "1".to_string(),
                stage: LifecycleStage::Created,
            }
        );
    }

    #[test]
    fn export_json_contains_events() {
        let mut collector = DiagnosticsCollector::default();
        collector.handle().log_warning("late update for 4");
        collector.process_pending();

        let json = collector.export_json().expect("export should succeed");
        assert!(json.contains("\"event_count\": 1"));
        assert!(json.contains("late update for 4"));
    }

    #[test]
    fn full_channel_drops_instead_of_blocking() {
        let collector = DiagnosticsCollector::default();
        let handle = collector.handle();
        for _ in 0..(DEFAULT_CHANNEL_CAPACITY + 10) {
            handle.log_warning("spam");
        }
        // Reaching this line is the assertion: sends never block.
    }
}
