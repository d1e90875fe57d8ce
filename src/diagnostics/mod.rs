// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for recording what the toaster did and what went wrong.
//!
//! The bus reports subscriber failures here and the surface records every
//! lifecycle stage a toast goes through. Events travel through a bounded
//! channel into a memory-bounded circular buffer and can be exported as a
//! JSON report.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped event captured by the collector
//! - [`DiagnosticsHandle`]: Cheap, cloneable, non-blocking sender
//! - [`DiagnosticsCollector`]: Owner of the buffer, drained on each tick

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticReport, DiagnosticsCollector, DiagnosticsHandle, SerializableEvent};
pub use events::{DiagnosticEvent, DiagnosticEventKind, LifecycleStage};
