// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the demo application.

use crate::notifications::Position;
use crate::ui::toast;
use iced::keyboard;
use std::path::PathBuf;
use std::time::Instant;

/// Toast flavours the demo can spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    Message,
    Description,
    Success,
    Info,
    Warning,
    Error,
    Action,
    Important,
    Pinned,
    TopCenter,
}

impl Demo {
    pub const ALL: [Demo; 10] = [
        Demo::Message,
        Demo::Description,
        Demo::Success,
        Demo::Info,
        Demo::Warning,
        Demo::Error,
        Demo::Action,
        Demo::Important,
        Demo::Pinned,
        Demo::TopCenter,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Demo::Message => "Message",
            Demo::Description => "With description",
            Demo::Success => "Success",
            Demo::Info => "Info",
            Demo::Warning => "Warning",
            Demo::Error => "Error",
            Demo::Action => "Action",
            Demo::Important => "Important",
            Demo::Pinned => "Pinned",
            Demo::TopCenter => "Top center",
        }
    }
}

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Toast(toast::Message),
    Show(Demo),
    /// Start a simulated upload tracked by a single toast.
    StartUpload,
    UploadFinished(Result<u32, String>),
    DismissAll,
    ExportDiagnostics,
    KeyPressed(String),
    KeyReleased(String),
    ModifiersChanged(keyboard::Modifiers),
    Tick(Instant), // Periodic tick for toast timers
}

/// Runtime flags passed from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Overrides the configured default position.
    pub position: Option<Position>,
    /// Reads the configuration from this file instead of the default location.
    pub config_path: Option<PathBuf>,
    /// Starts with every group expanded.
    pub expand: bool,
}
