use std::time::{Duration, Instant};

use crate::config;

/// User-facing outcome messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusMessage {
    Ready,
    Saved,
    SaveFailed,
    Loaded,
    NoSavedDesign,
    MalformedSave,
    LoadFailed,
    Rendering,
    Exported,
    ExportFailed,
    BackgroundRejected,
}

impl StatusMessage {
    pub fn text(self) -> &'static str {
        match self {
            StatusMessage::Ready => config::STATUS_READY,
            StatusMessage::Saved => "Design Saved!",
            StatusMessage::SaveFailed => "Save failed.",
            StatusMessage::Loaded => "Design Loaded!",
            StatusMessage::NoSavedDesign => "No saved design found.",
            StatusMessage::MalformedSave => "Saved design is unreadable.",
            StatusMessage::LoadFailed => "Could not read saved design.",
            StatusMessage::Rendering => "Rendering...",
            StatusMessage::Exported => "Exported!",
            StatusMessage::ExportFailed => "Export failed.",
            StatusMessage::BackgroundRejected => "Could not read that image.",
        }
    }

    /// Progress messages stay until replaced; outcomes revert to [`StatusMessage::Ready`].
    fn is_transient(self) -> bool {
        !matches!(self, StatusMessage::Ready | StatusMessage::Rendering)
    }
}

impl std::fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

/// Single-line status indicator. Time is passed in explicitly.
#[derive(Clone, Debug)]
pub struct StatusLine {
    message: StatusMessage,
    shown_at: Option<Instant>,
    revert_after: Duration,
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new(config::STATUS_REVERT_DELAY)
    }
}

impl StatusLine {
    pub fn new(revert_after: Duration) -> Self {
        Self {
            message: StatusMessage::Ready,
            shown_at: None,
            revert_after,
        }
    }

    pub fn show(&mut self, message: StatusMessage, now: Instant) {
        self.message = message;
        self.shown_at = Some(now);
    }

    /// The message visible at `now`.
    pub fn current(&self, now: Instant) -> StatusMessage {
        match self.shown_at {
            Some(at)
                if self.message.is_transient()
                    && now.saturating_duration_since(at) >= self.revert_after =>
            {
                StatusMessage::Ready
            }
            _ => self.message,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/status.rs"]
mod tests;
