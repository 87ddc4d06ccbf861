use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressEventKind {
    Started,
    ChunkProcessing,
    ChunkCompleted,
    Completed,
    Error,
}

impl ProgressEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressEventKind::Started => "started",
            ProgressEventKind::ChunkProcessing => "chunk_processing",
            ProgressEventKind::ChunkCompleted => "chunk_completed",
            ProgressEventKind::Completed => "completed",
            ProgressEventKind::Error => "error",
        }
    }
}

impl fmt::Display for ProgressEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    #[serde(rename = "type")]
    pub kind: ProgressEventKind,
    pub progress: u8,
    pub message: String,
}

impl ProgressEvent {
    /// Progress is clamped to 0..=100.
    pub fn new(kind: ProgressEventKind, progress: u8, message: impl Into<String>) -> Self {
        Self {
            kind,
            progress: progress.min(100),
            message: message.into(),
        }
    }

    pub fn started(message: impl Into<String>) -> Self {
        Self::new(ProgressEventKind::Started, 0, message)
    }

    pub fn completed(message: impl Into<String>) -> Self {
        Self::new(ProgressEventKind::Completed, 100, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ProgressEventKind::Error, 0, message)
    }
}
