use crate::application::ports::ProgressSink;
use crate::domain::{ProgressEvent, ProgressEventKind};

/// Writes every event to the log. Errors are logged at `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgressSink;

impl ProgressSink for TracingProgressSink {
    fn emit(&self, event: ProgressEvent) {
        match event.kind {
            ProgressEventKind::Error => tracing::warn!(
                kind = %event.kind,
                progress = event.progress,
                "{}",
                event.message
            ),
            _ => tracing::info!(
                kind = %event.kind,
                progress = event.progress,
                "{}",
                event.message
            ),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgressSink;

impl ProgressSink for NoopProgressSink {
    fn emit(&self, _event: ProgressEvent) {}
}
