use crate::domain::ProgressEvent;

/// Receives lifecycle events of one pipeline run. Delivery is the
/// implementation's concern; emitting never fails the pipeline.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}
