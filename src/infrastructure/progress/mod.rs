mod channel_progress_sink;
mod recording_progress_sink;
mod tracing_progress_sink;

pub use channel_progress_sink::ChannelProgressSink;
pub use recording_progress_sink::RecordingProgressSink;
pub use tracing_progress_sink::{NoopProgressSink, TracingProgressSink};
