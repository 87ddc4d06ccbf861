use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::try_join_all;
use serde::Deserialize;

use crate::application::ports::{
    AnonymizationOracle, CodecError, DocumentPackage, OracleError, OracleResponse, PackageError,
    ProgressSink, RichTextCodec, TextSplitter,
};
use crate::domain::{
    Chunk, LlmProvider, PiiDetected, ProgressEvent, ProgressEventKind, Replacement,
};

use super::oracle_registry::{OracleRegistry, OracleRegistryError};
use super::replacement_applier::apply_replacements;
use super::text_projector::project;

const CHUNK_SEPARATOR: &str = "\n\n";

/// How the chunks of one document are submitted to the oracle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionMode {
    /// One chunk at a time; progress events arrive in chunk order.
    #[default]
    Sequential,
    /// All chunks at once; completion events arrive in any order.
    Parallel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnonymizedText {
    pub anonymized_text: String,
    pub pii_detected: PiiDetected,
    pub chunks_processed: usize,
    pub provider: LlmProvider,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnonymizedDocument {
    /// Concatenated oracle output, for callers that also keep a text copy.
    pub anonymized_text: String,
    pub pii_detected: PiiDetected,
    pub replacements: Vec<Replacement>,
    pub chunks_processed: usize,
    pub runs_changed: usize,
    pub provider: LlmProvider,
}

pub struct AnonymizationService<T: ?Sized>
where
    T: TextSplitter,
{
    oracles: OracleRegistry,
    text_splitter: Arc<T>,
    codec: Arc<dyn RichTextCodec>,
    submission_mode: SubmissionMode,
}

impl<T: ?Sized> AnonymizationService<T>
where
    T: TextSplitter,
{
    pub fn new(
        oracles: OracleRegistry,
        text_splitter: Arc<T>,
        codec: Arc<dyn RichTextCodec>,
        submission_mode: SubmissionMode,
    ) -> Self {
        Self {
            oracles,
            text_splitter,
            codec,
            submission_mode,
        }
    }

    pub fn oracles(&self) -> &OracleRegistry {
        &self.oracles
    }

    /// Chunks `text`, sends every chunk to the oracle and joins the
    /// anonymized chunks with blank lines.
    #[tracing::instrument(skip(self, text, progress), fields(text_len = text.len()))]
    pub async fn anonymize_text(
        &self,
        text: &str,
        provider: Option<LlmProvider>,
        progress: &dyn ProgressSink,
    ) -> Result<AnonymizedText, AnonymizationError> {
        let result = self.process_text(text, provider, progress).await;
        report_outcome(&result, progress, "Anonymization complete");
        result
    }

    /// Anonymizes the main entry of `package` in place. Formatting, opaque
    /// markup and every other package entry are left as they were. On error
    /// the package is not modified.
    #[tracing::instrument(skip(self, package, progress))]
    pub async fn anonymize_package(
        &self,
        package: &mut dyn DocumentPackage,
        provider: Option<LlmProvider>,
        progress: &dyn ProgressSink,
    ) -> Result<AnonymizedDocument, AnonymizationError> {
        let result = self.process_package(package, provider, progress).await;
        report_outcome(&result, progress, "Document anonymization complete");
        result
    }

    async fn process_text(
        &self,
        text: &str,
        provider: Option<LlmProvider>,
        progress: &dyn ProgressSink,
    ) -> Result<AnonymizedText, AnonymizationError> {
        if text.trim().is_empty() {
            return Err(AnonymizationError::EmptyInput);
        }

        let (provider, oracle) = self.oracles.resolve(provider)?;
        let chunks = self.text_splitter.split(text);
        progress.emit(ProgressEvent::started(format!(
            "Processing {} chunk(s) with {}",
            chunks.len(),
            provider
        )));

        let responses = self.submit_chunks(oracle.as_ref(), &chunks, progress).await?;
        let (anonymized_text, pii_detected, _) = merge_responses(responses);

        Ok(AnonymizedText {
            anonymized_text,
            pii_detected,
            chunks_processed: chunks.len(),
            provider,
        })
    }

    async fn process_package(
        &self,
        package: &mut dyn DocumentPackage,
        provider: Option<LlmProvider>,
        progress: &dyn ProgressSink,
    ) -> Result<AnonymizedDocument, AnonymizationError> {
        let (provider, oracle) = self.oracles.resolve(provider)?;

        let content = package.read_main_entry()?;
        let mut tree = self.codec.decode(&content)?;
        let projection = project(&tree);
        tracing::debug!(
            runs = projection.references.len(),
            paragraphs = tree.count_paragraphs(),
            text_len = projection.text.len(),
            "Projected document text"
        );

        if projection.text.trim().is_empty() {
            return Err(AnonymizationError::EmptyInput);
        }

        let chunks = self.text_splitter.split(&projection.text);
        progress.emit(ProgressEvent::started(format!(
            "Processing {} chunk(s) with {}",
            chunks.len(),
            provider
        )));

        let responses = self.submit_chunks(oracle.as_ref(), &chunks, progress).await?;
        let (anonymized_text, pii_detected, replacements) = merge_responses(responses);

        let runs_changed = apply_replacements(&mut tree, &replacements);
        package.write_main_entry(self.codec.encode(&tree))?;

        tracing::info!(
            chunks = chunks.len(),
            replacements = replacements.len(),
            runs_changed,
            "Document anonymized"
        );

        Ok(AnonymizedDocument {
            anonymized_text,
            pii_detected,
            replacements,
            chunks_processed: chunks.len(),
            runs_changed,
            provider,
        })
    }

    /// Returns one response per chunk, in chunk order. The first failure
    /// aborts the whole submission.
    async fn submit_chunks(
        &self,
        oracle: &dyn AnonymizationOracle,
        chunks: &[Chunk],
        progress: &dyn ProgressSink,
    ) -> Result<Vec<OracleResponse>, AnonymizationError> {
        let total = chunks.len();
        match self.submission_mode {
            SubmissionMode::Sequential => {
                let mut responses = Vec::with_capacity(total);
                for chunk in chunks {
                    progress.emit(ProgressEvent::new(
                        ProgressEventKind::ChunkProcessing,
                        percent(chunk.index, total),
                        format!("Processing chunk {}/{}", chunk.index + 1, total),
                    ));
                    let response = call_oracle(oracle, chunk).await?;
                    progress.emit(ProgressEvent::new(
                        ProgressEventKind::ChunkCompleted,
                        completed_percent(chunk.index + 1, total),
                        format!("Completed chunk {}/{}", chunk.index + 1, total),
                    ));
                    responses.push(response);
                }
                Ok(responses)
            }
            SubmissionMode::Parallel => {
                let done = AtomicUsize::new(0);
                let done = &done;
                let calls = chunks.iter().map(|chunk| async move {
                    progress.emit(ProgressEvent::new(
                        ProgressEventKind::ChunkProcessing,
                        0,
                        format!("Processing chunk {}/{}", chunk.index + 1, total),
                    ));
                    let response = call_oracle(oracle, chunk).await?;
                    let finished = done.fetch_add(1, Ordering::SeqCst) + 1;
                    progress.emit(ProgressEvent::new(
                        ProgressEventKind::ChunkCompleted,
                        completed_percent(finished, total),
                        format!("Completed chunk {}/{}", chunk.index + 1, total),
                    ));
                    Ok::<_, AnonymizationError>(response)
                });
                try_join_all(calls).await
            }
        }
    }
}

async fn call_oracle(
    oracle: &dyn AnonymizationOracle,
    chunk: &Chunk,
) -> Result<OracleResponse, AnonymizationError> {
    oracle
        .anonymize(&chunk.text)
        .await
        .map_err(|source| AnonymizationError::OracleFailure {
            chunk_index: chunk.index,
            source,
        })
}

/// Joins chunk outputs and collects replacements in discovery order,
/// dropping exact duplicates.
fn merge_responses(responses: Vec<OracleResponse>) -> (String, PiiDetected, Vec<Replacement>) {
    let mut texts = Vec::with_capacity(responses.len());
    let mut pii_detected = PiiDetected::default();
    let mut replacements: Vec<Replacement> = Vec::new();

    for response in responses {
        texts.push(response.anonymized_text);
        pii_detected.merge(response.pii_detected);
        for replacement in response.replacements {
            if !replacements.contains(&replacement) {
                replacements.push(replacement);
            }
        }
    }

    (texts.join(CHUNK_SEPARATOR), pii_detected, replacements)
}

fn report_outcome<R>(
    result: &Result<R, AnonymizationError>,
    progress: &dyn ProgressSink,
    done_message: &str,
) {
    match result {
        Ok(_) => progress.emit(ProgressEvent::completed(done_message)),
        Err(e) => {
            tracing::error!(error = %e, "Anonymization failed");
            progress.emit(ProgressEvent::error(e.to_string()));
        }
    }
}

fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (done * 100 / total).min(100) as u8
}

/// Held below 100 until the `completed` event.
fn completed_percent(done: usize, total: usize) -> u8 {
    percent(done, total).min(99)
}

#[derive(Debug, thiserror::Error)]
pub enum AnonymizationError {
    #[error("text cannot be empty")]
    EmptyInput,
    #[error(transparent)]
    ProviderNotConfigured(#[from] OracleRegistryError),
    #[error("oracle failed on chunk {chunk_index}: {source}")]
    OracleFailure {
        chunk_index: usize,
        #[source]
        source: OracleError,
    },
    #[error("unsupported container: {0}")]
    UnsupportedContainer(String),
    #[error("malformed tree: {0}")]
    MalformedTree(String),
    #[error("package: {0}")]
    Package(PackageError),
}

impl From<PackageError> for AnonymizationError {
    fn from(err: PackageError) -> Self {
        match err {
            PackageError::UnsupportedContainer(msg) => AnonymizationError::UnsupportedContainer(msg),
            other => AnonymizationError::Package(other),
        }
    }
}

impl From<CodecError> for AnonymizationError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::MalformedTree(msg) => AnonymizationError::MalformedTree(msg),
        }
    }
}
