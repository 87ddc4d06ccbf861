use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;
use tokio::task::JoinHandle;

use crate::application::ports::{FileLoader, ProgressSink};
use crate::application::services::{AnonymizationService, OracleRegistry, SubmissionMode};
use crate::domain::{ContentType, Document};
use crate::infrastructure::docx::{DocxPackage, WordDocumentCodec};
use crate::infrastructure::llm::OracleFactory;
use crate::infrastructure::progress::{ChannelProgressSink, NoopProgressSink, TracingProgressSink};
use crate::infrastructure::text_processing::{CompositeFileLoader, SentenceWindowSplitter};

use super::cli::{Cli, Commands, DocumentArgs, ExtractArgs, TextArgs};
use super::config::Settings;

/// Wires settings into services and executes one CLI command.
pub struct App {
    settings: Settings,
    oracles: OracleRegistry,
}

impl App {
    pub fn new(settings: Settings) -> Result<Self> {
        let oracles = OracleFactory::create_registry(&settings.llm)
            .context("Failed to initialize LLM providers")?;
        Ok(Self { settings, oracles })
    }

    pub fn with_oracles(settings: Settings, oracles: OracleRegistry) -> Self {
        Self { settings, oracles }
    }

    pub async fn run(&self, cli: Cli) -> Result<()> {
        match cli.command {
            Commands::Text(args) => self.run_text(args, cli.quiet).await,
            Commands::Document(args) => self.run_document(args, cli.quiet).await,
            Commands::Extract(args) => run_extract(args).await,
            Commands::Providers => {
                self.print_providers();
                Ok(())
            }
        }
    }

    fn service(&self, parallel: bool) -> AnonymizationService<SentenceWindowSplitter> {
        let submission_mode = if parallel {
            SubmissionMode::Parallel
        } else {
            self.settings.pipeline.submission_mode
        };

        AnonymizationService::new(
            self.oracles.clone(),
            Arc::new(SentenceWindowSplitter::new(
                self.settings.chunking.chunk_size,
                self.settings.chunking.chunk_overlap,
            )),
            Arc::new(WordDocumentCodec::new()),
            submission_mode,
        )
    }

    async fn run_text(&self, args: TextArgs, quiet: bool) -> Result<()> {
        let text = read_text_input(&args.input).await?;
        let service = self.service(args.parallel);

        let reporter = ProgressReporter::start(quiet, self.settings.logging.enable_json);
        let result = service
            .anonymize_text(&text, args.provider, reporter.sink())
            .await;
        reporter.finish().await;
        let result = result?;

        let rendered = if args.json {
            serde_json::to_string_pretty(&serde_json::json!({
                "anonymizedText": result.anonymized_text,
                "piiDetected": result.pii_detected,
                "chunksProcessed": result.chunks_processed,
                "provider": result.provider.as_str(),
            }))?
        } else {
            result.anonymized_text
        };

        match &args.output {
            Some(path) => tokio::fs::write(path, rendered)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?,
            None => println!("{}", rendered),
        }
        Ok(())
    }

    async fn run_document(&self, args: DocumentArgs, quiet: bool) -> Result<()> {
        let data = tokio::fs::read(&args.input)
            .await
            .with_context(|| format!("Failed to read {}", args.input.display()))?;
        let mut package = DocxPackage::from_bytes(&data)
            .with_context(|| format!("{} is not a .docx document", args.input.display()))?;
        let service = self.service(args.parallel);

        let reporter = ProgressReporter::start(quiet, self.settings.logging.enable_json);
        let result = service
            .anonymize_package(&mut package, args.provider, reporter.sink())
            .await;
        reporter.finish().await;
        let result = result?;

        package
            .save(&args.output)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;

        tracing::info!(
            output = %args.output.display(),
            replacements = result.replacements.len(),
            runs_changed = result.runs_changed,
            "Anonymized document written"
        );

        if args.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "replacements": result.replacements,
                    "piiDetected": result.pii_detected,
                    "chunksProcessed": result.chunks_processed,
                    "runsChanged": result.runs_changed,
                    "provider": result.provider.as_str(),
                }))?
            );
        }
        Ok(())
    }

    fn print_providers(&self) {
        let default = self.oracles.default_provider();
        for provider in self.oracles.available_providers() {
            let marker = if provider == default { " (default)" } else { "" };
            println!("{}{}", provider, marker);
        }
    }
}

async fn run_extract(args: ExtractArgs) -> Result<()> {
    let content_type = ContentType::from_path(&args.input)
        .with_context(|| format!("Unsupported file type: {}", args.input.display()))?;
    println!("{}", extract_document_text(&args.input, content_type).await?);
    Ok(())
}

async fn extract_document_text(path: &Path, content_type: ContentType) -> Result<String> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let document = Document::new(filename, content_type, data.len() as u64);

    let text = CompositeFileLoader::with_defaults()
        .extract_text(&data, &document)
        .await?;
    Ok(text)
}

/// Stdin and plain files are read as UTF-8; `.docx` and `.pdf` inputs go
/// through the same extraction as `redactor extract`.
async fn read_text_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read stdin")?;
        return Ok(text);
    }

    match ContentType::from_path(path) {
        Some(content_type @ (ContentType::Docx | ContentType::Pdf)) => {
            extract_document_text(path, content_type).await
        }
        _ => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Chooses where progress events go for one run: nowhere when quiet, the log
/// when logging is structured, otherwise a stderr printer fed by a channel.
struct ProgressReporter {
    sink: Box<dyn ProgressSink>,
    printer: Option<JoinHandle<()>>,
}

impl ProgressReporter {
    fn start(quiet: bool, json_logs: bool) -> Self {
        if quiet {
            return Self {
                sink: Box::new(NoopProgressSink),
                printer: None,
            };
        }
        if json_logs {
            return Self {
                sink: Box::new(TracingProgressSink),
                printer: None,
            };
        }

        let (sink, mut receiver) = ChannelProgressSink::channel();
        let printer = tokio::spawn(async move {
            while let Some(event) = receiver.recv().await {
                eprintln!("[{:>3}%] {}: {}", event.progress, event.kind, event.message);
            }
        });
        Self {
            sink: Box::new(sink),
            printer: Some(printer),
        }
    }

    fn sink(&self) -> &dyn ProgressSink {
        self.sink.as_ref()
    }

    /// Drops the sink so the printer drains the channel and exits.
    async fn finish(self) {
        drop(self.sink);
        if let Some(printer) = self.printer {
            if let Err(e) = printer.await {
                tracing::warn!(error = %e, "Progress printer stopped unexpectedly");
            }
        }
    }
}
