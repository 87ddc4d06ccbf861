use clap::Parser;

use redactor::infrastructure::observability::{TracingConfig, init_tracing};
use redactor::presentation::{App, Cli, Environment, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;

    let settings = Settings::load(environment)?;

    let json_format = settings.logging.enable_json
        || std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
    init_tracing(&TracingConfig::new(
        environment.as_str(),
        json_format,
        &settings.logging.level,
    ));

    tracing::debug!(
        chunk_size = settings.chunking.chunk_size,
        chunk_overlap = settings.chunking.chunk_overlap,
        default_provider = %settings.llm.default_provider,
        "Configuration loaded"
    );

    let app = App::new(settings)?;
    app.run(cli).await
}
