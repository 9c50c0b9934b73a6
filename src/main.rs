use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use insightstream::config::Config;
use insightstream::llm::OpenAiBackend;
use insightstream::models::PrioritizationRequest;
use insightstream::prioritization::{render_table, ScoringOracle};
use insightstream::{api, store};

#[derive(Parser)]
#[command(name = "insightstream")]
#[command(about = "Product dashboard, roadmap board and AI feature prioritization")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port for HTTP API (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind (overrides config)
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Score the features in a request file and print the ranked table
    Prioritize {
        /// JSON file with `keyMetrics` and `features`
        input: PathBuf,
    },
}

/// Initialize tracing with output to stderr (for one-shot commands) or stdout
fn init_tracing(use_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "insightstream=debug,tower_http=debug".into()),
    );

    if use_stderr {
        // Keep stdout clean for the rendered table
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn build_oracle(config: &Config) -> anyhow::Result<ScoringOracle> {
    let backend = OpenAiBackend::new(&config.oracle)?;
    tracing::info!(
        "Scoring oracle: model {} at {}",
        config.oracle.model,
        config.oracle.base_url
    );
    Ok(ScoringOracle::new(Arc::new(backend), config.oracle.timeout()))
}

async fn serve(mut config: Config, port: Option<u16>, bind: Option<String>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(bind) = bind {
        config.bind = bind;
    }

    let store = store::Store::new(build_oracle(&config)?)?;
    let app = api::create_router_with_cors(store, config.cors_origins.as_deref());

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("InsightStream server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn prioritize(config: Config, input: PathBuf) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let request: PrioritizationRequest = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    let oracle = build_oracle(&config)?;
    let result = oracle.prioritize(&request).await?;

    print!("{}", render_table(&result));
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let use_stderr = matches!(cli.command, Some(Commands::Prioritize { .. }));
    init_tracing(use_stderr);

    let config = Config::load();

    match cli.command {
        Some(Commands::Serve { port, bind }) => serve(config, port, bind).await,
        Some(Commands::Prioritize { input }) => prioritize(config, input).await,
        None => serve(config, None, None).await,
    }
}
