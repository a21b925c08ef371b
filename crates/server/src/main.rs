use clap::Parser;
use sift_core::config::{self, RankingConfig};
use sift_core::storage::SnapshotPaths;
use sift_core::{CorpusType, IndexMode, SearchService};
use sift_server::api::create_router;
use sift_server::api::handlers::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sift", about = "News and job posting search service")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "SIFT_PORT", default_value_t = config::DEFAULT_PORT)]
    port: u16,

    /// Directory for persisted indices
    #[arg(short, long, env = "SIFT_DATA_DIR", default_value = config::DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// News snapshot CSV
    #[arg(long, env = "SIFT_NEWS_CSV", default_value = config::DEFAULT_NEWS_CSV)]
    news_csv: PathBuf,

    /// Jobs snapshot CSV
    #[arg(long, env = "SIFT_JOBS_CSV", default_value = config::DEFAULT_JOBS_CSV)]
    jobs_csv: PathBuf,

    /// Score multiplier for close title matches
    #[arg(long, env = "SIFT_TITLE_WEIGHT", default_value_t = config::TITLE_WEIGHT)]
    title_weight: f64,

    /// Title similarity ratio a job title must exceed to be boosted
    #[arg(long, env = "SIFT_TITLE_MATCH_THRESHOLD", default_value_t = config::TITLE_MATCH_THRESHOLD)]
    title_match_threshold: f64,

    /// Score multiplier for non-entry postings on entry-level queries
    #[arg(long, env = "SIFT_ENTRY_LEVEL_PENALTY", default_value_t = config::ENTRY_LEVEL_PENALTY)]
    entry_level_penalty: f64,

    /// Candidates requested from the retrieval engine per query
    #[arg(long, env = "SIFT_RETRIEVAL_DEPTH", default_value_t = config::RETRIEVAL_DEPTH)]
    retrieval_depth: usize,

    /// Discard persisted indices and rebuild them from the snapshots
    #[arg(long, env = "SIFT_REBUILD", default_value_t = false)]
    rebuild: bool,

    /// Build or load each index on its first query instead of at startup
    #[arg(long, env = "SIFT_LAZY_INDEX", default_value_t = false, conflicts_with = "rebuild")]
    lazy_index: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("sift_server=info".parse().expect("valid directive literal"))
                .add_directive("sift_core=info".parse().expect("valid directive literal")),
        )
        .init();

    let args = Args::parse();

    if args.port == 0 {
        eprintln!("Error: port must be > 0");
        std::process::exit(1);
    }
    if args.data_dir.exists() && !args.data_dir.is_dir() {
        eprintln!(
            "Error: data_dir '{}' exists but is not a directory",
            args.data_dir.display()
        );
        std::process::exit(1);
    }

    let ranking = RankingConfig {
        title_match_threshold: args.title_match_threshold,
        title_weight: args.title_weight,
        entry_level_penalty: args.entry_level_penalty,
        retrieval_depth: args.retrieval_depth,
    };
    if let Err(e) = ranking.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    let mode = if args.rebuild {
        IndexMode::Rebuild
    } else if args.lazy_index {
        IndexMode::Lazy
    } else {
        IndexMode::BuildOrLoad
    };
    let snapshots = SnapshotPaths {
        news: args.news_csv.clone(),
        jobs: args.jobs_csv.clone(),
    };

    let service = SearchService::open(&args.data_dir, &snapshots, mode)
        .unwrap_or_else(|e| {
            tracing::error!("Startup failed: {}", e);
            std::process::exit(1);
        })
        .with_ranking_config(ranking);

    let prometheus_handle =
        metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;

    let news_documents = service.document_count(CorpusType::News);
    let jobs_documents = service.document_count(CorpusType::Jobs);
    let state = AppState {
        service: Arc::new(service),
        prometheus_handle,
        start_time: Instant::now(),
    };

    let app = create_router(state);
    let addr = format!("0.0.0.0:{}", args.port);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = args.port,
        data_dir = %args.data_dir.display(),
        index_mode = ?mode,
        news_documents,
        jobs_documents,
        "sift ready"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_signal())
        .await?;

    tracing::info!("All requests drained, exiting");
    Ok(())
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }

    tracing::info!("Shutting down gracefully, draining in-flight requests...");
}
