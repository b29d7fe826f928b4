use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use locker::app::{router, AppState};
use locker::clock::{self, Clock, SystemClock};
use locker::config::AppConfig;
use locker::db::repository::{DocumentRepository, InMemoryDocumentRepository};
use locker::demo_seeder;
use locker::disclosure::DisclosureService;
use locker::registry::DocumentRegistry;

/// Digital document locker server.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Config file (extension optional). Defaults to `locker` in the working directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the bind address, e.g. `0.0.0.0:3000`.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "locker=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    tracing::info!("Starting locker server...");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let document_repo: Arc<dyn DocumentRepository> = Arc::new(InMemoryDocumentRepository::new());
    let registry = Arc::new(DocumentRegistry::new(document_repo, clock.clone()));

    let requests = match &config.requests_file {
        Some(path) => demo_seeder::load_requests(path)?,
        None if config.seed_demo_data => demo_seeder::demo_requests(clock::today(clock.as_ref())),
        None => Vec::new(),
    };
    if config.seed_demo_data {
        demo_seeder::seed_demo_data(&registry).await?;
    }
    tracing::info!("{} disclosure requests pending", requests.len());

    let state = AppState {
        registry,
        disclosures: Arc::new(DisclosureService::new(requests, clock)),
        service_token: config.service_token.clone(),
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    tracing::info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
