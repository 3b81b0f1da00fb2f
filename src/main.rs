use std::sync::Arc;

use actix::Actor;
use tokio::sync::watch;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod models;
mod config;
mod api;
mod display;
mod actors;
mod metrics;

use actors::{CoordinatorActor, Shutdown, SystemHealthCell};
use api::BackendClient;
use config::DashboardConfig;
use display::{DisplaySnapshot, DisplayState};
use models::{ActorRecord, DisplayRecord, RepositoryRecord};

#[actix::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,events_dashboard=debug")),
        )
        .init();

    tracing::info!("🚀 Starting GitHub Events dashboard");

    // === 1. Resolve deploy-time configuration ===
    let config = DashboardConfig::from_env();
    tracing::info!(backend = %config.backend_base_url, "Using events REST API");

    // === 2. Initialize Prometheus metrics and the shared health cell ===
    tracing::info!("Initializing metrics");
    let metrics = Arc::new(metrics::Metrics::new()?);
    let health_cell = Arc::new(SystemHealthCell::new());

    // Start metrics HTTP server in background thread
    let metrics_registry = Arc::new(metrics.registry().clone());
    let server_health = health_cell.clone();
    let metrics_port = config.metrics_port;
    std::thread::spawn(move || {
        let rt = tokio::runtime::Runtime::new().expect("Failed to create metrics runtime");
        rt.block_on(async {
            if let Err(e) =
                metrics::start_metrics_server(metrics_registry, server_health, metrics_port).await
            {
                tracing::error!("Metrics server error: {}", e);
            }
        });
    });

    // === 3. Create backend client and the display stores ===
    let backend = Arc::new(BackendClient::new(&config)?);
    let actors_state: Arc<DisplayState<ActorRecord>> = Arc::new(DisplayState::new());
    let repositories_state: Arc<DisplayState<RepositoryRecord>> = Arc::new(DisplayState::new());

    // Stand-in for the view layer: log every applied snapshot
    spawn_list_renderer("recent_actors", actors_state.subscribe());
    spawn_list_renderer("recent_repositories", repositories_state.subscribe());

    // === 4. Start Coordinator Actor (supervision + graceful shutdown) ===
    tracing::info!("Starting coordinator actor with supervision");
    let coordinator = CoordinatorActor::new(
        config,
        backend,
        actors_state,
        repositories_state,
        metrics,
        health_cell,
    )
    .start();

    // === 5. Run until Ctrl-C, then release every recurring trigger ===
    tokio::signal::ctrl_c().await?;
    tracing::info!("🛑 Ctrl-C received - shutting down dashboard");

    match coordinator.send(Shutdown).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("Shutdown error: {}", e),
        Err(e) => tracing::error!("Failed to deliver shutdown signal: {}", e),
    }

    tracing::info!("🎉 Dashboard stopped");

    Ok(())
}

/// Minimal renderer: one log line per applied snapshot, in display order
fn spawn_list_renderer<T>(source: &'static str, mut updates: watch::Receiver<DisplaySnapshot<T>>)
where
    T: DisplayRecord + Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            let labels: Vec<String> = snapshot.records.iter().map(|r| r.label()).collect();

            tracing::info!(
                source,
                seq = snapshot.seq,
                list = %labels.join(", "),
                "📺 Rendering recent list"
            );
        }
    });
}
