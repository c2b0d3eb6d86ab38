use mimalloc::MiMalloc;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use toolboard::config::Config;
use toolboard::db::{SqliteToolStore, StorageGateway};
use toolboard::server::{ToolboardState, toolboard_router};
use toolboard::service::{RetryPolicy, ToolRepository};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        listen_addr = %cfg.basic.listen_addr,
        listen_port = cfg.basic.listen_port,
        loglevel = %cfg.basic.loglevel,
        secret_key = if cfg.basic.secret_key.is_empty() { "<unset>" } else { "<redacted>" },
        insecure_cookie = cfg.basic.insecure_cookie,
        database_url = %cfg.store.database_url,
        busy_timeout_ms = cfg.store.busy_timeout_ms,
        insert_max_attempts = cfg.store.insert_max_attempts,
        retry_step_ms = cfg.store.retry_step_ms,
        "Configuration loaded"
    );
    if cfg.basic.secure_cookie() {
        warn!(
            "Notice cookies are marked Secure; plain-HTTP clients outside localhost will not \
             see notices. Set basic.insecure_cookie = true when serving without TLS"
        );
    }

    let gateway = StorageGateway::new(&cfg.store)?;
    // A store that is unavailable right now must not keep the server from starting;
    // requests report their own failures.
    if let Err(e) = gateway.ensure_schema().await {
        error!(error = %e, "Database initialization failed");
    }

    let store = Arc::new(SqliteToolStore::new(gateway.clone()));
    let repository = ToolRepository::new(store, RetryPolicy::from_config(&cfg.store));
    let state = ToolboardState::new(
        repository,
        cfg.basic.cookie_key()?,
        cfg.basic.insecure_cookie,
    )?;
    let app = toolboard_router(state);

    let addr = SocketAddr::from((cfg.basic.listen_addr, cfg.basic.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    gateway.close().await;
    info!("Server has shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
