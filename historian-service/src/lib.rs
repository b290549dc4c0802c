//! Alert state history query service.
//!
//! Accepts alert state queries, runs them against the historian engine and
//! reshapes the engine's frame into typed log entries.

pub mod auth;
pub mod engine;
pub mod handlers;
pub mod projector;
pub mod query;
pub mod routes;

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use historian_core::config::HistorianConfig;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{info, warn};

pub use engine::{EngineError, Historian, RemoteHistorian};
pub use handlers::AlertStateHandlers;
pub use projector::project_frame;
pub use query::{build_history_query, HistoryQuery};
pub use routes::{router, AppState};

/// Handle returned when the service is started programmatically.
pub struct ServiceHandle {
    pub addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
}

impl ServiceHandle {
    pub fn shutdown(self) {
        let _ = self.shutdown.send(());
    }
}

/// Binds the configured listen address.
pub async fn bind(config: &HistorianConfig) -> anyhow::Result<(TcpListener, SocketAddr)> {
    let addr: SocketAddr = config
        .http_bind
        .parse()
        .context("invalid historian bind address")?;
    let listener = TcpListener::bind(addr)
        .await
        .context("failed to bind historian listener")?;
    let actual_addr = listener
        .local_addr()
        .context("failed to read socket address")?;
    Ok((listener, actual_addr))
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    config: &HistorianConfig,
    historian: Arc<dyn Historian>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(AppState::new(historian, config.query_timeout));
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
}

/// Binds the configured address and serves the API in a background task.
pub async fn start_service(
    config: &HistorianConfig,
    historian: Arc<dyn Historian>,
) -> anyhow::Result<ServiceHandle> {
    let (listener, actual_addr) = bind(config).await?;
    info!(%actual_addr, "starting historian-service");

    let (tx, rx) = oneshot::channel();
    let config = config.clone();
    tokio::spawn(async move {
        let shutdown = async move {
            let _ = rx.await;
        };
        if let Err(err) = serve(listener, &config, historian, shutdown).await {
            warn!(?err, "historian-service terminated with error");
        }
    });

    Ok(ServiceHandle {
        addr: actual_addr,
        shutdown: tx,
    })
}
