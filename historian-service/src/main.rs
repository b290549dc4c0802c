use std::sync::Arc;

use anyhow::Context;
use historian_core::config::load_historian_config;
use historian_core::logging;
use historian_service::RemoteHistorian;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_historian_config().context("failed to load historian configuration")?;

    if let Err(err) = logging::init_tracing(Some(&config.log_level)) {
        eprintln!("failed to initialise tracing: {err}");
    }

    let engine_url = config.require_engine_url()?;
    let historian = RemoteHistorian::new(engine_url).context("invalid historian engine url")?;
    info!(engine = %historian.base_url(), "using remote historian engine");

    let (listener, actual_addr) = historian_service::bind(&config).await?;
    info!(%actual_addr, production = config.is_production(), "starting historian-service");

    if let Err(err) =
        historian_service::serve(listener, &config, Arc::new(historian), shutdown_signal()).await
    {
        error!(?err, "historian server terminated with error");
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sigterm) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sigterm.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
