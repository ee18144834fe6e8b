use anyhow::{Context, Result};
use std::future::Future;
use std::io::{self, Write};
use std::sync::Arc;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

mod config;
mod report;
mod volume;

#[cfg(test)]
mod tests;

use config::AppConfig;
use volume::{Inspector, SystemHost, VolumeHost};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "volume_report=warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    info!("Volume Report v{} starting up", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!(
        "Configuration loaded: timeout={}ms, concurrency={}, output={}",
        config.query_timeout_ms, config.concurrency, config.output
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let result = runtime.block_on(run(&config));

    // Timed-out host queries may still be parked on blocking threads.
    runtime.shutdown_background();
    result
}

/// One enumeration pass: list, inspect, render.
async fn run(config: &AppConfig) -> Result<()> {
    let host: Arc<dyn VolumeHost> = Arc::new(SystemHost::new(config));

    let ids = volume::list_volumes(host.as_ref()).context("Failed to enumerate storage volumes")?;
    info!("Discovered {} volumes", ids.len());

    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        watch_signals(token, shutdown_signal).await;
        warn!("Exiting without finishing the report");
        std::process::exit(130);
    });

    let inspector = Inspector::new(host, config.query_timeout(), config.concurrency);
    let report = inspector.inspect_all(ids, &cancel).await;
    // Pass is over: from here on a signal terminates instead of cancelling.
    cancel.cancel();

    let mut out = io::stdout().lock();
    report::write_report(&mut out, &report, config)?;
    out.flush()?;
    Ok(())
}

/// Watch for shutdown signals around one pass.
///
/// A signal while volumes are still being inspected cancels `cancel`, so the
/// records finished so far are still printed. Returns on the next signal after
/// that, or on the first one once `cancel` was cancelled by the caller.
async fn watch_signals<F, Fut>(cancel: CancellationToken, mut next_signal: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    tokio::select! {
        () = next_signal() => {
            warn!("Stopping inspection...");
            cancel.cancel();
        }
        () = cancel.cancelled() => {}
    }
    next_signal().await;
}

/// Resolves on SIGTERM or SIGINT.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { warn!("Received Ctrl+C"); },
        () = terminate => { warn!("Received SIGTERM"); },
    }
}
