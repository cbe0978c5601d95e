use anyhow::Context;
use cv_core::ViewConfig;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{error, info};

use super::config::resolve_config;
use super::tracing::init_tracing_subscriber;
use super::wiring::{wire_stdio, ViewRuntime};
use crate::cli::Cli;

/// Entry point of the binary: tracing, config, then the view on stdin/stdout.
pub async fn run_app(cli: Cli) -> anyhow::Result<()> {
    if let Err(err) = init_tracing_subscriber(!cli.no_log_file) {
        eprintln!("Failed to initialize tracing: {err:#}");
    }

    let config = resolve_config(cli.config.as_deref(), cli.history).map_err(|err| {
        error!("Failed to resolve config: {err:#}");
        err
    })?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        history = %config.history.path.display(),
        "Starting ClipView"
    );

    run_view(config, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Run the history view against a JSON-lines host until its input ends.
///
/// Waits for every queued output line to be written before returning.
pub async fn run_view<R, W>(config: ViewConfig, reader: R, writer: W) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let ViewRuntime {
        mut controller,
        bridge,
        writer,
    } = wire_stdio(&config, reader, writer);

    let result = controller.run().await;

    // The writer drains once the last handle to the bridge is gone.
    drop(controller);
    drop(bridge);
    writer.await.context("Stdout writer task panicked")??;

    info!("ClipView stopped");
    result
}
