//! zopen MCP Server - Entry point
//!
//! Parses CLI arguments, validates configuration, serves MCP on stdio, and
//! handles graceful shutdown.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use rmcp::service::ServiceExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use zopen_mcp::config::{Args, Config};
use zopen_mcp::error::{Result, ZopenMcpError};
use zopen_mcp::logging;
use zopen_mcp::server::ZopenMcpServer;

#[tokio::main]
async fn main() -> ExitCode {
    // Logging stays off unless DEBUG is set (stdout is for MCP JSON-RPC)
    logging::init(logging::debug_enabled());

    let args = Args::parse();

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", Args::command().render_usage());
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server exited with error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> Result<()> {
    info!(
        "Starting zopen MCP Server v{} in {} mode...",
        env!("CARGO_PKG_VERSION"),
        config.mode.as_str()
    );
    if config.is_remote() {
        info!("Remote target {}:{}", config.host, config.port);
    }
    if let Some(timeout) = config.timeout {
        info!("Command timeout: {}ms", timeout.as_millis());
    }

    let server = ZopenMcpServer::new(config);

    // Cancelling this token stops the service and every in-flight command
    let ct = CancellationToken::new();
    let shutdown = ct.clone();
    let shutdown_handle = tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.cancel();
    });

    let running = server
        .serve_with_ct(rmcp::transport::io::stdio(), ct)
        .await
        .map_err(|e| ZopenMcpError::transport(e.to_string()))?;

    info!("zopen MCP Server running on stdio");

    let reason = running
        .waiting()
        .await
        .map_err(|e| ZopenMcpError::transport(e.to_string()))?;
    debug!("Service stopped: {:?}", reason);

    shutdown_handle.abort();

    info!("zopen MCP Server stopped");

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn wait_for_signal() {
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to register SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received SIGINT (Ctrl+C), shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
