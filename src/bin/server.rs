//! userdir Server Binary
//!
//! Starts the TCP server over the seeded user directory.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};
use userdir::network::Server;
use userdir::{Config, Directory};

/// userdir Server
#[derive(Parser, Debug)]
#[command(name = "userdir-server")]
#[command(about = "User directory service")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    listen: String,

    /// Worker threads serving connections
    #[arg(short, long, default_value = "8")]
    workers: usize,

    /// Accepted connections allowed to wait for a worker
    #[arg(long, default_value = "128")]
    max_pending: usize,

    /// Idle read timeout per connection in milliseconds (0 disables)
    #[arg(long, default_value = "30000")]
    read_timeout_ms: u64,

    /// Write timeout per connection in milliseconds (0 disables)
    #[arg(long, default_value = "5000")]
    write_timeout_ms: u64,
}

fn build_config(args: &Args) -> Config {
    Config::builder()
        .listen_addr(&args.listen)
        .worker_threads(args.workers)
        .max_pending_connections(args.max_pending)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms)
        .build()
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,userdir=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("userdir Server v{}", userdir::VERSION);
    tracing::info!("Listen address: {}", args.listen);

    let config = build_config(&args);

    let directory = Arc::new(Directory::seeded());
    tracing::info!("Directory seeded with {} users", directory.len());

    let mut server = Server::new(config, directory);

    // Ctrl+C triggers the same graceful shutdown as the handle
    let handle = server.shutdown_handle();
    if let Err(e) = ctrlc::set_handler(move || {
        tracing::info!("Received Ctrl+C, shutting down");
        handle.shutdown();
    }) {
        tracing::warn!("Failed to install Ctrl+C handler: {}", e);
    }

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}
