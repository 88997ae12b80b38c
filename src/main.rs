//! TupleSpace - A Concurrent, Network-Accessible Tuple Space
//!
//! This is the main entry point for the TupleSpace server.
//! It validates the listening port, sets up the store, counters, and stats
//! reporter, and accepts connections until shut down.
//!
//! ## Exit Statuses
//!
//! - `1` - wrong number of arguments (usage error)
//! - `2` - invalid port (non-numeric, zero, or out of range)
//! - `3` - failed to bind the listening socket

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;
use tuplespace::commands::RequestHandler;
use tuplespace::connection::handle_connection;
use tuplespace::stats::{start_stats_reporter, ServerStats};
use tuplespace::store::TupleSpace;

/// Server configuration
struct Config {
    /// Port to listen on
    port: u16,
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// The server takes exactly one argument, the listening port. Usage
    /// errors exit with status 1, invalid ports with status 2, matching the
    /// documented process contract.
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();

        if args.len() != 2 {
            eprintln!("Usage: tuplespace <port>");
            std::process::exit(1);
        }

        match args[1].parse::<u16>() {
            Ok(port) if port > 0 => Self { port },
            _ => {
                eprintln!("Invalid port number: {}", args[1]);
                std::process::exit(2);
            }
        }
    }

    /// Returns the bind address as a string
    fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Validate arguments before anything else
    let config = Config::from_args();

    // Set up logging
    let _subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    // Create the shared counters and the store
    let stats = Arc::new(ServerStats::new());
    let space = Arc::new(TupleSpace::new(Arc::clone(&stats)));

    // Start the periodic stats reporter
    let _reporter = start_stats_reporter(Arc::clone(&stats));
    info!("Stats reporter started");

    // Bind the TCP listener
    let listener = match TcpListener::bind(config.bind_address()).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {}: {}", config.bind_address(), e);
            std::process::exit(3);
        }
    };
    info!("Server started on port {}", config.port);

    // Set up graceful shutdown
    let shutdown = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Shutdown signal received, stopping server...");
    };

    // Main accept loop
    tokio::select! {
        _ = accept_loop(listener, space, stats) => {}
        _ = shutdown => {}
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Main loop that accepts incoming connections
async fn accept_loop(listener: TcpListener, space: Arc<TupleSpace>, stats: Arc<ServerStats>) {
    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                // Create a request handler for this connection
                let handler = RequestHandler::new(Arc::clone(&space), Arc::clone(&stats));
                let stats = Arc::clone(&stats);

                // Spawn a task to handle this connection
                tokio::spawn(async move {
                    handle_connection(stream, addr, handler, stats).await;
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}
