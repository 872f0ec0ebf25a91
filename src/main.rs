mod catalog;
mod config;
mod error;
mod handlers;
mod middleware;
mod response;
mod router;
mod state;
mod utils;

use std::net::SocketAddr;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--help") {
        println!("file-catalog-server");
        println!("Lists the files of one directory as JSON and serves them for download.");
        println!();
        println!("USAGE:");
        println!("    file-catalog-server [OPTIONS]");
        println!();
        println!("OPTIONS:");
        println!("    --addr=<ADDRESS>          Sets the server listening address. [env: ADDR] [default: 0.0.0.0:3000]");
        println!("    --public-dir=<PATH>       Sets the directory served as static assets. [env: PUBLIC_DIR] [default: public]");
        println!("    --files-dir=<PATH>        Sets the directory listed and downloadable. [env: FILES_DIR] [default: <public-dir>/files]");
        println!("    --route-prefix=<PREFIX>   Sets the prefix of each listed file's path. [env: ROUTE_PREFIX] [default: /files/]");
        println!("    --allow-unsafe-names      Lets download names escape the files directory. [env: ALLOW_UNSAFE_NAMES]");
        println!();
        println!("    --help                    Prints this help information.");
        println!();

        process::exit(0);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::Config::load();

    let addr: SocketAddr = match config.addr.parse() {
        Ok(addr) => addr,
        Err(err) => {
            eprintln!("Invalid address {:?}: {}", config.addr, err);
            process::exit(2);
        }
    };

    tracing::info!(
        public_dir = %config.public_dir.display(),
        files_dir = %config.files_dir.display(),
        allow_unsafe_names = config.allow_unsafe_names,
        "Loaded configuration"
    );
    if config.allow_unsafe_names {
        tracing::warn!("Download names are not confined to the files directory");
    }

    let state = state::AppState::new(config);
    let app = router::create_router(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            eprintln!("Failed to bind to {}: {}", addr, err);
            process::exit(1);
        }
    };
    tracing::info!("Server running on http://{}", addr);

    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %err, "Server error");
        process::exit(1);
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = wait_for_ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to install SIGTERM handler");
                wait_for_ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        wait_for_ctrl_c().await;
    }

    tracing::info!("Shutdown signal received, stopping server...");
}

async fn wait_for_ctrl_c() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
