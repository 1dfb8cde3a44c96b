use std::sync::Arc;

use arrrg::CommandLine;
use arrrg_derive::CommandLine;
use tokio::net::TcpListener;
use tokio::signal;

use digifarm::config::ServerConfig;
use digifarm::{DataStore, InMemoryDataStore, create_router, logging};

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Args {
    #[arrrg(optional, "Host to bind the HTTP server")]
    host: Option<String>,
    #[arrrg(optional, "Port to bind the HTTP server")]
    port: Option<u16>,
    #[arrrg(flag, "Enable verbose logging")]
    verbose: bool,
}

const HELP_TEXT: &str = r#"digifarmd - digital farming record daemon

USAGE:
    digifarmd [OPTIONS]

OPTIONS:
    --host <HOST>        Host to bind the HTTP server [default: 127.0.0.1]
    --port <PORT>        Port to bind the HTTP server [default: 8080]
    --verbose            Enable verbose logging

DESCRIPTION:
    Runs the farm registry with endpoints mounted under /api/.
    All state is held in memory and lost when the daemon stops.

    The server supports graceful shutdown via Ctrl+C.

API ENDPOINTS:
    POST   /api/farms                    Create a farm
    GET    /api/farms                    List all farms
    GET    /api/farms/{id}               Get a farm
    GET    /api/farms/{id}/sensors       List a farm's sensors
    POST   /api/sensors                  Register a sensor
    GET    /api/sensors/{id}             Get a sensor
    GET    /api/sensors/{id}/readings    List a sensor's readings
    POST   /api/readings                 Add a reading"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, free) = Args::from_command_line("USAGE: digifarmd [OPTIONS]");

    if !free.is_empty() && free[0] == "help" {
        println!("{}", HELP_TEXT);
        return Ok(());
    }

    let config = ServerConfig::new(args.host, args.port, args.verbose);
    logging::init(config.verbose);

    let store: Arc<dyn DataStore> = Arc::new(InMemoryDataStore::new());
    let app = create_router(store);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("digifarmd listening on http://{}", addr);
    tracing::debug!(?config, "resolved configuration");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("digifarmd stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received, stopping server gracefully"),
        Err(e) => tracing::error!("failed to install Ctrl+C handler: {}", e),
    }
}
