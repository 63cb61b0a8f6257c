//! Student registry service entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use student_registry::api::{create_router, docs, AppState};
use student_registry::config::Config;
use student_registry::metrics;
use student_registry::registry::StudentStore;
use student_registry::utils::shutdown_signal;
use student_registry::ServiceError;

/// In-memory student registry HTTP service.
#[derive(Parser, Debug)]
#[command(name = "student-registry")]
#[command(about = "CRUD service for an in-memory student collection")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// HTTP listening port (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,

    /// Print the OpenAPI document as JSON.
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration first; the log filter comes from RUST_LOG in it
    let config = load_config(args.port);

    // Initialize logging
    let directive = match &config {
        Ok(config) => config.log_filter(args.verbose),
        Err(_) => Config::default().log_filter(args.verbose),
    };
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(config),
        Some(Command::Openapi) => cmd_openapi(config),
        Some(Command::Serve) | None => cmd_serve(config).await,
    }
}

/// Load configuration, apply the CLI port override and validate.
fn load_config(port_override: Option<u16>) -> student_registry::Result<Config> {
    let mut config = Config::load()?;

    if let Some(port) = port_override {
        config.port = port;
    }

    config.validate().map_err(ServiceError::InvalidConfig)?;
    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config(config: student_registry::Result<Config>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("STUDENT REGISTRY - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match config {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration check failed"));
        }
    };

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}:{}", config.host, config.port);
    println!("  Id Strategy: {}", config.id_strategy);
    println!("  Seed Students: {}", config.seed_students);
    println!("  Log Level: {}", config.rust_log);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Print the OpenAPI document.
fn cmd_openapi(config: student_registry::Result<Config>) -> anyhow::Result<()> {
    let config = config?;
    let json = docs::openapi(config.port)
        .to_pretty_json()
        .map_err(ServiceError::from)?;
    println!("{}", json);
    Ok(())
}

/// Run the HTTP server until shutdown.
async fn cmd_serve(config: student_registry::Result<Config>) -> anyhow::Result<()> {
    let config = config.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;
    let addr = config.socket_addr().map_err(ServiceError::InvalidConfig)?;

    info!("Configuration loaded successfully");
    info!("Id strategy: {}", config.id_strategy);

    let prometheus = match metrics::install_prometheus() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Metrics disabled: {}", e);
            None
        }
    };

    let store = if config.seed_students {
        StudentStore::seeded(config.id_strategy)
    } else {
        StudentStore::new(config.id_strategy)
    };
    info!("Registry initialized with {} students", store.len());
    metrics::set_students_stored(store.len());

    let mut app_state = AppState::new(store);
    if let Some(handle) = prometheus {
        app_state = app_state.with_prometheus(handle);
    }

    let router = create_router(app_state, docs::openapi(config.port));

    let listener = TcpListener::bind(addr).await.map_err(ServiceError::from)?;
    info!("Server running on http://localhost:{}", config.port);
    info!("API docs at http://localhost:{}{}", config.port, docs::DOCS_PATH);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServiceError::from)?;

    info!("Server stopped");
    Ok(())
}
