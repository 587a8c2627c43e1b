use metrics_tracker::{TrackerConfig, TrackerServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_help() {
    eprintln!(
        r#"API Metrics Tracker - transaction logging with per-transaction response-time metrics

USAGE:
    metrics-tracker [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --help              Print this help message

ENVIRONMENT VARIABLES:
    HOST                Server host (default: 0.0.0.0)
    PORT                Server port (default: 8080)
    RUST_LOG            Log level filter

EXAMPLES:
    # Run with defaults
    metrics-tracker

    # Run with config file
    metrics-tracker --config tracker.json

    # Run with custom port
    PORT=9000 metrics-tracker
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "metrics_tracker=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = if let Some(path) = config_path {
        tracing::info!("Loading configuration from: {}", path);
        TrackerConfig::from_file(&path)?
    } else {
        tracing::info!("Using default configuration");
        TrackerConfig::from_env()
    };

    let server = TrackerServer::new(config);

    tracing::info!("Available endpoints:");
    tracing::info!("  POST /api/transactions/log");
    tracing::info!("  GET  /api/transactions/transaction/{{transactionId}}");

    server.run().await
}
