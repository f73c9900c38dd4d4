use actix_web::{web, App, HttpServer};
use clap::Parser;
use student_stress::config::ConfigOverrides;
use student_stress::{api, AppConfig, EstimatorError, StressEstimator};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Student Stress Estimator CLI
#[derive(Parser)]
#[command(name = "student_stress")]
#[command(about = "Student Stress Estimator - lifestyle-based stress calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "STRESS_CONFIG")]
    config: Option<String>,

    /// Listen address
    #[arg(short, long, env = "STRESS_LISTEN_ADDR")]
    listen: Option<String>,

    /// Simulated model latency in milliseconds
    #[arg(long, env = "STRESS_LATENCY_MS")]
    latency_ms: Option<u64>,

    /// Log level
    #[arg(long, env = "STRESS_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "STRESS_LOG_JSON")]
    json: bool,
}

fn init_tracing(level: &str, json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| level.to_string().into());

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[actix_web::main]
async fn main() -> Result<(), EstimatorError> {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        listen: cli.listen,
        latency_ms: cli.latency_ms,
        log_level: cli.log_level,
        json: cli.json,
    };
    let config = AppConfig::load_with(cli.config.as_deref(), &overrides)?;

    init_tracing(&config.logging.level, config.logging.json);

    let estimator = web::Data::new(StressEstimator::new(&config.estimator));

    info!(
        listen = %config.server.listen_addr,
        latency_ms = config.estimator.latency_ms,
        "starting Student Stress Estimator"
    );

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(estimator.clone())
            .configure(api::configure)
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(config.server.listen_addr)?.run().await?;

    Ok(())
}
