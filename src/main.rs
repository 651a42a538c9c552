use actix_web::{web, App, HttpServer, middleware};
use anyhow::Result;
use quotation_generator::api::{ApiState, configure_routes};
use quotation_generator::{metrics, AppConfig};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    tracing::info!("Starting Quotation Generator API");

    // Initialize Prometheus metrics
    metrics::register_process_collector()?;

    // Load configuration
    let config = AppConfig::load()?;
    let host = config.server.host.clone();
    let port = config.server.port;

    // Initialize application state
    let state = web::Data::new(ApiState::new(config)?);

    tracing::info!("Starting server on {}:{}", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(TracingLogger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}
