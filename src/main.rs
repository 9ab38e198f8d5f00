use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use salespulse::cache::{CacheStore, NoopStore, RedisStore, ReportCache};
use salespulse::config::Config;
use salespulse::middleware::RequestId;
use salespulse::modules;
use salespulse::warehouse::{SnowflakeClient, WarehouseClient};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salespulse=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting SalesPulse Reporting Service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let warehouse: Arc<dyn WarehouseClient> =
        Arc::new(SnowflakeClient::new(config.warehouse.clone()));

    // The cache is an optimization, never a dependency: a missing or broken
    // store degrades to recomputing every request.
    let store: Arc<dyn CacheStore> = match &config.cache.url {
        Some(url) => match RedisStore::connect(url).await {
            Ok(store) => {
                tracing::info!("Cache store connected");
                Arc::new(store)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cache store unavailable, running without cache");
                Arc::new(NoopStore)
            }
        },
        None => {
            tracing::info!("No cache URL configured, running without cache");
            Arc::new(NoopStore)
        }
    };
    let report_cache = ReportCache::new(store);

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(RequestId)
            .wrap(Cors::permissive())
            .app_data(web::Data::from(warehouse.clone()))
            .app_data(web::Data::new(report_cache.clone()))
            .configure(modules::health::controllers::configure)
            .service(
                web::scope("/api")
                    .configure(modules::sales_rate::controllers::configure)
                    .configure(modules::sales_composition::controllers::configure)
                    .configure(modules::stock_weeks::controllers::configure)
                    .configure(modules::discount_detail::controllers::configure)
                    .configure(modules::promotion::controllers::configure)
                    .configure(modules::date_info::controllers::configure),
            )
    })
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}
