use edulink_shell::{
    AppState,
    config::{AppConfig, Env},
    create_router, route_table,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Entry point of the shell server: configuration, logging, route table, HTTP server.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // RUST_LOG wins; otherwise debug for the shell, which includes every guard decision.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "edulink_shell=debug,tower_http=info,axum=trace".into());

    // 3. Initialize Logging based on Environment
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Shell starting in {:?} mode", config.env);

    // 4. Route Table
    // Built once and shared read-only by every request.
    let routes = Arc::new(route_table().expect("FATAL: Invalid route table declaration."));
    tracing::info!("Route table loaded with {} page routes", routes.len());

    // 5. Router and Server Startup
    let bind_addr = config.bind_addr.clone();
    let app = create_router(AppState { routes, config });

    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("FATAL: Failed to bind the shell listener. Check SHELL_BIND_ADDR.");

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at: http://{}/swagger-ui", bind_addr);

    axum::serve(listener, app)
        .await
        .expect("FATAL: Shell server terminated unexpectedly.");
}
