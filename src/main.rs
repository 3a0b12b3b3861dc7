use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_dashboard::config::DashboardConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DashboardConfig::from_env().expect("invalid dashboard configuration");
    if config.demo_mode() {
        tracing::warn!("MEISTERPLAN_TOKEN not set; serving demo data");
    }
    let addr = config.bind_addr;
    let app = portfolio_dashboard::app(config);

    tracing::info!("portfolio dashboard listening on {}", addr);

    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .expect("failed to bind address"),
        app,
    )
    .await
    .expect("server error");
}
