mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    let cms = services::cms::CmsClient::from_env().expect("CMS client init failed");
    tracing::info!(base_url = cms.base_url(), "CMS client initialized");

    // Initialize NocoDB client (non-fatal: table blocks disabled if config missing).
    let noco = match services::nocodb::NocoClient::from_env() {
        Ok(client) => {
            tracing::info!(base_url = client.base_url(), "NocoDB client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "NocoDB client not configured; table blocks disabled");
            None
        }
    };

    let state = state::AppState::new(Arc::new(cms), noco);

    let app = routes::leptos_app(state).expect("router init failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "dyno listening");
    axum::serve(listener, app).await.expect("server failed");
}
