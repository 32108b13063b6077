use std::env;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use deskbot_backend::core::logging;
use deskbot_backend::server::router::router;
use deskbot_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let state = AppState::initialize().await?;
    logging::init(&state.paths);

    let port = env::var("PORT")
        .ok()
        .and_then(|val| val.parse::<u16>().ok())
        .unwrap_or(state.config.server.port);
    let bind_addr = format!("127.0.0.1:{}", port);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    let addr = listener.local_addr()?;

    tracing::info!("Listening on {}", addr);
    tracing::info!(
        faq_entries = state.faq_index.len(),
        model = %state.config.llm.model,
        "Answer pipeline ready"
    );

    let app: Router = router(state);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
