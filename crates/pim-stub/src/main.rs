//! Imperium PIM API stub server.
//!
//! Listens on `PIM_STUB_PORT` (default 8000). Pass `--seed` or set
//! `PIM_STUB_SEED=1` to start with the demo dataset.

use std::net::SocketAddr;

use pim_stub::{app, seed, AppState};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let port: u16 = std::env::var("PIM_STUB_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8000);
    let seed_requested = std::env::args().any(|a| a == "--seed")
        || std::env::var("PIM_STUB_SEED").is_ok_and(|v| v == "1" || v == "true");

    let state = AppState::new();
    if seed_requested {
        if let Err(e) = seed::load(&state) {
            tracing::error!(error = %e, "failed to load demo data");
        }
    }

    let mut updates = state.subscribe();
    tokio::spawn(async move {
        loop {
            match updates.recv().await {
                Ok(update) => {
                    tracing::info!(doctype = %update.doctype, name = %update.name, "doc_update");
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "doc_update listener lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("pim-stub listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state).into_make_service()).await
}
