use anyhow::Context;
use tracing::info;

use yahtzee::env_config::{dice_seed, init_tracing, server_port};
use yahtzee::ledger::Ledger;
use yahtzee::server::create_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let seed = dice_seed();
    if let Some(s) = seed {
        info!(seed = s, "dice seeded");
    }
    let app = create_router(Ledger::new(seed));

    let port = server_port();
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;
    info!(port, "yahtzee server running, press Ctrl+C to stop");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}
