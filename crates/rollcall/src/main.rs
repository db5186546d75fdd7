//! `Rollcall` - teacher/student roster service
//!
//! Usage:
//!   rollcall --port 5000 --database ./rollcall.db
//!
//! Serves the JSON API from [`rollcall::build_router`] on top of a single
//! `SQLite` store opened at startup.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use rollcall::{Args, build_router};
use rollcall_core::SqliteStore;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Rollcall");

    let db_path = args.database_path();
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let db_url = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    let store = SqliteStore::new(db_url)
        .await
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    info!("Database ready at {}", db_path.display());

    let app = build_router(Arc::new(store));

    let listener = tokio::net::TcpListener::bind(args.listen_addr())
        .await
        .with_context(|| format!("Failed to bind {}", args.listen_addr()))?;
    info!("HTTP API listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .context("HTTP server failed")?;

    Ok(())
}
