//! HTTP surface over the note store.
//!
//! # Routes
//!
//! - `GET /notes?tag=&q=` lists notes, narrowed by tag and content search
//! - `POST /notes` creates a note from a draft
//! - `GET|PUT|DELETE /notes/{id}` reads, rewrites, or removes one note
//! - `GET /tags` lists tag selector options, `"All"` first
//! - `GET /share?note_id=` returns the public projection of a note
//!
//! # Security
//!
//! No authentication. The share route hands out any note whose id is known.

mod handlers;
mod http_error;


use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};

use crate::storage::NoteStore;
use crate::Result;

pub use http_error::HttpError;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<NoteStore>,
}

impl AppState {
    pub fn new(store: NoteStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/notes",
            get(handlers::list_notes).post(handlers::create_note),
        )
        .route(
            "/notes/{id}",
            get(handlers::get_note)
                .put(handlers::replace_note)
                .delete(handlers::delete_note),
        )
        .route("/tags", get(handlers::list_tags))
        .route("/share", get(handlers::shared_note))
        .with_state(state)
}

/// Serve `store` on `addr` until Ctrl-C.
pub async fn serve(store: NoteStore, addr: SocketAddr) -> Result<()> {
    let path = store.path().display().to_string();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, notes_file = %path, "serving notes");

    axum::serve(listener, router(AppState::new(store)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
