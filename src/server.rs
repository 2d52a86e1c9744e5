//! HTTP surface over the note store.
//!
//! | Route                  | Store call |
//! |------------------------|------------|
//! | `GET /notes/:name`     | fetch      |
//! | `PUT /notes/:name`     | replace    |
//! | `DELETE /notes/:name`  | delete     |
//! | `GET /notes`           | list       |
//! | `POST /write`          | create     |
//! | `GET /UploadForm.html` | none       |

pub mod request_id;
pub mod response;
pub mod routes;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::shelf::NoteStore;
use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct AppState {
    pub store: NoteStore,
}

/// Builds the application router around `store`.
pub fn router(store: NoteStore) -> Router {
    let state = Arc::new(AppState { store });

    Router::new()
        .route("/notes", get(routes::list_notes))
        .route(
            "/notes/:name",
            get(routes::fetch_note)
                .put(routes::replace_note)
                .delete(routes::delete_note),
        )
        .route("/write", post(routes::write_note))
        .route("/UploadForm.html", get(routes::upload_form))
        .layer(middleware::from_fn(request_id::tag_request))
        .with_state(state)
}

/// Binds to the configured address and serves until Ctrl-C.
pub async fn serve(config: &Config, store: NoteStore) -> AppResult<()> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| AppError::Bind {
            addr: addr.clone(),
            source,
        })?;

    log::info!(
        "notebox listening on http://{addr}, notes in {}",
        store.shelf().root.display()
    );

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Server(e.to_string()))?;

    log::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("shutdown signal received"),
        Err(e) => {
            log::error!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
    }
}
