//!
//! Static file server for the Elastic dashboard.
//!
//! Serves a directory (the dashboard's web build) over HTTP.  A request for
//! a directory is answered with its `index.html`.
//!

#![deny(missing_docs)]

use std::{future::Future, io, path::Path};

use axum::Router;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info};

/// The port the dashboard is served on unless told otherwise
pub const DEFAULT_PORT: u16 = 4902;

/// Build the router serving every file below `dir`
pub fn router(dir: impl AsRef<Path>) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(dir).append_index_html_on_directories(true))
        .layer(TraceLayer::new_for_http())
}

/// Resolve once `signal` reports a shutdown request.
///
/// If the signal cannot be listened for, the error is logged and this never
/// resolves, so the server keeps running until it is killed.
pub async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("shutting down"),
        Err(err) => {
            error!(error = %err, "could not listen for Ctrl-C, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
