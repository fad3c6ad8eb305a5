#![allow(clippy::must_use_candidate)]

mod failure;
mod health;
mod report;
mod status;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use verdict_config::{Config, ErrorsConfig};
use verdict_core::{ErrorHandler, JsonApiErrorHandler};

pub use failure::{Reported, failure_response, panic_response};
pub use health::Health;
pub use report::{AxumResponse, report_errors};
pub use status::StatusError;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the error reporting configuration is invalid
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, health::health_route(config.errors.enabled));
        }

        // Status echo
        app = app.route("/status/{code}", axum::routing::get(status::status_handler));

        // Error reporting wraps the routes and the fallback
        app = install(app, &config.errors)?;

        // Tracing (outermost, so request spans include the report)
        app = app.layer(TraceLayer::new_for_http());

        Ok(Self { router: app, listen_address })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Override the listen address
    #[must_use]
    pub const fn with_listen_address(mut self, listen_address: SocketAddr) -> Self {
        self.listen_address = listen_address;
        self
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

/// Apply panic catching and JSON:API error reporting to `router`
///
/// Panics inside `router` always become 500 responses. When reporting is
/// enabled, every error response with an empty body is rewritten.
///
/// # Errors
///
/// Returns an error if the reason overrides in `config` are invalid
pub fn install<S>(router: Router<S>, config: &ErrorsConfig) -> anyhow::Result<Router<S>>
where
    S: Clone + Send + Sync + 'static,
{
    let router = router.layer(CatchPanicLayer::custom(panic_response));

    if !config.enabled {
        tracing::debug!("JSON:API error reporting disabled");
        return Ok(router);
    }

    let handler: Arc<dyn ErrorHandler> = Arc::new(JsonApiErrorHandler::new(
        Arc::new(config.catalog()?),
        config.encoding,
    ));

    Ok(router.layer(axum::middleware::from_fn(move |req, next| {
        let handler = Arc::clone(&handler);
        async move { report_errors(handler, req, next).await }
    })))
}
