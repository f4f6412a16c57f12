//! # HTTP Server
//!
//! Binds the movie and health routers behind the request logger and serves
//! them until Ctrl-C.

use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;

use super::config::HttpServerConfig;
use super::health_routes::health_routes;
use super::movie_routes::{movie_routes, MoviesState};
use super::origin::OriginGate;
use super::request_log::log_requests;
use crate::movies::{load_seed, MovieStore, SeedResult};
use crate::observability::{log_event, log_event_with_fields, Event};

/// Build the full application router around an existing store.
///
/// Every call gets its own state, so tests can run isolated instances.
pub fn app(store: MovieStore, origin_gate: OriginGate) -> Router {
    let state = Arc::new(MoviesState::new(store, origin_gate));
    build_router(state)
}

fn build_router(state: Arc<MoviesState>) -> Router {
    Router::new()
        .merge(health_routes(state.clone()))
        .merge(movie_routes(state))
        .layer(middleware::from_fn(log_requests))
}

/// HTTP server for the movie catalogue
pub struct HttpServer {
    config: HttpServerConfig,
    state: Arc<MoviesState>,
}

impl HttpServer {
    /// Create a server over `store`
    pub fn with_store(config: HttpServerConfig, store: MovieStore) -> Self {
        let origin_gate = OriginGate::new(config.cors_origins.clone());
        let state = Arc::new(MoviesState::new(store, origin_gate));
        Self { config, state }
    }

    /// Create a server seeded from the configured dataset
    pub fn from_config(config: HttpServerConfig) -> SeedResult<Self> {
        let movies = load_seed(config.seed_path.as_deref())?;
        let count = movies.len().to_string();
        let source = config
            .seed_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "embedded".to_string());
        log_event_with_fields(Event::SeedLoaded, &[("count", &count), ("source", &source)]);

        Ok(Self::with_store(config, MovieStore::new(movies)))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Number of movies currently held
    pub fn movie_count(&self) -> usize {
        self.state.store.len()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        build_router(self.state)
    }

    /// Bind the configured address and serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until Ctrl-C
    pub async fn serve(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?.to_string();
        let port = listener.local_addr()?.port().to_string();
        log_event_with_fields(Event::ServerListening, &[("addr", &addr), ("port", &port)]);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        log_event(Event::ShutdownComplete);
        Ok(())
    }
}

async fn shutdown_signal() {
    // If the handler cannot be installed, run until the process is killed
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    log_event(Event::ShutdownStart);
}
