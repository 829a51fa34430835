use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware};
use axum::routing::get;
use tower_http::trace::TraceLayer;
use url::Url;

use moolax_storage::{DistributedCache, NoopCache, PostgresStore, ProcessCache, RedisCache};
use moolax_upstream::{FixerClient, UpstreamConfig};

use crate::{config::AppConfig, handlers, middleware as app_middleware, state::AppState};

pub struct MoolaxServer {
    addr: SocketAddr,
    app: Router,
}

/// Builds the gateway router over the given tier handles.
///
/// Public so integration tests can assemble an app around in-memory
/// tiers and a mocked provider.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api", get(handlers::rates))
        // Health and info endpoints
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz))
        .fallback(handlers::fallback)
        // Middleware stack (order: cors -> trace)
        .layer(middleware::from_fn(app_middleware::cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct ServerBuilder {
    config: AppConfig,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.config = cfg;
        self
    }

    /// Connects the cache tiers and assembles the server.
    ///
    /// PostgreSQL is required; without the durable tier the gateway cannot
    /// honor its durability guarantee. Redis is optional: when disabled,
    /// the distributed tier degrades to a no-op and the gateway runs on
    /// the process and durable tiers alone.
    pub async fn build(self) -> anyhow::Result<MoolaxServer> {
        let cfg = self.config;

        let pg = cfg
            .storage
            .postgres
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("storage.postgres config is required"))?;
        let durable = PostgresStore::connect(&pg.connection_url(), pg.pool_size).await?;
        durable.ensure_schema().await?;
        tracing::info!(host = %pg.host, database = %pg.database, "durable tier connected");

        let distributed: Arc<dyn DistributedCache> = if cfg.redis.enabled {
            match RedisCache::connect(&cfg.redis.url) {
                Ok(cache) => {
                    tracing::info!("distributed tier connected");
                    Arc::new(cache)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Redis unavailable, distributed tier disabled");
                    Arc::new(NoopCache)
                }
            }
        } else {
            tracing::warn!("Redis disabled, running on process and durable tiers only");
            Arc::new(NoopCache)
        };

        let base_url = Url::parse(&cfg.upstream.base_url)?;
        let upstream = FixerClient::new(
            UpstreamConfig::new(base_url, cfg.upstream.access_key.clone())
                .with_request_timeout(cfg.upstream.timeout()),
        );

        let state = AppState {
            process: ProcessCache::new(),
            distributed,
            durable: Arc::new(durable),
            upstream: Arc::new(upstream),
            client_api_key: cfg.auth.client_api_key.clone(),
        };

        Ok(MoolaxServer {
            addr: cfg.addr(),
            app: build_app(state),
        })
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MoolaxServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
