//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, CORS, access log, timeout)
//! - Bind server to listener
//! - Drain on shutdown

use axum::{
    middleware,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeFile,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::{handlers, websocket};
use crate::lifecycle::Shutdown;
use crate::logs::{access_log_middleware, LogBroadcaster};
use crate::oauth::Signer;
use crate::upstream::{RecordClient, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub records: RecordClient,
    pub driver_id: Arc<str>,
    pub logs: Arc<LogBroadcaster>,
    pub shutdown: Shutdown,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
    logs: Arc<LogBroadcaster>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig, shutdown: Shutdown) -> Result<Self, UpstreamError> {
        let logs = Arc::new(LogBroadcaster::new(
            config.logs.capacity,
            config.logs.channel_capacity,
        ));
        let signer = Signer::new(config.credentials.to_credentials());
        let records = RecordClient::new(&config.upstream, signer)?;

        let state = AppState {
            records,
            driver_id: Arc::from(config.upstream.driver_id.as_str()),
            logs: logs.clone(),
            shutdown,
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            logs,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        let logs = state.logs.clone();

        Router::new()
            .route("/", get(handlers::liveness))
            .route(
                "/netsuite/driver",
                get(handlers::fetch_driver).post(handlers::create_driver),
            )
            .route_service("/realtime-logs", ServeFile::new(&config.logs.viewer_path))
            .route("/ws/logs", get(websocket::logs_ws_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(middleware::from_fn_with_state(logs, access_log_middleware))
            .layer(CorsLayer::permissive())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Broadcaster receiving this server's access lines.
    pub fn logs(&self) -> Arc<LogBroadcaster> {
        self.logs.clone()
    }
}
