//! Inbound HTTP side: a single catch-all route that hands every request to
//! the [`Broadcaster`] and writes back whatever it relays.

use crate::adapters::DnsResolver;
use crate::config::BroadcasterConfig;
use crate::core::broadcast::Broadcaster;
use crate::core::{InboundRequest, Resolver};
use crate::utils::error::{BroadcastError, Result};
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::Response;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

pub fn router<R: Resolver + 'static>(broadcaster: Arc<Broadcaster<R>>) -> Router {
    Router::new()
        .fallback(relay::<R>)
        .with_state(broadcaster)
}

async fn relay<R: Resolver + 'static>(
    State(broadcaster): State<Arc<Broadcaster<R>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Body,
) -> std::result::Result<Response, BroadcastError> {
    let body = axum::body::to_bytes(body, usize::MAX).await.map_err(|e| {
        let err = BroadcastError::BodyReadError {
            what: "request",
            reason: e.to_string(),
        };
        tracing::error!("{}", err);
        err
    })?;

    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    tracing::debug!("{} {} ({} bytes)", method, path_and_query, body.len());

    let request = InboundRequest {
        method,
        path_and_query,
        headers,
        body,
    };

    let relayed = broadcaster.broadcast(request).await.map_err(|e| {
        tracing::error!("{}", e);
        e
    })?;

    let mut response = Response::new(Body::from(relayed.body));
    *response.status_mut() = relayed.status;
    *response.headers_mut() = relayed.headers;
    Ok(response)
}

/// Serves on an already bound listener until Ctrl-C or SIGTERM.
pub async fn serve<R: Resolver + 'static>(
    listener: TcpListener,
    broadcaster: Broadcaster<R>,
) -> Result<()> {
    axum::serve(listener, router(Arc::new(broadcaster)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

/// Binds the configured listen address and broadcasts to the DNS-resolved
/// backends of the configured domain.
pub async fn run(config: &BroadcasterConfig) -> Result<()> {
    let broadcaster = Broadcaster::new(DnsResolver::new(), config)?;

    let addr = config.listen_addr();
    let listener = TcpListener::bind(config.bind_addr()?).await?;
    tracing::info!(
        "Listening on {}, broadcasting to {}:{}",
        addr,
        broadcaster.domain(),
        config.target_port
    );

    serve(listener, broadcaster).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
