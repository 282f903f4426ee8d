//! HTTP server lifecycle: bind, spawn, shut down.
//!
//! bind → spawn background task → return handle with shutdown channel.

use std::net::SocketAddr;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::api::router::api_router;
use crate::core_state::CoreState;

// ═══════════════════════════════════════════════════════════
// Public types
// ═══════════════════════════════════════════════════════════

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read bound address: {0}")]
    LocalAddr(#[source] std::io::Error),
    #[error("server failed: {0}")]
    Serve(#[source] std::io::Error),
    #[error("server task failed: {0}")]
    Task(String),
}

/// Session metadata for a running server.
#[derive(Debug, Clone, Serialize)]
pub struct ServerSession {
    pub session_id: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

/// Handle to a running server.
pub struct ServerHandle {
    pub session: ServerSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<std::io::Result<()>>,
}

impl ServerHandle {
    /// Signal a graceful shutdown. Safe to call more than once.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!(session_id = %self.session.session_id, "Server shutdown signal sent");
        }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Wait until the server task exits, after in-flight requests drain.
    pub async fn wait(mut self) -> Result<(), ServerError> {
        self.finished().await
    }

    /// Resolves once the server task has exited, for whatever reason.
    ///
    /// Cancel-safe, so it can race a shutdown signal in `tokio::select!`.
    /// Must not be awaited again after it has resolved.
    pub async fn finished(&mut self) -> Result<(), ServerError> {
        (&mut self.task)
            .await
            .map_err(|e| ServerError::Task(e.to_string()))?
            .map_err(ServerError::Serve)
    }
}

// ═══════════════════════════════════════════════════════════
// Server lifecycle
// ═══════════════════════════════════════════════════════════

/// Start serving the API on `addr`.
///
/// Port 0 picks an ephemeral port; the chosen one is reported in
/// `ServerHandle::session`.
pub async fn start_server(
    core: Arc<CoreState>,
    addr: SocketAddr,
) -> Result<ServerHandle, ServerError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    let addr = listener.local_addr().map_err(ServerError::LocalAddr)?;

    let app = api_router(core);

    let session = ServerSession {
        session_id: Uuid::new_v4().to_string(),
        server_addr: addr.to_string(),
        port: addr.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Server received shutdown signal");
        };

        tracing::info!(%addr, "Server started");

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await;
        if let Err(e) = &result {
            tracing::error!("Server error: {e}");
        }

        tracing::info!("Server stopped");
        result
    });

    Ok(ServerHandle {
        session,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}
