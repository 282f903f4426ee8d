pub mod api;
pub mod classifier;
pub mod config;
pub mod core_state;
pub mod intelligence;
pub mod models;

use std::future::Future;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("server error: {0}")]
    Server(#[from] api::ServerError),
    #[error("server stopped unexpectedly")]
    ServerExited,
    #[error("failed to listen for shutdown signal: {0}")]
    Signal(#[source] std::io::Error),
}

/// Run the predictor until Ctrl-C.
pub async fn run() -> Result<(), AppError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let server_config = config::ServerConfig::from_env()?;
    let core = Arc::new(core_state::CoreState::initialize(&server_config));

    match core.model_info() {
        Some(info) => tracing::info!(
            path = %info.path.display(),
            kind = %info.kind,
            name = info.name.as_deref().unwrap_or("-"),
            "Serving predictions"
        ),
        None => tracing::warn!("Serving without a classifier, /predict will report errors"),
    }

    let server = api::start_server(core, server_config.bind_addr).await?;
    tracing::info!(
        addr = %server.session.server_addr,
        session_id = %server.session.session_id,
        "Listening"
    );

    serve_until(server, tokio::signal::ctrl_c()).await?;

    tracing::info!("{} stopped", config::APP_NAME);
    Ok(())
}

/// Keep serving until `signal` fires, then shut down gracefully.
///
/// Returns `AppError::ServerExited` (or the server's own error) if the
/// server task ends before the signal.
pub async fn serve_until<F>(mut server: api::ServerHandle, signal: F) -> Result<(), AppError>
where
    F: Future<Output = std::io::Result<()>>,
{
    let signal = tokio::select! {
        signal = signal => signal,
        exited = server.finished() => {
            exited?;
            return Err(AppError::ServerExited);
        }
    };

    server.shutdown();
    server.wait().await?;
    signal.map_err(AppError::Signal)
}
