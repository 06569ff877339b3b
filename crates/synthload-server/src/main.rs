//! synthload: HTTP load target with synthetic endpoints and Prometheus metrics.
//!
//! Routes: `/`, `/err`, `/internal-err`, `/wait/{secs}`, `/hash/{mb}/{iterations}`,
//! `/metrics`. Flags: `-bind`, `-h2c`, `-config`.

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use synthload_core::error::Result;
use synthload_server::{
    app_state::{AppState, APP_VERSION},
    cli::Cli,
    config::Settings,
    router, transport,
};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse_go_style();
    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, code = e.code(), "synthload failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::resolve(cli)?;
    let state = AppState::new(APP_VERSION)?;
    let app = router::build_router(state);

    let listener = transport::bind(&settings.bind).await?;

    tracing::info!(
        bind = %settings.bind,
        transport = settings.transport.as_str(),
        version = APP_VERSION,
        "synthload listening"
    );

    transport::serve(listener, app, settings.transport, shutdown_signal()).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to install SIGTERM handler");
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
    tracing::info!("signal received, starting graceful shutdown");
}
