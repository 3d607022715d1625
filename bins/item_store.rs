use std::process::ExitCode;

use common::utils::logging::{init_logging, LogFormat};
use configs::AppConfig;
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(service = "item-store", event = "signal_error", error = %e, "cannot listen for Ctrl+C");
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
                error!(service = "item-store", event = "signal_error", error = %e, "cannot listen for SIGTERM");
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
    info!(service = "item-store", event = "shutdown_signal", "shutdown signal received, draining requests");
}

fn main() -> ExitCode {
    // load .env first so RUST_LOG, CONFIG_PATH and friends take effect
    dotenv().ok();

    let cfg = AppConfig::load();
    let format = cfg.as_ref().map(AppConfig::log_format).unwrap_or(LogFormat::Compact);
    init_logging(format);

    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            let err = format!("{e:#}");
            error!(service = "item-store", event = "config_invalid", error = %err, "cannot load configuration");
            return ExitCode::FAILURE;
        }
    };

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "item-store",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "item-store", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "item-store",
        event = "start",
        %service_id,
        pid,
        version,
        addr = %cfg.bind_addr(),
        threads = worker_threads.unwrap_or_default(),
        "item store starting"
    );

    rt.block_on(async move {
        match server::run(cfg, shutdown_signal()).await {
            Ok(()) => {
                info!(service = "item-store", event = "stop", %service_id, pid, "item store stopped normally");
                ExitCode::SUCCESS
            }
            Err(e) => {
                let err = format!("{e:#}");
                error!(service = "item-store", event = "run_failed", error = %err, "server::run returned error");
                ExitCode::FAILURE
            }
        }
    })
}
