// Signal handling module
//
// - SIGTERM: stop accepting and exit
// - SIGINT:  stop accepting and exit (Ctrl+C)

/// Resolve once the process is asked to stop
#[cfg(unix)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            crate::logger::log_warning(&format!("Failed to register SIGTERM handler: {e}"));
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => crate::logger::log_info("\n[SIGNAL] SIGTERM received"),
        _ = tokio::signal::ctrl_c() => crate::logger::log_info("\n[SIGNAL] SIGINT received (Ctrl+C)"),
    }
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    if let Ok(()) = tokio::signal::ctrl_c().await {
        crate::logger::log_info("\n[SIGNAL] Ctrl+C received");
    }
}
