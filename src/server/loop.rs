// Server loop module
// Accepts connections and serves them one after another

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::serve_connection;
use super::signal::shutdown_signal;
use crate::config::Config;
use crate::logger;

/// Accept and serve connections sequentially until a shutdown signal.
///
/// A connection is served to completion before the next `accept`, so the
/// handlers never run concurrently. Pending clients wait in the listen
/// backlog.
#[allow(clippy::ignored_unit_patterns)]
pub async fn start_server_loop(
    listener: TcpListener,
    config: Arc<Config>,
) -> Result<(), Box<dyn std::error::Error>> {
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        serve_connection(stream, peer_addr, &config).await;
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = &mut shutdown => {
                logger::log_server_stop();
                return Ok(());
            }
        }
    }
}
