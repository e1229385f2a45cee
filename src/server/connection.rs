// Connection handling module
// Serves a single TCP connection to completion

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::handler;
use crate::logger;

/// Serve one connection and return once it is closed.
///
/// Keep-alive is disabled, so every connection carries exactly one
/// request, like a CGI process. The whole exchange is bounded by the larger
/// of the configured read and write timeouts.
pub async fn serve_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    config: &Arc<Config>,
) {
    let io = TokioIo::new(stream);

    let timeout_duration = Duration::from_secs(std::cmp::max(
        config.performance.read_timeout,
        config.performance.write_timeout,
    ));

    let mut builder = http1::Builder::new();
    builder.keep_alive(false);

    let service_config = Arc::clone(config);
    let conn = builder.serve_connection(
        io,
        service_fn(move |req| handler::handle_request(req, Arc::clone(&service_config), peer_addr)),
    );

    match tokio::time::timeout(timeout_duration, conn).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => logger::log_connection_error(&err),
        Err(_) => {
            logger::log_warning(&format!(
                "Connection from {peer_addr} timed out after {} seconds",
                timeout_duration.as_secs()
            ));
        }
    }
}
