// Connection handling module
// Serves a single accepted TCP connection with hyper's HTTP/1 driver

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Serve `stream` in its own task.
///
/// Requests on the connection are handled one after another; keep-alive is
/// left to hyper's defaults. Connection errors are logged and never reach
/// the accept loop.
pub fn accept_connection(stream: TcpStream, peer_addr: SocketAddr, state: &Arc<AppState>) {
    let state = Arc::clone(state);
    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let service = service_fn(move |req| handler::handle_request(req, Arc::clone(&state)));

        if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
            logger::log_connection_error(&format!("{peer_addr}: {err}"));
        }
    });
}
