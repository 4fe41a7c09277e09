// Server loop module
// Accepts connections until the shutdown future resolves

use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Run the accept loop.
///
/// Each accepted connection is handed to its own task. When `shutdown`
/// resolves, the shutdown notice is printed with the name it yields and the
/// listener is dropped, so no further connections are accepted. Accept
/// failures are logged and the loop keeps going.
///
/// Returns the name of the signal that stopped the loop.
pub async fn run_until<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> &'static str
where
    F: Future<Output = &'static str>,
{
    tokio::pin!(shutdown);

    let signal = loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => accept_connection(stream, peer_addr, &state),
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            signal = &mut shutdown => {
                logger::log_shutdown(signal);
                break signal;
            }
        }
    };

    drop(listener);
    signal
}
