// Server module entry point
// Listener creation, the accept loop, connection serving and shutdown

pub mod browser;
pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the module is named server_loop
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used items
pub use listener::create_listener;
pub use server_loop::run_until;
pub use signal::ShutdownSignal;
