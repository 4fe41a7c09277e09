//! Logger module
//!
//! Console logging for the server:
//! - Startup banner and shutdown notice
//! - One access line per request on stdout
//! - Warnings and errors on stderr

mod format;

pub use format::{version_digits, AccessLogEntry};

use std::net::SocketAddr;
use std::path::Path;

const RULE: &str = "============================================================";

/// Write to info/access log
fn write_info(message: &str) {
    println!("{message}");
}

/// Write to error log
fn write_error(message: &str) {
    eprintln!("{message}");
}

pub fn log_server_start(url: &str, addr: &SocketAddr, root: &Path) {
    write_info(RULE);
    write_info("Static Game Dev Server");
    write_info(RULE);
    write_info(&format!("Server running at: {url}"));
    write_info(&format!("Listening on: {addr}"));
    write_info(&format!("Serving directory: {}", root.display()));
    write_info(&format!("Open your browser at: {url}"));
    write_info(RULE);
    write_info("Press Ctrl+C to stop the server");
    write_info(RULE);
}

pub fn log_browser_opened(url: &str) {
    write_info(&format!("[Browser] Opened {url}"));
}

pub fn log_browser_failed(url: &str, err: &std::io::Error) {
    log_warning(&format!(
        "Could not open a browser automatically ({err}); open {url} manually"
    ));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry) {
    write_info(&entry.format());
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    write_error(&format!("[ERROR] Failed to serve connection: {err}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_bind_failed(addr: &SocketAddr, err: &std::io::Error) {
    log_error(&format!("Failed to bind {addr}: {err}"));
}

pub fn log_shutdown(signal: &str) {
    write_info(&format!("\n[{signal}] Server stopped"));
}
