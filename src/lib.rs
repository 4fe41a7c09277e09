//! Static file server for local game development.
//!
//! Serves a directory over HTTP/1.1 with browser caching disabled and a
//! permissive CORS header on every response, logging each request.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

#[cfg(test)]
#[path = "../tests/common/mod.rs"]
mod test_util;
