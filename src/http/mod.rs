//! HTTP protocol layer module
//!
//! Protocol helpers shared by the request handler: MIME lookup, conditional
//! requests, response builders and the development header decorator.

pub mod cache;
pub mod headers;
pub mod mime;
pub mod response;

// Re-export commonly used items
pub use headers::with_dev_headers;
pub use response::{
    build_304_response, build_error_response, build_file_response, build_html_response,
    build_redirect_response, escape_html,
};
