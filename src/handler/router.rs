//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, dispatch to the
//! static file server, header decoration and access logging.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, SERVER};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_none_match: Option<&'a str>,
    pub if_modified_since: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    fn from_parts(parts: &'a Parts) -> Self {
        Self {
            path: parts.uri.path(),
            query: parts.uri.query(),
            is_head: parts.method == Method::HEAD,
            if_none_match: header_str(parts, "if-none-match"),
            if_modified_since: header_str(parts, "if-modified-since"),
        }
    }
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

/// Main entry point for HTTP request handling.
///
/// The request body is never read. Every response, whatever its status, goes
/// through [`http::with_dev_headers`] and is logged.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let (parts, _body) = req.into_parts();

    let mut entry = AccessLogEntry::new(parts.method.to_string(), request_target(&parts));
    entry.http_version = logger::version_digits(parts.version).to_string();

    let response = http::with_dev_headers(dispatch(&parts, &state).await);

    if state.access_log {
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        logger::log_access(&entry);
    }
    Ok(response)
}

/// Produce the base response, before header decoration
async fn dispatch(parts: &Parts, state: &AppState) -> Response<Full<Bytes>> {
    let mut response = match check_http_method(&parts.method) {
        Some(resp) => resp,
        None => static_files::serve(&RequestContext::from_parts(parts), state).await,
    };
    if let Ok(value) = HeaderValue::from_str(&state.server_name) {
        response.headers_mut().insert(SERVER, value);
    }
    response
}

/// Only GET and HEAD are served; everything else is answered with 501
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        _ => {
            logger::log_warning(&format!("Unsupported method: {method}"));
            Some(http::build_error_response(
                StatusCode::NOT_IMPLEMENTED,
                Some(&format!("Unsupported method ('{method}')")),
                false,
            ))
        }
    }
}

/// Request target as it appears in the request line
fn request_target(parts: &Parts) -> String {
    parts
        .uri
        .path_and_query()
        .map_or_else(|| parts.uri.to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::http::headers::DEV_HEADERS;
    use crate::test_util::TempTree;

    fn state_for(tree: &TempTree) -> Arc<AppState> {
        let cfg = Config::load().unwrap();
        Arc::new(AppState::with_root(tree.path().to_path_buf(), &cfg))
    }

    async fn request(state: &Arc<AppState>, method: Method, uri: &str) -> Response<Full<Bytes>> {
        let req = Request::builder().method(method).uri(uri).body(()).unwrap();
        handle_request(req, Arc::clone(state)).await.unwrap()
    }

    fn assert_dev_headers(resp: &Response<Full<Bytes>>) {
        for (name, value) in DEV_HEADERS {
            assert_eq!(resp.headers().get_all(&name).iter().count(), 1);
            assert_eq!(resp.headers()[&name], value);
        }
    }

    #[tokio::test]
    async fn test_dev_headers_on_every_outcome() {
        let tree = TempTree::new("router-headers");
        tree.file("index.html", "<h1>Tetris</h1>");
        tree.file("levels/one.json", "{}");
        let state = state_for(&tree);

        let cases = [
            (Method::GET, "/", 200),
            (Method::GET, "/index.html", 200),
            (Method::HEAD, "/index.html", 200),
            (Method::GET, "/levels/", 200),
            (Method::GET, "/levels", 301),
            (Method::GET, "/does-not-exist.html", 404),
            (Method::POST, "/index.html", 501),
        ];
        for (method, uri, status) in cases {
            let resp = request(&state, method, uri).await;
            assert_eq!(resp.status(), status, "{uri}");
            assert_dev_headers(&resp);
            assert!(resp.headers()["server"].to_str().unwrap().starts_with("devserve/"));
        }
    }

    #[tokio::test]
    async fn test_not_modified_keeps_dev_headers() {
        let tree = TempTree::new("router-304");
        tree.file("app.js", "start();");
        let state = state_for(&tree);
        let first = request(&state, Method::GET, "/app.js").await;
        let etag = first.headers()["etag"].clone();

        let req = Request::builder()
            .uri("/app.js")
            .header("If-None-Match", etag)
            .body(())
            .unwrap();
        let resp = handle_request(req, Arc::clone(&state)).await.unwrap();
        assert_eq!(resp.status(), 304);
        assert_dev_headers(&resp);
    }

    #[tokio::test]
    async fn test_traversal_never_leaves_root() {
        let tree = TempTree::new("router-traversal");
        let state = state_for(&tree);
        for uri in ["/../../etc/passwd", "/%2e%2e/%2e%2e/etc/passwd", "/..%2f..%2fetc/passwd"] {
            let resp = request(&state, Method::GET, uri).await;
            assert_ne!(resp.status(), 200, "{uri}");
            assert_dev_headers(&resp);
        }
    }

    #[test]
    fn test_request_target_keeps_query() {
        let req = Request::builder().uri("/game.js?v=3").body(()).unwrap();
        let (parts, ()) = req.into_parts();
        assert_eq!(request_target(&parts), "/game.js?v=3");
    }
}
