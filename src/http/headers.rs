//! Development header decorator
//!
//! Every response leaving the server is passed through [`with_dev_headers`],
//! which appends the headers that keep browsers from caching assets and let
//! pages on other origins fetch them.

use hyper::header::{
    HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, EXPIRES, PRAGMA,
};
use hyper::Response;

/// Headers appended to every response, in order
pub const DEV_HEADERS: [(HeaderName, &str); 4] = [
    (CACHE_CONTROL, "no-store, no-cache, must-revalidate, max-age=0"),
    (PRAGMA, "no-cache"),
    (EXPIRES, "0"),
    (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
];

/// Append the development headers to a response, whatever its status.
///
/// Headers already set by the base handler are kept; the dev headers are
/// appended after them.
pub fn with_dev_headers<B>(mut response: Response<B>) -> Response<B> {
    let headers = response.headers_mut();
    for (name, value) in DEV_HEADERS {
        headers.append(name, HeaderValue::from_static(value));
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::StatusCode;

    fn assert_dev_headers<B>(resp: &Response<B>) {
        for (name, value) in DEV_HEADERS {
            let values: Vec<_> = resp.headers().get_all(&name).iter().collect();
            assert_eq!(values.len(), 1, "expected exactly one {name}");
            assert_eq!(values[0], value);
        }
    }

    #[test]
    fn test_applied_to_every_status() {
        for status in [
            StatusCode::OK,
            StatusCode::MOVED_PERMANENTLY,
            StatusCode::NOT_MODIFIED,
            StatusCode::FORBIDDEN,
            StatusCode::NOT_FOUND,
            StatusCode::NOT_IMPLEMENTED,
        ] {
            let mut resp = Response::new(());
            *resp.status_mut() = status;
            let resp = with_dev_headers(resp);
            assert_eq!(resp.status(), status);
            assert_dev_headers(&resp);
        }
    }

    #[test]
    fn test_existing_headers_kept_and_ordered_first() {
        let resp = Response::builder()
            .header("Content-Type", "text/css")
            .body(())
            .unwrap();
        let resp = with_dev_headers(resp);
        assert_eq!(resp.headers()["content-type"], "text/css");
        let names: Vec<_> = resp.headers().keys().map(HeaderName::as_str).collect();
        assert_eq!(
            names,
            [
                "content-type",
                "cache-control",
                "pragma",
                "expires",
                "access-control-allow-origin"
            ]
        );
    }
}
