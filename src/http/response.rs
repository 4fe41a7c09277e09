//! HTTP response building module
//!
//! Builders for every response the file server produces. None of them set
//! caching or CORS headers; those are appended afterwards by
//! [`crate::http::headers::with_dev_headers`].

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

const ERROR_CONTENT_TYPE: &str = "text/html;charset=utf-8";

/// Build 200 response carrying a file
pub fn build_file_response(
    data: Vec<u8>,
    content_type: &str,
    etag: &str,
    last_modified: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head { Bytes::new() } else { Bytes::from(data) };

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("ETag", etag);
    if let Some(date) = last_modified {
        builder = builder.header("Last-Modified", date);
    }

    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error("200", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str, last_modified: Option<&str>) -> Response<Full<Bytes>> {
    let mut builder = Response::builder()
        .status(StatusCode::NOT_MODIFIED)
        .header("ETag", etag);
    if let Some(date) = last_modified {
        builder = builder.header("Last-Modified", date);
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("304", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 301 redirect, used to add the trailing slash to directory URLs
pub fn build_redirect_response(location: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header("Location", location)
        .header("Content-Length", 0)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build generic HTML response
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build an error response with a small HTML page describing the failure.
///
/// `message` replaces the status' canonical reason in the page body.
pub fn build_error_response(
    status: StatusCode,
    message: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let page = error_page(status, message);
    let content_length = page.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(page)
    };

    Response::builder()
        .status(status)
        .header("Content-Type", ERROR_CONTENT_TYPE)
        .header("Content-Length", content_length)
        .header("Connection", "close")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            let mut resp = Response::new(Full::new(Bytes::new()));
            *resp.status_mut() = status;
            resp
        })
}

/// Render the HTML error page
fn error_page(status: StatusCode, message: Option<&str>) -> String {
    let reason = status.canonical_reason().unwrap_or("Unknown");
    let message = message.unwrap_or(reason);
    format!(
        r#"<!DOCTYPE HTML>
<html lang="en">
    <head>
        <meta charset="utf-8">
        <title>Error response</title>
    </head>
    <body>
        <h1>Error response</h1>
        <p>Error code: {code}</p>
        <p>Message: {message}.</p>
        <p>Error code explanation: {code} - {explain}.</p>
    </body>
</html>
"#,
        code = status.as_u16(),
        message = escape_html(message),
        explain = explanation(status),
    )
}

/// Longer description of an error status
fn explanation(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "Bad request syntax or unsupported method",
        403 => "Request forbidden, authorization will not help",
        404 => "Nothing matches the given URI",
        405 => "Specified method is invalid for this resource",
        500 => "Server got itself in trouble",
        501 => "Server does not support this operation",
        _ => "No further information",
    }
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_404_page() {
        let resp = build_error_response(StatusCode::NOT_FOUND, Some("File not found"), false);
        assert_eq!(resp.status(), 404);
        assert_eq!(resp.headers()["content-type"], ERROR_CONTENT_TYPE);
        let body = body_string(resp).await;
        assert!(body.contains("Error code: 404"));
        assert!(body.contains("Message: File not found."));
        assert!(body.contains("Nothing matches the given URI"));
    }

    #[tokio::test]
    async fn test_error_head_has_length_but_no_body() {
        let resp = build_error_response(StatusCode::NOT_FOUND, None, true);
        let length: usize = resp.headers()["content-length"].to_str().unwrap().parse().unwrap();
        assert!(length > 0);
        assert!(body_string(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_error_message_is_escaped() {
        let resp = build_error_response(StatusCode::NOT_IMPLEMENTED, Some("Unsupported method ('<X>')"), false);
        let body = body_string(resp).await;
        assert!(body.contains("Unsupported method (&#x27;&lt;X&gt;&#x27;)"));
    }

    #[tokio::test]
    async fn test_file_response_head() {
        let resp = build_file_response(b"abc".to_vec(), "text/css", "\"1\"", Some("Wed, 21 Oct 2015 07:28:00 GMT"), true);
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["content-length"], "3");
        assert_eq!(resp.headers()["last-modified"], "Wed, 21 Oct 2015 07:28:00 GMT");
        assert!(body_string(resp).await.is_empty());
    }

    #[test]
    fn test_base_responses_leave_caching_headers_alone() {
        let responses = [
            build_file_response(Vec::new(), "text/plain", "\"1\"", None, false),
            build_304_response("\"1\"", None),
            build_redirect_response("/dir/"),
            build_error_response(StatusCode::FORBIDDEN, None, false),
        ];
        for resp in responses {
            assert!(resp.headers().get("cache-control").is_none());
            assert!(resp.headers().get("access-control-allow-origin").is_none());
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a&b<c>\"d\""), "a&amp;b&lt;c&gt;&quot;d&quot;");
        assert_eq!(escape_html("plain.js"), "plain.js");
    }
}
