//! Static file serving module
//!
//! Translates request paths into files under the root directory and builds
//! the file, redirect, listing or error response for them.

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Outcome of resolving a request path against the root
#[derive(Debug, PartialEq, Eq)]
pub enum Resolved {
    /// A regular file to send
    File(PathBuf),
    /// A directory without an index file
    Listing(PathBuf),
    /// Directory requested without its trailing slash
    Redirect(String),
    /// Failure to report with the given status and message
    Error(StatusCode, &'static str),
}

/// Serve a GET/HEAD request from the root directory
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    match resolve(state, ctx.path, ctx.query).await {
        Resolved::File(path) => serve_file(ctx, &path).await,
        Resolved::Listing(dir) => serve_listing(ctx, &dir).await,
        Resolved::Redirect(location) => http::build_redirect_response(&location),
        Resolved::Error(status, message) => {
            http::build_error_response(status, Some(message), ctx.is_head)
        }
    }
}

/// Map a URL path onto the filesystem below `root`.
///
/// The path is percent-decoded and split on `/`. Empty, `.` and `..`
/// segments, and segments that would not be a single plain path component,
/// are dropped, so the result never climbs above `root` lexically.
/// Returns `None` when the decoded path is not valid UTF-8.
pub fn translate_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = urlencoding::decode(request_path).ok()?;
    let mut path = root.to_path_buf();
    for segment in decoded.split('/') {
        if is_plain_segment(segment) {
            path.push(segment);
        }
    }
    Some(path)
}

fn is_plain_segment(segment: &str) -> bool {
    if segment.is_empty() || segment.contains('\\') {
        return false;
    }
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Resolve a request path to what should be served
pub async fn resolve(state: &AppState, request_path: &str, query: Option<&str>) -> Resolved {
    let Some(path) = translate_path(&state.root, request_path) else {
        return Resolved::Error(StatusCode::BAD_REQUEST, "Bad request path");
    };

    let canonical = match within_root(&state.root, &path, request_path).await {
        Ok(p) => p,
        Err(resolved) => return resolved,
    };

    let metadata = match fs::metadata(&canonical).await {
        Ok(m) => m,
        Err(e) => return error_for_io(&e),
    };

    if metadata.is_dir() {
        if !request_path.ends_with('/') {
            return Resolved::Redirect(directory_location(request_path, query));
        }
        for index in &state.index_files {
            let candidate = canonical.join(index);
            if !is_file(&candidate).await {
                continue;
            }
            if let Ok(index_path) = within_root(&state.root, &candidate, request_path).await {
                return Resolved::File(index_path);
            }
        }
        return Resolved::Listing(canonical);
    }

    if request_path.ends_with('/') {
        return Resolved::Error(StatusCode::NOT_FOUND, "File not found");
    }
    Resolved::File(canonical)
}

/// `Location` for a directory requested without its trailing slash.
///
/// Leading slashes collapse to one so `//host` can never become a
/// protocol-relative URL pointing at another site.
fn directory_location(request_path: &str, query: Option<&str>) -> String {
    let path = request_path.trim_start_matches('/');
    match query {
        Some(q) => format!("/{path}/?{q}"),
        None => format!("/{path}/"),
    }
}

/// Canonicalize `path` and make sure it is still below `root`.
///
/// Symlinks may point anywhere; the canonical form is what is checked.
async fn within_root(root: &Path, path: &Path, request_path: &str) -> Result<PathBuf, Resolved> {
    let canonical = fs::canonicalize(path).await.map_err(|e| error_for_io(&e))?;
    if canonical.starts_with(root) {
        Ok(canonical)
    } else {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            request_path,
            canonical.display()
        ));
        Err(Resolved::Error(StatusCode::FORBIDDEN, "Path outside served directory"))
    }
}

async fn is_file(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|m| m.is_file())
}

/// Translate a filesystem error into the status reported to the client
fn status_for_io(err: &io::Error) -> (StatusCode, &'static str) {
    match err.kind() {
        io::ErrorKind::PermissionDenied => (StatusCode::FORBIDDEN, "Permission denied"),
        _ => (StatusCode::NOT_FOUND, "File not found"),
    }
}

fn error_for_io(err: &io::Error) -> Resolved {
    let (status, message) = status_for_io(err);
    Resolved::Error(status, message)
}

/// Send a file, honoring conditional request headers
async fn serve_file(ctx: &RequestContext<'_>, path: &Path) -> Response<Full<Bytes>> {
    let content = match fs::read(path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {}", path.display(), e));
            let (status, message) = status_for_io(&e);
            return http::build_error_response(status, Some(message), ctx.is_head);
        }
    };

    let modified = fs::metadata(path).await.and_then(|m| m.modified()).ok();
    let last_modified = modified.map(cache::format_http_date);
    let etag = cache::generate_etag(&content);

    if cache::is_not_modified(ctx.if_none_match, ctx.if_modified_since, &etag, modified) {
        return http::build_304_response(&etag, last_modified.as_deref());
    }

    let content_type = mime::get_content_type(path.extension().and_then(|e| e.to_str()));
    http::build_file_response(content, content_type, &etag, last_modified.as_deref(), ctx.is_head)
}

/// Send an HTML listing of a directory
async fn serve_listing(ctx: &RequestContext<'_>, dir: &Path) -> Response<Full<Bytes>> {
    let display_path = urlencoding::decode(ctx.path).map_or_else(|_| ctx.path.to_string(), |p| p.into_owned());
    match listing::render_listing(dir, &display_path).await {
        Ok(html) => http::build_html_response(html, ctx.is_head),
        Err(e) => {
            logger::log_warning(&format!("Cannot list '{}': {}", dir.display(), e));
            http::build_error_response(
                StatusCode::NOT_FOUND,
                Some("No permission to list directory"),
                ctx.is_head,
            )
        }
    }
}
