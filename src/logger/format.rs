//! Access log format module
//!
//! One line per request:
//! `[16/Oct/2026 14:03:07] "GET /index.html HTTP/1.1" 200 1234`

use chrono::{DateTime, Local};

/// Access log entry containing all request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Request timestamp
    pub time: DateTime<Local>,
    /// HTTP method (GET, HEAD, ...)
    pub method: String,
    /// Request target as sent, including any query string
    pub target: String,
    /// HTTP version (1.0, 1.1)
    pub http_version: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: u64,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(method: String, target: String) -> Self {
        Self {
            time: Local::now(),
            method,
            target,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
        }
    }

    /// Timestamp in the bracketed log form, e.g. `16/Oct/2026 14:03:07`
    pub fn timestamp(&self) -> String {
        self.time.format("%d/%b/%Y %H:%M:%S").to_string()
    }

    /// Request line as the client sent it
    pub fn request_line(&self) -> String {
        format!("{} {} HTTP/{}", self.method, self.target, self.http_version)
    }

    /// Render the log line. An empty body is logged as `-`.
    pub fn format(&self) -> String {
        let bytes = if self.body_bytes == 0 {
            "-".to_string()
        } else {
            self.body_bytes.to_string()
        };
        format!(
            "[{}] \"{}\" {} {}",
            self.timestamp(),
            self.request_line(),
            self.status,
            bytes
        )
    }
}

/// Map a hyper version to the digits used in a request line
pub fn version_digits(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new("GET".to_string(), "/js/game.js?v=2".to_string());
        entry.time = Local.with_ymd_and_hms(2026, 10, 16, 14, 3, 7).unwrap();
        entry.status = 200;
        entry.body_bytes = 1234;
        entry
    }

    #[test]
    fn test_format_line() {
        let entry = create_test_entry();
        assert_eq!(
            entry.format(),
            "[16/Oct/2026 14:03:07] \"GET /js/game.js?v=2 HTTP/1.1\" 200 1234"
        );
    }

    #[test]
    fn test_empty_body_logged_as_dash() {
        let mut entry = create_test_entry();
        entry.status = 304;
        entry.body_bytes = 0;
        assert!(entry.format().ends_with("\" 304 -"));
    }

    #[test]
    fn test_version_digits() {
        assert_eq!(version_digits(hyper::Version::HTTP_10), "1.0");
        assert_eq!(version_digits(hyper::Version::HTTP_11), "1.1");
    }
}
