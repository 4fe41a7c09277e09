// Browser launch module
// Opens the served URL in the system browser on startup

use crate::logger;

/// Try to open `url` in the default browser without waiting for it.
///
/// Launcher failures (no browser registered, no display, sandboxed session)
/// are reported as a warning and otherwise ignored.
pub fn launch(url: &str) {
    match open::that_detached(url) {
        Ok(()) => logger::log_browser_opened(url),
        Err(e) => logger::log_browser_failed(url, &e),
    }
}
