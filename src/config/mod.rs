// Configuration module entry point
// Typed defaults for the server and the runtime state derived from them

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::{resolve_root, AppState};
pub use types::{BrowserConfig, Config, FilesConfig, LoggingConfig, ServerConfig};

impl Config {
    /// Assemble the configuration from built-in defaults.
    ///
    /// The server has no configuration surface: no file and no environment
    /// source is consulted.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("logging.access_log", true)?
            .set_default("browser.open_on_start", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// URL announced in the banner and opened in the browser
    pub fn public_url(&self) -> String {
        format!("http://localhost:{}", self.server.port)
    }
}
