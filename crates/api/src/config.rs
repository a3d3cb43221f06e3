//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use analytics::EngineOptions;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `8082`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `MOVEMENTS_CSV` — movement file path (default: `"./movimiento_inventario.csv"`)
/// - `REJECT_NEGATIVE_QUANTITY`, `REJECT_NEGATIVE_STOCK` — quantity
///   policies, `1`/`true` to enable (default: off)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub csv_path: PathBuf,
    pub engine_options: EngineOptions,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8082),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            csv_path: std::env::var("MOVEMENTS_CSV")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./movimiento_inventario.csv")),
            engine_options: EngineOptions {
                reject_negative_quantity: env_flag("REJECT_NEGATIVE_QUANTITY"),
                reject_negative_stock: env_flag("REJECT_NEGATIVE_STOCK"),
            },
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8082,
            log_level: "info".to_string(),
            csv_path: PathBuf::from("./movimiento_inventario.csv"),
            engine_options: EngineOptions::default(),
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
