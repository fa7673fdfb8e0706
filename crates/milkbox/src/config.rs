use std::env;

/// Storage platform the application was started on.
///
/// Decided once at startup and injected into [`Storage`](crate::Storage);
/// nothing else in the persistence layer branches on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    /// Desktop/mobile: embedded SQLite database.
    #[default]
    Native,
    /// Browser: flat key-value storage.
    Web,
}

impl Platform {
    /// Parses a platform name. Anything other than `"web"` is native,
    /// matching how the app has always treated unknown platforms.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("web") {
            Platform::Web
        } else {
            Platform::Native
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage platform (default: native).
    pub platform: Platform,
    /// Path to the SQLite database file (default: "milkbox.db").
    pub sqlite_path: String,
    /// Wipe all stored data once, on the first launch after install
    /// (default: false). The wipe never re-runs afterwards.
    pub reset_on_first_launch: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MILKBOX_PLATFORM` - "native" or "web" (default: "native")
    /// - `MILKBOX_SQLITE_PATH` - SQLite database path (default: "milkbox.db")
    /// - `MILKBOX_RESET_ON_FIRST_LAUNCH` - "true" to wipe on first launch (default: false)
    pub fn from_env() -> Self {
        Self {
            platform: env::var("MILKBOX_PLATFORM")
                .map(|v| Platform::parse(&v))
                .unwrap_or_default(),
            sqlite_path: env::var("MILKBOX_SQLITE_PATH")
                .unwrap_or_else(|_| "milkbox.db".to_string()),
            reset_on_first_launch: env::var("MILKBOX_RESET_ON_FIRST_LAUNCH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
