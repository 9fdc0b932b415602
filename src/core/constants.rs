pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SERVICE_NAME: &str = env!("CARGO_PKG_NAME");

pub const CONFIG_FILE: &str = "lingo.toml";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CLIENT_ORIGIN: &str = "http://localhost:4000";
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Name of the cookie carrying the selected language code.
pub const LANG_COOKIE: &str = "lang";
/// Preference cookie lifetime.
pub const LANG_COOKIE_MAX_AGE_DAYS: i64 = 365;
