/// Production deployment of the marketplace data API.
pub const DEFAULT_API_BASE: &str = "https://synvo-it-solution-server.vercel.app";

/// Application configuration, sourced from `SYNVO_*` environment variables.
///
/// The API is unauthenticated and nothing here is secret; every field is
/// safe to log.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the marketplace data API.
    pub api_base: String,
    /// Signed-in identity; `None` runs the CLI signed-out.
    pub user_email: Option<String>,
    /// Display name shown on listings and bookings created by the session.
    pub user_name: Option<String>,
    pub request_timeout_secs: u64,
    /// Catalog page size; always at least 1.
    pub page_size: usize,
    pub log_level: String,
}
