use bulkship_core::row::{TrackingDefaults, DEFAULT_TRACKING_COMPANY, DEFAULT_TRACKING_URL_TEMPLATE};
use bulkship_engine::OrderMatchPolicy;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In
/// production, override via environment variables. The shop credentials
/// (`SHOPIFY_SHOP`, `SHOPIFY_ACCESS_TOKEN`) are read separately in
/// `main.rs` because they have no safe default.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Tracking defaults applied during row normalization.
    pub tracking: TrackingDefaults,
    /// Policy for ambiguous order-name lookups.
    pub match_policy: OrderMatchPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                         |
    /// |----------------------------|---------------------------------|
    /// | `HOST`                     | `0.0.0.0`                       |
    /// | `PORT`                     | `3000`                          |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`         |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                            |
    /// | `DEFAULT_TRACKING_COMPANY` | `India Post`                    |
    /// | `TRACKING_URL_TEMPLATE`    | India Post consignment tracker  |
    /// | `ORDER_MATCH_POLICY`       | `first`                         |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let tracking = TrackingDefaults {
            company: std::env::var("DEFAULT_TRACKING_COMPANY")
                .unwrap_or_else(|_| DEFAULT_TRACKING_COMPANY.into()),
            url_template: std::env::var("TRACKING_URL_TEMPLATE")
                .unwrap_or_else(|_| DEFAULT_TRACKING_URL_TEMPLATE.into()),
        };

        let match_policy: OrderMatchPolicy = std::env::var("ORDER_MATCH_POLICY")
            .unwrap_or_else(|_| "first".into())
            .parse()
            .expect("ORDER_MATCH_POLICY must be 'first' or 'reject_ambiguous'");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            tracking,
            match_policy,
        }
    }
}
