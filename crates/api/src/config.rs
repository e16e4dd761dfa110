use std::path::PathBuf;

use crm_session::DEFAULT_SESSION_TTL_DAYS;

/// Upper bound accepted for `SESSION_TTL_DAYS`.
pub const MAX_SESSION_TTL_DAYS: i64 = 365;

/// Console configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `4000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Base URL of the upstream CRM API.
    pub upstream_url: String,
    /// Timeout of a single upstream call in seconds (default: `15`).
    pub upstream_timeout_secs: u64,
    /// Where the session record is persisted.
    pub session_file: PathBuf,
    /// Retention window of the persisted session in days (default: `7`,
    /// range `1..=365`).
    pub session_ttl_days: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                     |
    /// |-------------------------|-----------------------------|
    /// | `HOST`                  | `127.0.0.1`                 |
    /// | `PORT`                  | `4000`                      |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`     |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                        |
    /// | `UPSTREAM_API_URL`      | `http://localhost:3000/api` |
    /// | `UPSTREAM_TIMEOUT_SECS` | `15`                        |
    /// | `SESSION_FILE`          | `.crm-session.json`         |
    /// | `SESSION_TTL_DAYS`      | `7`                         |
    ///
    /// # Panics
    ///
    /// Panics if a numeric variable does not parse, or if `SESSION_TTL_DAYS`
    /// is outside `1..=MAX_SESSION_TTL_DAYS`.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "4000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upstream_url = std::env::var("UPSTREAM_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000/api".into());

        let upstream_timeout_secs: u64 = std::env::var("UPSTREAM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "15".into())
            .parse()
            .expect("UPSTREAM_TIMEOUT_SECS must be a valid u64");

        let session_file = std::env::var("SESSION_FILE")
            .unwrap_or_else(|_| ".crm-session.json".into())
            .into();

        let session_ttl_days: i64 = std::env::var("SESSION_TTL_DAYS")
            .unwrap_or_else(|_| DEFAULT_SESSION_TTL_DAYS.to_string())
            .parse()
            .expect("SESSION_TTL_DAYS must be a valid i64");
        assert!(
            session_ttl_in_range(session_ttl_days),
            "SESSION_TTL_DAYS must be between 1 and {MAX_SESSION_TTL_DAYS}"
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upstream_url,
            upstream_timeout_secs,
            session_file,
            session_ttl_days,
        }
    }
}

fn session_ttl_in_range(days: i64) -> bool {
    (1..=MAX_SESSION_TTL_DAYS).contains(&days)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_origins(" http://a.test ,, http://b.test,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn session_ttl_bounds() {
        assert!(session_ttl_in_range(1));
        assert!(session_ttl_in_range(DEFAULT_SESSION_TTL_DAYS));
        assert!(session_ttl_in_range(MAX_SESSION_TTL_DAYS));
        assert!(!session_ttl_in_range(0));
        assert!(!session_ttl_in_range(-3));
        assert!(!session_ttl_in_range(i64::MAX));
    }
}
