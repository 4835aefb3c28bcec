use std::time::Duration;

// ============================================================================
// Configuration
// ============================================================================

pub const DEFAULT_DOMAIN_SETTINGS: &str = "default_user_quota:2048";

/// Connection settings for the mail account database.
///
/// Defaults: 2 connections, 30 second acquire timeout.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    database_url: String,
    max_connections: u32,
    acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 2,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }

    pub fn acquire_timeout(&self) -> Duration {
        self.acquire_timeout
    }

    /// URL safe for logs: any password in the authority is masked
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.database_url.split_once("://") else {
            return self.database_url.clone();
        };
        let (authority, path) = match rest.find('/') {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };
        match authority.rsplit_once('@') {
            Some((credentials, host)) => {
                let user = credentials.split(':').next().unwrap_or_default();
                format!("{}://{}:***@{}{}", scheme, user, host, path)
            }
            None => self.database_url.clone(),
        }
    }
}

/// Everything the account managers need at construction time
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub database: DatabaseConfig,
    pub default_domain_settings: String,
}

impl AdminConfig {
    pub fn new(database: DatabaseConfig) -> Self {
        Self {
            database,
            default_domain_settings: DEFAULT_DOMAIN_SETTINGS.to_string(),
        }
    }

    pub fn with_default_domain_settings(mut self, settings: impl Into<String>) -> Self {
        self.default_domain_settings = settings.into();
        self
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
