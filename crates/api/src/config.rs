use serde::Deserialize;
use std::net::SocketAddr;

pub use persistence::db::PoolConfig as PoolSettings;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub jwt: JwtAuthConfig,
    #[serde(default)]
    pub email: EmailConfig,
    pub links: LinksConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Shared key for the back-office card endpoints; compared by digest.
    pub admin_api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtAuthConfig {
    /// HMAC secret for signing access tokens (HS256).
    pub secret: String,

    /// Access token expiration in hours.
    #[serde(default = "default_token_expiry_hours")]
    pub expiry_hours: i64,
}

/// Email service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Whether email sending is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Email provider: sendgrid, or console (for development)
    #[serde(default = "default_email_provider")]
    pub provider: String,

    /// SendGrid API key (for sendgrid provider)
    #[serde(default)]
    pub sendgrid_api_key: String,

    /// Sender email address (From header)
    #[serde(default = "default_sender_email")]
    pub sender_email: String,

    /// Sender name (From header)
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: default_email_provider(),
            sendgrid_api_key: String::new(),
            sender_email: default_sender_email(),
            sender_name: default_sender_name(),
        }
    }
}

/// URLs embedded in cards, QR payloads and mails.
#[derive(Debug, Clone, Deserialize)]
pub struct LinksConfig {
    /// Base URL a card link points at; the card id is appended.
    #[serde(default = "default_profile_base_url")]
    pub profile_base_url: String,

    /// Page completing the forgot-password flow; the token is appended
    /// as a query parameter.
    #[serde(default = "default_password_reset_url")]
    pub password_reset_url: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    30
}
fn default_max_connections() -> u32 {
    20
}
fn default_min_connections() -> u32 {
    5
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_idle_timeout() -> u64 {
    600
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}
fn default_token_expiry_hours() -> i64 {
    24 * 30
}
fn default_email_provider() -> String {
    "console".to_string()
}
fn default_sender_email() -> String {
    "noreply@cardlink.app".to_string()
}
fn default_sender_name() -> String {
    "CardLink".to_string()
}
fn default_profile_base_url() -> String {
    "https://cardlink.app/card".to_string()
}
fn default_password_reset_url() -> String {
    "https://cardlink.app/reset-password".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Loading order (later sources override earlier):
    /// 1. config/default.toml - base configuration (optional)
    /// 2. config/local.toml - local overrides (optional, not in git)
    /// 3. Environment variables with APP__ prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Returns the socket address to bind the server to.
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], self.server.port)))
    }

    /// Pool settings in the form the persistence layer expects.
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            min_connections: self.database.min_connections,
            connect_timeout_secs: self.database.connect_timeout_secs,
            idle_timeout_secs: self.database.idle_timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                request_timeout_secs: default_request_timeout(),
            },
            database: DatabaseConfig {
                url: "postgres://localhost/cardlink_test".to_string(),
                max_connections: default_max_connections(),
                min_connections: default_min_connections(),
                connect_timeout_secs: default_connect_timeout(),
                idle_timeout_secs: default_idle_timeout(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
            security: SecurityConfig {
                cors_origins: Vec::new(),
                admin_api_key: "test-admin-key".to_string(),
            },
            jwt: JwtAuthConfig {
                secret: "test-secret-at-least-32-bytes-long!!".to_string(),
                expiry_hours: default_token_expiry_hours(),
            },
            email: EmailConfig::default(),
            links: LinksConfig {
                profile_base_url: default_profile_base_url(),
                password_reset_url: default_password_reset_url(),
            },
        }
    }

    #[test]
    fn test_socket_addr() {
        let config = test_config();
        assert_eq!(config.socket_addr().port(), 8080);
    }

    #[test]
    fn test_email_disabled_by_default() {
        let email = EmailConfig::default();
        assert!(!email.enabled);
        assert_eq!(email.provider, "console");
    }

    #[test]
    fn test_pool_settings_carry_url() {
        let config = test_config();
        let pool = config.pool_settings();
        assert_eq!(pool.url, config.database.url);
        assert_eq!(pool.max_connections, 20);
    }
}
