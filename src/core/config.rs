use chrono::FixedOffset;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub dashboard: DashboardConfig,
    pub letter: LetterConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

/// Connection settings for the external REST backend (the source of truth
/// for assets, reports and users)
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL including the `/api` prefix, without trailing slash
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub ttl: Duration,
    /// How often expired sessions are swept from the store
    pub purge_interval: Duration,
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Offset used to decide which local calendar day a report belongs to
    pub utc_offset: FixedOffset,
}

/// Letterhead values printed on the approval request letter
#[derive(Debug, Clone)]
pub struct LetterConfig {
    pub city: String,
    pub number: String,
    pub recipient_title: String,
    pub recipient_company: String,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            backend: BackendConfig::from_env()?,
            session: SessionConfig::from_env()?,
            dashboard: DashboardConfig::from_env()?,
            letter: LetterConfig::from_env(),
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 2 * 1024 * 1024; // 2MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl BackendConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 15;

    pub fn from_env() -> Result<Self, String> {
        let base_url = env::var("BACKEND_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000/api".to_string())
            .trim_end_matches('/')
            .to_string();

        if base_url.is_empty() {
            return Err("BACKEND_API_URL must not be empty".to_string());
        }

        let timeout_secs = env::var("BACKEND_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "BACKEND_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl SessionConfig {
    const DEFAULT_TTL_SECS: u64 = 8 * 60 * 60; // 8 hours
    const DEFAULT_PURGE_INTERVAL_SECS: u64 = 10 * 60;

    pub fn from_env() -> Result<Self, String> {
        let ttl_secs = env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SESSION_TTL_SECS must be a valid number".to_string())?;

        let purge_secs = env::var("SESSION_PURGE_INTERVAL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_PURGE_INTERVAL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SESSION_PURGE_INTERVAL_SECS must be a valid number".to_string())?;

        if purge_secs == 0 {
            return Err("SESSION_PURGE_INTERVAL_SECS must be greater than zero".to_string());
        }

        Ok(Self {
            ttl: Duration::from_secs(ttl_secs),
            purge_interval: Duration::from_secs(purge_secs),
        })
    }
}

impl DashboardConfig {
    // WIB (Asia/Jakarta)
    const DEFAULT_UTC_OFFSET_HOURS: i32 = 7;

    pub fn from_env() -> Result<Self, String> {
        let hours = env::var("DASHBOARD_UTC_OFFSET_HOURS")
            .unwrap_or_else(|_| Self::DEFAULT_UTC_OFFSET_HOURS.to_string())
            .parse::<i32>()
            .map_err(|_| "DASHBOARD_UTC_OFFSET_HOURS must be a valid number".to_string())?;

        let utc_offset = FixedOffset::east_opt(hours * 3600)
            .ok_or_else(|| format!("DASHBOARD_UTC_OFFSET_HOURS out of range: {}", hours))?;

        Ok(Self { utc_offset })
    }
}

impl LetterConfig {
    pub fn from_env() -> Self {
        Self {
            city: env::var("LETTER_CITY").unwrap_or_else(|_| "Prabumulih".to_string()),
            number: env::var("LETTER_NUMBER")
                .unwrap_or_else(|_| "0391/PLB-Pbm/V/2025".to_string()),
            recipient_title: env::var("LETTER_RECIPIENT_TITLE")
                .unwrap_or_else(|_| "Manajer Operasional".to_string()),
            recipient_company: env::var("LETTER_RECIPIENT_COMPANY")
                .unwrap_or_else(|_| "PT. Titis Sampurna".to_string()),
        }
    }
}

impl Default for LetterConfig {
    fn default() -> Self {
        Self {
            city: "Prabumulih".to_string(),
            number: "0391/PLB-Pbm/V/2025".to_string(),
            recipient_title: "Manajer Operasional".to_string(),
            recipient_company: "PT. Titis Sampurna".to_string(),
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title =
            env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Asset Dashboard API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION").unwrap_or_else(|_| {
            "API documentation for the asset and pelaporan barang dashboard".to_string()
        });

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
