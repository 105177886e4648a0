use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub backend: BackendConfig,
    pub map: MapConfig,
    pub session: SessionConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    /// Public URL of the web app, used to build the OAuth callback URL
    pub app_url: String,
}

/// Remote planning backend (regions, analysis, simulation, auth)
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub api_base_url: String,
    pub api_version: String,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Quiet interval after the last viewport change before facilities are loaded
    pub debounce: Duration,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub cookie_secure: bool,
    pub idle_ttl: Duration,
    pub sweep_interval: Duration,
    /// Upper bound on live app sessions; the longest idle one is evicted first
    pub max_sessions: usize,
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
            map: MapConfig::from_env()?,
            session: SessionConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let app_url = env::var("APP_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            app_url,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl BackendConfig {
    const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn from_env() -> Result<Self, String> {
        let api_base_url =
            env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
        let api_version = env::var("API_VERSION").unwrap_or_else(|_| "v1".to_string());

        let timeout_secs = env::var("BACKEND_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "BACKEND_TIMEOUT_SECS must be a valid number".to_string())?;

        if timeout_secs == 0 {
            return Err("BACKEND_TIMEOUT_SECS must be greater than zero".to_string());
        }

        Ok(Self {
            api_base_url,
            api_version,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    /// Build a full versioned API URL: `{base}/api/{version}/{endpoint}`
    pub fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/api/{}/{}",
            self.base_url(),
            self.api_version.trim_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

impl MapConfig {
    const DEFAULT_DEBOUNCE_MS: u64 = 400;

    pub fn from_env() -> Result<Self, String> {
        let debounce_ms = env::var("MAP_DEBOUNCE_MS")
            .unwrap_or_else(|_| Self::DEFAULT_DEBOUNCE_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "MAP_DEBOUNCE_MS must be a valid number".to_string())?;

        Ok(Self {
            debounce: Duration::from_millis(debounce_ms),
        })
    }
}

impl SessionConfig {
    const DEFAULT_IDLE_TTL_SECS: u64 = 3600; // 1 hour
    const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
    const DEFAULT_MAX_SESSIONS: usize = 10_000;

    pub fn from_env() -> Result<Self, String> {
        let cookie_name =
            env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "cliva_session".to_string());

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let idle_ttl_secs = env::var("SESSION_IDLE_TTL_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_IDLE_TTL_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "SESSION_IDLE_TTL_SECS must be a valid number".to_string())?;

        let max_sessions = env::var("SESSION_MAX_SESSIONS")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_SESSIONS.to_string())
            .parse::<usize>()
            .ok()
            .filter(|max| *max > 0)
            .ok_or_else(|| "SESSION_MAX_SESSIONS must be a positive number".to_string())?;

        Ok(Self {
            cookie_name,
            cookie_secure,
            idle_ttl: Duration::from_secs(idle_ttl_secs),
            sweep_interval: Duration::from_secs(Self::DEFAULT_SWEEP_INTERVAL_SECS),
            max_sessions,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Cliva API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION")
            .unwrap_or_else(|_| "Dashboard API for Cliva healthcare facility planning".to_string());

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
