use dotenv::dotenv;
use std::env;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    pub connection_lifetime_secs: u64,
    pub app_env: String,
    pub paging: PagingConfig,
}

/// Limiti di paginazione applicati alle liste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingConfig {
    /// Page size used when the request does not pass `size`
    pub default_page_size: u32,
    /// Upper bound for `size`; larger requests are clamped
    pub max_page_size: u32,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 2000,
        }
    }
}

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente
    /// Chiama dotenv() automaticamente
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set in .env file".to_string())?;

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .map_err(|_| "Invalid SERVER_PORT: must be a number between 0-65535".to_string())?;

        let max_connections = env::var("MAX_DB_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .map_err(|_| "Invalid MAX_DB_CONNECTIONS: must be a positive number".to_string())?;

        let connection_lifetime_secs = env::var("DB_CONNECTION_LIFETIME_SECS")
            .unwrap_or_else(|_| "1800".to_string())
            .parse::<u64>()
            .map_err(|_| {
                "Invalid DB_CONNECTION_LIFETIME_SECS: must be a positive number".to_string()
            })?;

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let defaults = PagingConfig::default();
        let default_page_size = env::var("DEFAULT_PAGE_SIZE")
            .map(|v| v.parse::<u32>())
            .unwrap_or(Ok(defaults.default_page_size))
            .map_err(|_| "Invalid DEFAULT_PAGE_SIZE: must be a positive number".to_string())?;
        let max_page_size = env::var("MAX_PAGE_SIZE")
            .map(|v| v.parse::<u32>())
            .unwrap_or(Ok(defaults.max_page_size))
            .map_err(|_| "Invalid MAX_PAGE_SIZE: must be a positive number".to_string())?;

        if default_page_size == 0 || default_page_size > max_page_size {
            return Err("DEFAULT_PAGE_SIZE must be between 1 and MAX_PAGE_SIZE".to_string());
        }

        Ok(Config {
            database_url,
            server_host,
            server_port,
            max_connections,
            connection_lifetime_secs,
            app_env,
            paging: PagingConfig {
                default_page_size,
                max_page_size,
            },
        })
    }

    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }

    /// Logga la configurazione (nascondendo i segreti)
    pub fn print_info(&self) {
        info!("Server Configuration:");
        info!("   Environment: {}", self.app_env);
        info!("   Server Address: {}:{}", self.server_host, self.server_port);
        info!("   Database: {}", Self::mask_url(&self.database_url));
        info!("   Max DB Connections: {}", self.max_connections);
        info!("   Connection Lifetime: {}s", self.connection_lifetime_secs);
        info!(
            "   Page size: default {}, max {}",
            self.paging.default_page_size, self.paging.max_page_size
        );
    }

    /// Maschera le credenziali nell'URL del database per il logging
    fn mask_url(url: &str) -> String {
        if let Some(at_pos) = url.find('@') {
            if let Some(scheme_end) = url.find("://") {
                let scheme = &url[..scheme_end + 3];
                let after_at = &url[at_pos..];
                return format!("{}***{}", scheme, after_at);
            }
            return "***".to_string();
        }
        // sqlite://path.db non ha credenziali
        url.to_string()
    }
}
