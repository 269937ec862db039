use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Absent means the in-process store is used.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub app_host: String,
    pub app_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            db_max_connections: 10,
            app_host: "0.0.0.0".into(),
            app_port: 8080,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let db_max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.db_max_connections);
        let app_host = std::env::var("APP_HOST").unwrap_or(defaults.app_host);
        let app_port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse::<u16>()?,
            Err(_) => defaults.app_port,
        };
        Ok(Self {
            database_url,
            db_max_connections,
            app_host,
            app_port,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }
}
