use crate::core::constants::{
    CONFIG_FILE, DEFAULT_API_BASE_URL, DEFAULT_CLIENT_ORIGIN, DEFAULT_HOST, DEFAULT_LOG_LEVEL,
    DEFAULT_PORT,
};
use crate::core::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Single origin allowed by CORS; the preference cookie travels with
    /// credentialed requests from this origin only.
    #[serde(default = "default_client_origin")]
    pub client_origin: String,
    #[serde(default = "default_debug_logs")]
    pub debug_logs: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.into()
}
fn default_host() -> String {
    DEFAULT_HOST.into()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_client_origin() -> String {
    DEFAULT_CLIENT_ORIGIN.into()
}
fn default_debug_logs() -> bool {
    true
}
fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.into()
}

crate::impl_default!(GeneralConfig, {
    GeneralConfig {
        log_level: default_log_level(),
    }
});

crate::impl_default!(ServerConfig, {
    ServerConfig {
        host: default_host(),
        port: default_port(),
        client_origin: default_client_origin(),
        debug_logs: default_debug_logs(),
    }
});

crate::impl_default!(ClientConfig, {
    ClientConfig {
        api_base_url: default_api_base_url(),
    }
});

crate::impl_default!(Config, {
    Config {
        general: GeneralConfig::default(),
        server: ServerConfig::default(),
        client: ClientConfig::default(),
    }
});

impl Config {
    /// Loads the config file from the working directory, writing a default
    /// one on first run.
    pub async fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE)).await
    }

    pub async fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Config::default();
            config.save_to(path).await?;
            log::info!("Created default config at {}", path.display());
            return Ok(config);
        }

        let raw = tokio::fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub async fn save_to(&self, path: &Path) -> Result<()> {
        let raw = toml::to_string_pretty(self)?;
        tokio::fs::write(path, raw).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(AppError::Config("server.host must not be empty".into()));
        }
        if self.server.client_origin.is_empty() {
            return Err(AppError::Config(
                "server.client_origin must not be empty".into(),
            ));
        }
        if self.client.api_base_url.is_empty() {
            return Err(AppError::Config(
                "client.api_base_url must not be empty".into(),
            ));
        }
        Ok(())
    }

    pub fn log_file_path(&self) -> PathBuf {
        PathBuf::from(".lingo").join("lingo.log")
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
