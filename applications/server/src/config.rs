/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// Config file read when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "stride.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default = "default_web")]
    pub web: WebSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Report rejected input as `200 OK` with a JSON string body, the way
    /// early clients of the exercise API expect
    #[serde(default)]
    pub legacy_responses: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebSettings {
    /// Directory with the browser front-end; skipped when it does not exist
    #[serde(default = "default_static_dir")]
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Load configuration from file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, std::env::vars().collect())
    }

    /// Load configuration from file and an explicit environment map
    ///
    /// Precedence, lowest first: built-in defaults, the config file,
    /// `STRIDE_`-prefixed variables (`STRIDE_SERVER__PORT`), then the
    /// conventional `PORT` and `DATABASE_URL` variables.
    pub fn load_with_env(path: Option<&Path>, env: HashMap<String, String>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            // An explicitly requested file must exist
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("STRIDE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(Some(env.clone())),
        );

        settings = settings
            .set_override_option("server.port", env.get("PORT").cloned())
            .and_then(|s| {
                s.set_override_option("storage.database_url", env.get("DATABASE_URL").cloned())
            })
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServerError::Config(
                "Port must be non-zero (set PORT or STRIDE_SERVER__PORT)".to_string(),
            ));
        }

        if self.server.host.parse::<IpAddr>().is_err() {
            return Err(ServerError::Config(format!(
                "Invalid listen host {:?}",
                self.server.host
            )));
        }

        if self.storage.database_url.trim().is_empty() {
            return Err(ServerError::Config(
                "Database URL is required (set DATABASE_URL)".to_string(),
            ));
        }

        Ok(())
    }

    /// Socket address to listen on
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let host = self
            .server
            .host
            .parse::<IpAddr>()
            .map_err(|e| ServerError::Config(format!("Invalid listen host: {}", e)))?;
        Ok(SocketAddr::from((host, self.server.port)))
    }

    /// Static front-end directory, if configured and present on disk
    pub fn static_dir(&self) -> Option<&Path> {
        self.web
            .static_dir
            .as_deref()
            .filter(|dir| dir.is_dir())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/stride.db".to_string()
}

fn default_web() -> WebSettings {
    WebSettings {
        static_dir: default_static_dir(),
    }
}

fn default_static_dir() -> Option<PathBuf> {
    Some(PathBuf::from("./public"))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            api: ApiSettings::default(),
            web: default_web(),
        }
    }
}
