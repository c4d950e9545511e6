//! Client configuration from TOML files and environment variables.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::{env, fs};

use serde::{Deserialize, Serialize};

use crate::session::SessionStore;
use crate::transport::{ClientError, ClientResult, Transport};

/// Which backend the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// The real server over HTTP.
    Http,
    /// The in-memory simulator.
    Mock,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(BackendKind::Http),
            "mock" => Ok(BackendKind::Mock),
            other => Err(format!(
                "Unknown backend type '{}'. Use 'http' or 'mock'.",
                other
            )),
        }
    }
}

/// Configuration file wrapper (`[client]` table).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    client: ClientConfig,
}

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend API, e.g. `http://localhost:8080/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Durable token file; omit for a purely in-memory session.
    #[serde(default)]
    pub token_path: Option<PathBuf>,
    /// Backend selection: `http` or `mock`.
    #[serde(default = "default_backend")]
    pub backend: String,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_backend() -> String {
    "http".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            token_path: None,
            backend: default_backend(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ClientResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ClientError::configuration(format!("Failed to read config file: {}", e))
        })?;
        let file: ConfigFile = toml::from_str(&content).map_err(|e| {
            ClientError::configuration(format!("Failed to parse config file: {}", e))
        })?;
        Ok(file.client)
    }

    /// Load configuration from the default locations, falling back to
    /// built-in defaults when no file is present.
    ///
    /// Searches for `client.toml` in the current directory, `config/`, and
    /// the parent directory.
    pub fn from_default_location() -> ClientResult<Self> {
        let search_paths = [
            PathBuf::from("client.toml"),
            PathBuf::from("config/client.toml"),
            PathBuf::from("../client.toml"),
        ];
        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }

    /// Overlay environment variables on this configuration.
    ///
    /// Recognized: `BIBLIO_BASE_URL`, `BIBLIO_TIMEOUT_SECS`,
    /// `BIBLIO_TOKEN_PATH`, `BIBLIO_BACKEND`.
    pub fn with_env_overrides(mut self) -> ClientResult<Self> {
        if let Ok(base_url) = env::var("BIBLIO_BASE_URL") {
            self.base_url = base_url;
        }
        if let Ok(timeout) = env::var("BIBLIO_TIMEOUT_SECS") {
            self.timeout_secs = timeout.parse().map_err(|_| {
                ClientError::configuration("BIBLIO_TIMEOUT_SECS must be a positive integer")
            })?;
        }
        if let Ok(path) = env::var("BIBLIO_TOKEN_PATH") {
            self.token_path = Some(PathBuf::from(path));
        }
        if let Ok(backend) = env::var("BIBLIO_BACKEND") {
            self.backend = backend;
        }
        Ok(self)
    }

    /// Resolve the backend selection.
    pub fn backend_kind(&self) -> ClientResult<BackendKind> {
        BackendKind::from_str(&self.backend).map_err(ClientError::configuration)
    }

    /// Build the session store described by this configuration.
    pub fn session_store(&self) -> SessionStore {
        match &self.token_path {
            Some(path) => SessionStore::new(path.clone()),
            None => SessionStore::in_memory(),
        }
    }
}

/// Factory for transport instances.
pub struct TransportFactory;

impl TransportFactory {
    /// Create the transport selected by the configuration.
    pub fn create(
        config: &ClientConfig,
        session: Arc<SessionStore>,
    ) -> ClientResult<Arc<dyn Transport>> {
        match config.backend_kind()? {
            BackendKind::Http => Self::create_http(config, session),
            BackendKind::Mock => Self::create_mock(),
        }
    }

    #[cfg(feature = "http-client")]
    fn create_http(
        config: &ClientConfig,
        session: Arc<SessionStore>,
    ) -> ClientResult<Arc<dyn Transport>> {
        let transport = crate::transport::HttpTransport::new(config, session)?;
        Ok(Arc::new(transport))
    }

    #[cfg(not(feature = "http-client"))]
    fn create_http(
        _config: &ClientConfig,
        _session: Arc<SessionStore>,
    ) -> ClientResult<Arc<dyn Transport>> {
        Err(ClientError::configuration(
            "http backend requested but the 'http-client' feature is disabled",
        ))
    }

    #[cfg(feature = "mock-server")]
    fn create_mock() -> ClientResult<Arc<dyn Transport>> {
        Ok(Arc::new(crate::mock::MockTransport::new()))
    }

    #[cfg(not(feature = "mock-server"))]
    fn create_mock() -> ClientResult<Arc<dyn Transport>> {
        Err(ClientError::configuration(
            "mock backend requested but the 'mock-server' feature is disabled",
        ))
    }
}
