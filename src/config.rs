use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Identity provider settings
    #[serde(default)]
    pub auth: AuthConfig,
    /// Backend service locations
    #[serde(default)]
    pub backend: BackendConfig,
    /// Where the signed-in session is persisted between runs
    #[serde(default = "default_session_path")]
    pub session_path: PathBuf,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Firebase Authentication REST settings
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Web API key of the Firebase project (can also be set via FIREBASE_API_KEY)
    pub api_key: Option<String>,
    /// Base URL of the Identity Toolkit API
    #[serde(default = "default_identity_url")]
    pub identity_url: String,
    /// Base URL of the Secure Token API used for refreshing ID tokens
    #[serde(default = "default_token_url")]
    pub token_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            identity_url: default_identity_url(),
            token_url: default_token_url(),
        }
    }
}

/// Backend endpoints. Recommendations are served separately from the
/// account/recipe API.
#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    #[serde(default = "default_recommend_url")]
    pub recommend_url: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            recommend_url: default_recommend_url(),
            api_url: default_api_url(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auth: AuthConfig::default(),
            backend: BackendConfig::default(),
            session_path: default_session_path(),
            timeout: default_timeout(),
        }
    }
}

// Default value functions
fn default_identity_url() -> String {
    "https://identitytoolkit.googleapis.com".to_string()
}

fn default_token_url() -> String {
    "https://securetoken.googleapis.com".to_string()
}

fn default_recommend_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_api_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_session_path() -> PathBuf {
    PathBuf::from(".nusantasty-session.json")
}

fn default_timeout() -> u64 {
    30
}

impl ClientConfig {
    /// Load configuration from `nusantasty.toml` and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with NUSANTASTY__ prefix
    /// 2. nusantasty.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: NUSANTASTY__AUTH__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config(Path::new("nusantasty"), false)
    }

    /// Same as [`ClientConfig::load`] but with an explicit config file that must exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        load_config(path, true)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// API key from config, falling back to the FIREBASE_API_KEY environment variable
    pub fn api_key(&self) -> Option<String> {
        self.auth
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("FIREBASE_API_KEY").ok())
    }
}

fn load_config(path: &Path, required: bool) -> Result<ClientConfig, ConfigError> {
    let name = path.to_string_lossy();
    let settings = Config::builder()
        .add_source(File::with_name(&name).required(required))
        // Use double underscore for nested: NUSANTASTY__BACKEND__API_URL
        .add_source(
            Environment::with_prefix("NUSANTASTY")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
