use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for dash-api.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Key material and password hashing capacity.
#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    #[serde(default)]
    pub private_key_pem: Option<String>,
    #[serde(default)]
    pub public_key_pem: Option<String>,
    #[serde(default = "default_max_concurrent_hashes")]
    pub max_concurrent_hashes: usize,
}

fn default_max_concurrent_hashes() -> usize {
    4
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("private_key_pem", &self.private_key_pem.as_ref().map(|_| "<redacted>"))
            .field("public_key_pem", &self.public_key_pem.is_some())
            .field("max_concurrent_hashes", &self.max_concurrent_hashes)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. `JWT_PRIVATE_KEY` / `JWT_PUBLIC_KEY`
    /// 2. Environment variables (SERVER__HTTP_PORT, AUTH__PRIVATE_KEY_PEM, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8080)?
            .set_default("auth.max_concurrent_hashes", default_max_concurrent_hashes() as i64)?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: SERVER__HTTP_PORT=9000 overrides server.http_port
            .add_source(Environment::default().separator("__"))
            .set_override_option("auth.private_key_pem", non_empty_env("JWT_PRIVATE_KEY"))?
            .set_override_option("auth.public_key_pem", non_empty_env("JWT_PUBLIC_KEY"))?
            .build()?;

        let mut config: Config = configuration.try_deserialize()?;
        config.auth.private_key_pem = config.auth.private_key_pem.filter(|pem| !pem.is_empty());
        config.auth.public_key_pem = config.auth.public_key_pem.filter(|pem| !pem.is_empty());

        Ok(config)
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
