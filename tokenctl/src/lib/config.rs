use std::env;
use std::fmt;
use std::path::Path;

use chrono::Duration;
use config::builder::ConfigBuilder;
use config::builder::DefaultState;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use token::MakerKind;

use crate::duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub token: TokenConfig,
}

#[derive(Deserialize, Clone)]
pub struct TokenConfig {
    pub kind: MakerKind,
    pub symmetric_key: String,
    #[serde(deserialize_with = "duration::deserialize")]
    pub access_token_duration: Duration,
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("kind", &self.kind)
            .field("symmetric_key", &"<redacted>")
            .field("access_token_duration", &self.access_token_duration)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (TOKENCTL_TOKEN__SYMMETRIC_KEY, TOKENCTL_TOKEN__KIND, etc.)
    /// 2. Explicit configuration file passed on the command line
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        file_sources(&run_mode, path)?
            // Example: TOKENCTL_TOKEN__SYMMETRIC_KEY=... overrides token.symmetric_key
            .add_source(
                Environment::with_prefix("TOKENCTL")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from files only, for an explicit run mode.
    ///
    /// Same layering as [`Config::load`] without the environment variables.
    pub fn load_files(run_mode: &str, path: Option<&Path>) -> Result<Self, ConfigError> {
        file_sources(run_mode, path)?.build()?.try_deserialize()
    }
}

fn file_sources(
    run_mode: &str,
    path: Option<&Path>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut builder = config::Config::builder()
        .set_default("token.kind", "paseto")?
        .set_default("token.access_token_duration", "15m")?
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

    if let Some(path) = path {
        builder = builder.add_source(File::from(path));
    }

    Ok(builder)
}
