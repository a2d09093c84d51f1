//! Configuration management for the client
use std::path::Path;
use std::time::Duration;

use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Deserializer;
use url::Url;

use crate::transport::DEFAULT_GATEWAY_URL;

/// Top-level configuration for the client
#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    /// Gateway connection configuration
    pub gateway: GatewayConfig,
}

/// How to reach the gateway's web services.
#[derive(Deserialize, Clone, Debug)]
pub struct GatewayConfig {
    /// Base URL of the JSON web services, e.g. `http://10.0.0.7/baos/`.
    #[serde(deserialize_with = "url_deserializer")]
    pub url: Url,
    /// Timeout for a single request, in seconds. Unset means the HTTP
    /// client's default, which is to wait indefinitely.
    #[serde(default, deserialize_with = "duration_seconds_deserializer")]
    pub timeout: Option<Duration>,
}

impl Settings {
    /// Load the settings from the defaults, the optional config file and
    /// then the environment, in that order.
    ///
    /// The environment variables are prefixed with `BAOS_CLIENT_` and the
    /// nested fields are separated with double underscores, so
    /// `gateway.url` is read from `BAOS_CLIENT_GATEWAY__URL`.
    pub fn new(config_path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        let env = Environment::with_prefix("BAOS_CLIENT")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true);

        let mut cfg_builder = Config::builder().set_default("gateway.url", DEFAULT_GATEWAY_URL)?;

        if let Some(path) = config_path {
            cfg_builder = cfg_builder.add_source(File::from(path.as_ref()));
        }
        cfg_builder = cfg_builder.add_source(env);

        cfg_builder.build()?.try_deserialize()
    }
}

fn url_deserializer<'de, D>(deserializer: D) -> Result<Url, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer)?
        .parse()
        .map_err(serde::de::Error::custom)
}

fn duration_seconds_deserializer<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)
        .map_err(serde::de::Error::custom)?
        .map(Duration::from_secs))
}
