//! Parse `certdns.toml` into `AppConfig`

use crate::error::ConfigError;
use anyhow::Result;
use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, File};
use serde::Deserialize;
use std::{borrow::Cow, env, fmt, path::Path};
use tracing::info;
use validator::{Validate, ValidationError};

/// Prefix of every environment override, e.g. `CERTDNS_PROVIDER_API_TOKEN`.
pub const ENV_PREFIX: &str = "CERTDNS_";

// path the provider appends itself; a base already ending with it would double it
const RPC_PATH: &str = "/request/client/1";

/*──────── Provider ────────*/
#[derive(Clone, Deserialize, Validate)]
pub struct ProviderCfg {
    #[serde(default = "default_kind")]
    #[validate(length(min = 1))]
    pub kind: String,
    /// passed through to the provider, unused by Qrator itself
    #[serde(default)]
    pub zone: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "api_token must not be empty"))]
    pub api_token: String,
    /// empty → provider default
    #[serde(default)]
    #[validate(custom(function = "validate_api_base"))]
    pub api_base: String,
}
fn default_kind() -> String {
    "qrator".to_string()
}

fn validate_api_base(base: &str) -> Result<(), ValidationError> {
    if base.trim_end_matches('/').ends_with(RPC_PATH) {
        let mut e = ValidationError::new("api_base");
        e.message = Some(Cow::from(format!(
            "api_base must not include the request path `{RPC_PATH}`"
        )));
        return Err(e);
    }
    Ok(())
}

impl fmt::Debug for ProviderCfg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCfg")
            .field("kind", &self.kind)
            .field("zone", &self.zone)
            .field("api_token", &"<redacted>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

/*──────── Root & AppConfig ────────*/
#[derive(Debug, Deserialize)]
struct Root {
    provider: ProviderCfg,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: ProviderCfg,
}

/// Map an env key (prefix already stripped) to a config path.
///
/// `PROVIDER_API_TOKEN` → `provider.api_token`; only the first `_` splits
/// section from field. Keys without a section (`CONFIG`) yield `None`.
fn env_path(key: &str) -> Option<String> {
    let (section, field) = key.split_once('_')?;
    if section.is_empty() || field.is_empty() {
        return None;
    }
    Some(format!(
        "{}.{}",
        section.to_ascii_lowercase(),
        field.to_ascii_lowercase()
    ))
}

/// Inject environment variables carrying `prefix` into a `ConfigBuilder`.
///
/// Values stay strings: every field of the config is textual and tokens may
/// well look like numbers.
fn add_env<I>(
    mut b: ConfigBuilder<DefaultState>,
    prefix: &str,
    vars: I,
) -> Result<ConfigBuilder<DefaultState>>
where
    I: IntoIterator<Item = (String, String)>,
{
    for (k, v) in vars {
        let Some(path) = k.strip_prefix(prefix).and_then(env_path) else {
            continue;
        };
        b = b.set_override(path, v)?;
    }
    Ok(b)
}

/// Load configuration from an optional TOML file **and** environment variables.
///
/// Priority (high → low):
/// 1. Environment variables (`CERTDNS_PROVIDER_API_TOKEN`, …)
/// 2. Values in `certdns.toml` (if the file exists)
pub fn load_config(path: &str) -> Result<AppConfig> {
    load_from(path, env::vars())
}

fn load_from<I>(path: &str, vars: I) -> Result<AppConfig>
where
    I: IntoIterator<Item = (String, String)>,
{
    // 1) start with the optional file
    let mut builder = Config::builder();
    if Path::new(path).exists() {
        builder = builder.add_source(File::with_name(path).required(true));
    } else {
        info!("config file `{path}` not found; environment-only mode");
    }

    // 2) apply env overrides
    builder = add_env(builder, ENV_PREFIX, vars)?;

    // 3) deserialize and validate
    let root: Root = builder.build()?.try_deserialize()?;
    root.provider.validate().map_err(ConfigError::from)?;

    Ok(AppConfig {
        provider: root.provider,
    })
}
