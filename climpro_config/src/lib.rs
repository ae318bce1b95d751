use std::{fmt, net::IpAddr, path::Path, str::FromStr};

use anyhow::{ensure, Context};
use climpro_models::{business::BusinessDetails, email_address::EmailAddressWithName};
use config::{Environment, File, FileFormat, Map};
use serde::{de, Deserialize, Deserializer};
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable holding a colon separated list of config files.
pub const CONFIG_PATHS_VAR: &str = "CLIMPRO_CONFIG";

const ENV_PREFIX: &str = "CLIMPRO";
const ENV_SEPARATOR: &str = "__";
const RESEND_API_KEY_VAR: &str = "RESEND_API_KEY";

/// Load the config files listed in `CLIMPRO_CONFIG` (or the bundled default
/// config) and apply the environment overrides.
pub fn load() -> anyhow::Result<Config> {
    match std::env::var(CONFIG_PATHS_VAR) {
        Ok(paths) => load_paths(&paths.split(':').collect::<Vec<_>>()),
        Err(_) => load_paths(&[DEFAULT_CONFIG_PATH]),
    }
}

/// Load the given config files, later files taking precedence, and apply the
/// environment overrides.
pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    let files = paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    load_sources(&files, None)
}

fn load_sources(files: &[String], env: Option<Map<String, String>>) -> anyhow::Result<Config> {
    let resend_api_key = match &env {
        Some(env) => env.get(RESEND_API_KEY_VAR).cloned(),
        None => std::env::var(RESEND_API_KEY_VAR).ok(),
    };

    let environment = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .source(env);

    let config = files
        .iter()
        .fold(config::Config::builder(), |builder, content| {
            builder.add_source(File::from_str(content, FileFormat::Toml))
        })
        .add_source(environment)
        .set_override_option("email.resend.api_key", resend_api_key.filter(|x| !x.is_empty()))?
        .build()?
        .try_deserialize::<Config>()
        .context("Failed to load config")?;

    config.validate()?;

    Ok(config)
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub submission: SubmissionConfig,
    pub business: BusinessConfig,
    pub sentry: Option<SentryConfig>,
}

impl Config {
    fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.email.resend.is_some() || self.email.smtp.is_some(),
            "Either email.resend or email.smtp has to be configured"
        );
        ensure!(
            !self.submission.recipients.is_empty(),
            "submission.recipients must not be empty"
        );
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    #[serde(default, deserialize_with = "comma_separated")]
    pub allowed_origins: Vec<String>,
    pub real_ip: Option<RealIpConfig>,
}

/// Trust the client address in `header`, but only for requests coming from
/// `set_from` (i.e. a reverse proxy).
#[derive(Debug, Clone, Deserialize)]
pub struct RealIpConfig {
    pub header: String,
    pub set_from: IpAddr,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    pub from: EmailAddressWithName,
    pub timeout: Duration,
    pub resend: Option<ResendConfig>,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResendConfig {
    pub api_key: String,
    pub endpoint: Option<Url>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionConfig {
    #[serde(deserialize_with = "comma_separated")]
    pub recipients: Vec<EmailAddressWithName>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BusinessConfig {
    pub name: String,
    pub website: String,
    pub phone: String,
    pub phone_href: String,
    pub address: String,
    pub vat: String,
}

impl From<BusinessConfig> for BusinessDetails {
    fn from(value: BusinessConfig) -> Self {
        Self {
            name: value.name,
            website: value.website,
            phone: value.phone,
            phone_href: value.phone_href,
            address: value.address,
            vat: value.vat,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SentryConfig {
    pub dsn: String,
}

/// Accepts a list or a comma separated string (as set by environment
/// variables). Blank items are skipped.
fn comma_separated<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Items {
        List(Vec<String>),
        Joined(String),
    }

    let items = match Items::deserialize(deserializer)? {
        Items::List(items) => items,
        Items::Joined(joined) => joined.split(',').map(str::to_owned).collect(),
    };

    items
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(|item| item.parse().map_err(de::Error::custom))
        .collect()
}
