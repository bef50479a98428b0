//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{num::NonZeroU64, path::PathBuf, str::FromStr, time::Duration};

use chrono_tz::Tz;
use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

mod cli;

pub use cli::{
    CliArgs, Command, DeleteArgs, GlobalOverrides, LoginArgs, OutputFormat, PostArgs,
};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "noticeboard";
const ENV_PREFIX: &str = "NOTICEBOARD";
const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000/";
const DEFAULT_STATE_FILE: &str = ".noticeboard/state.json";
const DEFAULT_CLASS_ID: u64 = 1;

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub storage: StorageSettings,
    pub display: DisplaySettings,
    pub posts: PostSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Always ends with `/` so endpoint paths join beneath it.
    pub base_url: Url,
    pub request_timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub state_file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct DisplaySettings {
    pub timezone: Tz,
}

#[derive(Debug, Clone)]
pub struct PostSettings {
    pub default_class_id: NonZeroU64,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Parse the process arguments and resolve settings from them.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let cli = CliArgs::parse();
    let settings = load(&cli)?;
    Ok((cli, settings))
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(&cli.overrides);

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    storage: RawStorageSettings,
    display: RawDisplaySettings,
    posts: RawPostSettings,
    logging: RawLoggingSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &GlobalOverrides) {
        if let Some(url) = overrides.api_url.as_ref() {
            self.api.base_url = Some(url.clone());
        }
        if let Some(seconds) = overrides.request_timeout_seconds {
            self.api.request_timeout_seconds = Some(seconds);
        }
        if let Some(path) = overrides.state_file.as_ref() {
            self.storage.state_file = Some(path.clone());
        }
        if let Some(timezone) = overrides.timezone.as_ref() {
            self.display.timezone = Some(timezone.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            api,
            storage,
            display,
            posts,
            logging,
        } = raw;

        Ok(Self {
            api: build_api_settings(api)?,
            storage: build_storage_settings(storage)?,
            display: build_display_settings(display)?,
            posts: build_post_settings(posts)?,
            logging: build_logging_settings(logging)?,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let raw_url = api
        .base_url
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    let base_url = parse_base_url(&raw_url)
        .map_err(|reason| LoadError::invalid("api.base_url", reason))?;

    let request_timeout = match api.request_timeout_seconds {
        Some(0) => {
            return Err(LoadError::invalid(
                "api.request_timeout_seconds",
                "must be greater than zero",
            ));
        }
        Some(seconds) => Some(Duration::from_secs(seconds)),
        None => None,
    };

    Ok(ApiSettings {
        base_url,
        request_timeout,
    })
}

fn build_storage_settings(storage: RawStorageSettings) -> Result<StorageSettings, LoadError> {
    let state_file = storage
        .state_file
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_FILE));
    if state_file.as_os_str().is_empty() {
        return Err(LoadError::invalid(
            "storage.state_file",
            "path must not be empty",
        ));
    }
    Ok(StorageSettings { state_file })
}

fn build_display_settings(display: RawDisplaySettings) -> Result<DisplaySettings, LoadError> {
    let timezone = match display.timezone {
        Some(name) => Tz::from_str(name.trim()).map_err(|err| {
            LoadError::invalid("display.timezone", format!("failed to parse: {err}"))
        })?,
        None => Tz::UTC,
    };
    Ok(DisplaySettings { timezone })
}

fn build_post_settings(posts: RawPostSettings) -> Result<PostSettings, LoadError> {
    let value = posts.default_class_id.unwrap_or(DEFAULT_CLASS_ID);
    let default_class_id = NonZeroU64::new(value).ok_or_else(|| {
        LoadError::invalid("posts.default_class_id", "must be greater than zero")
    })?;
    Ok(PostSettings { default_class_id })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::WARN,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn parse_base_url(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw).map_err(|err| format!("failed to parse `{raw}`: {err}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme `{}`", url.scheme()));
    }
    if url.cannot_be_a_base() {
        return Err(format!("`{raw}` cannot be used as a base URL"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    base_url: Option<String>,
    request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawStorageSettings {
    state_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawDisplaySettings {
    timezone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawPostSettings {
    default_class_id: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}
