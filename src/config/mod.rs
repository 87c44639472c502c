//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{fs, num::NonZeroU32, path::PathBuf, str::FromStr, time::Duration};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::domain::locale::{LocaleSet, LocaleTag};

mod cli;

pub use cli::{
    ActivateArgs, CliArgs, Command, CreateArgs, DraftArgs, GetArgs, GlobalOverrides, ListArgs,
    Localized, UpdateArgs,
};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "blogdesk";
const DEFAULT_BASE_PATH: &str = "blog";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOCALES: &[&str] = &["en"];
const DEFAULT_FIRST_PAGE: u32 = 0;
const DEFAULT_PAGE_SIZE: u32 = 10;
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::WARN;

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub backend: BackendSettings,
    pub listing: ListingSettings,
    pub locales: LocaleSet,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: Url,
    pub base_path: String,
    pub api_token: Option<String>,
    pub timeout: Option<Duration>,
}

/// The page the list view shows and re-fetches after every mutation.
#[derive(Debug, Clone)]
pub struct ListingSettings {
    pub locale: LocaleTag,
    pub first_page: u32,
    pub page_size: NonZeroU32,
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

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix("BLOGDESK")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("locales")
            .try_parsing(true),
    );

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(&cli.overrides);
    if let Command::List(args) = &cli.command {
        raw.apply_list_overrides(args);
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    backend: RawBackendSettings,
    listing: RawListingSettings,
    locales: Option<Vec<String>>,
    logging: RawLoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawBackendSettings {
    base_url: Option<String>,
    base_path: Option<String>,
    api_token: Option<String>,
    api_token_file: Option<PathBuf>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawListingSettings {
    locale: Option<String>,
    first_page: Option<u32>,
    page_size: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &GlobalOverrides) {
        if let Some(url) = overrides.backend_url.as_ref() {
            self.backend.base_url = Some(url.clone());
        }
        if let Some(path) = overrides.backend_base_path.as_ref() {
            self.backend.base_path = Some(path.clone());
        }
        if let Some(file) = overrides.api_token_file.as_ref() {
            self.backend.api_token_file = Some(file.clone());
        }
        if let Some(seconds) = overrides.timeout_seconds {
            self.backend.timeout_seconds = Some(seconds);
        }
        if let Some(locale) = overrides.locale.as_ref() {
            self.listing.locale = Some(locale.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }

    fn apply_list_overrides(&mut self, args: &ListArgs) {
        if let Some(page) = args.page {
            self.listing.first_page = Some(page);
        }
        if let Some(size) = args.size {
            self.listing.page_size = Some(size);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            backend,
            listing,
            locales,
            logging,
        } = raw;

        let backend = build_backend_settings(backend)?;
        let locales = build_locales(locales)?;
        let listing = build_listing_settings(listing, &locales)?;
        let logging = build_logging_settings(logging)?;

        Ok(Self {
            backend,
            listing,
            locales,
            logging,
        })
    }
}

fn build_backend_settings(raw: RawBackendSettings) -> Result<BackendSettings, LoadError> {
    let raw_url = raw
        .base_url
        .ok_or_else(|| LoadError::invalid("backend.base_url", "a backend URL is required"))?;
    let base_url = Url::parse(raw_url.trim())
        .map_err(|err| LoadError::invalid("backend.base_url", err.to_string()))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "backend.base_url",
            format!("unsupported scheme `{}`", base_url.scheme()),
        ));
    }

    // A token file wins over an inline token.
    let api_token = match raw.api_token_file {
        Some(path) => {
            let token = fs::read_to_string(&path).map_err(|err| {
                LoadError::invalid(
                    "backend.api_token_file",
                    format!("{}: {err}", path.display()),
                )
            })?;
            Some(token.trim().to_string())
        }
        None => raw.api_token.map(|token| token.trim().to_string()),
    }
    .filter(|token| !token.is_empty());

    let timeout_seconds = raw.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_seconds == 0 {
        return Err(LoadError::invalid(
            "backend.timeout_seconds",
            "must be greater than zero",
        ));
    }

    Ok(BackendSettings {
        base_url,
        base_path: raw
            .base_path
            .unwrap_or_else(|| DEFAULT_BASE_PATH.to_string()),
        api_token,
        timeout: Some(Duration::from_secs(timeout_seconds)),
    })
}

fn build_locales(raw: Option<Vec<String>>) -> Result<LocaleSet, LoadError> {
    let result = match raw {
        Some(values) => LocaleSet::parse(values),
        None => LocaleSet::parse(DEFAULT_LOCALES),
    };
    result.map_err(|err| LoadError::invalid("locales", err.to_string()))
}

fn build_listing_settings(
    raw: RawListingSettings,
    locales: &LocaleSet,
) -> Result<ListingSettings, LoadError> {
    let locale = match raw.locale {
        Some(value) => LocaleTag::parse(&value)
            .map_err(|err| LoadError::invalid("listing.locale", err.to_string()))?,
        None => locales.primary().clone(),
    };

    let page_size = NonZeroU32::new(raw.page_size.unwrap_or(DEFAULT_PAGE_SIZE))
        .ok_or_else(|| LoadError::invalid("listing.page_size", "must be greater than zero"))?;

    Ok(ListingSettings {
        locale,
        first_page: raw.first_page.unwrap_or(DEFAULT_FIRST_PAGE),
        page_size,
    })
}

fn build_logging_settings(raw: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match raw.level {
        Some(value) => LevelFilter::from_str(value.trim())
            .map_err(|err| LoadError::invalid("logging.level", err.to_string()))?,
        None => DEFAULT_LOG_LEVEL,
    };

    let format = if raw.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

#[cfg(test)]
mod tests;
