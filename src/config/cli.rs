use std::path::PathBuf;

use blogdesk_api_types::BlogId;
use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

use crate::domain::locale::LocaleTag;

/// Command-line arguments for the blogdesk binary.
#[derive(Debug, Parser)]
#[command(name = "blogdesk", version, about = "Blog admin workflow client")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "BLOGDESK_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Show a page of blogs.
    List(ListArgs),
    /// Show a single blog.
    Get(GetArgs),
    /// Create a blog, attach its image and refresh the list.
    Create(CreateArgs),
    /// Replace the content of an existing blog.
    Update(UpdateArgs),
    /// Flip the active flag of a blog.
    Activate(ActivateArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Override the backend base URL.
    #[arg(long = "backend-url", env = "BLOGDESK_BACKEND_URL", value_name = "URL", global = true)]
    pub backend_url: Option<String>,

    /// Override the path prefix of the blog endpoints.
    #[arg(long = "backend-base-path", value_name = "PATH", global = true)]
    pub backend_base_path: Option<String>,

    /// Path to a file holding the API token. There is no inline token flag so
    /// the secret stays out of shell history; use `BLOGDESK__BACKEND__API_TOKEN`.
    #[arg(
        long = "api-token-file",
        env = "BLOGDESK_API_TOKEN_FILE",
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        global = true
    )]
    pub api_token_file: Option<PathBuf>,

    /// Override the request timeout.
    #[arg(long = "timeout-seconds", value_name = "SECONDS", global = true)]
    pub timeout_seconds: Option<u64>,

    /// Override the locale sent as Accept-Language.
    #[arg(long = "locale", value_name = "LOCALE", global = true)]
    pub locale: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ListArgs {
    /// Page index to fetch instead of the configured first page.
    #[arg(long, value_name = "N")]
    pub page: Option<u32>,

    /// Page size override.
    #[arg(long, value_name = "N")]
    pub size: Option<u32>,
}

#[derive(Debug, Args, Clone)]
pub struct GetArgs {
    pub id: BlogId,
}

#[derive(Debug, Args, Clone)]
pub struct ActivateArgs {
    pub id: BlogId,
}

#[derive(Debug, Args, Clone)]
pub struct CreateArgs {
    #[command(flatten)]
    pub draft: DraftArgs,

    /// Image to attach once the blog exists.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub image: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct UpdateArgs {
    pub id: BlogId,

    #[command(flatten)]
    pub draft: DraftArgs,
}

/// Field edits applied to a draft. Per-locale values are written as
/// `LOCALE=VALUE` and may be repeated once per locale.
#[derive(Debug, Args, Default, Clone)]
pub struct DraftArgs {
    #[arg(long)]
    pub slogan: Option<String>,

    /// Comma separated product identifiers; invalid entries are skipped.
    #[arg(long = "product-ids", value_name = "IDS")]
    pub product_ids: Option<String>,

    #[arg(long, value_name = "LOCALE=TEXT", value_parser = parse_localized_text)]
    pub title: Vec<Localized<String>>,

    #[arg(long, value_name = "LOCALE=TEXT", value_parser = parse_localized_text)]
    pub subtitle: Vec<Localized<String>>,

    #[arg(long, value_name = "LOCALE=TEXT", value_parser = parse_localized_text)]
    pub content: Vec<Localized<String>>,

    /// Read a locale's content from a file.
    #[arg(long = "content-file", value_name = "LOCALE=PATH", value_parser = parse_localized_path)]
    pub content_file: Vec<Localized<PathBuf>>,

    /// Comma separated tags for a locale.
    #[arg(long, value_name = "LOCALE=TAGS", value_parser = parse_localized_text)]
    pub tags: Vec<Localized<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localized<T> {
    pub locale: LocaleTag,
    pub value: T,
}

fn split_localized(raw: &str) -> Result<(LocaleTag, &str), String> {
    let (locale, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected LOCALE=VALUE, got `{raw}`"))?;
    let locale = LocaleTag::parse(locale).map_err(|err| err.to_string())?;
    Ok((locale, value))
}

fn parse_localized_text(raw: &str) -> Result<Localized<String>, String> {
    let (locale, value) = split_localized(raw)?;
    Ok(Localized {
        locale,
        value: value.to_string(),
    })
}

fn parse_localized_path(raw: &str) -> Result<Localized<PathBuf>, String> {
    let (locale, value) = split_localized(raw)?;
    if value.is_empty() {
        return Err(format!("missing path in `{raw}`"));
    }
    Ok(Localized {
        locale,
        value: PathBuf::from(value),
    })
}
