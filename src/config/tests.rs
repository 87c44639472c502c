use std::io::Write;

use clap::Parser;

use super::*;

fn raw_with_url() -> RawSettings {
    let mut raw = RawSettings::default();
    raw.backend.base_url = Some("https://admin.example.com/api".to_string());
    raw
}

#[test]
fn defaults_fill_every_optional_key() {
    let settings = Settings::from_raw(raw_with_url()).expect("valid settings");

    assert_eq!(settings.backend.base_path, DEFAULT_BASE_PATH);
    assert_eq!(
        settings.backend.timeout,
        Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    );
    assert!(settings.backend.api_token.is_none());
    assert_eq!(settings.locales.primary().as_str(), "en");
    assert_eq!(settings.listing.locale.as_str(), "en");
    assert_eq!(settings.listing.first_page, DEFAULT_FIRST_PAGE);
    assert_eq!(settings.listing.page_size.get(), DEFAULT_PAGE_SIZE);
    assert_eq!(settings.logging.level, LevelFilter::WARN);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
}

#[test]
fn missing_backend_url_is_rejected() {
    let err = Settings::from_raw(RawSettings::default()).expect_err("url required");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "backend.base_url",
            ..
        }
    ));
}

#[test]
fn non_http_backend_url_is_rejected() {
    let mut raw = RawSettings::default();
    raw.backend.base_url = Some("ftp://files.example.com".to_string());

    let err = Settings::from_raw(raw).expect_err("scheme");
    assert!(err.to_string().contains("unsupported scheme"));
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = raw_with_url();
    raw.backend.base_path = Some("blog".to_string());
    raw.logging.level = Some("info".to_string());

    let overrides = GlobalOverrides {
        backend_url: Some("http://localhost:9000".to_string()),
        backend_base_path: Some("admin/blog".to_string()),
        log_level: Some("debug".to_string()),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.backend.base_url.as_str(), "http://localhost:9000/");
    assert_eq!(settings.backend.base_path, "admin/blog");
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = raw_with_url();
    let overrides = GlobalOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn list_arguments_override_paging() {
    let mut raw = raw_with_url();
    raw.listing.page_size = Some(25);

    raw.apply_list_overrides(&ListArgs {
        page: Some(3),
        size: Some(5),
    });
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.listing.first_page, 3);
    assert_eq!(settings.listing.page_size.get(), 5);
}

#[test]
fn zero_page_size_is_rejected() {
    let mut raw = raw_with_url();
    raw.listing.page_size = Some(0);

    let err = Settings::from_raw(raw).expect_err("page size");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "listing.page_size",
            ..
        }
    ));
}

#[test]
fn listing_locale_defaults_to_primary_locale() {
    let mut raw = raw_with_url();
    raw.locales = Some(vec!["VI".to_string(), "en".to_string()]);

    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.locales.len(), 2);
    assert_eq!(settings.listing.locale.as_str(), "vi");
}

#[test]
fn invalid_locale_is_reported_with_its_key() {
    let mut raw = raw_with_url();
    raw.locales = Some(vec!["en".to_string(), "not a locale".to_string()]);

    let err = Settings::from_raw(raw).expect_err("locale");
    assert!(matches!(err, LoadError::Invalid { key: "locales", .. }));
}

#[test]
fn token_file_wins_over_inline_token() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "  from-file  ").expect("write token");

    let mut raw = raw_with_url();
    raw.backend.api_token = Some("inline".to_string());
    raw.backend.api_token_file = Some(file.path().to_path_buf());

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.backend.api_token.as_deref(), Some("from-file"));
}

#[test]
fn unreadable_token_file_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut raw = raw_with_url();
    raw.backend.api_token_file = Some(dir.path().join("missing-token"));

    let err = Settings::from_raw(raw).expect_err("token file");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "backend.api_token_file",
            ..
        }
    ));
}

#[test]
fn blank_inline_token_is_ignored() {
    let mut raw = raw_with_url();
    raw.backend.api_token = Some("   ".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(settings.backend.api_token.is_none());
}

#[test]
fn unknown_log_level_is_rejected() {
    let mut raw = raw_with_url();
    raw.logging.level = Some("loud".to_string());

    let err = Settings::from_raw(raw).expect_err("level");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "logging.level",
            ..
        }
    ));
}

#[test]
fn config_file_is_layered_under_cli_overrides() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("blogdesk.toml");
    std::fs::write(
        &path,
        r#"
locales = ["en", "vi"]

[backend]
base_url = "https://from-file.example.com"
timeout_seconds = 5

[listing]
page_size = 20
"#,
    )
    .expect("write config");

    let args = CliArgs::parse_from([
        "blogdesk",
        "--config-file",
        path.to_str().expect("utf-8 path"),
        "list",
        "--size",
        "7",
    ]);
    let settings = load(&args).expect("valid settings");

    assert_eq!(
        settings.backend.base_url.as_str(),
        "https://from-file.example.com/"
    );
    assert_eq!(settings.backend.timeout, Some(Duration::from_secs(5)));
    assert_eq!(settings.locales.len(), 2);
    assert_eq!(settings.listing.page_size.get(), 7);
}

#[test]
fn parse_create_arguments() {
    let args = CliArgs::parse_from([
        "blogdesk",
        "create",
        "--slogan",
        "Spring sale",
        "--product-ids",
        "1, 2,x",
        "--title",
        "en=Hello",
        "--title",
        "vi=Xin chao",
        "--content-file",
        "en=post.md",
        "--image",
        "cover.png",
    ]);

    match args.command {
        Command::Create(create) => {
            assert_eq!(create.draft.slogan.as_deref(), Some("Spring sale"));
            assert_eq!(create.draft.product_ids.as_deref(), Some("1, 2,x"));
            assert_eq!(create.draft.title.len(), 2);
            assert_eq!(create.draft.title[1].locale.as_str(), "vi");
            assert_eq!(create.draft.title[1].value, "Xin chao");
            assert_eq!(
                create.draft.content_file[0].value,
                PathBuf::from("post.md")
            );
            assert_eq!(create.image, Some(PathBuf::from("cover.png")));
        }
        other => panic!("expected create command, got {other:?}"),
    }
}

#[test]
fn localized_value_may_contain_equals_sign() {
    let args = CliArgs::parse_from(["blogdesk", "update", "4", "--content", "en=a=b"]);

    match args.command {
        Command::Update(update) => {
            assert_eq!(update.id, 4);
            assert_eq!(update.draft.content[0].value, "a=b");
        }
        other => panic!("expected update command, got {other:?}"),
    }
}

#[test]
fn localized_value_without_locale_is_rejected() {
    let result = CliArgs::try_parse_from(["blogdesk", "create", "--title", "Hello"]);
    assert!(result.is_err());
}

#[test]
fn global_overrides_follow_subcommand() {
    let args = CliArgs::parse_from([
        "blogdesk",
        "activate",
        "12",
        "--backend-url",
        "http://127.0.0.1:1",
        "--log-json",
        "true",
    ]);

    assert!(matches!(args.command, Command::Activate(ActivateArgs { id: 12 })));
    assert_eq!(
        args.overrides.backend_url.as_deref(),
        Some("http://127.0.0.1:1")
    );
    assert_eq!(args.overrides.log_json, Some(true));
}
