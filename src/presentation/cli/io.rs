use std::path::Path;

use tokio::fs;

use crate::application::error::AppError;
use crate::application::session::EditorSession;
use crate::config::{DraftArgs, Localized};
use crate::domain::media::MediaAttachment;
use crate::domain::translation::TranslationField;

/// Apply command-line field edits to the session's draft, in the order a
/// user would fill the form: shared fields first, then each locale's fields.
pub async fn apply_draft_args(
    session: &mut EditorSession,
    args: DraftArgs,
) -> Result<(), AppError> {
    let DraftArgs {
        slogan,
        product_ids,
        title,
        subtitle,
        content,
        content_file,
        tags,
    } = args;

    let mut content = content;
    for Localized { locale, value } in content_file {
        content.push(Localized {
            locale,
            value: read_text(&value).await?,
        });
    }

    let draft = session.draft_mut();
    if let Some(slogan) = slogan {
        draft.set_slogan(slogan);
    }
    if let Some(ids) = product_ids {
        draft.set_product_ids_text(ids);
    }

    let edits = [
        (TranslationField::Title, title),
        (TranslationField::Subtitle, subtitle),
        (TranslationField::Content, content),
        (TranslationField::Tags, tags),
    ];
    for (field, values) in edits {
        for Localized { locale, value } in values {
            draft.set_translation_field(&locale, field, value)?;
        }
    }

    Ok(())
}

pub async fn read_text(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path)
        .await
        .map_err(|source| AppError::input_file(path, source))
}

pub async fn read_image(path: &Path) -> Result<MediaAttachment, AppError> {
    let bytes = fs::read(path)
        .await
        .map_err(|source| AppError::input_file(path, source))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::invalid_input(format!("{} is not a file", path.display())))?;
    Ok(MediaAttachment::image(file_name, bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::BlogDraft;
    use crate::domain::locale::{LocaleSet, LocaleTag};

    fn locale(raw: &str) -> LocaleTag {
        LocaleTag::parse(raw).expect("locale")
    }

    fn session() -> EditorSession {
        let locales = LocaleSet::parse(["en", "vi"]).expect("locales");
        EditorSession::new(BlogDraft::new(&locales))
    }

    #[tokio::test]
    async fn edits_land_in_the_matching_locale() {
        let mut session = session();
        let args = DraftArgs {
            slogan: Some("Sale".into()),
            product_ids: Some("4, x, 5".into()),
            title: vec![Localized {
                locale: locale("vi"),
                value: "Xin chao".into(),
            }],
            tags: vec![Localized {
                locale: locale("en"),
                value: "a, b".into(),
            }],
            ..Default::default()
        };

        apply_draft_args(&mut session, args).await.expect("apply");

        let draft = session.draft();
        assert_eq!(draft.slogan(), "Sale");
        assert_eq!(draft.product_ids(), vec![4, 5]);
        let translations = draft.translations();
        assert_eq!(
            translations.get(&locale("vi")).map(|t| t.title()),
            Some("Xin chao")
        );
        assert_eq!(
            translations.get(&locale("en")).map(|t| t.tags()),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(translations.get(&locale("en")).map(|t| t.title()), Some(""));
    }

    #[tokio::test]
    async fn content_file_is_read_into_the_draft() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("post.md");
        std::fs::write(&path, "# Body").expect("write content");

        let mut session = session();
        let args = DraftArgs {
            content_file: vec![Localized {
                locale: locale("en"),
                value: path,
            }],
            ..Default::default()
        };

        apply_draft_args(&mut session, args).await.expect("apply");
        assert_eq!(
            session.draft().translations().get(&locale("en")).map(|t| t.content()),
            Some("# Body")
        );
    }

    #[tokio::test]
    async fn unknown_locale_is_rejected() {
        let mut session = session();
        let args = DraftArgs {
            title: vec![Localized {
                locale: locale("fr"),
                value: "Bonjour".into(),
            }],
            ..Default::default()
        };

        let err = apply_draft_args(&mut session, args)
            .await
            .expect_err("unknown locale");
        assert!(matches!(err, AppError::Domain(_)));
    }

    #[tokio::test]
    async fn missing_content_file_reports_its_path() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = read_text(&dir.path().join("absent.md"))
            .await
            .expect_err("missing file");
        assert!(matches!(err, AppError::InputFile { ref path, .. } if path.ends_with("absent.md")));
    }

    #[tokio::test]
    async fn image_is_read_with_its_file_name() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("cover.jpg");
        std::fs::write(&path, [0xFF_u8, 0xD8, 0xFF]).expect("write image");

        let image = read_image(&path).await.expect("image");
        assert_eq!(image.file_name(), "cover.jpg");
        assert_eq!(image.content_type(), "image/jpeg");
        assert_eq!(image.len(), 3);
    }

    #[tokio::test]
    async fn non_image_file_is_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").expect("write file");

        let err = read_image(&path).await.expect_err("not an image");
        assert!(matches!(err, AppError::Domain(_)));
    }
}
