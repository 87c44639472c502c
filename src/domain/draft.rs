//! In-memory state of a blog post being composed or edited.

use std::fmt;

use blogdesk_api_types::{BlogCreateRequest, BlogEntity, BlogId, BlogUpdateRequest};

use super::error::DomainError;
use super::locale::{LocaleSet, LocaleTag};
use super::media::MediaAttachment;
use super::parse::{join_list, parse_ids};
use super::translation::{TranslationField, TranslationSet};

/// A field that blocks submission because it is blank or absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingField {
    Slogan,
    Image,
    Translation {
        locale: LocaleTag,
        field: TranslationField,
    },
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingField::Slogan => f.write_str("slogan"),
            MissingField::Image => f.write_str("image"),
            MissingField::Translation { locale, field } => write!(f, "{locale}.{field}"),
        }
    }
}

/// Whether an attached image is part of the validity rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRule {
    Required,
    NotRequired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogDraft {
    slogan: String,
    product_ids_text: String,
    translations: TranslationSet,
    image: Option<MediaAttachment>,
}

impl BlogDraft {
    pub fn new(locales: &LocaleSet) -> Self {
        Self {
            slogan: String::new(),
            product_ids_text: String::new(),
            translations: TranslationSet::empty(locales),
            image: None,
        }
    }

    /// Seed an edit draft from a persisted entity. The stored image stays on
    /// the server and is not re-attached.
    pub fn from_entity(locales: &LocaleSet, entity: &BlogEntity) -> Self {
        let product_ids: Vec<i64> = entity.products.iter().map(|product| product.id).collect();
        Self {
            slogan: entity.slogan.clone().unwrap_or_default(),
            product_ids_text: join_list(&product_ids),
            translations: TranslationSet::from_payloads(locales, &entity.translations),
            image: None,
        }
    }

    pub fn slogan(&self) -> &str {
        &self.slogan
    }

    pub fn product_ids_text(&self) -> &str {
        &self.product_ids_text
    }

    pub fn product_ids(&self) -> Vec<i64> {
        parse_ids(&self.product_ids_text)
    }

    pub fn translations(&self) -> &TranslationSet {
        &self.translations
    }

    pub fn image(&self) -> Option<&MediaAttachment> {
        self.image.as_ref()
    }

    pub fn set_slogan(&mut self, slogan: impl Into<String>) {
        self.slogan = slogan.into();
    }

    pub fn set_product_ids_text(&mut self, text: impl Into<String>) {
        self.product_ids_text = text.into();
    }

    pub fn set_translation_field(
        &mut self,
        locale: &LocaleTag,
        field: TranslationField,
        value: impl Into<String>,
    ) -> Result<(), DomainError> {
        self.translations = self.translations.with_field(locale, field, value)?;
        Ok(())
    }

    pub fn attach_image(&mut self, image: MediaAttachment) {
        self.image = Some(image);
    }

    pub fn detach_image(&mut self) -> Option<MediaAttachment> {
        self.image.take()
    }

    pub fn missing_fields(&self, image: ImageRule) -> Vec<MissingField> {
        let mut missing = Vec::new();
        if self.slogan.trim().is_empty() {
            missing.push(MissingField::Slogan);
        }
        for translation in self.translations.iter() {
            missing.extend(
                translation
                    .missing_fields()
                    .map(|field| MissingField::Translation {
                        locale: translation.locale().clone(),
                        field,
                    }),
            );
        }
        if image == ImageRule::Required && self.image.is_none() {
            missing.push(MissingField::Image);
        }
        missing
    }

    pub fn validate(&self, image: ImageRule) -> Result<(), Vec<MissingField>> {
        let missing = self.missing_fields(image);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }

    /// Gate for the create action: slogan, every translation's required
    /// fields, and an attached image.
    pub fn is_submittable(&self) -> bool {
        self.validate(ImageRule::Required).is_ok()
    }

    /// Back to the initial empty state; the locale set is kept.
    pub fn reset(&mut self) {
        self.slogan.clear();
        self.product_ids_text.clear();
        self.translations = self.translations.cleared();
        self.image = None;
    }

    pub fn to_create_request(&self) -> BlogCreateRequest {
        BlogCreateRequest {
            slogan: self.slogan.clone(),
            product_ids: self.product_ids(),
            translations: self.translations.to_payloads(),
        }
    }

    pub fn to_update_request(&self, id: BlogId) -> BlogUpdateRequest {
        BlogUpdateRequest {
            id,
            slogan: self.slogan.clone(),
            product_ids: self.product_ids(),
            translations: self.translations.to_payloads(),
        }
    }
}
