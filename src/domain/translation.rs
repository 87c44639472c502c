//! Per-locale translation records and the set that owns them.
//!
//! A [`TranslationSet`] is created over a [`LocaleSet`] and never gains or
//! loses records afterwards. Edits go through [`TranslationSet::with_field`],
//! which returns a new set where only the edited record is a fresh
//! allocation; every sibling keeps its `Arc` identity so observers comparing
//! by pointer only see the record that changed.

use std::fmt;
use std::sync::Arc;

use blogdesk_api_types::TranslationPayload;

use super::error::DomainError;
use super::locale::{LocaleSet, LocaleTag};
use super::parse::{join_list, parse_tags};

/// Editable field of a translation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationField {
    Title,
    Subtitle,
    Content,
    /// Free-text tag input; the tag list is derived from it.
    Tags,
}

impl TranslationField {
    pub const REQUIRED: [TranslationField; 3] = [Self::Title, Self::Subtitle, Self::Content];

    pub fn as_str(self) -> &'static str {
        match self {
            TranslationField::Title => "title",
            TranslationField::Subtitle => "subtitle",
            TranslationField::Content => "content",
            TranslationField::Tags => "tags",
        }
    }
}

impl fmt::Display for TranslationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    locale: LocaleTag,
    title: String,
    subtitle: String,
    content: String,
    tags_text: String,
    /// Tags as loaded from the server, kept verbatim until the tag text is
    /// edited. A loaded tag may itself contain a comma.
    loaded_tags: Option<Vec<String>>,
}

impl Translation {
    pub fn empty(locale: LocaleTag) -> Self {
        Self {
            locale,
            title: String::new(),
            subtitle: String::new(),
            content: String::new(),
            tags_text: String::new(),
            loaded_tags: None,
        }
    }

    pub fn locale(&self) -> &LocaleTag {
        &self.locale
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tags_text(&self) -> &str {
        &self.tags_text
    }

    pub fn tags(&self) -> Vec<String> {
        match &self.loaded_tags {
            Some(tags) => tags.clone(),
            None => parse_tags(&self.tags_text),
        }
    }

    pub fn field(&self, field: TranslationField) -> &str {
        match field {
            TranslationField::Title => &self.title,
            TranslationField::Subtitle => &self.subtitle,
            TranslationField::Content => &self.content,
            TranslationField::Tags => &self.tags_text,
        }
    }

    /// Required fields that are blank after trimming.
    pub fn missing_fields(&self) -> impl Iterator<Item = TranslationField> + '_ {
        TranslationField::REQUIRED
            .into_iter()
            .filter(move |field| self.field(*field).trim().is_empty())
    }

    pub fn to_payload(&self) -> TranslationPayload {
        TranslationPayload {
            language: self.locale.to_string(),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            content: self.content.clone(),
            tags: self.tags(),
        }
    }

    fn with_field(&self, field: TranslationField, value: String) -> Self {
        let mut next = self.clone();
        match field {
            TranslationField::Title => next.title = value,
            TranslationField::Subtitle => next.subtitle = value,
            TranslationField::Content => next.content = value,
            TranslationField::Tags => {
                next.tags_text = value;
                next.loaded_tags = None;
            }
        }
        next
    }

    fn from_payload(locale: LocaleTag, payload: &TranslationPayload) -> Self {
        Self {
            locale,
            title: payload.title.clone(),
            subtitle: payload.subtitle.clone(),
            content: payload.content.clone(),
            tags_text: join_list(&payload.tags),
            loaded_tags: Some(payload.tags.clone()),
        }
    }
}

/// Fixed collection of translation records keyed by locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationSet {
    records: Vec<Arc<Translation>>,
}

impl TranslationSet {
    pub fn empty(locales: &LocaleSet) -> Self {
        let records = locales
            .iter()
            .map(|locale| Arc::new(Translation::empty(locale.clone())))
            .collect();
        Self { records }
    }

    /// Seed a set from backend payloads.
    ///
    /// Locales missing from `payloads` start empty; payloads for locales
    /// outside `locales` are ignored.
    pub fn from_payloads(locales: &LocaleSet, payloads: &[TranslationPayload]) -> Self {
        let records = locales
            .iter()
            .map(|locale| {
                let payload = payloads
                    .iter()
                    .find(|p| LocaleTag::parse(&p.language).is_ok_and(|tag| &tag == locale));
                let record = match payload {
                    Some(payload) => Translation::from_payload(locale.clone(), payload),
                    None => Translation::empty(locale.clone()),
                };
                Arc::new(record)
            })
            .collect();
        Self { records }
    }

    pub fn get(&self, locale: &LocaleTag) -> Option<&Translation> {
        self.record(locale).map(Arc::as_ref)
    }

    /// Shared handle to the record for `locale`.
    pub fn record(&self, locale: &LocaleTag) -> Option<&Arc<Translation>> {
        self.records.iter().find(|record| &record.locale == locale)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Translation> {
        self.records.iter().map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Return a copy of the set with one field of one record replaced.
    pub fn with_field(
        &self,
        locale: &LocaleTag,
        field: TranslationField,
        value: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let position = self
            .records
            .iter()
            .position(|record| &record.locale == locale)
            .ok_or_else(|| DomainError::unknown_locale(locale.as_str()))?;

        let mut records = self.records.clone();
        records[position] = Arc::new(records[position].with_field(field, value.into()));
        Ok(Self { records })
    }

    /// Empty records over the same locales.
    pub fn cleared(&self) -> Self {
        let records = self
            .records
            .iter()
            .map(|record| Arc::new(Translation::empty(record.locale.clone())))
            .collect();
        Self { records }
    }

    pub fn to_payloads(&self) -> Vec<TranslationPayload> {
        self.iter().map(Translation::to_payload).collect()
    }
}
