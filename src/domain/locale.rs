//! Locale tags and the fixed locale set a draft is built over.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

const MAX_TAG_LEN: usize = 35;

/// A language tag such as `en` or `uz-latn`, normalized to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleTag(String);

impl LocaleTag {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("locale tag is empty"));
        }
        if trimmed.len() > MAX_TAG_LEN
            || !trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::validation(format!(
                "invalid locale tag `{trimmed}`"
            )));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LocaleTag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LocaleTag {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LocaleTag> for String {
    fn from(value: LocaleTag) -> Self {
        value.0
    }
}

/// Ordered, duplicate-free, non-empty set of locales.
///
/// The first entry is the primary locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet(Vec<LocaleTag>);

impl LocaleSet {
    pub fn new(locales: Vec<LocaleTag>) -> Result<Self, DomainError> {
        if locales.is_empty() {
            return Err(DomainError::validation("at least one locale is required"));
        }
        for (index, locale) in locales.iter().enumerate() {
            if locales[..index].contains(locale) {
                return Err(DomainError::validation(format!(
                    "locale `{locale}` is listed more than once"
                )));
            }
        }
        Ok(Self(locales))
    }

    pub fn parse<I, S>(raw: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let locales = raw
            .into_iter()
            .map(|value| LocaleTag::parse(value.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(locales)
    }

    pub fn primary(&self) -> &LocaleTag {
        &self.0[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocaleTag> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
