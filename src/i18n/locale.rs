use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;
use utoipa::ToSchema;

/// Display locales supported by the site.
///
/// The set is closed: adding a variant requires shipping a matching
/// `messages/<code>.json` dictionary.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Tr,
    En,
    De,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported locale: {0:?} (expected one of tr, en, de)")]
pub struct LocaleParseError(pub String);

impl Locale {
    /// Locale used for fallback lookups and when nothing else is known.
    pub const DEFAULT: Self = Self::Tr;

    pub const ALL: [Self; 3] = [Self::Tr, Self::En, Self::De];

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Tr => "tr",
            Self::En => "en",
            Self::De => "de",
        }
    }

    /// Native language name, as shown in the language selector.
    #[must_use]
    pub const fn native_name(self) -> &'static str {
        match self {
            Self::Tr => "Türkçe",
            Self::En => "English",
            Self::De => "Deutsch",
        }
    }

    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::Tr => "🇹🇷",
            Self::En => "🇺🇸",
            Self::De => "🇩🇪",
        }
    }

    /// Exact, case-sensitive match against the locale codes.
    ///
    /// Path segments use this so `/EN/login` is not treated as localized.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|locale| locale.code() == code)
    }

    /// Pick the best supported locale from an `Accept-Language` header value.
    ///
    /// Entries are ordered by their `q` weight (ties keep header order); only the
    /// primary language subtag is compared, so `de-AT` selects `de`.
    #[must_use]
    pub fn negotiate(accept_language: &str) -> Option<Self> {
        let mut candidates: Vec<(f32, usize, Self)> = accept_language
            .split(',')
            .enumerate()
            .filter_map(|(index, entry)| {
                let mut parts = entry.split(';');
                let tag = parts.next()?.trim();
                let primary = tag.split(['-', '_']).next()?.to_ascii_lowercase();
                let locale = Self::from_code(&primary)?;

                let quality = parts
                    .filter_map(|param| param.trim().strip_prefix("q="))
                    .find_map(|q| q.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);

                (quality > 0.0).then_some((quality, index, locale))
            })
            .collect();

        candidates.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
        candidates.first().map(|(_, _, locale)| *locale)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(&s.trim().to_ascii_lowercase())
            .ok_or_else(|| LocaleParseError(s.to_string()))
    }
}
