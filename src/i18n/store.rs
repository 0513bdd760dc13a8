use super::{
    dictionary::{Dictionary, DictionaryError},
    locale::Locale,
};
use std::path::Path;
use tracing::{debug, warn};

const TR_MESSAGES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/messages/tr.json"));
const EN_MESSAGES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/messages/en.json"));
const DE_MESSAGES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/messages/de.json"));

/// Immutable set of one dictionary per [`Locale`].
///
/// Loaded once at startup; lookups never fail and never mutate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationStore {
    tr: Dictionary,
    en: Dictionary,
    de: Dictionary,
}

impl TranslationStore {
    #[must_use]
    pub const fn new(tr: Dictionary, en: Dictionary, de: Dictionary) -> Self {
        Self { tr, en, de }
    }

    /// Dictionaries compiled into the binary from `messages/`.
    ///
    /// # Errors
    /// Returns an error if one of the bundled files is not a valid dictionary.
    pub fn embedded() -> Result<Self, DictionaryError> {
        Ok(Self::new(
            Dictionary::from_json_str(TR_MESSAGES)?,
            Dictionary::from_json_str(EN_MESSAGES)?,
            Dictionary::from_json_str(DE_MESSAGES)?,
        ))
    }

    /// Load `tr.json`, `en.json` and `de.json` from a directory.
    ///
    /// # Errors
    /// Returns an error if any of the three files is missing or invalid.
    pub fn from_dir(dir: &Path) -> Result<Self, DictionaryError> {
        let load = |locale: Locale| Dictionary::from_path(&dir.join(format!("{locale}.json")));
        Ok(Self::new(
            load(Locale::Tr)?,
            load(Locale::En)?,
            load(Locale::De)?,
        ))
    }

    #[must_use]
    pub const fn messages(&self, locale: Locale) -> &Dictionary {
        match locale {
            Locale::Tr => &self.tr,
            Locale::En => &self.en,
            Locale::De => &self.de,
        }
    }

    /// Resolve `key` for `locale`, falling back to the default locale and then
    /// to the key itself.
    #[must_use]
    pub fn resolve<'a>(&'a self, locale: Locale, key: &'a str) -> &'a str {
        self.messages(locale)
            .lookup(key)
            .or_else(|| self.messages(Locale::DEFAULT).lookup(key))
            .unwrap_or(key)
    }

    /// Leaf keys present in the default dictionary but absent from `locale`.
    #[must_use]
    pub fn missing_keys(&self, locale: Locale) -> Vec<String> {
        let dictionary = self.messages(locale);
        self.messages(Locale::DEFAULT)
            .leaf_keys()
            .into_iter()
            .filter(|key| dictionary.lookup(key).is_none())
            .collect()
    }

    /// Log translation coverage for every non-default locale.
    pub fn report_coverage(&self) {
        for locale in Locale::ALL.into_iter().filter(|l| *l != Locale::DEFAULT) {
            let missing = self.missing_keys(locale);
            if missing.is_empty() {
                debug!("Locale {} has full coverage", locale);
            } else {
                warn!(
                    "Locale {} is missing {} keys, falling back to {}",
                    locale,
                    missing.len(),
                    Locale::DEFAULT
                );
                debug!("Missing keys for {}: {:?}", locale, missing);
            }
        }
    }
}
