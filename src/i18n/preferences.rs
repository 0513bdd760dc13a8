use super::locale::Locale;
use std::collections::HashMap;
use tracing::debug;

/// Storage key (and cookie name) holding the preferred locale.
pub const LOCALE_PREFERENCE_KEY: &str = "skillswap_locale";

/// Client-local string storage, shaped like the browser's `localStorage`.
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: &str);
}

/// Read the persisted locale; unknown or garbled values are ignored.
pub fn load_locale<S: Storage + ?Sized>(storage: &S) -> Option<Locale> {
    let value = storage.get_item(LOCALE_PREFERENCE_KEY)?;
    match value.parse() {
        Ok(locale) => Some(locale),
        Err(err) => {
            debug!("Ignoring stored locale preference: {}", err);
            None
        }
    }
}

pub fn save_locale<S: Storage + ?Sized>(storage: &mut S, locale: Locale) {
    storage.set_item(LOCALE_PREFERENCE_KEY, locale.code());
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }
}

/// Locale carried in a `Cookie` request header under [`LOCALE_PREFERENCE_KEY`].
#[must_use]
pub fn locale_from_cookie_header(header: &str) -> Option<Locale> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == LOCALE_PREFERENCE_KEY)
        .and_then(|(_, value)| value.trim_matches('"').parse().ok())
}

/// `Set-Cookie` value persisting `locale` for a year, site-wide.
#[must_use]
pub fn locale_cookie(locale: Locale) -> String {
    format!("{LOCALE_PREFERENCE_KEY}={locale}; Path=/; Max-Age=31536000; SameSite=Lax")
}
