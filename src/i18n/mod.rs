//! Localization for the SkillSwap pages.
//!
//! - [`TranslationStore`] resolves dotted keys (`auth.signIn`) against one nested
//!   [`Dictionary`] per [`Locale`], falling back to Turkish and then to the key.
//! - [`LocaleRouter`] keeps the locale prefix of the current path in step with the
//!   active locale, replacing the history entry instead of navigating.
//! - [`LanguageContext`] ties both to the single owner of the active locale.

mod context;
mod dictionary;
mod locale;
mod preferences;
mod router;
mod store;

pub use context::LanguageContext;
pub use dictionary::{Dictionary, DictionaryError};
pub use locale::{Locale, LocaleParseError};
pub use preferences::{
    load_locale, locale_cookie, locale_from_cookie_header, save_locale, MemoryStorage, Storage,
    LOCALE_PREFERENCE_KEY,
};
pub use router::{locale_from_path, sync_path, History, LocaleRouter, MemoryHistory};
pub use store::TranslationStore;
