use super::{
    locale::Locale,
    preferences::{load_locale, save_locale, MemoryStorage, Storage},
    router::{History, LocaleRouter},
    store::TranslationStore,
};
use std::sync::Arc;
use tracing::debug;

/// The language state handed to page components.
///
/// Owns the active locale and is its only writer. Translation goes through the
/// shared [`TranslationStore`]; every locale change re-syncs the URL through the
/// [`LocaleRouter`] and, when storage is attached, persists the preference.
#[derive(Debug)]
pub struct LanguageContext<H, S = MemoryStorage> {
    store: Arc<TranslationStore>,
    router: LocaleRouter<H>,
    storage: Option<S>,
    locale: Locale,
}

impl<H: History> LanguageContext<H, MemoryStorage> {
    /// Create a context without persisted preferences.
    ///
    /// The initial locale is `initial`, or [`Locale::DEFAULT`].
    pub fn new(
        store: Arc<TranslationStore>,
        router: LocaleRouter<H>,
        initial: Option<Locale>,
    ) -> Self {
        Self::mount(store, router, None, initial.unwrap_or_default())
    }
}

impl<H: History, S: Storage> LanguageContext<H, S> {
    /// Create a context backed by client-local storage.
    ///
    /// A stored preference wins over `initial`.
    pub fn with_storage(
        store: Arc<TranslationStore>,
        router: LocaleRouter<H>,
        storage: S,
        initial: Option<Locale>,
    ) -> Self {
        let locale = load_locale(&storage).or(initial).unwrap_or_default();
        Self::mount(store, router, Some(storage), locale)
    }

    fn mount(
        store: Arc<TranslationStore>,
        router: LocaleRouter<H>,
        storage: Option<S>,
        locale: Locale,
    ) -> Self {
        let mut context = Self {
            store,
            router,
            storage,
            locale,
        };
        context.router.sync(locale);
        context
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.store.resolve(self.locale, key)
    }

    /// Switch the active locale.
    ///
    /// The state is committed first, then persisted, then the path is synced.
    /// Returns the rewritten path if the history entry was replaced.
    pub fn set_locale(&mut self, locale: Locale) -> Option<String> {
        if self.locale != locale {
            debug!("Locale changed: {} -> {}", self.locale, locale);
        }
        self.locale = locale;

        if let Some(storage) = self.storage.as_mut() {
            save_locale(storage, locale);
        }

        self.router.sync(locale)
    }

    #[must_use]
    pub const fn router(&self) -> &LocaleRouter<H> {
        &self.router
    }

    #[must_use]
    pub const fn storage(&self) -> Option<&S> {
        self.storage.as_ref()
    }

    #[must_use]
    pub fn store(&self) -> &TranslationStore {
        &self.store
    }
}
