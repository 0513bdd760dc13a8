use super::locale::Locale;
use tracing::debug;

/// The navigation history of whatever hosts the pages.
///
/// Implementations replace the current entry in place: no reload and no new
/// entry on top of the stack.
pub trait History {
    fn pathname(&self) -> String;

    fn replace_state(&mut self, path: &str);
}

/// Rewrite the first path segment of `current_path` to `locale`.
///
/// A leading locale code is replaced in place; anything else gets the code
/// inserted in front of it. The rest of the path is kept as is.
#[must_use]
pub fn sync_path(current_path: &str, locale: Locale) -> String {
    let mut segments: Vec<&str> = current_path.split('/').collect();

    // `split` always yields at least one segment, so index 1 is a valid insert point.
    if segments.get(1).is_some_and(|segment| Locale::from_code(segment).is_some()) {
        segments[1] = locale.code();
    } else {
        segments.insert(1, locale.code());
    }

    segments.join("/")
}

/// The locale encoded in the first path segment, if any.
#[must_use]
pub fn locale_from_path(path: &str) -> Option<Locale> {
    path.split('/').nth(1).and_then(Locale::from_code)
}

/// Keeps the locale prefix of the current path in step with the active locale.
///
/// Without a history (no browser, headless execution) every sync is a no-op.
#[derive(Debug)]
pub struct LocaleRouter<H> {
    history: Option<H>,
}

impl<H: History> LocaleRouter<H> {
    #[must_use]
    pub const fn new(history: H) -> Self {
        Self {
            history: Some(history),
        }
    }

    #[must_use]
    pub const fn detached() -> Self {
        Self { history: None }
    }

    #[must_use]
    pub const fn history(&self) -> Option<&H> {
        self.history.as_ref()
    }

    /// Correct the current path for `locale`.
    ///
    /// Returns the new path when the history entry was replaced, `None` when the
    /// path already matched or there is no history to update.
    pub fn sync(&mut self, locale: Locale) -> Option<String> {
        let history = self.history.as_mut()?;
        let current = history.pathname();
        let new_path = sync_path(&current, locale);

        if new_path == current {
            return None;
        }

        debug!("Replacing path {} with {}", current, new_path);
        history.replace_state(&new_path);

        Some(new_path)
    }
}

/// In-memory [`History`], for headless hosts and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHistory {
    path: String,
    replacements: usize,
}

impl MemoryHistory {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            replacements: 0,
        }
    }

    /// Number of times the current entry has been replaced.
    #[must_use]
    pub const fn replacements(&self) -> usize {
        self.replacements
    }

    /// Simulate the user navigating somewhere else.
    pub fn navigate(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }
}

impl History for MemoryHistory {
    fn pathname(&self) -> String {
        self.path.clone()
    }

    fn replace_state(&mut self, path: &str) {
        self.path = path.to_string();
        self.replacements += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_path_inserts_prefix() {
        assert_eq!(sync_path("/login", Locale::En), "/en/login");
        assert_eq!(sync_path("/auth/callback", Locale::De), "/de/auth/callback");
    }

    #[test]
    fn test_sync_path_replaces_prefix() {
        assert_eq!(sync_path("/de/register", Locale::Tr), "/tr/register");
        assert_eq!(sync_path("/en/login", Locale::En), "/en/login");
        assert_eq!(sync_path("/tr", Locale::De), "/de");
    }

    #[test]
    fn test_sync_path_root() {
        // "/" splits into ["", ""], so the locale lands between them.
        assert_eq!(sync_path("/", Locale::En), "/en/");
        assert_eq!(sync_path("/en/", Locale::De), "/de/");
    }

    #[test]
    fn test_sync_path_without_leading_slash() {
        assert_eq!(sync_path("", Locale::En), "/en");
        assert_eq!(sync_path("login", Locale::En), "login/en");
    }

    #[test]
    fn test_sync_path_only_first_segment_counts() {
        assert_eq!(sync_path("/blog/en/post", Locale::Tr), "/tr/blog/en/post");
        assert_eq!(sync_path("/EN/login", Locale::De), "/de/EN/login");
    }

    #[test]
    fn test_sync_path_is_idempotent() {
        let paths = ["/login", "/de/register", "/en/login", "/", "", "/a/b/c", "/tr"];
        for path in paths {
            for locale in Locale::ALL {
                let once = sync_path(path, locale);
                assert_eq!(sync_path(&once, locale), once, "path {path:?} locale {locale}");
            }
        }
    }

    #[test]
    fn test_locale_from_path() {
        assert_eq!(locale_from_path("/de/register"), Some(Locale::De));
        assert_eq!(locale_from_path("/login"), None);
        assert_eq!(locale_from_path("/"), None);
        assert_eq!(locale_from_path(""), None);
    }

    #[test]
    fn test_router_replaces_entry() {
        let mut router = LocaleRouter::new(MemoryHistory::new("/login"));
        assert_eq!(router.sync(Locale::En), Some("/en/login".to_string()));

        let history = router.history().unwrap();
        assert_eq!(history.pathname(), "/en/login");
        assert_eq!(history.replacements(), 1);
    }

    #[test]
    fn test_router_no_side_effect_when_path_matches() {
        let mut router = LocaleRouter::new(MemoryHistory::new("/en/login"));
        assert_eq!(router.sync(Locale::En), None);
        assert_eq!(router.history().map(MemoryHistory::replacements), Some(0));
    }

    #[test]
    fn test_detached_router_is_noop() {
        let mut router: LocaleRouter<MemoryHistory> = LocaleRouter::detached();
        assert_eq!(router.sync(Locale::De), None);
        assert!(router.history().is_none());
    }
}
