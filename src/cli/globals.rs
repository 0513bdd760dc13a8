use crate::i18n::Locale;
use url::Url;

/// Settings shared by every request handler.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub site_url: Url,
    pub default_locale: Locale,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(site_url: Url) -> Self {
        Self {
            site_url,
            default_locale: Locale::DEFAULT,
        }
    }

    #[must_use]
    pub const fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    /// Absolute URL for a site path, as handed to the identity provider.
    #[must_use]
    pub fn site_link(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.site_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args() {
        let url = Url::parse("https://skillswap.dev").unwrap();
        let args = GlobalArgs::new(url);
        assert_eq!(args.default_locale, Locale::Tr);
        assert_eq!(
            args.with_default_locale(Locale::En).default_locale,
            Locale::En
        );
    }

    #[test]
    fn test_site_link() {
        let args = GlobalArgs::new(Url::parse("https://skillswap.dev/").unwrap());
        assert_eq!(
            args.site_link("/auth/callback"),
            "https://skillswap.dev/auth/callback"
        );

        let nested = GlobalArgs::new(Url::parse("https://example.com/skillswap").unwrap());
        assert_eq!(
            nested.site_link("auth/callback"),
            "https://example.com/skillswap/auth/callback"
        );
    }
}
