//! Server-rendered page shells.
//!
//! Every page path carries its locale as the first segment (`/en/login`).
//! Requests without one are redirected to the prefixed path, which is the
//! server-side counterpart of [`crate::i18n::LocaleRouter`]. Language links
//! are built with [`sync_path`] so switching keeps the rest of the path and
//! the query.

use super::{oauth::CALLBACK_PATH, preferred_locale};
use crate::{
    cli::globals::GlobalArgs,
    i18n::{locale_cookie, locale_from_path, sync_path, Locale, TranslationStore},
};
use axum::{
    extract::{Extension, Query},
    http::{
        header::{CACHE_CONTROL, SET_COOKIE, VARY},
        HeaderMap, StatusCode, Uri,
    },
    response::{Html, IntoResponse, Redirect, Response},
};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, instrument};

const ERROR_PAGE: &str = "auth/error";

/// Request headers an unprefixed page is negotiated on.
const VARY_ON_PREFERENCE: &str = "Cookie, Accept-Language";

/// Translator bound to one locale, escaping its output.
struct Page<'a> {
    store: &'a TranslationStore,
    locale: Locale,
}

impl Page<'_> {
    fn t(&self, key: &str) -> String {
        encode_text(self.store.resolve(self.locale, key)).into_owned()
    }

    fn attr(&self, key: &str) -> String {
        encode_double_quoted_attribute(self.store.resolve(self.locale, key)).into_owned()
    }

    fn link(&self, page: &str) -> String {
        format!("/{}/{}", self.locale.code(), page)
    }

    /// Wrap `main` in the shared document, header and footer. `path` is the
    /// canonical path of the page and `query` its raw query string, both
    /// carried over by the language switcher.
    fn render(&self, title: &str, path: &str, query: Option<&str>, main: &str) -> String {
        let mut languages = String::new();
        for locale in Locale::ALL {
            let current = if locale == self.locale {
                r#" aria-current="true""#
            } else {
                ""
            };
            let mut href = sync_path(path, locale);
            if let Some(query) = query {
                href.push('?');
                href.push_str(query);
            }
            languages.push_str(&format!(
                r#"<li><a href="{href}" hreflang="{code}" lang="{code}"{current}>{flag} {name}</a></li>"#,
                href = encode_double_quoted_attribute(&href),
                code = locale.code(),
                flag = locale.flag(),
                name = locale.native_name(),
            ));
        }

        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
</head>
<body>
<header>
<nav>
<a href="/{lang}">{home}</a>
<a href="{login_href}">{login}</a>
<a href="{register_href}">{register}</a>
</nav>
</header>
<main>
{main}
</main>
<footer>
<p>&copy; SkillSwap. {copyright} {location}</p>
<nav aria-label="{language}"><ul>{languages}</ul></nav>
</footer>
</body>
</html>
"#,
            lang = self.locale.code(),
            title = title,
            description = self.attr("meta.description"),
            home = self.t("nav.home"),
            login_href = self.link("login"),
            login = self.t("nav.login"),
            register_href = self.link("register"),
            register = self.t("nav.register"),
            main = main,
            copyright = self.t("footer.copyright"),
            location = self.t("footer.location"),
            language = self.attr("footer.language"),
            languages = languages,
        )
    }

    fn titled(&self, key: &str) -> String {
        format!("{} | {}", self.t(key), self.t("meta.title"))
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html("<h1>404</h1>".to_string())).into_response()
}

/// A page served under its locale prefix, which also remembers the locale for
/// the next visit.
fn localized(locale: Locale, page: impl IntoResponse) -> Response {
    ([(SET_COOKIE, locale_cookie(locale))], page).into_response()
}

/// A page served without a locale prefix, chosen from the visitor's preference.
fn negotiated(page: impl IntoResponse) -> Response {
    ([(VARY, VARY_ON_PREFERENCE)], page).into_response()
}

fn landing_page(store: &TranslationStore, locale: Locale) -> String {
    let page = Page { store, locale };

    let main = format!(
        r#"<section class="hero">
<h1>{title}</h1>
<p>{subtitle}</p>
<a href="{register_href}">{sign_up}</a>
<a href="{login_href}">{sign_in}</a>
</section>"#,
        title = page.t("hero.title"),
        subtitle = page.t("hero.subtitle"),
        register_href = page.link("register"),
        sign_up = page.t("auth.signUp"),
        login_href = page.link("login"),
        sign_in = page.t("auth.signIn"),
    );

    page.render(
        &page.t("meta.title"),
        &format!("/{}", locale.code()),
        None,
        &main,
    )
}

// axum handler for the landing page without a locale prefix
#[instrument(skip_all)]
pub async fn landing(
    headers: HeaderMap,
    globals: Extension<GlobalArgs>,
    store: Extension<Arc<TranslationStore>>,
) -> Response {
    let locale = preferred_locale(&headers, globals.default_locale);

    negotiated(Html(landing_page(&store, locale)))
}

// axum handler for the localized landing page
#[instrument(skip_all, fields(path = %uri.path()))]
pub async fn localized_landing(uri: Uri, store: Extension<Arc<TranslationStore>>) -> Response {
    let Some(locale) = locale_from_path(uri.path()) else {
        return not_found();
    };

    localized(locale, Html(landing_page(&store, locale)))
}

/// Answer a page path without a locale prefix with a temporary redirect to
/// the prefixed path. The target depends on the visitor's preference, so the
/// answer must not be cached.
#[instrument(skip_all, fields(path = %uri.path()))]
pub async fn redirect_to_locale(
    uri: Uri,
    headers: HeaderMap,
    globals: Extension<GlobalArgs>,
) -> Response {
    let locale = preferred_locale(&headers, globals.default_locale);

    let mut target = sync_path(uri.path(), locale);
    if let Some(query) = uri.query() {
        target.push('?');
        target.push_str(query);
    }

    debug!("Redirecting to {}", target);

    (
        [(CACHE_CONTROL, "no-store"), (VARY, VARY_ON_PREFERENCE)],
        Redirect::temporary(&target),
    )
        .into_response()
}

// axum handler for the sign-in page
#[instrument(skip_all, fields(path = %uri.path()))]
pub async fn login(uri: Uri, store: Extension<Arc<TranslationStore>>) -> Response {
    let Some(locale) = locale_from_path(uri.path()) else {
        return not_found();
    };
    let page = Page {
        store: &store,
        locale,
    };

    let main = format!(
        r#"<h1>{heading}</h1>
<form method="post" action="/api/login" data-locale="{lang}">
<label>{email} <input type="email" name="email" autocomplete="email" required></label>
<label>{password} <input type="password" name="password" autocomplete="current-password" required></label>
<button type="button" name="forgot-password">{forgot}</button>
<button type="submit">{sign_in}</button>
</form>
<a href="/api/auth/oauth/google">{google}</a>
<p>{no_account} <a href="{register_href}">{sign_up}</a></p>"#,
        heading = page.t("auth.loginTitle"),
        lang = locale.code(),
        email = page.t("auth.email"),
        password = page.t("auth.password"),
        forgot = page.t("auth.forgotPassword"),
        sign_in = page.t("auth.signIn"),
        google = page.t("auth.continueWithGoogle"),
        no_account = page.t("auth.noAccount"),
        register_href = page.link("register"),
        sign_up = page.t("auth.signUp"),
    );

    let html = page.render(
        &page.titled("auth.loginTitle"),
        &page.link("login"),
        None,
        &main,
    );
    localized(locale, Html(html))
}

// axum handler for the sign-up page
#[instrument(skip_all, fields(path = %uri.path()))]
pub async fn register(uri: Uri, store: Extension<Arc<TranslationStore>>) -> Response {
    let Some(locale) = locale_from_path(uri.path()) else {
        return not_found();
    };
    let page = Page {
        store: &store,
        locale,
    };

    let main = format!(
        r#"<h1>{heading}</h1>
<form method="post" action="/api/register" data-locale="{lang}">
<label>{name} <input type="text" name="name" autocomplete="name" required></label>
<label>{email} <input type="email" name="email" autocomplete="email" required></label>
<label>{password} <input type="password" name="password" autocomplete="new-password" minlength="{min}" required></label>
<button type="submit">{sign_up}</button>
</form>
<a href="/api/auth/oauth/google">{google}</a>
<p>{have_account} <a href="{login_href}">{sign_in}</a></p>"#,
        heading = page.t("auth.registerTitle"),
        lang = locale.code(),
        name = page.t("auth.name"),
        email = page.t("auth.email"),
        password = page.t("auth.password"),
        min = super::MIN_PASSWORD_LENGTH,
        sign_up = page.t("auth.signUp"),
        google = page.t("auth.continueWithGoogle"),
        have_account = page.t("auth.haveAccount"),
        login_href = page.link("login"),
        sign_in = page.t("auth.signIn"),
    );

    let html = page.render(
        &page.titled("auth.registerTitle"),
        &page.link("register"),
        None,
        &main,
    );
    localized(locale, Html(html))
}

/// The OAuth return page, or a redirect to the error page when the provider
/// reported one.
fn callback_page(
    store: &TranslationStore,
    locale: Locale,
    uri: &Uri,
    params: &HashMap<String, String>,
) -> Response {
    let page = Page { store, locale };

    if let Some(error) = params.get("error") {
        debug!("OAuth callback reported an error: {}", error);

        let target = format!(
            "{}?{}",
            page.link(ERROR_PAGE),
            url::form_urlencoded::Serializer::new(String::new())
                .append_pair("error", error)
                .finish()
        );
        return Redirect::to(&target).into_response();
    }

    // The provider returns the session in the URL fragment, which only the
    // browser sees; the page hands it to /api/auth/session.
    let main = format!(
        r#"<section data-session-endpoint="/api/auth/session">
<h1>{title}</h1>
<p>{description}</p>
</section>"#,
        title = page.t("auth.callback.title"),
        description = page.t("auth.callback.description"),
    );

    Html(page.render(
        &page.titled("auth.callback.title"),
        &format!("/{}{}", locale.code(), CALLBACK_PATH),
        uri.query(),
        &main,
    ))
    .into_response()
}

// axum handler for the OAuth return page, which the identity provider
// redirects to without a locale prefix
#[instrument(skip_all)]
pub async fn callback(
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    globals: Extension<GlobalArgs>,
    store: Extension<Arc<TranslationStore>>,
) -> Response {
    let locale = preferred_locale(&headers, globals.default_locale);

    negotiated(callback_page(&store, locale, &uri, &params))
}

// axum handler for the localized OAuth return page
#[instrument(skip_all, fields(path = %uri.path()))]
pub async fn localized_callback(
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
    store: Extension<Arc<TranslationStore>>,
) -> Response {
    let Some(locale) = locale_from_path(uri.path()) else {
        return not_found();
    };

    localized(locale, callback_page(&store, locale, &uri, &params))
}

/// Dictionary key describing an authentication error code.
fn error_message_key(code: Option<&str>) -> &'static str {
    match code {
        Some("Configuration") => "auth.error.configuration",
        Some("AccessDenied") => "auth.error.accessDenied",
        Some("Verification") => "auth.error.verification",
        _ => "auth.error.default",
    }
}

fn error_page(
    store: &TranslationStore,
    locale: Locale,
    uri: &Uri,
    params: &HashMap<String, String>,
) -> String {
    let page = Page { store, locale };

    let code = params
        .get("error")
        .map(String::as_str)
        .filter(|c| !c.is_empty());

    let mut main = format!(
        "<h1>{}</h1>\n<p>{}</p>\n",
        page.t("auth.error.title"),
        page.t(error_message_key(code)),
    );
    if let Some(code) = code {
        main.push_str(&format!(
            "<p>{}: <code>{}</code></p>\n",
            page.t("auth.error.code"),
            encode_text(code)
        ));
    }
    main.push_str(&format!(
        r#"<a href="{}">{}</a>
<a href="/{}">{}</a>"#,
        page.link("login"),
        page.t("auth.error.retry"),
        locale.code(),
        page.t("auth.error.home"),
    ));

    page.render(
        &page.titled("auth.error.title"),
        &page.link(ERROR_PAGE),
        uri.query(),
        &main,
    )
}

// axum handler for the authentication error page without a locale prefix
#[instrument(skip_all)]
pub async fn auth_error(
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    globals: Extension<GlobalArgs>,
    store: Extension<Arc<TranslationStore>>,
) -> Response {
    let locale = preferred_locale(&headers, globals.default_locale);

    negotiated(Html(error_page(&store, locale, &uri, &params)))
}

// axum handler for the localized authentication error page
#[instrument(skip_all, fields(path = %uri.path()))]
pub async fn localized_auth_error(
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
    store: Extension<Arc<TranslationStore>>,
) -> Response {
    let Some(locale) = locale_from_path(uri.path()) else {
        return not_found();
    };

    localized(locale, Html(error_page(&store, locale, &uri, &params)))
}
