//! # SkillSwap (localized landing and auth gateway)
//!
//! `skillswap` serves the localized landing and authentication pages of the
//! SkillSwap skill-exchange platform and proxies their form submissions to an
//! external identity provider.
//!
//! ## Localization
//!
//! Pages are available in Turkish, English and German. Translation keys are
//! dotted paths into one nested dictionary per locale (`messages/*.json`).
//! Missing strings never fail a render: lookups fall back to Turkish, then to
//! the key itself.
//!
//! The first path segment carries the locale (`/en/login`). Requests for page
//! paths without one are redirected to the preferred locale: the
//! `skillswap_locale` cookie, then `Accept-Language`, then Turkish.
//!
//! ## Authentication
//!
//! Sign-up, sign-in, OAuth and session issuance are delegated to a
//! GoTrue-compatible identity provider. This service validates form input,
//! forwards it, and returns translated messages; it never stores passwords or
//! validates tokens itself.

pub mod cli;
pub mod i18n;
pub mod identity;
pub mod skillswap;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
