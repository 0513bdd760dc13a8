//! Maps validated CLI arguments to the action the binary runs.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{self, identity};
use crate::i18n::Locale;
use anyhow::{Context, Result};
use std::path::PathBuf;
use url::Url;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches
        .get_one::<u16>(commands::ARG_PORT)
        .copied()
        .unwrap_or(8080);
    let site_url = matches
        .get_one::<Url>(commands::ARG_SITE_URL)
        .cloned()
        .context("missing required argument: --site-url")?;
    let default_locale = matches
        .get_one::<Locale>(commands::ARG_DEFAULT_LOCALE)
        .copied()
        .unwrap_or_default();
    let messages_dir = matches
        .get_one::<PathBuf>(commands::ARG_MESSAGES_DIR)
        .cloned();

    let identity_opts = identity::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        site_url,
        default_locale,
        messages_dir,
        identity_url: identity_opts.url,
        identity_anon_key: identity_opts.anon_key,
    }))
}
