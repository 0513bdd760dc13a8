use crate::{
    cli::globals::GlobalArgs,
    i18n::{Locale, TranslationStore},
    identity::IdentityClient,
    skillswap,
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::{path::PathBuf, sync::Arc};
use tracing::{debug, info};
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub site_url: Url,
    pub default_locale: Locale,
    pub messages_dir: Option<PathBuf>,
    pub identity_url: Url,
    pub identity_anon_key: SecretString,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the dictionaries cannot be loaded, the identity client
/// cannot be built, or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let store = match &args.messages_dir {
        Some(dir) => {
            info!("Loading dictionaries from {}", dir.display());
            TranslationStore::from_dir(dir)
                .with_context(|| format!("Failed to load dictionaries from {}", dir.display()))?
        }
        None => TranslationStore::embedded().context("Bundled dictionaries are invalid")?,
    };
    store.report_coverage();

    let identity = IdentityClient::new(args.identity_url.as_str(), args.identity_anon_key)
        .context("Failed to build identity provider client")?;

    let globals = GlobalArgs::new(args.site_url).with_default_locale(args.default_locale);

    debug!("Global args: {:?}", globals);

    skillswap::new(args.port, globals, Arc::new(store), identity).await
}
