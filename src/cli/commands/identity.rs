use anyhow::{Context, Result};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;
use url::Url;

pub const ARG_IDENTITY_URL: &str = "identity-url";
pub const ARG_IDENTITY_ANON_KEY: &str = "identity-anon-key";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_IDENTITY_URL)
                .long(ARG_IDENTITY_URL)
                .help("Identity provider base URL, example: https://<project>.supabase.co")
                .env("SKILLSWAP_IDENTITY_URL")
                .value_parser(Url::parse)
                .required(true),
        )
        .arg(
            Arg::new(ARG_IDENTITY_ANON_KEY)
                .long(ARG_IDENTITY_ANON_KEY)
                .help("Identity provider public (anon) API key")
                .env("SKILLSWAP_IDENTITY_ANON_KEY")
                .hide_env_values(true)
                .required(true),
        )
}

#[derive(Debug)]
pub struct Options {
    pub url: Url,
    pub anon_key: SecretString,
}

impl Options {
    /// # Errors
    /// Returns an error if a required identity argument is missing.
    pub fn parse(matches: &ArgMatches) -> Result<Self> {
        let url = matches
            .get_one::<Url>(ARG_IDENTITY_URL)
            .cloned()
            .context("missing required argument: --identity-url")?;
        let anon_key = matches
            .get_one::<String>(ARG_IDENTITY_ANON_KEY)
            .cloned()
            .map(SecretString::from)
            .context("missing required argument: --identity-anon-key")?;

        Ok(Self { url, anon_key })
    }
}
