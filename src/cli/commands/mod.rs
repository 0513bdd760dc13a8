pub mod identity;
pub mod logging;

use crate::i18n::Locale;
use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};
use std::path::PathBuf;
use url::Url;

pub const ARG_PORT: &str = "port";
pub const ARG_SITE_URL: &str = "site-url";
pub const ARG_DEFAULT_LOCALE: &str = "default-locale";
pub const ARG_MESSAGES_DIR: &str = "messages-dir";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("skillswap")
        .about("Localized landing and authentication gateway")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new(ARG_PORT)
                .short('p')
                .long(ARG_PORT)
                .help("Port to listen on")
                .default_value("8080")
                .env("SKILLSWAP_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new(ARG_SITE_URL)
                .long(ARG_SITE_URL)
                .help("Public base URL of the site, used to build OAuth redirect targets")
                .default_value("http://localhost:8080")
                .env("SKILLSWAP_SITE_URL")
                .value_parser(Url::parse),
        )
        .arg(
            Arg::new(ARG_DEFAULT_LOCALE)
                .long(ARG_DEFAULT_LOCALE)
                .help("Locale used when neither the path, a cookie nor Accept-Language picks one")
                .default_value("tr")
                .env("SKILLSWAP_DEFAULT_LOCALE")
                .value_parser(|value: &str| value.parse::<Locale>()),
        )
        .arg(
            Arg::new(ARG_MESSAGES_DIR)
                .long(ARG_MESSAGES_DIR)
                .help("Directory with tr.json, en.json and de.json (default: bundled dictionaries)")
                .env("SKILLSWAP_MESSAGES_DIR")
                .value_parser(clap::value_parser!(PathBuf)),
        );

    let command = identity::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "skillswap");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Localized landing and authentication gateway".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_check_args() {
        temp_env::with_vars(
            [
                ("SKILLSWAP_PORT", None::<&str>),
                ("SKILLSWAP_SITE_URL", None),
                ("SKILLSWAP_DEFAULT_LOCALE", None),
                ("SKILLSWAP_MESSAGES_DIR", None),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec![
                    "skillswap",
                    "--port",
                    "9090",
                    "--identity-url",
                    "https://id.example.com",
                    "--identity-anon-key",
                    "anon",
                    "--default-locale",
                    "en",
                ]);

                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(9090));
                assert_eq!(
                    matches.get_one::<Locale>(ARG_DEFAULT_LOCALE).copied(),
                    Some(Locale::En)
                );
                assert_eq!(
                    matches
                        .get_one::<Url>(ARG_SITE_URL)
                        .map(Url::as_str),
                    Some("http://localhost:8080/")
                );
                assert_eq!(
                    matches
                        .get_one::<Url>(identity::ARG_IDENTITY_URL)
                        .map(Url::as_str),
                    Some("https://id.example.com/")
                );
                assert!(matches.get_one::<PathBuf>(ARG_MESSAGES_DIR).is_none());
            },
        );
    }

    #[test]
    fn test_rejects_unknown_locale() {
        let result = new().try_get_matches_from(vec![
            "skillswap",
            "--identity-url",
            "https://id.example.com",
            "--identity-anon-key",
            "anon",
            "--default-locale",
            "fr",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_invalid_identity_url() {
        let result = new().try_get_matches_from(vec![
            "skillswap",
            "--identity-url",
            "not a url",
            "--identity-anon-key",
            "anon",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("SKILLSWAP_IDENTITY_URL", Some("https://id.example.com")),
                ("SKILLSWAP_IDENTITY_ANON_KEY", Some("anon")),
                ("SKILLSWAP_PORT", Some("443")),
                ("SKILLSWAP_SITE_URL", Some("https://skillswap.dev")),
                ("SKILLSWAP_DEFAULT_LOCALE", Some("de")),
                ("SKILLSWAP_MESSAGES_DIR", Some("/srv/messages")),
                ("SKILLSWAP_LOG_LEVEL", Some("info")),
            ],
            || {
                let command = new();
                let matches = command.get_matches_from(vec!["skillswap"]);
                assert_eq!(matches.get_one::<u16>(ARG_PORT).copied(), Some(443));
                assert_eq!(
                    matches.get_one::<Locale>(ARG_DEFAULT_LOCALE).copied(),
                    Some(Locale::De)
                );
                assert_eq!(
                    matches.get_one::<PathBuf>(ARG_MESSAGES_DIR),
                    Some(&PathBuf::from("/srv/messages"))
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = vec!["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars(
                [
                    ("SKILLSWAP_LOG_LEVEL", Some(level)),
                    ("SKILLSWAP_IDENTITY_URL", Some("https://id.example.com")),
                    ("SKILLSWAP_IDENTITY_ANON_KEY", Some("anon")),
                ],
                || {
                    let command = new();
                    let matches = command.get_matches_from(vec!["skillswap"]);
                    assert_eq!(
                        matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                        Some(u8::try_from(index).unwrap())
                    );
                },
            );
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5usize {
            temp_env::with_vars([("SKILLSWAP_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "skillswap".to_string(),
                    "--identity-url".to_string(),
                    "https://id.example.com".to_string(),
                    "--identity-anon-key".to_string(),
                    "anon".to_string(),
                ];

                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);

                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(u8::try_from(index).unwrap())
                );
            });
        }
    }
}
