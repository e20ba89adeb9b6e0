//! Tests for merging and validating configuration.

use std::time::Duration;

use super::validated::{ValidatedConfig, write_default_config};
use super::{Cli, ConfigError, TomlConfig, field};

/// Parses args, ignoring any key or secret leaking in from the environment.
fn cli(args: &[&str]) -> Cli {
    let mut cli = Cli::parse_from_iter(std::iter::once("firecrawl").chain(args.iter().copied()));
    if !args.contains(&"--api-key") {
        cli.api_key = None;
    }
    if !args.contains(&"--webhook-secret") {
        cli.webhook_secret = None;
    }
    cli
}

fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

mod api_key {
    use super::*;

    #[test]
    fn missing_key_is_rejected_for_api_commands() {
        let result = ValidatedConfig::from_raw(&cli(&["queue"]), None);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired { field: f, .. }) if f == field::API_KEY
        ));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let result = ValidatedConfig::from_raw(&cli(&["--api-key", "  ", "queue"]), None);

        assert!(matches!(result, Err(ConfigError::MissingRequired { .. })));
    }

    #[test]
    fn key_is_optional_for_offline_commands() {
        let config = ValidatedConfig::from_raw(&cli(&["init"]), None).unwrap();

        assert!(config.api_key.is_none());
    }

    #[test]
    fn cli_key_wins_over_toml() {
        let file = toml("[api]\nkey = \"fc-file\"\n");

        let config =
            ValidatedConfig::from_raw(&cli(&["--api-key", "fc-cli", "queue"]), Some(&file))
                .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("fc-cli"));
    }

    #[test]
    fn toml_key_is_used_without_cli() {
        let file = toml("[api]\nkey = \"fc-file\"\n");

        let config = ValidatedConfig::from_raw(&cli(&["queue"]), Some(&file)).unwrap();

        assert_eq!(config.api_key.as_deref(), Some("fc-file"));
    }
}

mod precedence {
    use super::*;

    #[test]
    fn defaults_apply_without_overrides() {
        let config = ValidatedConfig::from_raw(&cli(&["--api-key", "k", "queue"]), None).unwrap();

        assert_eq!(config.api_url.as_str(), "https://api.firecrawl.dev/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_body_bytes, 10 * 1024 * 1024);
        assert_eq!(config.poll_policy.interval, Duration::from_secs(2));
        assert_eq!(config.poll_policy.timeout, Duration::from_secs(300));
        assert!(config.webhook_secret.is_none());
    }

    #[test]
    fn toml_overrides_defaults() {
        let file = toml(
            r#"
            [api]
            key = "k"
            url = "http://localhost:3002"
            timeout = 10
            max_body_bytes = 1024

            [poll]
            interval = 7
            timeout = 70

            [webhook]
            secret = "from-file"
            "#,
        );

        let config = ValidatedConfig::from_raw(&cli(&["queue"]), Some(&file)).unwrap();

        assert_eq!(config.api_url.as_str(), "http://localhost:3002/");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_body_bytes, 1024);
        assert_eq!(config.poll_policy.interval, Duration::from_secs(7));
        assert_eq!(config.poll_policy.timeout, Duration::from_secs(70));
        assert_eq!(config.webhook_secret.as_deref(), Some("from-file"));
    }

    #[test]
    fn cli_overrides_toml() {
        let file = toml("[api]\nkey = \"k\"\ntimeout = 10\n[poll]\ninterval = 7\n");

        let config = ValidatedConfig::from_raw(
            &cli(&[
                "--timeout",
                "20",
                "--poll-interval",
                "3",
                "--webhook-secret",
                "from-cli",
                "queue",
            ]),
            Some(&file),
        )
        .unwrap();

        assert_eq!(config.timeout, Duration::from_secs(20));
        assert_eq!(config.poll_policy.interval, Duration::from_secs(3));
        assert_eq!(config.webhook_secret.as_deref(), Some("from-cli"));
    }
}

mod validation {
    use super::*;

    #[test]
    fn zero_durations_are_rejected() {
        for (flag, expected) in [
            ("--timeout", field::TIMEOUT),
            ("--poll-interval", field::POLL_INTERVAL),
            ("--poll-timeout", field::POLL_TIMEOUT),
        ] {
            let result =
                ValidatedConfig::from_raw(&cli(&["--api-key", "k", flag, "0", "queue"]), None);

            assert!(
                matches!(
                    result,
                    Err(ConfigError::InvalidDuration { field: f, .. }) if f == expected
                ),
                "{flag} 0 was accepted"
            );
        }
    }

    #[test]
    fn zero_body_cap_is_rejected() {
        let args = cli(&["--api-key", "k", "--max-body-bytes", "0", "queue"]);

        let result = ValidatedConfig::from_raw(&args, None);

        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn malformed_url_is_rejected() {
        let args = cli(&["--api-key", "k", "--api-url", "not a url", "queue"]);

        let result = ValidatedConfig::from_raw(&args, None);

        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        let result = ValidatedConfig::from_raw(
            &cli(&["--api-key", "k", "--api-url", "ftp://example.com", "queue"]),
            None,
        );

        assert!(matches!(
            result,
            Err(ConfigError::InvalidUrl { ref reason, .. }) if reason.contains("ftp")
        ));
    }

    #[test]
    fn missing_webhook_secret_names_the_field() {
        let config = ValidatedConfig::from_raw(&cli(&["init"]), None).unwrap();

        assert!(matches!(
            config.require_webhook_secret(),
            Err(ConfigError::MissingRequired { field: f, .. }) if f == field::WEBHOOK_SECRET
        ));
    }
}

mod output {
    use super::*;

    #[test]
    fn display_and_debug_hide_secrets() {
        let config = ValidatedConfig::from_raw(
            &cli(&[
                "--api-key",
                "fc-very-secret",
                "--webhook-secret",
                "whsec-very-secret",
                "queue",
            ]),
            None,
        )
        .unwrap();

        let display = config.to_string();
        let debug = format!("{config:?}");

        for rendered in [&display, &debug] {
            assert!(!rendered.contains("very-secret"), "leaked in {rendered}");
        }
        assert!(display.contains("api_key: set"));
    }

    #[test]
    fn client_builder_carries_settings() {
        let config = ValidatedConfig::from_raw(
            &cli(&[
                "--api-key",
                "k",
                "--api-url",
                "http://localhost:3002/",
                "--timeout",
                "9",
                "--poll-timeout",
                "99",
                "queue",
            ]),
            None,
        )
        .unwrap();

        let client = config.client_builder().build().unwrap();

        assert_eq!(client.base_url().as_str(), "http://localhost:3002/");
        assert_eq!(client.timeout(), Duration::from_secs(9));
        assert_eq!(client.poll_policy().timeout, Duration::from_secs(99));
    }

    #[test]
    fn client_builder_without_key_fails_to_build() {
        let config = ValidatedConfig::from_raw(&cli(&["init"]), None).unwrap();

        assert!(matches!(
            config.client_builder().build(),
            Err(crate::BuildError::MissingApiKey)
        ));
    }
}

mod files {
    use super::*;

    #[test]
    fn write_default_config_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        write_default_config(&path).unwrap();

        let written = TomlConfig::load(&path).unwrap();
        assert_eq!(written.poll.interval, Some(2));
    }

    #[test]
    fn load_reads_explicit_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("firecrawl.toml");
        std::fs::write(&path, "[api]\nkey = \"fc-file\"\ntimeout = 12\n").unwrap();
        let path_str = path.to_str().unwrap();

        let config = ValidatedConfig::load(&cli(&["--config", path_str, "queue"])).unwrap();

        assert_eq!(config.api_key.as_deref(), Some("fc-file"));
        assert_eq!(config.timeout, Duration::from_secs(12));
    }

    #[test]
    fn load_fails_for_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let path_str = path.to_str().unwrap();

        let result = ValidatedConfig::load(&cli(&["--config", path_str, "init"]));

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}
