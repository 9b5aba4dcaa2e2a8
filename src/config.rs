//! Configuration file structures for the csocso bot.
//!
//! The configuration is read from a YAML file and can be overridden with
//! environment variables prefixed by `CSOCSO_`, nested keys being separated
//! by `__`.
//!
//! # Configuration File Format
//!
//! ```yaml
//! slack:
//!   # Incoming-webhook URL receiving the match updates
//!   webhook_url: "https://hooks.slack.com/services/T000/B000/XXXX"
//!   # Channel the updates are posted to
//!   channel: "#csocso"
//!   # Optional, defaults to csocso-sans-bot and :soccer:
//!   username: "csocso-sans-bot"
//!   icon_emoji: ":soccer:"
//!
//! ratings:
//!   # Rating of a player playing for the first time, defaults to 1000
//!   default_rating: 1000
//! ```
//!
//! # Environment Variable Overrides
//!
//! ```bash
//! export CSOCSO_SLACK__WEBHOOK_URL="https://hooks.slack.com/services/T000/B000/XXXX"
//! export CSOCSO_SLACK__CHANNEL="#csocso"
//! ```

use anyhow::bail;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

/// Prefix of the environment variables overriding the configuration file.
const ENV_PREFIX: &str = "CSOCSO_";

/// Root configuration structure.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Slack delivery configuration
    pub slack: Slack,
    /// Rating configuration
    #[serde(default)]
    pub ratings: Ratings,
}

/// Slack incoming-webhook configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct Slack {
    /// Incoming-webhook URL.
    ///
    /// The URL embeds the workspace secret and should rather be provided
    /// through `CSOCSO_SLACK__WEBHOOK_URL`.
    pub webhook_url: String,

    /// Channel receiving the match updates, e.g. `#csocso`.
    pub channel: String,

    /// Name the bot posts as.
    #[serde(default = "default_username")]
    pub username: String,

    /// Emoji used as the bot avatar.
    #[serde(default = "default_icon_emoji")]
    pub icon_emoji: String,
}

/// Rating configuration.
#[derive(Debug, Deserialize)]
pub struct Ratings {
    /// Rating of a player without any recorded match.
    #[serde(default = "default_rating")]
    pub default_rating: f64,
}

impl Default for Ratings {
    fn default() -> Self {
        Ratings {
            default_rating: default_rating(),
        }
    }
}

fn default_username() -> String {
    "csocso-sans-bot".to_owned()
}

fn default_icon_emoji() -> String {
    ":soccer:".to_owned()
}

fn default_rating() -> f64 {
    1000.0
}

impl Config {
    /// Loads the configuration from the YAML file at `path`, then applies
    /// `CSOCSO_` environment variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or a required key is
    /// missing from both the file and the environment.
    pub fn load(path: &str) -> Result<Config, figment::Error> {
        Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
    }

    /// Checks the values that cannot be validated by deserialization.
    ///
    /// # Errors
    ///
    /// Returns an error if the webhook URL or the channel is empty, or if
    /// the default rating is not a finite number.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.slack.webhook_url.trim().is_empty() {
            bail!("slack.webhook_url must not be empty");
        }
        if !self.slack.webhook_url.starts_with("http://")
            && !self.slack.webhook_url.starts_with("https://")
        {
            bail!("slack.webhook_url must be an http(s) URL");
        }
        if self.slack.channel.trim().is_empty() {
            bail!("slack.channel must not be empty");
        }
        if !self.ratings.default_rating.is_finite() {
            bail!("ratings.default_rating must be a finite number");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn test_load_with_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r##"
slack:
  webhook_url: "https://hooks.slack.com/services/T/B/X"
  channel: "#csocso"
"##,
            )?;

            let config = Config::load("config.yaml")?;

            assert_eq!(config.slack.webhook_url, "https://hooks.slack.com/services/T/B/X");
            assert_eq!(config.slack.channel, "#csocso");
            assert_eq!(config.slack.username, "csocso-sans-bot");
            assert_eq!(config.slack.icon_emoji, ":soccer:");
            assert_eq!(config.ratings.default_rating, 1000.0);
            assert!(config.validate().is_ok());
            Ok(())
        });
    }

    #[test]
    fn test_load_full_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r##"
slack:
  webhook_url: "https://hooks.slack.com/services/T/B/X"
  channel: "#foosball"
  username: "table-bot"
  icon_emoji: ":trophy:"
ratings:
  default_rating: 1500
"##,
            )?;

            let config = Config::load("config.yaml")?;

            assert_eq!(config.slack.channel, "#foosball");
            assert_eq!(config.slack.username, "table-bot");
            assert_eq!(config.slack.icon_emoji, ":trophy:");
            assert_eq!(config.ratings.default_rating, 1500.0);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.yaml",
                r##"
slack:
  webhook_url: "https://hooks.slack.com/services/T/B/X"
  channel: "#csocso"
"##,
            )?;
            jail.set_env("CSOCSO_SLACK__CHANNEL", "#other");
            jail.set_env("CSOCSO_RATINGS__DEFAULT_RATING", "1200");

            let config = Config::load("config.yaml")?;

            assert_eq!(config.slack.channel, "#other");
            assert_eq!(config.ratings.default_rating, 1200.0);
            Ok(())
        });
    }

    #[test]
    fn test_env_only() {
        Jail::expect_with(|jail| {
            jail.set_env("CSOCSO_SLACK__WEBHOOK_URL", "https://hooks.slack.com/services/T/B/Y");
            jail.set_env("CSOCSO_SLACK__CHANNEL", "#csocso");

            let config = Config::load("missing.yaml")?;

            assert_eq!(config.slack.webhook_url, "https://hooks.slack.com/services/T/B/Y");
            Ok(())
        });
    }

    #[test]
    fn test_load_missing_webhook_fails() {
        Jail::expect_with(|jail| {
            jail.create_file("config.yaml", "slack:\n  channel: \"#csocso\"\n")?;

            assert!(Config::load("config.yaml").is_err());
            Ok(())
        });
    }

    fn create_config(webhook_url: &str, channel: &str, default_rating: f64) -> Config {
        Config {
            slack: Slack {
                webhook_url: webhook_url.to_string(),
                channel: channel.to_string(),
                username: default_username(),
                icon_emoji: default_icon_emoji(),
            },
            ratings: Ratings { default_rating },
        }
    }

    #[test]
    fn test_validate_rejects_empty_webhook() {
        assert!(create_config("", "#csocso", 1000.0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_webhook() {
        assert!(
            create_config("hooks.slack.com/services/T/B/X", "#csocso", 1000.0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_validate_rejects_empty_channel() {
        assert!(
            create_config("https://hooks.slack.com/services/T/B/X", " ", 1000.0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_validate_rejects_non_finite_rating() {
        assert!(
            create_config("https://hooks.slack.com/services/T/B/X", "#csocso", f64::NAN)
                .validate()
                .is_err()
        );
    }
}
