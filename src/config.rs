use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_ORG: &str = "cs-tech-hub";
pub const DEFAULT_PER_PAGE: usize = 50;

#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    pub org: String,
    pub github_token: Option<String>,
    pub per_page: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("org", &self.org)
            .field("github_token", &self.github_token.as_ref().map(|_| "[REDACTED]"))
            .field("per_page", &self.per_page)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            org: DEFAULT_ORG.to_string(),
            github_token: None,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Config {
    pub fn load(cli_org: Option<String>) -> Self {
        let config_file = config_dir().join("pinakes").join("config.toml");

        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if config_file.exists() {
            figment = figment.merge(Toml::file(&config_file));
        }

        figment = figment.merge(Env::prefixed("PINAKES_")).merge(
            Env::raw()
                .only(&["GITHUB_TOKEN"])
                .map(|_| "github_token".into()),
        );

        if let Some(org) = cli_org {
            figment = figment.merge(Serialized::default("org", org));
        }

        let config: Config = match figment.extract() {
            Ok(config) => config,
            Err(e) => {
                eprintln!("warning: config parse error, using defaults: {e}");
                Config::default()
            }
        };
        config.normalized()
    }

    // GitHub caps per_page at 100; 0 would make every page look exhausted
    fn normalized(mut self) -> Self {
        self.per_page = self.per_page.clamp(1, 100);
        self
    }
}

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn isolate(jail: &mut Jail) {
        // keep any real ~/.config/pinakes out of the test
        jail.set_env("XDG_CONFIG_HOME", jail.directory().display().to_string());
    }

    #[test]
    fn defaults_without_any_source() {
        Jail::expect_with(|jail| {
            isolate(jail);
            let config = Config::load(None);
            assert_eq!(config.org, DEFAULT_ORG);
            assert_eq!(config.per_page, DEFAULT_PER_PAGE);
            Ok(())
        });
    }

    #[test]
    fn config_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.create_dir("pinakes")?;
            jail.create_file("pinakes/config.toml", "org = \"rust-lang\"\nper_page = 30\n")?;
            let config = Config::load(None);
            assert_eq!(config.org, "rust-lang");
            assert_eq!(config.per_page, 30);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_defaults() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.set_env("PINAKES_ORG", "rust-lang");
            jail.set_env("PINAKES_PER_PAGE", "25");
            jail.set_env("GITHUB_TOKEN", "ghp_test");
            let config = Config::load(None);
            assert_eq!(config.org, "rust-lang");
            assert_eq!(config.per_page, 25);
            assert_eq!(config.github_token.as_deref(), Some("ghp_test"));
            Ok(())
        });
    }

    #[test]
    fn cli_org_wins_over_env() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.set_env("PINAKES_ORG", "rust-lang");
            let config = Config::load(Some("tokio-rs".to_string()));
            assert_eq!(config.org, "tokio-rs");
            Ok(())
        });
    }

    #[test]
    fn per_page_is_clamped() {
        Jail::expect_with(|jail| {
            isolate(jail);
            jail.set_env("PINAKES_PER_PAGE", "500");
            assert_eq!(Config::load(None).per_page, 100);
            jail.set_env("PINAKES_PER_PAGE", "0");
            assert_eq!(Config::load(None).per_page, 1);
            Ok(())
        });
    }
}
