use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

const DEFAULT_CONFIG_NAME: &str = "chatnotify.toml";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Optional defaults read from `chatnotify.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub github: GithubSection,
    #[serde(default)]
    pub card: CardSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GithubSection {
    pub api_url: Option<String>,
    pub server_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardSection {
    /// External website linked from the card's button row
    pub website: Option<String>,
}

/// Values given on the command line or through the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub token: Option<String>,
    pub website: Option<String>,
    pub api_url: Option<String>,
    pub server_url: Option<String>,
}

/// Fully resolved settings handed to the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub token: String,
    pub website: String,
    pub api_url: String,
    pub server_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            token: String::new(),
            website: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            server_url: DEFAULT_SERVER_URL.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit path, or search upward from current dir.
    ///
    /// A missing file is only an error when the path was given explicitly.
    pub fn load(path_override: Option<PathBuf>) -> Result<Self> {
        let path = match path_override {
            Some(p) => p,
            None => match find_upwards(DEFAULT_CONFIG_NAME) {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Reading config file {}", path.display()))?;
        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Parsing TOML config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(cfg)
    }

    /// Merge with command line values; explicit overrides win over the file.
    pub fn resolve(self, overrides: Overrides) -> Settings {
        let defaults = Settings::default();
        Settings {
            token: overrides.token.unwrap_or(defaults.token),
            website: overrides
                .website
                .or(self.card.website)
                .unwrap_or(defaults.website),
            api_url: overrides
                .api_url
                .or(self.github.api_url)
                .unwrap_or(defaults.api_url),
            server_url: overrides
                .server_url
                .or(self.github.server_url)
                .unwrap_or(defaults.server_url),
        }
    }
}

fn find_upwards(file_name: &str) -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let candidate = dir.join(file_name);
        if candidate.exists() {
            return Some(candidate);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
