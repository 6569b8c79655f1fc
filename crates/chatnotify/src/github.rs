use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

const USER_AGENT_VALUE: &str = concat!("chatnotify/", env!("CARGO_PKG_VERSION"));

/// Release metadata shown on the card.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseInfo {
    pub description: String,
    pub url: String,
}

#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Look up the release published for `tag`. Fails when no such release exists.
    async fn release_by_tag(&self, owner: &str, repo: &str, tag: &str) -> Result<ReleaseInfo>;
}

#[derive(Deserialize)]
struct ReleaseResponse {
    body: Option<String>,
    html_url: String,
}

/// Releases REST API of github.com or a GitHub Enterprise server.
pub struct GitHubReleases {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl GitHubReleases {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            token: token.into(),
        }
    }

    fn release_url(&self, owner: &str, repo: &str, tag: &str) -> Result<Url> {
        let mut url = Url::parse(&self.api_url)
            .with_context(|| format!("Invalid GitHub API URL '{}'", self.api_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("GitHub API URL '{}' cannot be a base", self.api_url))?
            .pop_if_empty()
            .extend(["repos", owner, repo, "releases", "tags", tag]);
        Ok(url)
    }
}

#[async_trait]
impl ReleaseSource for GitHubReleases {
    async fn release_by_tag(&self, owner: &str, repo: &str, tag: &str) -> Result<ReleaseInfo> {
        let url = self.release_url(owner, repo, tag)?;
        debug!(%url, "fetching release");

        let mut req = self
            .client
            .get(url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, "application/vnd.github+json");
        if !self.token.is_empty() {
            req = req.bearer_auth(&self.token);
        }

        let release: ReleaseResponse = req
            .send()
            .await
            .with_context(|| format!("Fetching release {tag} of {owner}/{repo} from GitHub"))?
            .error_for_status()
            .with_context(|| format!("GitHub release lookup for {owner}/{repo} tag {tag}"))?
            .json()
            .await
            .with_context(|| "Decoding GitHub release response")?;

        Ok(ReleaseInfo {
            description: release.body.unwrap_or_default(),
            url: release.html_url,
        })
    }
}
