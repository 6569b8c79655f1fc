//! Invocation context injected by the CI runner.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

const TAG_REF_PREFIX: &str = "refs/tags/";
const PULL_REQUEST_EVENT: &str = "pull_request";

/// Identifiers describing the repository and event the job ran for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationContext {
    pub owner: String,
    pub repo: String,
    pub event_name: String,
    pub sha: String,
    pub git_ref: String,
    pub pr_number: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct EventPayload {
    issue: Option<Numbered>,
    pull_request: Option<Numbered>,
    number: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Numbered {
    number: Option<u64>,
}

impl EventPayload {
    fn number(&self) -> Option<u64> {
        self.issue
            .as_ref()
            .and_then(|i| i.number)
            .or_else(|| self.pull_request.as_ref().and_then(|p| p.number))
            .or(self.number)
    }
}

impl InvocationContext {
    /// Read the context from the GitHub Actions process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the context from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let repository = lookup("GITHUB_REPOSITORY")
            .context("GITHUB_REPOSITORY env var not set, expected 'owner/repo'")?;
        let (owner, repo) = repository
            .split_once('/')
            .filter(|(o, r)| !o.is_empty() && !r.is_empty())
            .with_context(|| format!("GITHUB_REPOSITORY '{repository}' is not of the form 'owner/repo'"))?;

        let pr_number = match lookup("GITHUB_EVENT_PATH") {
            Some(path) => read_event_number(Path::new(&path))?,
            None => None,
        };

        let ctx = Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            event_name: lookup("GITHUB_EVENT_NAME").unwrap_or_default(),
            sha: lookup("GITHUB_SHA").unwrap_or_default(),
            git_ref: lookup("GITHUB_REF").unwrap_or_default(),
            pr_number,
        };
        debug!(owner = %ctx.owner, repo = %ctx.repo, event = %ctx.event_name, git_ref = %ctx.git_ref, "resolved invocation context");
        Ok(ctx)
    }

    /// Tag name for the ref, e.g. `refs/tags/v1.10.15` -> `v1.10.15`.
    ///
    /// Refs outside the tag namespace are returned unchanged.
    pub fn release_tag(&self) -> &str {
        match self.git_ref.strip_prefix(TAG_REF_PREFIX) {
            Some(tag) => tag,
            None => {
                warn!(git_ref = %self.git_ref, "ref is not a tag ref, using it verbatim as the release tag");
                &self.git_ref
            }
        }
    }

    /// Path below the repository URL pointing at the pull request or commit.
    pub fn source_link_path(&self) -> String {
        if self.event_name == PULL_REQUEST_EVENT {
            let number = self.pr_number.map(|n| n.to_string()).unwrap_or_default();
            format!("/pull/{number}")
        } else {
            format!("/commit/{}", self.sha)
        }
    }
}

fn read_event_number(path: &Path) -> Result<Option<u64>> {
    if !path.exists() {
        warn!(path = %path.display(), "event payload file does not exist");
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Reading event payload {}", path.display()))?;
    let payload: EventPayload = serde_json::from_str(&contents)
        .with_context(|| format!("Parsing event payload {}", path.display()))?;
    Ok(payload.number())
}
