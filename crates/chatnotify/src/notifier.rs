use anyhow::Result;
use tracing::info;

use crate::card::{CardInput, MessageCard};
use crate::config::Settings;
use crate::context::InvocationContext;
use crate::github::{GitHubReleases, ReleaseInfo, ReleaseSource};
use crate::sink::post_card;
use crate::status::Status;

/// A card ready to be delivered, with the release it was built from.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub tag: String,
    pub repo_url: String,
    pub release: ReleaseInfo,
    pub card: MessageCard,
}

pub struct Notifier {
    context: InvocationContext,
    settings: Settings,
    releases: Box<dyn ReleaseSource>,
    client: reqwest::Client,
}

pub fn source_from_settings(settings: &Settings, client: reqwest::Client) -> Box<dyn ReleaseSource> {
    Box::new(GitHubReleases::new(
        client,
        settings.api_url.clone(),
        settings.token.clone(),
    ))
}

impl Notifier {
    pub fn new(context: InvocationContext, settings: Settings) -> Self {
        let client = reqwest::Client::new();
        let releases = source_from_settings(&settings, client.clone());
        Self::with_source(context, settings, releases, client)
    }

    pub fn with_source(
        context: InvocationContext,
        settings: Settings,
        releases: Box<dyn ReleaseSource>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            context,
            settings,
            releases,
            client,
        }
    }

    pub fn context(&self) -> &InvocationContext {
        &self.context
    }

    /// Look up the release for the current ref and build its card.
    pub async fn prepare(&self, name: &str, status: Status) -> Result<Prepared> {
        let ctx = &self.context;
        let repo_url = format!(
            "{}/{}/{}",
            self.settings.server_url.trim_end_matches('/'),
            ctx.owner,
            ctx.repo
        );
        let checks_url = format!("{repo_url}{}/checks", ctx.source_link_path());
        let tag = ctx.release_tag().to_string();

        let release = self
            .releases
            .release_by_tag(&ctx.owner, &ctx.repo, &tag)
            .await?;

        let card = MessageCard::build(&CardInput {
            name,
            status,
            owner: &ctx.owner,
            repo: &ctx.repo,
            repo_url: &repo_url,
            tag: &tag,
            release_url: &release.url,
            description: &release.description,
            checks_url: &checks_url,
            website_url: &self.settings.website,
        });

        Ok(Prepared {
            tag,
            repo_url,
            release,
            card,
        })
    }

    /// Fetch the release, then post its card to `webhook_url`.
    pub async fn notify(&self, name: &str, webhook_url: &str, status: Status) -> Result<Prepared> {
        let prepared = self.prepare(name, status).await?;
        info!(tag = %prepared.tag, status = ?status, "posting release notification");
        post_card(&self.client, webhook_url, &prepared.card).await?;
        Ok(prepared)
    }
}
