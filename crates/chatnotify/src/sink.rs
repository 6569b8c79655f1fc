use anyhow::{bail, Context, Result};
use reqwest::StatusCode;
use tracing::info;

use crate::card::MessageCard;

/// POST the card to a Google Chat webhook. Anything but `200 OK` is a failure.
pub async fn post_card(client: &reqwest::Client, webhook_url: &str, card: &MessageCard) -> Result<()> {
    let response = client
        .post(webhook_url)
        .json(card)
        .send()
        .await
        .map_err(reqwest::Error::without_url)
        .context("Sending Google Chat webhook")?;

    let status = response.status();
    if status != StatusCode::OK {
        bail!(
            "Google Chat notification failed. response status={}",
            status.as_u16()
        );
    }
    info!("Google Chat notification delivered");
    Ok(())
}
