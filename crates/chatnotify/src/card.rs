//! Google Chat card payload.

use serde::Serialize;

use crate::status::Status;

/// Mention placed in the plain-text part of every message.
pub const MENTION_ALL: &str = "<users/all>";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageCard {
    pub text: String,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub widgets: Vec<Widget>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Widget {
    TextParagraph { text: String },
    KeyValue(KeyValue),
    Buttons(Vec<Button>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValue {
    pub top_label: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_multiline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<Button>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Button {
    TextButton {
        text: String,
        #[serde(rename = "onClick")]
        on_click: OnClick,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnClick {
    pub open_link: OpenLink,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenLink {
    pub url: String,
}

impl Button {
    pub fn text(text: &str, url: &str) -> Self {
        Button::TextButton {
            text: text.to_string(),
            on_click: OnClick {
                open_link: OpenLink {
                    url: url.to_string(),
                },
            },
        }
    }
}

/// Everything the card shows.
#[derive(Debug, Clone)]
pub struct CardInput<'a> {
    pub name: &'a str,
    pub status: Status,
    pub owner: &'a str,
    pub repo: &'a str,
    pub repo_url: &'a str,
    pub tag: &'a str,
    pub release_url: &'a str,
    pub description: &'a str,
    pub checks_url: &'a str,
    pub website_url: &'a str,
}

impl MessageCard {
    pub fn build(input: &CardInput<'_>) -> Self {
        let header = Section {
            widgets: vec![Widget::TextParagraph {
                text: format!(
                    "<b>{} <font color=\"{}\">{}</font></b>",
                    input.name,
                    input.status.color(),
                    input.status.label()
                ),
            }],
        };

        let details = Section {
            widgets: vec![
                Widget::KeyValue(KeyValue {
                    top_label: "repo".into(),
                    content: format!("{}/<b>{}</b>", input.owner, input.repo),
                    content_multiline: Some(true),
                    button: Some(Button::text("VIEW REPO", input.repo_url)),
                }),
                Widget::KeyValue(KeyValue {
                    top_label: "version".into(),
                    content: input.tag.to_string(),
                    content_multiline: Some(true),
                    button: Some(Button::text("VIEW RELEASE", input.release_url)),
                }),
                Widget::KeyValue(KeyValue {
                    top_label: "desc".into(),
                    content: input.description.to_string(),
                    content_multiline: None,
                    button: None,
                }),
            ],
        };

        let links = Section {
            widgets: vec![Widget::Buttons(vec![
                Button::text("VIEW CHECKS", input.checks_url),
                Button::text("OPEN WEBSITE", input.website_url),
            ])],
        };

        MessageCard {
            text: MENTION_ALL.to_string(),
            cards: vec![Card {
                sections: vec![header, details, links],
            }],
        }
    }
}
