pub mod card;
pub mod cli;
pub mod config;
pub mod context;
pub mod github;
pub mod logging;
pub mod notifier;
pub mod sink;
pub mod status;

#[cfg(test)]
pub(crate) mod testutil;
