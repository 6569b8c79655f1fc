use anyhow::Context;
use tokio::runtime::Runtime;
use clap::Parser;

use chatnotify::cli::{Cli, Commands};
use chatnotify::config::Config;
use chatnotify::context::InvocationContext;
use chatnotify::logging;
use chatnotify::notifier::Notifier;

use tabled::{Table, Tabled};
use tabled::settings::{Style, Modify, Alignment, object::Columns};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let rt = Runtime::new()?;
    rt.block_on(async {
        match cli.command {
            Commands::Send(args) => {
                let config = Config::load(cli.config.clone())?;
                let settings = config.resolve(args.overrides());
                let context = InvocationContext::from_env()?;
                let notifier = Notifier::new(context, settings);

                let prepared = if args.dry_run {
                    notifier.prepare(&args.name, args.status).await?
                } else {
                    let webhook = args
                        .webhook
                        .as_deref()
                        .context("--webhook or CHAT_WEBHOOK_URL is required to post")?;
                    notifier.notify(&args.name, webhook, args.status).await?
                };

                #[derive(Tabled)]
                struct Row {
                    #[tabled(rename = "field")]
                    field: &'static str,
                    #[tabled(rename = "value")]
                    value: String,
                }

                let ctx = notifier.context();
                let rows = vec![
                    Row { field: "name", value: args.name.clone() },
                    Row { field: "repo", value: format!("{}/{}", ctx.owner, ctx.repo) },
                    Row { field: "tag", value: prepared.tag.clone() },
                    Row { field: "status", value: args.status.label().to_string() },
                    Row { field: "release", value: prepared.release.url.clone() },
                ];

                let mut table = Table::new(rows);
                table
                    .with(Style::modern())
                    .with(Modify::new(Columns::single(0)).with(Alignment::left()));

                if args.dry_run {
                    // stdout carries only the card JSON
                    eprintln!("{}", table);
                    println!("{}", serde_json::to_string_pretty(&prepared.card)?);
                } else {
                    println!("{}", table);
                }
            }
            Commands::Version { json } => {
                if json {
                    let info = serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "commit": option_env!("GIT_SHA").unwrap_or("unknown"),
                        "build_date": option_env!("BUILD_DATE").unwrap_or("unknown"),
                    });
                    println!("{}", serde_json::to_string_pretty(&info)?);
                } else {
                    println!(
                        "chatnotify {} (commit: {}, built: {})",
                        env!("CARGO_PKG_VERSION"),
                        option_env!("GIT_SHA").unwrap_or("unknown"),
                        option_env!("BUILD_DATE").unwrap_or("unknown"),
                    );
                }
            }
        }
        Ok(())
    })
}
