use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{ClickEvent, ReqwestTransport, SubmitPolicy, UiEventBinder};
use tracing_subscriber::EnvFilter;

mod config;
mod page;

use config::load_settings;
use page::PageSkeleton;

/// Replays one page gesture against a Warbler server using an in-memory page.
#[derive(Parser, Debug)]
#[command(name = "warbler-cli")]
struct Args {
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long, default_value = "warbler.toml")]
    config: PathBuf,
    /// Print the final page state as JSON.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Click the like button of a message.
    Like {
        message_id: String,
        /// Start from the liked state instead of the unliked one.
        #[arg(long)]
        liked: bool,
    },
    /// Click the compose link and load the new-message form.
    Compose,
    /// Fill the new-message form and click its submit button.
    Post {
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
        /// Wait for the server before closing the modal and reloading.
        #[arg(long)]
        await_submit: bool,
    },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got {raw:?}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Command::Post {
        await_submit: true, ..
    } = &args.command
    {
        settings.submit_policy = SubmitPolicy::AwaitThenReload;
    }

    let (buttons, fields) = match &args.command {
        Command::Like { message_id, liked } => (vec![(message_id.clone(), *liked)], Vec::new()),
        Command::Compose => (Vec::new(), Vec::new()),
        Command::Post { fields, .. } => (Vec::new(), fields.clone()),
    };
    let page = PageSkeleton::build(&buttons, &fields);
    let target = match &args.command {
        Command::Like { .. } => page
            .like_button(0)
            .ok_or_else(|| anyhow!("page skeleton has no like button"))?,
        Command::Compose => page.compose_link,
        Command::Post { .. } => page.submit,
    };

    let transport = ReqwestTransport::new(&settings.server_url)
        .with_context(|| format!("invalid server url {}", settings.server_url))?;
    let binder = UiEventBinder::bind(page.doc.clone(), transport, settings.binder_options())
        .context("page skeleton does not satisfy the selector contract")?;

    let outcome = binder
        .handle_click(&ClickEvent::new(target))
        .await
        .context("page action failed")?;
    binder.transport().flush().await;

    let snapshot = page.snapshot();
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "outcome": outcome,
                "page": snapshot,
            }))?
        );
    } else {
        match outcome {
            Some(outcome) => println!("outcome: {}", serde_json::to_string(&outcome)?),
            None => println!("outcome: click ignored"),
        }
        println!("likes: {}", snapshot.likes);
        println!("liked buttons: {:?}", snapshot.liked_buttons);
        if let Some(html) = &snapshot.modal_html {
            println!("modal: {html}");
        }
        println!(
            "modal closed: {}, reloads: {}",
            snapshot.modal_closed, snapshot.reloads
        );
    }

    Ok(())
}
