//! csocso - A Slack slash-command bot for table football ratings.
//!
//! This is the main entry point of csocso, which records the result of a
//! table football match, updates the Elo-style rating of every player and
//! announces the changes in a Slack channel.
//!
//! # Overview
//!
//! A match is reported with a single line of Slack mentions, winners first:
//!
//! ```text
//! /csocso @alice vs @bob
//! /csocso @alice @bob vs @chloe @dave
//! ```
//!
//! Slack expands each mention into a `<@ID|NAME>` token before the command
//! reaches the bot. The bot loads the players' ratings, applies the rating
//! update, saves the new ratings and posts one colored attachment per player.
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! slack:
//!   webhook_url: "https://hooks.slack.com/services/T000/B000/XXXX"
//!   channel: "#csocso"
//!
//! ratings:
//!   default_rating: 1000
//! ```
//!
//! Any value can be overridden with a `CSOCSO_` environment variable, e.g.
//! `CSOCSO_SLACK__WEBHOOK_URL`.
//!
//! # Usage
//!
//! The trigger layer (slash-command gateway, cron job...) runs the binary
//! once per command:
//!
//! ```bash
//! csocso --config config.yaml --data ./data "<@U1|alice> vs <@U2|bob>"
//! csocso --config config.yaml --data ./data --payload command.json
//! ```
//!
//! The process prints the HTTP status of the command and exits with a
//! non-zero code when the command is rejected.
//!
//! # Architecture
//!
//! - [`commands`] - Command parsing and the pipeline orchestrator
//! - [`config`] - YAML configuration with environment variable overrides
//! - [`rating`] - Rating engine and Slack attachment rendering
//! - [`slack`] - Slack incoming-webhook delivery
//! - [`store`] - JSON persistence of player ratings
//! - [`utils`] - Rating formatting helpers
//!
//! # Environment Variables
//!
//! - `RUST_LOG` - Controls logging level (default: `info`)

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{
    commands::{CommandOutcome, Commander, SlashCommand},
    config::Config,
    slack::SlackWebhook,
    store::JsonRatingStore,
};

mod commands;
mod config;
mod rating;
mod slack;
mod store;
mod utils;

/// Name of the ratings file inside the data directory.
const RATINGS_FILE: &str = "ratings.json";

/// Command-line arguments for the csocso bot.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    #[arg(short, long)]
    config: String,

    /// Path to the directory storing the ratings file.
    #[arg(short, long)]
    data: String,

    /// Path to a JSON Slack slash-command payload.
    ///
    /// Its `text` field is used as the match command.
    #[arg(short, long, conflicts_with = "text")]
    payload: Option<String>,

    /// Match command text, e.g. `<@U1|alice> vs <@U2|bob>`.
    text: Option<String>,
}

/// Reads the command text from the arguments or from the payload file.
fn read_command_text(args: &Args) -> Result<Option<String>, anyhow::Error> {
    let Some(payload_path) = &args.payload else {
        return Ok(args.text.clone());
    };

    let payload = std::fs::read_to_string(payload_path)?;
    let command: SlashCommand = serde_json::from_str(&payload)?;
    info!(
        "received {} from {} in {}",
        command.command.as_deref().unwrap_or("command"),
        command.user_name.as_deref().unwrap_or("unknown user"),
        command.channel_name.as_deref().unwrap_or("unknown channel")
    );

    Ok(command.text)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting csocso {}...", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config file: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    let text = match read_command_text(&args) {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read slash command payload: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let store = JsonRatingStore::new(
        PathBuf::from(&args.data).join(RATINGS_FILE),
        config.ratings.default_rating,
    );
    let webhook = SlackWebhook::new(&config.slack.webhook_url);
    let commander = Commander::new(store, webhook, config.slack);

    let outcome = commander.handle(text.as_deref()).await;
    println!("{}", outcome.status_code());

    if outcome.is_accepted() {
        return ExitCode::SUCCESS;
    }
    if let CommandOutcome::RejectedFormat(message) | CommandOutcome::RejectedInternal(message) =
        outcome
    {
        eprintln!("{}", message);
    }
    ExitCode::FAILURE
}
