//! steamwatchd — the steamwatch daemon.
//!
//! Polls a fixed list of Steam game servers and keeps one live Discord
//! message per server describing its latest transition.
//!
//! # Usage
//!
//! ```text
//! steamwatchd run --servers 192.0.2.1:27015,192.0.2.2:27016 --interval 30s
//! steamwatchd probe 192.0.2.1:27015
//! ```

mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use steamwatch_discord::{DiscordChannel, NotificationSink};
use steamwatch_poller::Poller;
use steamwatch_state::Observation;
use steamwatch_steam::SteamStatusSource;

use crate::config::{ConfigArgs, ConfigError};

#[derive(Parser)]
#[command(name = "steamwatchd", about = "Steam game server watcher for Discord", version)]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "STEAMWATCH_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Watch the configured servers and post transitions to Discord.
    Run(ConfigArgs),

    /// Query servers once and print what the status API reports.
    Probe {
        /// Addresses to query; defaults to the configured servers.
        addresses: Vec<String>,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Command::Run(args) => run(args).await,
        Command::Probe { addresses, config } => probe(addresses, config).await,
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,steamwatch=debug,steamwatchd=debug"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(args: ConfigArgs) -> anyhow::Result<()> {
    let config = args.load()?.validate()?;
    info!(
        servers = config.servers.len(),
        interval = ?config.interval,
        clear_policy = %config.clear_policy,
        "starting steamwatchd"
    );

    let source = SteamStatusSource::new(&config.steam)?;
    let channel = DiscordChannel::new(&config.discord)?;
    let bot = channel
        .current_user()
        .await
        .context("discord rejected the bot token")?;
    info!(id = %bot.id, "ready as {}", bot.username);

    let sink = NotificationSink::new(channel).with_clear_policy(config.clear_policy);
    let mut poller = Poller::new(source, sink, config.servers, config.interval);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let signal = async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("shutdown signal received");
                let _ = shutdown_tx.send(true);
            }
            Err(e) => {
                error!(error = %e, "cannot listen for ctrl-c, running until killed");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::join!(poller.run(shutdown_rx), signal);
    info!("steamwatchd stopped");
    Ok(())
}

/// One line of `probe` output.
#[derive(Serialize)]
struct ProbeReport<'a> {
    query: &'a str,
    #[serde(flatten)]
    observation: Observation,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn probe(addresses: Vec<String>, args: ConfigArgs) -> anyhow::Result<()> {
    let raw = args.load()?;
    let addresses = if addresses.is_empty() {
        raw.server_list()
    } else {
        addresses
    };
    if addresses.is_empty() {
        return Err(ConfigError::MissingServers.into());
    }

    let source = SteamStatusSource::new(&raw.steam()?)?;
    for address in &addresses {
        let report = match source.query(address).await {
            Ok(snapshot) => ProbeReport {
                query: address,
                observation: Observation::from(snapshot),
                error: None,
            },
            Err(e) => ProbeReport {
                query: address,
                observation: Observation::Unreachable,
                error: Some(e.to_string()),
            },
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}
