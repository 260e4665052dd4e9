// Herald Bot - Rust Edition
// Publishes announcement-channel messages and decorates them with reactions

mod commands;
mod events;
mod features;
mod models;
mod utils;

use std::env;

use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::features::collect::PendingInputs;
use crate::utils::config::{CONFIG_FILE, CONFIG_FILE_ENV};
use crate::utils::store::ConfigStore;

/// Shared data injected into every command and event handler
#[derive(Debug)]
pub struct Data {
    pub store: ConfigStore,
    pub pending: PendingInputs,
}

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "herald_rs=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let token = env::var("DISCORD_TOKEN").context("DISCORD_TOKEN must be set")?;
    let config_path = env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| CONFIG_FILE.to_string());

    info!("Starting Herald Bot (Rust Edition)...");

    // A corrupt config file must abort startup, never fall back to defaults
    let store = ConfigStore::load(&config_path)
        .with_context(|| format!("failed to load configuration from {config_path}"))?;
    info!("Configuration loaded from {}", config_path);

    // Setup framework
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![commands::set::set()],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(".".into()),
                ..Default::default()
            },
            event_handler: |ctx, event, framework, data| {
                Box::pin(events::handle(ctx, event, framework, data))
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            error!("Command error: {:?}", error);
                            let _ = ctx.say(format!("Error: {}", error)).await;
                        }
                        err => {
                            error!("Framework error: {:?}", err);
                        }
                    }
                })
            },
            ..Default::default()
        })
        .setup(|_ctx, ready, _framework| {
            Box::pin(async move {
                info!("Bot is online as {}", ready.user.name);
                Ok(Data {
                    store,
                    pending: PendingInputs::new(),
                })
            })
        })
        .build();

    // MESSAGE_CONTENT is privileged, enable it in the Discord Dev Portal
    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .context("failed to create client")?;

    // Run with graceful shutdown
    let shard_manager = client.shard_manager.clone();

    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to register Ctrl+C handler");
        info!("Shutting down...");
        shard_manager.shutdown_all().await;
    });

    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
    }

    info!("Goodbye!");
    Ok(())
}
