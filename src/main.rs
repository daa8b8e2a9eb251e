use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use anyhow::Context as AnyhowContext;
use serenity::{
    Client,
    all::{Command, Context, GuildId, Http, Interaction, Ready},
    async_trait,
    model::prelude::GatewayIntents,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod constant;
mod currency;
mod gemini;
mod lingva;
mod util;

use commands::CommandRegistry;
use config::Configuration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Configuration::load()?;
    let discord_token = config
        .authentication
        .discord_token
        .as_deref()
        .context("Expected authentication.discord_token to be filled in config")?;
    let gemini_api_key = config
        .authentication
        .gemini_api_key
        .clone()
        .context("Expected authentication.gemini_api_key to be filled in config")?;

    let publish_scope = if std::env::args().any(|arg| arg == "--global") {
        PublishScope::Global
    } else {
        let guild_id = config
            .discord
            .guild_id
            .context("Expected discord.guild_id to be filled in config (or pass --global)")?;
        PublishScope::Guild(GuildId::new(guild_id))
    };

    let http_client = reqwest::Client::new();
    let gemini = Arc::new(gemini::GeminiClient::new(
        http_client.clone(),
        gemini_api_key,
    ));
    let currency_client = Arc::new(currency::CurrencyClient::new(http_client.clone()));
    let lingva = Arc::new(lingva::LingvaClient::new(http_client));

    let registry = CommandRegistry::new(commands::all(gemini, currency_client, lingva));

    let mut client = Client::builder(discord_token, GatewayIntents::default())
        .event_handler(Handler {
            registry: Arc::new(registry),
            publish_scope,
            published: AtomicBool::new(false),
        })
        .await
        .context("Error creating client")?;

    client.start().await?;

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Where the descriptor set gets published on startup.
enum PublishScope {
    /// Visible everywhere, subject to Discord's propagation delay.
    Global,
    /// Visible immediately in one guild, for fast iteration.
    Guild(GuildId),
}

struct Handler {
    registry: Arc<CommandRegistry>,
    publish_scope: PublishScope,
    published: AtomicBool,
}

#[async_trait]
impl serenity::all::EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("{} is connected", ready.user.name);

        // The gateway re-emits ready after reconnects; publish only once.
        if self.published.swap(true, Ordering::SeqCst) {
            return;
        }

        // A failed publish is not fatal: descriptors registered by an earlier
        // process run keep dispatching.
        match publish_commands(&ctx.http, &self.publish_scope, self.registry.descriptors()).await {
            Ok(()) => info!(
                "commands published: {}",
                self.registry.names().join(", ")
            ),
            Err(err) => error!("failed to publish command descriptors: {err:#}"),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        // Anything that is not a command invocation is not ours to answer.
        let Interaction::Command(cmd) = interaction else {
            return;
        };

        let Some(handler) = self.registry.get(&cmd.data.name) else {
            if let Err(err) =
                util::reply(&ctx.http, &cmd, constant::reply::COMMAND_NOT_FOUND).await
            {
                error!("failed to send not-found reply: {err:#}");
            }
            return;
        };

        if let Err(err) = handler.run(&ctx.http, &cmd).await {
            error!("error executing command {}: {err:#}", cmd.data.name);

            // Handlers reply with their own failure text before erroring;
            // this path only fires when one failed outside its own catch.
            if let Err(err) =
                util::create_or_edit(&ctx.http, &cmd, constant::reply::GENERIC_COMMAND_ERROR).await
            {
                error!("failed to send error reply: {err:#}");
            }
        }
    }
}

async fn publish_commands(
    http: &Http,
    scope: &PublishScope,
    descriptors: Vec<serenity::all::CreateCommand>,
) -> anyhow::Result<()> {
    match scope {
        PublishScope::Global => {
            Command::set_global_commands(http, descriptors).await?;
        }
        PublishScope::Guild(guild_id) => {
            guild_id.set_commands(http, descriptors).await?;
        }
    }
    Ok(())
}
