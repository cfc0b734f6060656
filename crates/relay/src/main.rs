use dotenvy::dotenv;
use std::{env, sync::Arc};
use teloxide::Bot;
use tokio::sync::broadcast;
use tracing::{info, warn};

use common::actors::ActorType;
use common::logger;
use common::models::{RawMessage, RelayConfig};
use ingest::services::SourceService;
use storage::db;
use storage::repositories::ConfigRepository;

use crate::actors::Supervisor;
use crate::services::{ForwarderService, ParserService};

mod actors;
mod services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::setup_logger();
    dotenv().ok();
    info!("Signal relay starting up...");

    let db_path = env::var("DATABASE_PATH").unwrap_or_else(|_| "signal_relay.db".to_string());
    let pool = Arc::new(db::connect(&db_path).await?);

    let token = env::var("TELEGRAM_BOT_TOKEN")?;
    let bot = Bot::new(token);

    let config = resolve_config(&pool).await?;

    let (message_tx, _) = broadcast::channel::<Arc<RawMessage>>(1024);
    let (outbound_tx, _) = broadcast::channel::<String>(256);

    let mut supervisor = Supervisor::new();

    let bot_for_source = bot.clone();
    let channels_for_source = config.from_channels.clone();
    let tx_for_source = message_tx.clone();
    supervisor.register_actor(
        ActorType::SourceActor,
        Box::new(move || {
            Box::new(SourceService::new(
                bot_for_source.clone(),
                channels_for_source.clone(),
                tx_for_source.clone(),
            ))
        }),
    );

    let pool_for_parser = pool.clone();
    let message_tx_for_parser = message_tx.clone();
    let outbound_tx_for_parser = outbound_tx.clone();
    supervisor.register_actor(
        ActorType::ParserActor,
        Box::new(move || {
            Box::new(ParserService::new(
                pool_for_parser.clone(),
                message_tx_for_parser.subscribe(),
                outbound_tx_for_parser.clone(),
            ))
        }),
    );

    match config.to_channel.as_deref() {
        Some(to_channel) => {
            let destination = ForwarderService::recipient_from(to_channel);
            let bot_for_forwarder = bot.clone();
            let outbound_tx_for_forwarder = outbound_tx.clone();
            supervisor.register_actor(
                ActorType::ForwarderActor,
                Box::new(move || {
                    Box::new(ForwarderService::new(
                        bot_for_forwarder.clone(),
                        destination.clone(),
                        outbound_tx_for_forwarder.subscribe(),
                    ))
                }),
            );
        }
        None => warn!("No destination channel configured; accepted signals are stored only"),
    }

    supervisor.start().await;
    Ok(())
}

/// Environment wins over the persisted row; whatever is resolved is written
/// back so the next start works without the env vars.
async fn resolve_config(pool: &sqlx::SqlitePool) -> anyhow::Result<RelayConfig> {
    let stored = ConfigRepository::get(pool).await?.unwrap_or_default();

    let from_channels = match env::var("SOURCE_CHANNELS") {
        Ok(raw) => parse_channels(&raw),
        Err(_) => stored.from_channels,
    };
    let to_channel = env::var("DEST_CHANNEL").ok().or(stored.to_channel);

    let config = RelayConfig {
        from_channels,
        to_channel,
    };
    ConfigRepository::upsert(pool, &config).await?;
    Ok(config)
}

fn parse_channels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
