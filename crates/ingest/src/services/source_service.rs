use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use teloxide::prelude::*;
use teloxide::types::Chat;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use common::actors::{Actor, ActorType, ControlMessage};
use common::models::RawMessage;

/// Channels the source actor listens to. Entries are numeric chat ids or
/// @handles; an empty list accepts everything the bot can see.
#[derive(Clone)]
struct AllowedChannels(Arc<Vec<String>>);

/// Long-lived connection to the message source. Turns every channel post (or
/// direct message) from a configured source into a [`RawMessage`] on the
/// broadcast bus; parsing happens downstream.
pub struct SourceService {
    bot: Bot,
    from_channels: Vec<String>,
    message_tx: broadcast::Sender<Arc<RawMessage>>,
}

#[async_trait]
impl Actor for SourceService {
    fn name(&self) -> ActorType {
        ActorType::SourceActor
    }

    async fn run(&mut self, supervisor_tx: mpsc::Sender<ControlMessage>) -> anyhow::Result<()> {
        let heartbeat_handle = self.spawn_heartbeat(supervisor_tx.clone());

        if self.from_channels.is_empty() {
            info!("Source service listening on all visible channels");
        } else {
            info!(
                "Source service listening on {} channel(s)",
                self.from_channels.len()
            );
        }

        let handler = dptree::entry()
            .branch(Update::filter_channel_post().endpoint(on_incoming))
            .branch(Update::filter_message().endpoint(on_incoming));

        Dispatcher::builder(self.bot.clone(), handler)
            .dependencies(dptree::deps![
                self.message_tx.clone(),
                AllowedChannels(Arc::new(self.from_channels.clone()))
            ])
            .build()
            .dispatch()
            .await;

        // The dispatcher only returns on shutdown.
        heartbeat_handle.abort();
        supervisor_tx
            .send(ControlMessage::Shutdown(self.name()))
            .await?;
        Ok(())
    }
}

impl SourceService {
    pub fn new(
        bot: Bot,
        from_channels: Vec<String>,
        message_tx: broadcast::Sender<Arc<RawMessage>>,
    ) -> Self {
        Self {
            bot,
            from_channels,
            message_tx,
        }
    }
}

async fn on_incoming(
    msg: Message,
    message_tx: broadcast::Sender<Arc<RawMessage>>,
    allowed: AllowedChannels,
) -> ResponseResult<()> {
    if !channel_matches(&msg.chat, &allowed.0) {
        debug!("Ignoring message from unconfigured chat {}", msg.chat.id);
        return Ok(());
    }

    let Some(text) = msg.text() else {
        return Ok(());
    };

    let raw = RawMessage {
        text: text.to_string(),
        source_channel: msg.chat.id.to_string(),
        received_at: Utc::now(),
    };

    debug!(
        "New message from {}: {:.80}",
        raw.source_channel, raw.text
    );

    // Nobody listening is fine; the supervisor restarts consumers.
    let _ = message_tx.send(Arc::new(raw));
    Ok(())
}

fn channel_matches(chat: &Chat, allowed: &[String]) -> bool {
    if allowed.is_empty() {
        return true;
    }
    let id = chat.id.to_string();
    allowed.iter().any(|entry| {
        entry == &id
            || chat
                .username()
                .is_some_and(|u| entry.trim_start_matches('@').eq_ignore_ascii_case(u))
    })
}
