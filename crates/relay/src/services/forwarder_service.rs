use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};

use common::actors::{Actor, ActorType, ControlMessage};

/// Sends every canonical signal rendering to the destination channel. Send
/// failures are logged and skipped; the stored record is the source of truth.
pub struct ForwarderService {
    bot: Bot,
    destination: Recipient,
    outbound_rx: broadcast::Receiver<String>,
}

#[async_trait]
impl Actor for ForwarderService {
    fn name(&self) -> ActorType {
        ActorType::ForwarderActor
    }

    async fn run(&mut self, supervisor_tx: mpsc::Sender<ControlMessage>) -> anyhow::Result<()> {
        let heartbeat_handle = self.spawn_heartbeat(supervisor_tx.clone());

        info!("Starting forwarder service");

        loop {
            match self.outbound_rx.recv().await {
                Ok(text) => {
                    if let Err(e) = self
                        .bot
                        .send_message(self.destination.clone(), text)
                        .await
                    {
                        error!("Failed to forward signal: {}", e);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("Forwarder service lagged: missed {} signals", n);
                }
                Err(_) => {
                    info!("Outbound channel closed. Stopping forwarder.");
                    heartbeat_handle.abort();
                    supervisor_tx
                        .send(ControlMessage::Shutdown(self.name()))
                        .await?;
                    break;
                }
            }
        }
        Ok(())
    }
}

impl ForwarderService {
    pub fn new(bot: Bot, destination: Recipient, outbound_rx: broadcast::Receiver<String>) -> Self {
        Self {
            bot,
            destination,
            outbound_rx,
        }
    }

    /// Interpret a configured destination: a numeric chat id or a @handle.
    pub fn recipient_from(channel: &str) -> Recipient {
        match channel.parse::<i64>() {
            Ok(id) => Recipient::Id(ChatId(id)),
            Err(_) => {
                let handle = channel.trim_start_matches('@');
                Recipient::ChannelUsername(format!("@{handle}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_destination_becomes_chat_id() {
        assert_eq!(
            ForwarderService::recipient_from("-1001234"),
            Recipient::Id(ChatId(-1001234))
        );
    }

    #[test]
    fn textual_destination_becomes_channel_username() {
        assert_eq!(
            ForwarderService::recipient_from("@mychannel"),
            Recipient::ChannelUsername("@mychannel".to_string())
        );
        assert_eq!(
            ForwarderService::recipient_from("mychannel"),
            Recipient::ChannelUsername("@mychannel".to_string())
        );
    }
}
