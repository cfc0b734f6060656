use std::sync::Arc;

use anyhow::bail;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

use common::actors::{Actor, ActorType, ControlMessage};
use common::models::RawMessage;
use storage::repositories::SignalsRepository;

/// Runs the classification pipeline over every inbound message, persists
/// accepted signals and hands their canonical rendering to the forwarder.
/// Rejections are the normal case and only logged at debug.
pub struct ParserService {
    pool: Arc<SqlitePool>,
    message_rx: broadcast::Receiver<Arc<RawMessage>>,
    outbound_tx: broadcast::Sender<String>,
}

#[async_trait]
impl Actor for ParserService {
    fn name(&self) -> ActorType {
        ActorType::ParserActor
    }

    async fn run(&mut self, supervisor_tx: mpsc::Sender<ControlMessage>) -> anyhow::Result<()> {
        let heartbeat_handle = self.spawn_heartbeat(supervisor_tx.clone());

        info!("Starting signal parser service");

        loop {
            match self.message_rx.recv().await {
                Ok(message) => self.handle_message(&message).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("Parser service lagged: missed {} messages", n);
                }
                Err(_) => {
                    heartbeat_handle.abort();
                    supervisor_tx
                        .send(ControlMessage::Error(
                            self.name(),
                            "Message channel closed unexpectedly.".to_string(),
                        ))
                        .await?;
                    bail!("Message channel closed unexpectedly.");
                }
            }
        }
    }
}

impl ParserService {
    pub fn new(
        pool: Arc<SqlitePool>,
        message_rx: broadcast::Receiver<Arc<RawMessage>>,
        outbound_tx: broadcast::Sender<String>,
    ) -> Self {
        Self {
            pool,
            message_rx,
            outbound_tx,
        }
    }

    async fn handle_message(&self, message: &RawMessage) {
        match parser::parse_message(message) {
            Ok(signal) => {
                info!(
                    "Signal parsed: {} {} @ {}",
                    signal.symbol, signal.direction, signal.entry
                );

                match SignalsRepository::insert(&self.pool, &signal).await {
                    Ok(id) => debug!("Signal {} stored as row {}", signal.symbol, id),
                    Err(e) => error!("Failed to store signal: {}", e),
                }

                // No forwarder subscribed is fine; storing already succeeded.
                let _ = self.outbound_tx.send(signal.formatted_text.clone());
            }
            Err(reason) => {
                debug!(
                    "Discarded message from {}: {}",
                    message.source_channel, reason
                );
            }
        }
    }
}
