use std::{collections::HashMap, time::Duration};

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant},
};
use tracing::{error, warn};

use common::actors::{Actor, ActorType, ControlMessage};

type ActorFactory = Box<dyn Fn() -> Box<dyn Actor> + Send + Sync>;

/// How long an actor may go without a heartbeat before it is respawned.
const HEARTBEAT_TIMEOUT: Duration = Duration::from_secs(3);
const SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Owns every long-lived service. Actors heartbeat over a control channel; one
/// that goes silent past [`HEARTBEAT_TIMEOUT`] is aborted and respawned from
/// its factory. A graceful shutdown removes the actor for good, and once the
/// last one is gone the supervisor itself returns.
pub struct Supervisor {
    actor_factories: HashMap<ActorType, ActorFactory>,
    pulses: HashMap<ActorType, Instant>,
    handles: HashMap<ActorType, JoinHandle<()>>,
}

impl Supervisor {
    pub fn new() -> Self {
        Self {
            actor_factories: HashMap::new(),
            pulses: HashMap::new(),
            handles: HashMap::new(),
        }
    }

    pub fn register_actor(&mut self, actor_type: ActorType, factory: ActorFactory) {
        self.actor_factories.insert(actor_type, factory);
    }

    pub async fn start(&mut self) {
        let mut sweep = time::interval(SWEEP_INTERVAL);

        let (supervisor_tx, mut supervisor_rx) = mpsc::channel::<ControlMessage>(512);

        let registered: Vec<ActorType> = self.actor_factories.keys().copied().collect();
        for actor_type in registered {
            self.spawn_actor(actor_type, supervisor_tx.clone());
        }

        loop {
            tokio::select! {
                Some(msg) = supervisor_rx.recv() => {
                    match msg {
                        ControlMessage::Heartbeat(actor_type) => {
                            self.pulses.insert(actor_type, Instant::now());
                        }
                        ControlMessage::Shutdown(actor_type) => {
                            warn!("{:?} shut down; it will not be respawned.", actor_type);
                            self.pulses.remove(&actor_type);
                            if let Some(handle) = self.handles.remove(&actor_type) {
                                handle.abort();
                            }
                            if self.handles.is_empty() {
                                warn!("No actors left to supervise, stopping.");
                                return;
                            }
                        }
                        ControlMessage::Error(actor_type, error_msg) => {
                            error!("{:?} reported: {}", actor_type, error_msg);
                            self.pulses.insert(actor_type, Instant::now());
                        }
                    }
                }

                _ = sweep.tick() => {
                    let silent: Vec<ActorType> = self
                        .pulses
                        .iter()
                        .filter(|(_, pulse)| pulse.elapsed() > HEARTBEAT_TIMEOUT)
                        .map(|(&actor_type, _)| actor_type)
                        .collect();

                    for actor_type in silent {
                        warn!("{:?} missed its heartbeat window, respawning.", actor_type);
                        if let Some(handle) = self.handles.remove(&actor_type) {
                            handle.abort();
                        }
                        self.spawn_actor(actor_type, supervisor_tx.clone());
                    }
                }
            }
        }
    }

    fn spawn_actor(&mut self, actor_type: ActorType, tx: mpsc::Sender<ControlMessage>) {
        let mut actor = self.actor_factories[&actor_type]();
        let handle = tokio::spawn(async move {
            if let Err(e) = actor.run(tx).await {
                error!("{:?} stopped with error: {}", actor_type, e);
            }
        });
        self.handles.insert(actor_type, handle);
        self.pulses.insert(actor_type, Instant::now());
    }
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::time::timeout;

    struct OneShot;

    #[async_trait]
    impl Actor for OneShot {
        fn name(&self) -> ActorType {
            ActorType::ParserActor
        }

        async fn run(
            &mut self,
            supervisor_tx: mpsc::Sender<ControlMessage>,
        ) -> anyhow::Result<()> {
            supervisor_tx
                .send(ControlMessage::Shutdown(self.name()))
                .await?;
            Ok(())
        }
    }

    #[tokio::test]
    async fn start_returns_once_every_actor_has_shut_down() {
        let mut supervisor = Supervisor::new();
        supervisor.register_actor(ActorType::ParserActor, Box::new(|| Box::new(OneShot)));

        timeout(Duration::from_secs(5), supervisor.start())
            .await
            .expect("supervisor should stop after the last graceful shutdown");
    }
}
