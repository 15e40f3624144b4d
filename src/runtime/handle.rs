use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::debug;

use crate::{
    codec::CollectionCodec,
    engine::favorites::FavoritesEngine,
    message::Message,
    sync::SettingsSync,
    types::{ChannelId, ChannelKind},
};

use super::events::EngineEvent;

#[derive(Debug)]
pub enum RuntimeError {
    ChannelClosed,
}

/// Host-side lookup from a channel id to its classification.
pub trait ChannelDirectory: Send + 'static {
    fn classify(&self, channel: ChannelId) -> Option<ChannelKind>;
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub cmd_queue_bound: usize,
    pub events_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            cmd_queue_bound: 256,
            events_capacity: 1024,
        }
    }
}

pub struct FavoritesHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<EngineEvent>,
}

impl Clone for FavoritesHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    MessageCreated {
        message: Message,
        optimistic: bool,
        resp: oneshot::Sender<usize>,
    },
    MessageUpdated {
        message: Message,
        resp: oneshot::Sender<usize>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

pub fn spawn_favorites<C, S>(
    engine: FavoritesEngine<C, S>,
    directory: Box<dyn ChannelDirectory>,
    config: RuntimeConfig,
) -> FavoritesHandle
where
    C: CollectionCodec + Send + 'static,
    S: SettingsSync + Send + 'static,
{
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.cmd_queue_bound);
    let (events_tx, _) = broadcast::channel::<EngineEvent>(config.events_capacity);
    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            match cmd {
                Command::MessageCreated {
                    message,
                    optimistic,
                    resp,
                } => {
                    if optimistic {
                        debug!(message = message.id, "dropping optimistic echo");
                        let _ = events_tx_loop.send(EngineEvent::OptimisticIgnored {
                            message: message.id,
                        });
                        let _ = resp.send(0);
                        continue;
                    }
                    let added = scan(&engine, directory.as_ref(), &message);
                    let _ = events_tx_loop.send(EngineEvent::Scanned {
                        message: message.id,
                        added,
                    });
                    let _ = resp.send(added);
                }
                Command::MessageUpdated { message, resp } => {
                    let added = scan(&engine, directory.as_ref(), &message);
                    let _ = events_tx_loop.send(EngineEvent::Scanned {
                        message: message.id,
                        added,
                    });
                    let _ = resp.send(added);
                }
                Command::Shutdown { resp } => {
                    let _ = resp.send(());
                    break;
                }
            }
        }
    });

    FavoritesHandle { cmd_tx, events_tx }
}

fn scan<C, S>(
    engine: &FavoritesEngine<C, S>,
    directory: &dyn ChannelDirectory,
    message: &Message,
) -> usize
where
    C: CollectionCodec,
    S: SettingsSync,
{
    let kind = directory.classify(message.channel_id);
    engine.process_message(message, kind)
}

impl FavoritesHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events_tx.subscribe()
    }

    pub async fn message_created(
        &self,
        message: Message,
        optimistic: bool,
    ) -> Result<usize, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::MessageCreated {
                message,
                optimistic,
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    pub async fn message_updated(&self, message: Message) -> Result<usize, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::MessageUpdated { message, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}
