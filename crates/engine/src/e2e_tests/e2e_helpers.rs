//! Test engine harness.

use std::path::PathBuf;
use std::sync::Arc;

use questline_shared::{ChatDisposition, HeldItemData, HostEvent, OutboundMessage};
use tempfile::TempDir;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::api::ActorLanes;
use crate::infrastructure::outbound::ChannelNotifier;
use crate::{App, AppConfig};

/// A running App over its own temp-file database, with its outbound stream captured.
pub struct TestEngine {
    pub app: Arc<App>,
    outbox: mpsc::UnboundedReceiver<OutboundMessage>,
    outbound: mpsc::UnboundedSender<OutboundMessage>,
    _dir: TempDir,
}

impl TestEngine {
    pub async fn start() -> Self {
        Self::start_with(3, None).await
    }

    pub async fn start_with(pool_capacity: usize, locale_dir: Option<PathBuf>) -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = AppConfig {
            database_url: format!("sqlite:{}", dir.path().join("questline.db").display()),
            pool_capacity,
            locale_dir,
            ..AppConfig::default()
        };

        let (notifier, outbox) = ChannelNotifier::channel();
        let outbound = notifier.sender();
        let app = App::startup(config, Arc::new(notifier))
            .await
            .expect("engine starts");

        Self {
            app: Arc::new(app),
            outbox,
            outbound,
            _dir: dir,
        }
    }

    pub async fn send(&self, event: HostEvent) -> Option<ChatDisposition> {
        self.app.dispatcher.dispatch(event).await
    }

    pub async fn command(&self, actor_id: Uuid, args: &[&str]) {
        self.send(HostEvent::Command {
            actor_id,
            args: args.iter().map(|a| a.to_string()).collect(),
        })
        .await;
    }

    pub async fn chat(&self, actor_id: Uuid, text: &str) -> Option<ChatDisposition> {
        self.send(chat_event(actor_id, text, None)).await
    }

    /// Lanes feeding this engine's dispatcher and outbound stream.
    pub fn lanes(&self) -> ActorLanes {
        ActorLanes::new(self.app.dispatcher.clone(), self.outbound.clone())
    }

    /// Everything emitted since the last drain.
    pub fn drain(&mut self) -> Vec<OutboundMessage> {
        let mut messages = Vec::new();
        while let Ok(message) = self.outbox.try_recv() {
            messages.push(message);
        }
        messages
    }

    /// Notification texts for one actor since the last drain; other traffic is discarded.
    pub fn texts_for(&mut self, actor: Uuid) -> Vec<String> {
        notify_texts(&self.drain(), actor)
    }
}

pub fn chat_event(actor_id: Uuid, text: &str, held_item: Option<HeldItemData>) -> HostEvent {
    HostEvent::ChatMessage {
        actor_id,
        text: text.to_string(),
        held_item,
    }
}

pub fn notify_texts(messages: &[OutboundMessage], actor: Uuid) -> Vec<String> {
    messages
        .iter()
        .filter_map(|message| match message {
            OutboundMessage::Notify { actor_id, text } if *actor_id == actor => Some(text.clone()),
            _ => None,
        })
        .collect()
}

pub const AUTHORING_TRANSCRIPT: [&str; 5] = [
    "Input the Quest name:",
    "Input the Quest description:",
    "Input the Quest reward coins (0 if none):",
    "Use the item you're holding as the reward item? (true/false):",
    "Successfully created the quest!",
];
