//! Channel-backed notifier feeding the host's outbound message stream.

use async_trait::async_trait;
use questline_domain::ActorId;
use questline_shared::OutboundMessage;
use tokio::sync::mpsc;

use crate::infrastructure::ports::{NotifierPort, NotifyError};

/// Queues notifications as [`OutboundMessage`]s for a writer task to deliver.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<OutboundMessage>,
}

impl ChannelNotifier {
    pub fn new(sender: mpsc::UnboundedSender<OutboundMessage>) -> Self {
        Self { sender }
    }

    /// Notifier plus the receiving end of its queue.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<OutboundMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }

    /// Shared sender for other outbound traffic (routing decisions).
    pub fn sender(&self) -> mpsc::UnboundedSender<OutboundMessage> {
        self.sender.clone()
    }
}

#[async_trait]
impl NotifierPort for ChannelNotifier {
    async fn notify(&self, actor_id: ActorId, text: String) -> Result<(), NotifyError> {
        self.sender
            .send(OutboundMessage::Notify {
                actor_id: actor_id.to_uuid(),
                text,
            })
            .map_err(|_| NotifyError::ChannelClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queues_notify_message() {
        let (notifier, mut rx) = ChannelNotifier::channel();
        let actor = ActorId::new();

        notifier.notify(actor, "hello".into()).await.unwrap();

        assert_eq!(
            rx.recv().await,
            Some(OutboundMessage::Notify {
                actor_id: actor.to_uuid(),
                text: "hello".into(),
            })
        );
    }

    #[tokio::test]
    async fn closed_channel_is_an_error() {
        let (notifier, rx) = ChannelNotifier::channel();
        drop(rx);
        let err = notifier.notify(ActorId::new(), "lost".into()).await.unwrap_err();
        assert!(matches!(err, NotifyError::ChannelClosed));
    }
}
