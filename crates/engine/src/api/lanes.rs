//! Per-actor event lanes.
//!
//! Events for one actor are handled strictly in arrival order on that actor's
//! own task, while different actors proceed concurrently. A lane is retired
//! after it has handled the actor's leave event, or once it has been idle
//! long enough for a sweep to reclaim it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use questline_shared::{HostEvent, OutboundMessage};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

use super::dispatch::EventDispatcher;

struct Lane {
    sender: mpsc::UnboundedSender<HostEvent>,
    task: JoinHandle<()>,
    last_event: Instant,
}

pub struct ActorLanes {
    dispatcher: Arc<EventDispatcher>,
    outbound: mpsc::UnboundedSender<OutboundMessage>,
    lanes: HashMap<Uuid, Lane>,
    /// Lanes that stopped accepting events but may still be working
    retiring: Vec<JoinHandle<()>>,
}

impl ActorLanes {
    pub fn new(
        dispatcher: Arc<EventDispatcher>,
        outbound: mpsc::UnboundedSender<OutboundMessage>,
    ) -> Self {
        Self {
            dispatcher,
            outbound,
            lanes: HashMap::new(),
            retiring: Vec::new(),
        }
    }

    /// Queue an event on its actor's lane, starting the lane if needed.
    pub fn submit(&mut self, event: HostEvent) {
        let actor_id = event.actor_id();
        let leaving = matches!(event, HostEvent::ActorLeft { .. });

        let lane = self
            .lanes
            .entry(actor_id)
            .or_insert_with(|| spawn_lane(actor_id, self.dispatcher.clone(), self.outbound.clone()));
        lane.last_event = Instant::now();
        if lane.sender.send(event).is_err() {
            tracing::warn!(actor_id = %actor_id, "Actor lane stopped; event dropped");
        }

        if leaving {
            self.retire(actor_id);
        }
        self.retiring.retain(|task| !task.is_finished());
    }

    /// Retire lanes that have not received an event within `idle`.
    ///
    /// Covers actors whose host connection vanished without a leave event.
    /// A later event for the same actor starts a fresh lane.
    pub fn retire_idle(&mut self, idle: Duration) -> usize {
        let stale: Vec<Uuid> = self
            .lanes
            .iter()
            .filter(|(_, lane)| lane.last_event.elapsed() >= idle)
            .map(|(actor_id, _)| *actor_id)
            .collect();
        for actor_id in &stale {
            self.retire(*actor_id);
        }
        self.retiring.retain(|task| !task.is_finished());
        stale.len()
    }

    fn retire(&mut self, actor_id: Uuid) {
        if let Some(lane) = self.lanes.remove(&actor_id) {
            // Closing the sender lets the task exit once the queue is empty.
            drop(lane.sender);
            self.retiring.push(lane.task);
        }
    }

    pub fn active(&self) -> usize {
        self.lanes.len()
    }

    /// Stop accepting events and wait for every queued event to be handled.
    pub async fn shutdown(self) {
        let mut tasks = self.retiring;
        for (_, lane) in self.lanes {
            drop(lane.sender);
            tasks.push(lane.task);
        }

        for task in tasks {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Actor lane task failed");
            }
        }
    }
}

fn spawn_lane(
    actor_id: Uuid,
    dispatcher: Arc<EventDispatcher>,
    outbound: mpsc::UnboundedSender<OutboundMessage>,
) -> Lane {
    let (sender, mut receiver) = mpsc::unbounded_channel::<HostEvent>();

    let task = tokio::spawn(async move {
        tracing::trace!(actor_id = %actor_id, "Actor lane started");
        while let Some(event) = receiver.recv().await {
            let Some(disposition) = dispatcher.dispatch(event).await else {
                continue;
            };
            let routed = OutboundMessage::ChatRouted {
                actor_id,
                disposition,
            };
            if outbound.send(routed).is_err() {
                tracing::warn!(actor_id = %actor_id, "Outbound channel closed; routing decision lost");
            }
        }
        tracing::trace!(actor_id = %actor_id, "Actor lane finished");
    });

    Lane {
        sender,
        task,
        last_event: Instant::now(),
    }
}
