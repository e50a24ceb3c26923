//! Topic-based event bus implementation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{ReevaluationRequest, RegistryEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Registry link lifecycle
    Registry,
    /// Requests to redo arbitration
    Reevaluation,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Registry(RegistryEvent),
    Reevaluation(ReevaluationRequest),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Registry(_) => Topic::Registry,
            Event::Reevaluation(_) => Topic::Reevaluation,
        }
    }
}

struct Channels {
    registry: broadcast::Sender<Event>,
    reevaluation: broadcast::Sender<Event>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Registry => &self.registry,
            Topic::Reevaluation => &self.reevaluation,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks and never fails: events
/// without subscribers are dropped.
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                registry: broadcast::channel(capacity).0,
                reevaluation: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.get(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.get(topic).subscribe()
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.channels.get(topic).receiver_count()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_route_by_topic() {
        let bus = EventBus::new();
        let mut registry = bus.subscribe(Topic::Registry);
        let mut reevaluation = bus.subscribe(Topic::Reevaluation);

        bus.publish(Event::Reevaluation(ReevaluationRequest::RegistryStateChanged));
        bus.publish(Event::Registry(RegistryEvent::Disabled));

        assert_eq!(
            reevaluation.recv().await.expect("event"),
            Event::Reevaluation(ReevaluationRequest::RegistryStateChanged)
        );
        assert_eq!(
            registry.recv().await.expect("event"),
            Event::Registry(RegistryEvent::Disabled)
        );
        assert!(reevaluation.try_recv().is_err());
    }

    #[test]
    fn publish_without_subscribers_is_harmless() {
        let bus = EventBus::with_capacity(0);
        bus.publish(Event::Registry(RegistryEvent::Disabled));
        assert_eq!(bus.subscriber_count(Topic::Registry), 0);
    }
}
