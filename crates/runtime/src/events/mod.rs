//! Topic-based event bus for runtime events.
//!
//! Registry lifecycle changes and re-evaluation requests are published to
//! separate topics, and consumers subscribe only to the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{ModSettingChange, ReevaluationRequest, RegistryEvent, SettingChangeKind};
