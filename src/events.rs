//! Agent events and the observer registry.
//!
//! Every pipeline stage reports itself as an [`AgentEvent`]. Events are
//! transient: they exist only to be handed to the currently registered
//! observers, in pipeline order, and are never persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, instrument, warn};

/// The component reporting an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
pub enum AgentName {
    /// The turn orchestrator.
    Orchestrator,
    /// The move validator.
    #[strum(serialize = "ValidationAgent")]
    #[serde(rename = "ValidationAgent")]
    Validation,
    /// The state holder.
    StateManager,
    /// The outcome evaluator.
    #[strum(serialize = "GameLogicAgent")]
    #[serde(rename = "GameLogicAgent")]
    GameLogic,
    /// The minimax search engine.
    #[strum(serialize = "AIAgent")]
    #[serde(rename = "AIAgent")]
    Ai,
}

/// Lifecycle phase of a reported step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    /// The step was attempted.
    Started,
    /// The step completed.
    Succeeded,
    /// The step failed (for example a rejected move).
    Failed,
}

/// One observable step in the turn pipeline.
#[derive(Debug, Clone, Serialize)]
pub struct AgentEvent {
    /// Component that produced the event.
    pub agent: AgentName,
    /// Lifecycle phase.
    pub phase: Phase,
    /// Human-readable description.
    pub message: String,
    /// Optional structured payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
    /// When the event was produced.
    pub timestamp: DateTime<Utc>,
}

impl AgentEvent {
    /// Creates an event stamped with the current time.
    pub fn new(
        agent: AgentName,
        phase: Phase,
        message: impl Into<String>,
        payload: Option<serde_json::Value>,
    ) -> Self {
        Self {
            agent,
            phase,
            message: message.into(),
            payload,
            timestamp: Utc::now(),
        }
    }
}

/// Handle returned by [`Observers::subscribe`], consumed to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Handler = Box<dyn Fn(&AgentEvent) + Send + Sync>;

/// Registry of event observers.
///
/// Emission is fire-and-forget: a panicking observer is logged and
/// skipped, and can never fail the pipeline. Observers are invoked in
/// subscription order.
pub struct Observers {
    handlers: Mutex<BTreeMap<u64, Handler>>,
    next_id: AtomicU64,
}

impl Observers {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Registers an observer and returns its id.
    pub fn subscribe(&self, handler: impl Fn(&AgentEvent) + Send + Sync + 'static) -> SubscriberId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.handlers.lock().unwrap().insert(id, Box::new(handler));
        debug!(id, "Observer subscribed");
        SubscriberId(id)
    }

    /// Removes an observer. Returns false if the id was unknown.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let removed = self.handlers.lock().unwrap().remove(&id.0).is_some();
        debug!(id = id.0, removed, "Observer unsubscribed");
        removed
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.handlers.lock().unwrap().len()
    }

    /// True if no observers are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delivers an event to every registered observer.
    #[instrument(skip(self, event), fields(agent = %event.agent, phase = %event.phase))]
    pub fn emit(&self, event: &AgentEvent) {
        let handlers = self.handlers.lock().unwrap();
        for (id, handler) in handlers.iter() {
            if catch_unwind(AssertUnwindSafe(|| handler(event))).is_err() {
                warn!(id, "Observer panicked while handling event; skipping");
            }
        }
    }
}

impl Default for Observers {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("handlers", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn event() -> AgentEvent {
        AgentEvent::new(AgentName::Orchestrator, Phase::Started, "Turn started", None)
    }

    #[test]
    fn test_subscribe_and_emit() {
        let observers = Observers::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        observers.subscribe(move |e| sink.lock().unwrap().push(e.message.clone()));

        observers.emit(&event());
        assert_eq!(*seen.lock().unwrap(), vec!["Turn started".to_string()]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let observers = Observers::new();
        let seen = Arc::new(Mutex::new(0usize));

        let sink = Arc::clone(&seen);
        let id = observers.subscribe(move |_| *sink.lock().unwrap() += 1);

        observers.emit(&event());
        assert!(observers.unsubscribe(id));
        observers.emit(&event());

        assert_eq!(*seen.lock().unwrap(), 1);
        assert!(!observers.unsubscribe(id));
    }

    #[test]
    fn test_multiple_observers_all_receive() {
        let observers = Observers::new();
        let a = Arc::new(Mutex::new(0usize));
        let b = Arc::new(Mutex::new(0usize));

        let sink = Arc::clone(&a);
        observers.subscribe(move |_| *sink.lock().unwrap() += 1);
        let sink = Arc::clone(&b);
        observers.subscribe(move |_| *sink.lock().unwrap() += 1);

        observers.emit(&event());
        assert_eq!(*a.lock().unwrap(), 1);
        assert_eq!(*b.lock().unwrap(), 1);
    }

    #[test]
    fn test_panicking_observer_is_isolated() {
        let observers = Observers::new();
        let seen = Arc::new(Mutex::new(0usize));

        observers.subscribe(|_| panic!("observer bug"));
        let sink = Arc::clone(&seen);
        observers.subscribe(move |_| *sink.lock().unwrap() += 1);

        observers.emit(&event());
        assert_eq!(*seen.lock().unwrap(), 1);
    }

    #[test]
    fn test_event_wire_shape() {
        let e = AgentEvent::new(
            AgentName::Ai,
            Phase::Succeeded,
            "Optimal move selected",
            Some(serde_json::json!({ "position": 4 })),
        );
        let value = serde_json::to_value(&e).unwrap();
        assert_eq!(value["agent"], serde_json::json!("AIAgent"));
        assert_eq!(value["phase"], serde_json::json!("succeeded"));
        assert_eq!(value["payload"]["position"], serde_json::json!(4));
        assert!(value["timestamp"].is_string());
    }
}
