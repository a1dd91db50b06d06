//! Trigger fan-out for named gameplay events
//!
//! A minimal in-memory pub/sub bus: trigger zones emit named triggers,
//! interested entities (doors, checkpoints, level streaming) subscribe
//! by name. Delivery is synchronous, at-least-once, to every current
//! subscriber in registration order. Nothing persists across process
//! restart; this is not a wire protocol.

use std::collections::HashMap;

use log::debug;

/// Callback invoked when a trigger fires
pub type TriggerHandler = Box<dyn FnMut()>;

/// Named trigger pub/sub bus
#[derive(Default)]
pub struct TriggerBus {
    subscribers: HashMap<String, Vec<TriggerHandler>>,
}

impl TriggerBus {
    /// Create an empty bus
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe a handler to a named trigger
    ///
    /// Handlers for the same trigger fire in registration order.
    pub fn subscribe(&mut self, trigger: impl Into<String>, handler: TriggerHandler) {
        self.subscribers.entry(trigger.into()).or_default().push(handler);
    }

    /// Fire a named trigger, invoking every current subscriber
    ///
    /// Emitting a trigger nobody subscribed to is a no-op.
    pub fn emit(&mut self, trigger: &str) {
        let Some(handlers) = self.subscribers.get_mut(trigger) else {
            debug!("trigger '{trigger}' fired with no subscribers");
            return;
        };
        for handler in handlers.iter_mut() {
            handler();
        }
    }

    /// Number of subscribers for a named trigger
    #[must_use]
    pub fn subscriber_count(&self, trigger: &str) -> usize {
        self.subscribers.get(trigger).map_or(0, Vec::len)
    }
}
