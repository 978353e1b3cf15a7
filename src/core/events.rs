//! Deferred event queue for widget-to-app communication.
//!
//! Widgets and input handlers emit typed events; the main loop polls
//! the queue once per frame and dispatches through a single handler.
//! FIFO within a frame. Queue is bounded: past [`MAX_QUEUE_SIZE`] the
//! oldest half is evicted so a stalled frame cannot grow it forever.

use std::any::Any;
use std::sync::{Arc, Mutex};

use log::warn;

/// Maximum events in queue before oldest are evicted
const MAX_QUEUE_SIZE: usize = 1000;

/// Marker trait for events. Events must be Send + Sync + 'static.
pub trait Event: Any + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
}

// Blanket impl for all qualifying types
impl<T: Any + Send + Sync + 'static> Event for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Boxed event for queue storage
pub type BoxedEvent = Box<dyn Event>;

/// Shared deferred queue. Clone freely; clones share the same queue.
#[derive(Clone)]
pub struct EventQueue {
    queue: Arc<Mutex<Vec<BoxedEvent>>>,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventQueue").field("queue_len", &self.len()).finish()
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self { queue: Arc::new(Mutex::new(Vec::new())) }
    }

    /// Queue an event for the next poll.
    pub fn emit<E: Event>(&self, event: E) {
        self.emit_boxed(Box::new(event));
    }

    /// Queue a pre-boxed event (for forwarding widget actions).
    pub fn emit_boxed(&self, event: BoxedEvent) {
        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        if queue.len() >= MAX_QUEUE_SIZE {
            let evict_count = queue.len() / 2;
            warn!("event queue full ({} events), evicting oldest {}", queue.len(), evict_count);
            queue.drain(0..evict_count);
        }
        queue.push(event);
    }

    /// Take all queued events, FIFO. Queue is empty afterwards.
    pub fn poll(&self) -> Vec<BoxedEvent> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(|e| e.into_inner()))
    }

    pub fn len(&self) -> usize {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Widget actions result - all actions via events.
#[derive(Default)]
pub struct ActionQueue {
    pub events: Vec<BoxedEvent>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push event to be dispatched.
    pub fn send<E: Event>(&mut self, event: E) {
        self.events.push(Box::new(event));
    }
}

/// Helper: downcast BoxedEvent to concrete type
///
/// IMPORTANT: Must explicitly deref to `dyn Event` before calling `as_any()`.
/// Without explicit deref, the blanket impl `Event for Box<dyn Event>` intercepts
/// the call and returns `&dyn Any` containing `Box<dyn Event>` instead of the
/// original type, causing downcast to always fail.
#[inline]
pub fn downcast_event<E: Event>(event: &BoxedEvent) -> Option<&E> {
    (**event).as_any().downcast_ref::<E>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct TestEvent {
        value: i32,
    }

    #[derive(Clone, Debug)]
    struct OtherEvent {
        msg: String,
    }

    #[test]
    fn test_emit_queues_for_poll() {
        let queue = EventQueue::new();

        queue.emit(TestEvent { value: 1 });
        queue.emit(TestEvent { value: 2 });
        queue.emit(OtherEvent { msg: "hello".into() });

        let events = queue.poll();
        assert_eq!(events.len(), 3);

        // Queue is empty after poll
        assert_eq!(queue.poll().len(), 0);
    }

    #[test]
    fn test_poll_preserves_fifo_order() {
        let queue = EventQueue::new();
        for i in 0..4 {
            queue.emit(TestEvent { value: i });
        }

        let values: Vec<i32> = queue
            .poll()
            .iter()
            .filter_map(|e| downcast_event::<TestEvent>(e).map(|e| e.value))
            .collect();
        assert_eq!(values, [0, 1, 2, 3]);
    }

    #[test]
    fn test_clones_share_one_queue() {
        let queue = EventQueue::new();
        let handle = queue.clone();

        handle.emit(TestEvent { value: 42 });
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.poll().len(), 1);
        assert!(handle.is_empty());
    }

    #[test]
    fn test_downcast() {
        let queue = EventQueue::new();
        queue.emit(TestEvent { value: 42 });

        for ev in queue.poll() {
            if let Some(e) = downcast_event::<TestEvent>(&ev) {
                assert_eq!(e.value, 42);
            } else {
                panic!("downcast failed");
            }
        }
    }

    #[test]
    fn test_action_queue_forwards_events() {
        let mut actions = ActionQueue::new();
        actions.send(TestEvent { value: 7 });
        actions.send(OtherEvent { msg: "x".into() });

        let queue = EventQueue::new();
        for e in actions.events {
            queue.emit_boxed(e);
        }
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_eviction_keeps_newest() {
        let queue = EventQueue::new();
        for i in 0..(MAX_QUEUE_SIZE as i32 + 1) {
            queue.emit(TestEvent { value: i });
        }

        let events = queue.poll();
        assert!(events.len() <= MAX_QUEUE_SIZE / 2 + 2);
        let last = events.last().and_then(|e| downcast_event::<TestEvent>(e).map(|e| e.value));
        assert_eq!(last, Some(MAX_QUEUE_SIZE as i32));
    }
}
