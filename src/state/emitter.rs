use super::{StateEvent, StateTopic};

/// Something that reacts to dashboard state events.
pub trait StateSubscriber {
    /// Topics this subscriber wants; all of them by default.
    fn wants(&self, _topic: StateTopic) -> bool {
        true
    }

    fn on_event(&mut self, event: &StateEvent<'_>);
}

impl<F> StateSubscriber for F
where
    F: FnMut(&StateEvent<'_>),
{
    fn on_event(&mut self, event: &StateEvent<'_>) {
        self(event)
    }
}

/// Synchronous fan-out to subscribers, in registration order.
#[derive(Default)]
pub struct StateEmitter {
    subscribers: Vec<Box<dyn StateSubscriber>>,
}

impl StateEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn StateSubscriber>) {
        self.subscribers.push(subscriber);
    }

    pub fn emit(&mut self, event: &StateEvent<'_>) {
        let topic = event.topic();
        for subscriber in self.subscribers.iter_mut() {
            if subscriber.wants(topic) {
                subscriber.on_event(event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
