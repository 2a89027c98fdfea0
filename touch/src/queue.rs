//! A bounded queue of actions, for running the effects of actions somewhere other
//! than the scan loop.

use heapless::spsc::Queue;

use crate::action::{ActionSink, ButtonAction, ButtonId, SliderAction, SliderId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchEvent {
    Button {
        button: ButtonId,
        action: ButtonAction,
    },
    Slider {
        slider: SliderId,
        action: SliderAction,
        position: u16,
    },
}

/// Action sink which queues events. Holds up to `Q - 1` events.
///
/// Events arriving while the queue is full are dropped and counted.
pub struct ActionQueue<const Q: usize> {
    queue: Queue<TouchEvent, Q>,
    dropped: u32,
}

impl<const Q: usize> ActionQueue<Q> {
    pub const fn new() -> Self {
        Self {
            queue: Queue::new(),
            dropped: 0,
        }
    }

    pub fn dequeue(&mut self) -> Option<TouchEvent> {
        self.queue.dequeue()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of events lost to a full queue
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    fn enqueue(&mut self, event: TouchEvent) {
        if self.queue.enqueue(event).is_err() {
            self.dropped = self.dropped.saturating_add(1);
            warn!("Action queue full, dropped {:?}", event);
        }
    }
}

impl<const Q: usize> Default for ActionQueue<Q> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const Q: usize> ActionSink for ActionQueue<Q> {
    fn button_action(&mut self, button: ButtonId, action: ButtonAction) {
        self.enqueue(TouchEvent::Button { button, action });
    }

    fn slider_action(&mut self, slider: SliderId, action: SliderAction, position: u16) {
        self.enqueue(TouchEvent::Slider {
            slider,
            action,
            position,
        });
    }
}
