//! Actions produced by the pipelines, and the sinks that consume them.

/// Index of a button within a [`ButtonPipeline`](crate::button::ButtonPipeline)
pub type ButtonId = usize;
/// Index of a slider within a [`SliderPipeline`](crate::linear::SliderPipeline)
pub type SliderId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    Touchdown,
    /// The button has been held past the hold threshold. Fires once per press.
    ShortHold,
    /// Fires periodically after the short hold while the button stays held
    Repeat,
    LongHold,
    LiftOff,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SliderAction {
    Touchdown,
    /// Position moved by `current - previous` since the last reported position
    Moved(i32),
    LiftOff,
}

/// Receives the actions produced by the button and slider pipelines
pub trait ActionSink {
    fn button_action(&mut self, button: ButtonId, action: ButtonAction);

    fn slider_action(&mut self, slider: SliderId, action: SliderAction, position: u16);
}

impl<T: ActionSink + ?Sized> ActionSink for &mut T {
    fn button_action(&mut self, button: ButtonId, action: ButtonAction) {
        (**self).button_action(button, action)
    }

    fn slider_action(&mut self, slider: SliderId, action: SliderAction, position: u16) {
        (**self).slider_action(slider, action, position)
    }
}

pub type ButtonHandler = fn(ButtonAction);
pub type SliderHandler = fn(SliderAction, u16);

/// Dispatch table with one optional handler per button and per slider.
///
/// Ids without a handler, or outside the table, are ignored.
pub struct ActionTable<const B: usize, const S: usize> {
    pub buttons: [Option<ButtonHandler>; B],
    pub sliders: [Option<SliderHandler>; S],
}

impl<const B: usize, const S: usize> ActionTable<B, S> {
    pub const fn new() -> Self {
        Self {
            buttons: [None; B],
            sliders: [None; S],
        }
    }

    pub const fn button(mut self, button: ButtonId, handler: ButtonHandler) -> Self {
        assert!(button < B);
        self.buttons[button] = Some(handler);
        self
    }

    pub const fn slider(mut self, slider: SliderId, handler: SliderHandler) -> Self {
        assert!(slider < S);
        self.sliders[slider] = Some(handler);
        self
    }
}

impl<const B: usize, const S: usize> Default for ActionTable<B, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const B: usize, const S: usize> ActionSink for ActionTable<B, S> {
    fn button_action(&mut self, button: ButtonId, action: ButtonAction) {
        match self.buttons.get(button) {
            Some(Some(handler)) => handler(action),
            Some(None) => (),
            None => warn!("No button {} in action table", button),
        }
    }

    fn slider_action(&mut self, slider: SliderId, action: SliderAction, position: u16) {
        match self.sliders.get(slider) {
            Some(Some(handler)) => handler(action, position),
            Some(None) => (),
            None => warn!("No slider {} in action table", slider),
        }
    }
}
