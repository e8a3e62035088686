//! Stateful controller combining the reducer with an observer registry.

use crate::config::{BoundsUpdate, ConfigError, QuantityConfig};
use crate::observer::{ObserverRegistry, QuantityListener, SubscriptionId};
use crate::reducer::{reduce_quantity, QuantityAction, QuantityState, QuantityTransition};

/// Bounded purchase quantity driven by stepper buttons and typed text.
///
/// Each interaction runs one reconciliation pass, notifies observers synchronously, and
/// returns the [`QuantityTransition`] so the host can apply its display hint.
#[derive(Debug, Default)]
pub struct QuantityController {
    state: QuantityState,
    observers: ObserverRegistry,
}

impl QuantityController {
    /// Creates a controller positioned at `min`.
    ///
    /// # Errors
    ///
    /// Returns the first rule `config` violates.
    pub fn new(config: QuantityConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            state: QuantityState::new(config)?,
            observers: ObserverRegistry::default(),
        })
    }

    /// Increment button pressed.
    pub fn increment(&mut self) -> QuantityTransition {
        self.dispatch(QuantityAction::Increment)
    }

    /// Decrement button pressed.
    pub fn decrement(&mut self) -> QuantityTransition {
        self.dispatch(QuantityAction::Decrement)
    }

    /// Field text changed; call on every keystroke.
    pub fn text_changed(&mut self, text: impl Into<String>) -> QuantityTransition {
        self.dispatch(QuantityAction::TextChanged { text: text.into() })
    }

    /// Field clicked or focused.
    pub fn focus_input(&mut self) -> QuantityTransition {
        self.dispatch(QuantityAction::FocusInput)
    }

    /// Silently clamps `value` into `[min, limit]` and commits it.
    pub fn set_current(&mut self, value: i32) -> QuantityTransition {
        self.dispatch(QuantityAction::SetCurrent { value })
    }

    /// Applies a configuration change without re-clamping the committed value.
    ///
    /// Call [`Self::set_current`] afterwards to reconcile against tightened bounds.
    ///
    /// # Errors
    ///
    /// Returns the first rule the merged configuration violates; nothing changes.
    pub fn set_bounds(&mut self, update: BoundsUpdate) -> Result<(), ConfigError> {
        self.state.apply_bounds(&update)
    }

    /// Applies `action` and notifies observers of the emitted events.
    pub fn dispatch(&mut self, action: QuantityAction) -> QuantityTransition {
        let transition = reduce_quantity(&mut self.state, action);
        self.observers.notify(&transition.events);
        transition
    }

    /// Registers an observer.
    pub fn subscribe<L>(&mut self, listener: L) -> SubscriptionId
    where
        L: QuantityListener + 'static,
    {
        self.observers.subscribe(listener)
    }

    /// Removes an observer. Returns `false` for unknown handles.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Number shown in the field, or `min` when the field is empty or non-numeric.
    pub fn current_value(&self) -> i32 {
        self.state.current_value()
    }

    /// Last committed value.
    pub fn value(&self) -> i32 {
        self.state.value()
    }

    /// Inventory ceiling.
    pub fn inventory(&self) -> i32 {
        self.state.config().inventory
    }

    /// Purchase cap.
    pub fn max(&self) -> i32 {
        self.state.config().max
    }

    /// Lower bound.
    pub fn min(&self) -> i32 {
        self.state.config().min
    }

    /// Step per button press.
    pub fn step(&self) -> i32 {
        self.state.config().step
    }

    /// Row position forwarded to observers.
    pub fn position(&self) -> i32 {
        self.state.config().position
    }

    /// Whether keyboard edits are accepted.
    pub fn editable(&self) -> bool {
        self.state.config().editable
    }

    /// Effective ceiling, `min(max, inventory)`.
    pub fn limit(&self) -> i32 {
        self.state.config().limit()
    }

    /// Text the host field should show.
    pub fn display_text(&self) -> &str {
        self.state.display_text()
    }

    /// Whether the host should show the text cursor.
    pub fn cursor_visible(&self) -> bool {
        self.state.cursor_visible()
    }

    /// Active configuration.
    pub fn config(&self) -> &QuantityConfig {
        self.state.config()
    }
}
