//! Reconciliation actions, emitted events, display hints, and transition logic.

use serde::{Deserialize, Serialize};

use crate::config::{BoundsUpdate, ConfigError, QuantityConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Which bound rejected (or was touched by) a requested change.
pub enum WarningKind {
    /// Growth is blocked by stock rather than the purchase cap.
    InventoryShortage,
    /// The purchase cap was reached or exceeded.
    MaxExceeded,
    /// The lower bound was reached or undercut.
    MinExceeded,
}

impl WarningKind {
    /// Stable token used for DOM hooks and logs.
    pub const fn token(self) -> &'static str {
        match self {
            Self::InventoryShortage => "inventory-shortage",
            Self::MaxExceeded => "max-exceeded",
            Self::MinExceeded => "min-exceeded",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Notification emitted by a transition, in emission order.
pub enum QuantityEvent {
    /// The committed value changed (or was re-committed by a forced reconciliation).
    ValueChanged {
        /// New committed value.
        value: i32,
        /// Row position of the emitting stepper.
        position: i32,
    },
    /// A boundary was hit.
    Warning {
        /// Bound category.
        kind: WarningKind,
        /// The bound value that was hit (`min`, `max`, or `inventory`).
        bound: i32,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Tint the host should apply to a stepper button icon.
pub enum IconTint {
    /// Regular enabled appearance.
    #[default]
    Neutral,
    /// Boundary reached; the button would have no effect.
    Warning,
}

impl IconTint {
    /// Stable token used for DOM hooks.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Presentation changes the host applies after a transition.
///
/// `None` fields mean "leave as is".
pub struct DisplayHint {
    /// Replacement text for the input field.
    pub text: Option<String>,
    /// New cursor visibility.
    pub cursor_visible: Option<bool>,
    /// Move the caret to the end of the text.
    pub cursor_at_end: bool,
    /// New tint for the increment button.
    pub increment_tint: Option<IconTint>,
    /// New tint for the decrement button.
    pub decrement_tint: Option<IconTint>,
    /// The field now shows a number other than the committed value.
    pub diverged: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Result of applying one [`QuantityAction`].
pub struct QuantityTransition {
    /// Events to deliver to observers, in order.
    pub events: Vec<QuantityEvent>,
    /// Presentation changes for the host.
    pub hint: DisplayHint,
}

impl QuantityTransition {
    /// True when the action changed nothing observable.
    pub fn is_noop(&self) -> bool {
        self.events.is_empty() && self.hint == DisplayHint::default()
    }

    /// Value carried by the last value-changed event, if any.
    pub fn changed_value(&self) -> Option<i32> {
        self.events.iter().rev().find_map(|event| match event {
            QuantityEvent::ValueChanged { value, .. } => Some(*value),
            QuantityEvent::Warning { .. } => None,
        })
    }

    /// Kind and bound of the last warning event, if any.
    pub fn warning(&self) -> Option<(WarningKind, i32)> {
        self.events.iter().rev().find_map(|event| match event {
            QuantityEvent::Warning { kind, bound } => Some((*kind, *bound)),
            QuantityEvent::ValueChanged { .. } => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Interaction inputs accepted by [`reduce_quantity`].
pub enum QuantityAction {
    /// Increment button pressed.
    Increment,
    /// Decrement button pressed.
    Decrement,
    /// The input field text changed (fires per keystroke).
    TextChanged {
        /// Raw field contents.
        text: String,
    },
    /// The input field was clicked or focused.
    FocusInput,
    /// Programmatic, silent assignment clamped into the current bounds.
    SetCurrent {
        /// Requested value.
        value: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuantityStateSnapshot")]
/// Committed quantity plus the display state mirrored to the host.
///
/// Deserialized snapshots are validated and their value clamped into the bounds.
pub struct QuantityState {
    config: QuantityConfig,
    value: i32,
    display_text: String,
    cursor_visible: bool,
}

#[derive(Deserialize)]
struct QuantityStateSnapshot {
    config: QuantityConfig,
    value: i32,
    display_text: String,
    #[serde(default)]
    cursor_visible: bool,
}

impl TryFrom<QuantityStateSnapshot> for QuantityState {
    type Error = ConfigError;

    fn try_from(snapshot: QuantityStateSnapshot) -> Result<Self, Self::Error> {
        let mut state = Self::new(snapshot.config)?;
        state.value = clamp_into(&state.config, snapshot.value);
        state.display_text = snapshot.display_text;
        state.cursor_visible = snapshot.cursor_visible;
        Ok(state)
    }
}

impl Default for QuantityState {
    fn default() -> Self {
        let config = QuantityConfig::default();
        Self {
            value: config.min,
            display_text: config.min.to_string(),
            config,
            cursor_visible: false,
        }
    }
}

impl QuantityState {
    /// Builds a state at `min` (clamped into the ceiling) for a validated config.
    ///
    /// # Errors
    ///
    /// Returns the first rule `config` violates.
    pub fn new(config: QuantityConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let value = clamp_into(&config, config.min);
        Ok(Self {
            config,
            value,
            display_text: value.to_string(),
            cursor_visible: false,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &QuantityConfig {
        &self.config
    }

    /// Last committed value.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Text the host field currently shows.
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    /// Whether the host should show the text cursor.
    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Number currently shown, falling back to `min` for empty or non-numeric text.
    pub fn current_value(&self) -> i32 {
        parse_count(&self.display_text).unwrap_or(self.config.min)
    }

    /// Replaces the configuration without touching the committed value.
    ///
    /// # Errors
    ///
    /// Returns the first rule the merged configuration violates; the state is unchanged.
    pub fn apply_bounds(&mut self, update: &BoundsUpdate) -> Result<(), ConfigError> {
        self.config = self.config.merged(update)?;
        Ok(())
    }
}

/// Applies an interaction to `state` and collects the resulting events and display hint.
///
/// This is the only place the committed value moves; [`QuantityState::apply_bounds`]
/// changes configuration lazily and never re-clamps.
pub fn reduce_quantity(state: &mut QuantityState, action: QuantityAction) -> QuantityTransition {
    let mut transition = QuantityTransition::default();
    match action {
        QuantityAction::Increment => increment(state, &mut transition),
        QuantityAction::Decrement => decrement(state, &mut transition),
        QuantityAction::TextChanged { text } => text_changed(state, &mut transition, text),
        QuantityAction::FocusInput => {
            if state.config.editable {
                state.cursor_visible = true;
                transition.hint.cursor_visible = Some(true);
                transition.hint.cursor_at_end = true;
            }
        }
        QuantityAction::SetCurrent { value } => {
            let next = clamp_into(&state.config, value);
            let text = next.to_string();
            if next != state.value || text != state.display_text {
                state.value = next;
                state.display_text = text.clone();
                transition.hint.text = Some(text);
                transition.hint.cursor_at_end = true;
            }
        }
    }
    transition
}

fn increment(state: &mut QuantityState, transition: &mut QuantityTransition) {
    let limit = state.config.limit();
    if state.value < limit {
        let next = state.value.saturating_add(state.config.step).min(limit);
        commit_step(state, transition, next);
    } else if state.config.inventory_constrained() {
        warn_inventory(state, transition);
    } else {
        warn_max(state, transition);
    }
}

fn decrement(state: &mut QuantityState, transition: &mut QuantityTransition) {
    let min = state.config.min;
    if state.value > min {
        let next = state.value.saturating_sub(state.config.step).max(min);
        commit_step(state, transition, next);
    } else {
        warn_min(state, transition);
    }
}

fn text_changed(state: &mut QuantityState, transition: &mut QuantityTransition, text: String) {
    if !state.config.editable {
        return;
    }
    state.display_text = text;

    let min = state.config.min;
    let count = match parse_count(&state.display_text) {
        Some(count) => count,
        None if state.value != min => {
            force_min(state, transition);
            return;
        }
        None => min,
    };

    if count < min {
        force_min(state, transition);
        return;
    }

    let max = state.config.max;
    if count > state.config.limit() {
        if state.config.inventory_constrained() {
            warn_inventory(state, transition);
        } else {
            warn_max(state, transition);
        }
    } else if count == min {
        warn_min(state, transition);
    } else if count == max {
        warn_max(state, transition);
    } else {
        state.value = count;
        push_value_changed(state, transition);
        transition.hint.increment_tint = Some(IconTint::Neutral);
        transition.hint.decrement_tint = Some(IconTint::Neutral);
    }

    transition.hint.diverged = state.current_value() != state.value;
}

fn commit_step(state: &mut QuantityState, transition: &mut QuantityTransition, next: i32) {
    state.value = next;
    state.cursor_visible = false;
    state.display_text = next.to_string();
    transition.hint.text = Some(state.display_text.clone());
    transition.hint.cursor_visible = Some(false);
    push_value_changed(state, transition);
}

fn force_min(state: &mut QuantityState, transition: &mut QuantityTransition) {
    state.value = state.config.min;
    state.display_text = state.value.to_string();
    transition.hint.text = Some(state.display_text.clone());
    transition.hint.cursor_at_end = true;
    push_value_changed(state, transition);
}

fn push_value_changed(state: &QuantityState, transition: &mut QuantityTransition) {
    transition.events.push(QuantityEvent::ValueChanged {
        value: state.value,
        position: state.config.position,
    });
}

fn warn_min(state: &QuantityState, transition: &mut QuantityTransition) {
    transition.hint.decrement_tint = Some(IconTint::Warning);
    transition.events.push(QuantityEvent::Warning {
        kind: WarningKind::MinExceeded,
        bound: state.config.min,
    });
}

fn warn_max(state: &QuantityState, transition: &mut QuantityTransition) {
    transition.hint.increment_tint = Some(IconTint::Warning);
    transition.events.push(QuantityEvent::Warning {
        kind: WarningKind::MaxExceeded,
        bound: state.config.max,
    });
}

fn warn_inventory(state: &QuantityState, transition: &mut QuantityTransition) {
    transition.events.push(QuantityEvent::Warning {
        kind: WarningKind::InventoryShortage,
        bound: state.config.inventory,
    });
}

// Written as max-of-min so an inventory below `min` still settles on `min`.
fn clamp_into(config: &QuantityConfig, value: i32) -> i32 {
    config.min.max(config.limit().min(value))
}

fn parse_count(text: &str) -> Option<i32> {
    if text.is_empty() {
        return None;
    }
    text.parse::<i32>().ok()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn state_with(config: QuantityConfig, value: i32) -> QuantityState {
        let mut state = QuantityState::new(config).expect("valid config");
        reduce_quantity(&mut state, QuantityAction::SetCurrent { value });
        state
    }

    fn bounds(min: i32, max: i32, inventory: i32, step: i32) -> QuantityConfig {
        QuantityConfig {
            min,
            max,
            inventory,
            step,
            position: 3,
            editable: true,
        }
    }

    fn typed(state: &mut QuantityState, text: &str) -> QuantityTransition {
        reduce_quantity(
            state,
            QuantityAction::TextChanged {
                text: text.to_string(),
            },
        )
    }

    #[test]
    fn new_state_starts_at_min() {
        let state = QuantityState::new(bounds(2, 10, 10, 1)).expect("valid");
        assert_eq!(state.value(), 2);
        assert_eq!(state.display_text(), "2");
        assert!(!state.cursor_visible());
    }

    #[test]
    fn new_state_rejects_invalid_config() {
        let err = QuantityState::new(bounds(0, 10, 10, 0)).expect_err("should fail");
        assert_eq!(err, ConfigError::NonPositiveStep(0));
    }

    #[test]
    fn increment_steps_and_hides_cursor() {
        let mut state = state_with(bounds(0, 10, 10, 2), 8);
        reduce_quantity(&mut state, QuantityAction::FocusInput);
        assert!(state.cursor_visible());

        let transition = reduce_quantity(&mut state, QuantityAction::Increment);
        assert_eq!(state.value(), 10);
        assert_eq!(
            transition.events,
            vec![QuantityEvent::ValueChanged {
                value: 10,
                position: 3
            }]
        );
        assert_eq!(transition.hint.text.as_deref(), Some("10"));
        assert_eq!(transition.hint.cursor_visible, Some(false));
        assert!(!state.cursor_visible());
    }

    #[test]
    fn increment_at_cap_warns_max_and_tints_increment() {
        let mut state = state_with(bounds(0, 10, 10, 2), 10);
        let transition = reduce_quantity(&mut state, QuantityAction::Increment);
        assert_eq!(state.value(), 10);
        assert_eq!(transition.warning(), Some((WarningKind::MaxExceeded, 10)));
        assert_eq!(transition.hint.increment_tint, Some(IconTint::Warning));
        assert_eq!(transition.hint.text, None);
    }

    #[test]
    fn increment_prefers_inventory_shortage_when_stock_is_lower() {
        let mut state = state_with(bounds(0, 99, 5, 1), 5);
        let transition = reduce_quantity(&mut state, QuantityAction::Increment);
        assert_eq!(state.value(), 5);
        assert_eq!(
            transition.events,
            vec![QuantityEvent::Warning {
                kind: WarningKind::InventoryShortage,
                bound: 5
            }]
        );
        assert_eq!(transition.hint.increment_tint, None);
    }

    #[test]
    fn increment_clamps_uneven_step_to_ceiling() {
        let mut state = state_with(bounds(0, 10, 10, 4), 8);
        let transition = reduce_quantity(&mut state, QuantityAction::Increment);
        assert_eq!(state.value(), 10);
        assert_eq!(transition.changed_value(), Some(10));
    }

    #[test]
    fn increment_saturates_near_integer_limit() {
        let mut state = state_with(bounds(0, i32::MAX, i32::MAX, i32::MAX), i32::MAX - 1);
        reduce_quantity(&mut state, QuantityAction::Increment);
        assert_eq!(state.value(), i32::MAX);
    }

    #[test]
    fn decrement_steps_down_and_clamps_to_min() {
        let mut state = state_with(bounds(1, 10, 10, 3), 3);
        let transition = reduce_quantity(&mut state, QuantityAction::Decrement);
        assert_eq!(state.value(), 1);
        assert_eq!(transition.changed_value(), Some(1));
        assert_eq!(state.display_text(), "1");
    }

    #[test]
    fn decrement_at_floor_warns_min() {
        let mut state = state_with(bounds(0, 10, 10, 1), 0);
        let transition = reduce_quantity(&mut state, QuantityAction::Decrement);
        assert_eq!(state.value(), 0);
        assert_eq!(transition.warning(), Some((WarningKind::MinExceeded, 0)));
        assert_eq!(transition.hint.decrement_tint, Some(IconTint::Warning));
    }

    #[test]
    fn decrement_ignores_inventory() {
        let mut state = state_with(bounds(0, 10, 10, 1), 8);
        state
            .apply_bounds(&BoundsUpdate::inventory(2))
            .expect("valid update");
        let transition = reduce_quantity(&mut state, QuantityAction::Decrement);
        assert_eq!(state.value(), 7);
        assert_eq!(transition.warning(), None);
    }

    #[test]
    fn typed_value_in_range_commits_and_resets_tints() {
        let mut state = state_with(bounds(0, 99, 99, 1), 1);
        let transition = typed(&mut state, "42");
        assert_eq!(state.value(), 42);
        assert_eq!(transition.changed_value(), Some(42));
        assert_eq!(transition.hint.increment_tint, Some(IconTint::Neutral));
        assert_eq!(transition.hint.decrement_tint, Some(IconTint::Neutral));
        assert!(!transition.hint.diverged);
        assert_eq!(transition.hint.text, None);
    }

    #[test]
    fn typed_value_below_min_forces_min() {
        let mut state = state_with(bounds(5, 99, 99, 1), 7);
        let transition = typed(&mut state, "2");
        assert_eq!(state.value(), 5);
        assert_eq!(state.display_text(), "5");
        assert_eq!(
            transition.events,
            vec![QuantityEvent::ValueChanged {
                value: 5,
                position: 3
            }]
        );
        assert_eq!(transition.hint.text.as_deref(), Some("5"));
        assert!(transition.hint.cursor_at_end);
    }

    #[test]
    fn typed_value_above_ceiling_is_rejected_but_stays_visible() {
        let mut state = state_with(bounds(0, 99, 99, 1), 4);
        let transition = typed(&mut state, "150");
        assert_eq!(state.value(), 4);
        assert_eq!(state.display_text(), "150");
        assert_eq!(state.current_value(), 150);
        assert_eq!(transition.warning(), Some((WarningKind::MaxExceeded, 99)));
        assert!(transition.hint.diverged);
    }

    #[test]
    fn typed_value_above_inventory_reports_shortage() {
        let mut state = state_with(bounds(0, 99, 5, 1), 1);
        let transition = typed(&mut state, "6");
        assert_eq!(state.value(), 1);
        assert_eq!(
            transition.warning(),
            Some((WarningKind::InventoryShortage, 5))
        );
    }

    #[test]
    fn typed_value_exactly_at_max_still_warns() {
        let mut state = state_with(bounds(0, 99, 99, 1), 1);
        let transition = typed(&mut state, "99");
        assert_eq!(state.value(), 1);
        assert_eq!(
            transition.events,
            vec![QuantityEvent::Warning {
                kind: WarningKind::MaxExceeded,
                bound: 99
            }]
        );
        assert_eq!(transition.hint.increment_tint, Some(IconTint::Warning));
    }

    #[test]
    fn typed_value_at_inventory_ceiling_below_max_commits() {
        let mut state = state_with(bounds(0, 99, 5, 1), 1);
        let transition = typed(&mut state, "5");
        assert_eq!(state.value(), 5);
        assert_eq!(transition.changed_value(), Some(5));
    }

    #[test]
    fn typed_value_exactly_at_min_warns_without_committing() {
        let mut state = state_with(bounds(1, 99, 99, 1), 4);
        let transition = typed(&mut state, "1");
        assert_eq!(state.value(), 4);
        assert_eq!(transition.warning(), Some((WarningKind::MinExceeded, 1)));
        assert!(transition.hint.diverged);
    }

    #[test]
    fn malformed_text_falls_back_to_min() {
        for text in ["", "abc", "12x", "99999999999"] {
            let mut state = state_with(bounds(0, 99, 99, 1), 6);
            let transition = typed(&mut state, text);
            assert_eq!(state.value(), 0, "text {text:?}");
            assert_eq!(state.display_text(), "0", "text {text:?}");
            assert_eq!(transition.changed_value(), Some(0), "text {text:?}");
        }
    }

    #[test]
    fn empty_text_at_min_only_touches_the_boundary() {
        let mut state = state_with(bounds(0, 99, 99, 1), 0);
        let transition = typed(&mut state, "");
        assert_eq!(state.value(), 0);
        assert_eq!(state.display_text(), "");
        assert_eq!(state.current_value(), 0);
        assert_eq!(transition.warning(), Some((WarningKind::MinExceeded, 0)));
        assert!(!transition.hint.diverged);
    }

    #[test]
    fn non_editable_state_ignores_text_and_focus() {
        let mut config = bounds(0, 99, 99, 1);
        config.editable = false;
        let mut state = state_with(config, 3);

        assert!(typed(&mut state, "50").is_noop());
        assert!(reduce_quantity(&mut state, QuantityAction::FocusInput).is_noop());
        assert_eq!(state.value(), 3);
        assert_eq!(state.display_text(), "3");
        assert!(!state.cursor_visible());
    }

    #[test]
    fn set_current_clamps_silently() {
        let mut state = state_with(bounds(2, 10, 6, 1), 2);

        let transition = reduce_quantity(&mut state, QuantityAction::SetCurrent { value: 50 });
        assert_eq!(state.value(), 6);
        assert!(transition.events.is_empty());
        assert_eq!(transition.hint.text.as_deref(), Some("6"));

        reduce_quantity(&mut state, QuantityAction::SetCurrent { value: -4 });
        assert_eq!(state.value(), 2);
    }

    #[test]
    fn set_current_with_current_value_is_noop() {
        let mut state = state_with(bounds(0, 10, 10, 1), 4);
        let transition = reduce_quantity(&mut state, QuantityAction::SetCurrent { value: 4 });
        assert!(transition.is_noop());
    }

    #[test]
    fn set_current_resyncs_diverged_display() {
        let mut state = state_with(bounds(0, 10, 10, 1), 4);
        typed(&mut state, "40");
        let transition = reduce_quantity(&mut state, QuantityAction::SetCurrent { value: 4 });
        assert!(transition.events.is_empty());
        assert_eq!(transition.hint.text.as_deref(), Some("4"));
        assert_eq!(state.current_value(), 4);
    }

    #[test]
    fn set_current_with_inventory_below_min_settles_on_min() {
        let mut state = state_with(bounds(3, 10, 1, 1), 3);
        reduce_quantity(&mut state, QuantityAction::SetCurrent { value: 8 });
        assert_eq!(state.value(), 3);
    }

    #[test]
    fn apply_bounds_is_lazy() {
        let mut state = state_with(bounds(0, 99, 99, 1), 40);
        state.apply_bounds(&BoundsUpdate::max(10)).expect("valid");
        assert_eq!(state.value(), 40);
        assert_eq!(state.config().limit(), 10);

        let transition = reduce_quantity(&mut state, QuantityAction::Increment);
        assert_eq!(transition.warning(), Some((WarningKind::MaxExceeded, 10)));

        reduce_quantity(&mut state, QuantityAction::SetCurrent { value: 40 });
        assert_eq!(state.value(), 10);
    }

    #[test]
    fn apply_bounds_rejects_and_keeps_previous_config() {
        let mut state = state_with(bounds(0, 10, 10, 1), 5);
        let before = *state.config();
        let err = state
            .apply_bounds(&BoundsUpdate {
                step: Some(0),
                ..BoundsUpdate::default()
            })
            .expect_err("should fail");
        assert_eq!(err, ConfigError::NonPositiveStep(0));
        assert_eq!(*state.config(), before);
    }

    #[test]
    fn warning_tokens_are_kebab_case() {
        assert_eq!(WarningKind::InventoryShortage.token(), "inventory-shortage");
        assert_eq!(
            serde_json::to_string(&WarningKind::MaxExceeded).expect("serialize"),
            "\"max-exceeded\""
        );
        assert_eq!(IconTint::Warning.token(), "warning");
    }

    #[test]
    fn deserialized_state_is_validated() {
        let err = serde_json::from_str::<QuantityState>(
            r#"{"config":{"step":0},"value":3,"display_text":"3"}"#,
        )
        .expect_err("zero step should be rejected");
        assert!(err.to_string().contains("step"), "{err}");

        let err = serde_json::from_str::<QuantityState>(
            r#"{"config":{"min":10,"max":2},"value":3,"display_text":"3"}"#,
        )
        .expect_err("inverted bounds should be rejected");
        assert!(err.to_string().contains("max"), "{err}");
    }

    #[test]
    fn deserialized_value_is_clamped_into_bounds() {
        let state: QuantityState = serde_json::from_str(
            r#"{"config":{"min":1,"max":99,"inventory":99},"value":500,"display_text":"500","cursor_visible":true}"#,
        )
        .expect("valid snapshot");
        assert_eq!(state.value(), 99);
        assert_eq!(state.display_text(), "500");
        assert!(state.cursor_visible());

        let restored: QuantityState =
            serde_json::from_str(&serde_json::to_string(&state).expect("serialize"))
                .expect("deserialize");
        assert_eq!(restored, state);
    }
}
