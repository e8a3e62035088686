//! Quantity stepper primitive hosting a headless [`QuantityController`].

use quantity_core::{
    listener_fn, BoundsUpdate, DisplayHint, IconTint, ObserverRegistry, QuantityAction,
    QuantityConfig, QuantityController, QuantityEvent, WarningKind,
};

use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Presentation state the stepper mirrors from its controller.
pub struct StepperDisplay {
    /// Field contents.
    pub text: String,
    /// Bumped whenever the controller rewrites the field, so identical text is still
    /// pushed back over whatever the user typed.
    pub text_revision: u64,
    /// Whether the caret is shown.
    pub cursor_visible: bool,
    /// Whether the field accepts keyboard edits.
    pub editable: bool,
    /// Increment button tint.
    pub increment_tint: IconTint,
    /// Decrement button tint.
    pub decrement_tint: IconTint,
    /// The field shows a number other than the committed value.
    pub diverged: bool,
}

impl StepperDisplay {
    /// Snapshot of a freshly configured controller.
    pub fn from_controller(controller: &QuantityController) -> Self {
        Self {
            text: controller.display_text().to_string(),
            text_revision: 0,
            cursor_visible: controller.cursor_visible(),
            editable: controller.editable(),
            increment_tint: IconTint::Neutral,
            decrement_tint: IconTint::Neutral,
            diverged: false,
        }
    }

    /// Applies a transition hint; text and divergence are re-read from `controller` so
    /// typed text that the controller kept (but did not rewrite) stays on screen.
    pub fn sync(&mut self, hint: &DisplayHint, controller: &QuantityController) {
        self.text = controller.display_text().to_string();
        if hint.text.is_some() {
            self.text_revision += 1;
        }
        if let Some(cursor_visible) = hint.cursor_visible {
            self.cursor_visible = cursor_visible;
        }
        if let Some(tint) = hint.increment_tint {
            self.increment_tint = tint;
        }
        if let Some(tint) = hint.decrement_tint {
            self.decrement_tint = tint;
        }
        self.editable = controller.editable();
        self.diverged = controller.current_value() != controller.value();
    }

    fn cursor_token(&self) -> &'static str {
        if self.cursor_visible {
            "visible"
        } else {
            "hidden"
        }
    }
}

fn move_caret_to_end(input_ref: NodeRef<html::Input>, text: &str) {
    if let Some(input) = input_ref.get_untracked() {
        let end = text.encode_utf16().count() as u32;
        if let Err(err) = input.set_selection_range(end, end) {
            logging::warn!("quantity stepper caret move failed: {err:?}");
        }
    }
}

#[derive(Clone, Copy)]
/// Reactive handle wiring a controller to the stepper's signals and callbacks.
pub(crate) struct StepperHost {
    controller: StoredValue<QuantityController>,
    observers: StoredValue<ObserverRegistry>,
    display: RwSignal<StepperDisplay>,
    field: Memo<(String, u64)>,
    input_ref: NodeRef<html::Input>,
}

impl StepperHost {
    pub(crate) fn new(
        config: QuantityConfig,
        on_value_changed: Option<Callback<(i32, i32)>>,
        on_warning: Option<Callback<(WarningKind, i32)>>,
    ) -> Self {
        let controller = QuantityController::new(config).unwrap_or_else(|err| {
            logging::warn!("quantity stepper config rejected, using defaults: {err}");
            QuantityController::default()
        });

        let mut observers = ObserverRegistry::default();
        if let Some(on_value_changed) = on_value_changed {
            observers.subscribe(listener_fn(move |event: &QuantityEvent| {
                if let QuantityEvent::ValueChanged { value, position } = *event {
                    on_value_changed.call((value, position));
                }
            }));
        }
        if let Some(on_warning) = on_warning {
            observers.subscribe(listener_fn(move |event: &QuantityEvent| {
                if let QuantityEvent::Warning { kind, bound } = *event {
                    on_warning.call((kind, bound));
                }
            }));
        }

        let display = create_rw_signal(StepperDisplay::from_controller(&controller));
        let field = create_memo(move |_| {
            display.with(|display| (display.text.clone(), display.text_revision))
        });
        Self {
            controller: store_value(controller),
            observers: store_value(observers),
            display,
            field,
            input_ref: create_node_ref::<html::Input>(),
        }
    }

    // Observers run after the controller borrow is released so callbacks may read it.
    pub(crate) fn dispatch(self, action: QuantityAction) {
        let display = self.display;
        let Some((transition, next)) = self.controller.try_update_value(|controller| {
            let transition = controller.dispatch(action);
            let mut next = display.get_untracked();
            next.sync(&transition.hint, controller);
            (transition, next)
        }) else {
            return;
        };

        let caret_text = transition.hint.cursor_at_end.then(|| next.text.clone());
        display.set(next);
        if let Some(text) = caret_text {
            move_caret_to_end(self.input_ref, &text);
        }
        self.observers
            .update_value(|observers| observers.notify(&transition.events));
    }

    pub(crate) fn apply_bounds(self, update: BoundsUpdate) {
        let Some(editable) = self.controller.try_update_value(|controller| {
            if let Err(err) = controller.set_bounds(update) {
                logging::warn!("quantity stepper bounds update rejected: {err}");
            }
            controller.editable()
        }) else {
            return;
        };
        if self.display.with_untracked(|display| display.editable) != editable {
            self.display.update(|display| display.editable = editable);
        }
    }

    pub(crate) fn value(self) -> i32 {
        self.controller.with_value(QuantityController::value)
    }

    pub(crate) fn limit(self) -> i32 {
        self.controller.with_value(QuantityController::limit)
    }

    pub(crate) fn field_text(self) -> Signal<String> {
        let field = self.field;
        Signal::derive(move || field.with(|(text, _)| text.clone()))
    }

    pub(crate) fn readonly(self) -> Signal<bool> {
        let display = self.display;
        Signal::derive(move || !display.with(|display| display.editable))
    }

    pub(crate) fn tone(self, increment: bool) -> Signal<&'static str> {
        let display = self.display;
        Signal::derive(move || {
            display.with(|display| {
                if increment {
                    display.increment_tint.token()
                } else {
                    display.decrement_tint.token()
                }
            })
        })
    }
}

#[component]
/// Numeric field flanked by decrement/increment buttons for purchase quantities.
///
/// Every press or keystroke runs one reconciliation pass on the owned controller, then
/// forwards the emitted events to `on_value_changed` / `on_warning`. Warning tints render
/// as `data-ui-tone` on the buttons; a hidden caret renders as `data-ui-cursor="hidden"`.
/// `value` and `bounds` let the embedding screen drive the silent setters reactively;
/// bound changes do not re-clamp the current value.
pub fn QuantityStepper(
    #[prop(optional)] config: QuantityConfig,
    #[prop(optional)] value: Option<Signal<i32>>,
    #[prop(optional)] bounds: Option<Signal<BoundsUpdate>>,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: MaybeSignal<String>,
    #[prop(optional)] ui_slot: Option<&'static str>,
    #[prop(optional)] on_value_changed: Option<Callback<(i32, i32)>>,
    #[prop(optional)] on_warning: Option<Callback<(WarningKind, i32)>>,
) -> impl IntoView {
    let host = StepperHost::new(config, on_value_changed, on_warning);

    if let Some(bounds) = bounds {
        create_effect(move |_| host.apply_bounds(bounds.get()));
    }
    if let Some(value) = value {
        create_effect(move |_| {
            let requested = value.get();
            host.dispatch(QuantityAction::SetCurrent { value: requested });
        });
    }

    let display = host.display;

    view! {
        <div
            class=merge_layout_class("ui-quantity-stepper", layout_class)
            role="group"
            aria-label=move || aria_label.get()
            data-ui-primitive="true"
            data-ui-kind="quantity-stepper"
            data-ui-slot=ui_slot
            data-ui-cursor=move || display.with(StepperDisplay::cursor_token)
            data-ui-diverged=move || bool_token(display.with(|display| display.diverged))
        >
            <IconButton
                icon=IconName::Subtract
                aria_label="Decrease quantity"
                ui_slot="decrement"
                tone=host.tone(false)
                on_click=Callback::new(move |_| host.dispatch(QuantityAction::Decrement))
            />
            <TextField
                variant=FieldVariant::Numeric
                node_ref=host.input_ref
                inputmode="numeric"
                aria_label="Quantity"
                ui_slot="input"
                value=host.field_text()
                readonly=host.readonly()
                on_input=Callback::new(move |ev: web_sys::Event| {
                    host.dispatch(QuantityAction::TextChanged {
                        text: event_target_value(&ev),
                    });
                })
                on_click=Callback::new(move |_| host.dispatch(QuantityAction::FocusInput))
                on_focus=Callback::new(move |_| host.dispatch(QuantityAction::FocusInput))
            />
            <IconButton
                icon=IconName::Add
                aria_label="Increase quantity"
                ui_slot="increment"
                tone=host.tone(true)
                on_click=Callback::new(move |_| host.dispatch(QuantityAction::Increment))
            />
        </div>
    }
}
