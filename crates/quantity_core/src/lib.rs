//! Headless quantity-stepper state machine.
//!
//! The crate owns the bounded purchase-quantity register behind the `system_ui`
//! `QuantityStepper` primitive: bounds configuration, the reconciliation reducer for
//! button presses and typed text, and the observer registry that delivers value-changed
//! and boundary-warning notifications. It has no UI-toolkit dependency; hosts apply the
//! [`DisplayHint`] returned with every transition.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod config;
mod controller;
mod observer;
mod reducer;

pub use config::{
    BoundsUpdate, ConfigError, QuantityConfig, DEFAULT_INVENTORY, DEFAULT_MAX, DEFAULT_MIN,
    DEFAULT_STEP,
};
pub use controller::QuantityController;
pub use observer::{listener_fn, FnListener, ObserverRegistry, QuantityListener, SubscriptionId};
pub use reducer::{
    reduce_quantity, DisplayHint, IconTint, QuantityAction, QuantityEvent, QuantityState,
    QuantityTransition, WarningKind,
};
