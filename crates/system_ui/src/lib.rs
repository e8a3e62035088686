//! Shared UI primitive library for storefront and checkout screens.
//!
//! The crate owns reusable Leptos primitives, a centralized icon API, and the stable
//! `data-ui-*` DOM contract consumed by the CSS layers. The [`QuantityStepper`] primitive
//! is a thin host over `quantity_core`: it dispatches clicks and keystrokes into the
//! controller and renders the returned display hints.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod icon;
mod primitives;

pub use icon::{Icon, IconName, IconSize};
pub use primitives::{
    ButtonSize, ButtonVariant, FieldVariant, IconButton, QuantityStepper, StepperDisplay,
    TextField,
};
pub use quantity_core::{BoundsUpdate, QuantityConfig, WarningKind};

/// Convenience imports for application crates consuming the shared primitive set.
pub mod prelude {
    pub use crate::{
        BoundsUpdate, ButtonSize, ButtonVariant, FieldVariant, Icon, IconButton, IconName,
        IconSize, QuantityConfig, QuantityStepper, StepperDisplay, TextField, WarningKind,
    };
}
