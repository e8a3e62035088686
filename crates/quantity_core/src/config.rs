//! Bounds configuration for a quantity stepper and its validation rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default inclusive lower bound.
pub const DEFAULT_MIN: i32 = 0;
/// Default inclusive upper bound.
pub const DEFAULT_MAX: i32 = 99;
/// Default inventory ceiling.
pub const DEFAULT_INVENTORY: i32 = 99;
/// Default step applied per button press.
pub const DEFAULT_STEP: i32 = 1;

const fn default_min() -> i32 {
    DEFAULT_MIN
}

const fn default_max() -> i32 {
    DEFAULT_MAX
}

const fn default_inventory() -> i32 {
    DEFAULT_INVENTORY
}

const fn default_step() -> i32 {
    DEFAULT_STEP
}

const fn default_editable() -> bool {
    true
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Rejected stepper configuration.
pub enum ConfigError {
    /// The lower bound is negative.
    #[error("min must not be negative (got {0})")]
    NegativeMin(i32),
    /// The upper bound sits below the lower bound.
    #[error("max {max} is below min {min}")]
    MaxBelowMin {
        /// Requested lower bound.
        min: i32,
        /// Requested upper bound.
        max: i32,
    },
    /// The step would not move the value.
    #[error("step must be at least 1 (got {0})")]
    NonPositiveStep(i32),
    /// Inventory is negative.
    #[error("inventory must not be negative (got {0})")]
    NegativeInventory(i32),
    /// The serialized configuration could not be decoded.
    #[error("invalid quantity config: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Bounds, step, and pass-through position for one stepper instance.
///
/// Every field has a serde default, so `{}` decodes to [`QuantityConfig::default`].
pub struct QuantityConfig {
    /// Inclusive lower bound.
    #[serde(default = "default_min")]
    pub min: i32,
    /// Inclusive upper bound.
    #[serde(default = "default_max")]
    pub max: i32,
    /// Live stock level; the effective ceiling is `min(max, inventory)`.
    #[serde(default = "default_inventory")]
    pub inventory: i32,
    /// Amount added or subtracted per button press.
    #[serde(default = "default_step")]
    pub step: i32,
    /// Opaque row index forwarded to value-changed observers.
    #[serde(default)]
    pub position: i32,
    /// Whether the text field accepts keyboard edits.
    #[serde(default = "default_editable")]
    pub editable: bool,
}

impl Default for QuantityConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            inventory: DEFAULT_INVENTORY,
            step: DEFAULT_STEP,
            position: 0,
            editable: true,
        }
    }
}

impl QuantityConfig {
    /// Decodes and validates a JSON configuration payload.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the matching bound error when
    /// the decoded values are inconsistent.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Effective upper bound: the smaller of `max` and `inventory`.
    pub fn limit(&self) -> i32 {
        self.max.min(self.inventory)
    }

    /// Whether stock, rather than the purchase cap, constrains growth.
    pub fn inventory_constrained(&self) -> bool {
        self.inventory < self.max
    }

    /// Checks the bound relationships.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min < 0 {
            return Err(ConfigError::NegativeMin(self.min));
        }
        if self.max < self.min {
            return Err(ConfigError::MaxBelowMin {
                min: self.min,
                max: self.max,
            });
        }
        if self.step < 1 {
            return Err(ConfigError::NonPositiveStep(self.step));
        }
        if self.inventory < 0 {
            return Err(ConfigError::NegativeInventory(self.inventory));
        }
        Ok(())
    }

    /// Returns a copy with `update` applied, validated as a whole.
    ///
    /// # Errors
    ///
    /// Returns the first rule the merged configuration violates.
    pub fn merged(&self, update: &BoundsUpdate) -> Result<Self, ConfigError> {
        let merged = Self {
            min: update.min.unwrap_or(self.min),
            max: update.max.unwrap_or(self.max),
            inventory: update.inventory.unwrap_or(self.inventory),
            step: update.step.unwrap_or(self.step),
            position: update.position.unwrap_or(self.position),
            editable: update.editable.unwrap_or(self.editable),
        };
        merged.validate()?;
        Ok(merged)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Partial configuration change; `None` fields keep their current value.
pub struct BoundsUpdate {
    /// New lower bound.
    #[serde(default)]
    pub min: Option<i32>,
    /// New upper bound.
    #[serde(default)]
    pub max: Option<i32>,
    /// New inventory ceiling.
    #[serde(default)]
    pub inventory: Option<i32>,
    /// New step.
    #[serde(default)]
    pub step: Option<i32>,
    /// New row position.
    #[serde(default)]
    pub position: Option<i32>,
    /// New editable flag.
    #[serde(default)]
    pub editable: Option<bool>,
}

impl BoundsUpdate {
    /// Update that only changes the inventory ceiling.
    pub fn inventory(inventory: i32) -> Self {
        Self {
            inventory: Some(inventory),
            ..Self::default()
        }
    }

    /// Update that only changes the purchase cap.
    pub fn max(max: i32) -> Self {
        Self {
            max: Some(max),
            ..Self::default()
        }
    }
}
