//! Option structs
//!
//! All options deserialize from camelCase JSON with every field
//! optional, so callers holding dynamic configuration can validate it
//! into a typed value in one step.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Backing slot for a [`Store`](crate::Store)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StoreType {
    /// `document.cookie`
    Cookie,
    /// `window.localStorage`
    #[default]
    PersistentString,
}

/// Store construction options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct StoreConfig {
    /// Adopt whatever is already persisted instead of flushing it
    pub adopt: bool,
    pub store_type: StoreType,
}

impl StoreConfig {
    /// Adopt existing data from localStorage
    pub fn adopting() -> Self {
        Self {
            adopt: true,
            ..Self::default()
        }
    }

    /// Use the cookie jar instead of localStorage
    pub fn with_store_type(mut self, store_type: StoreType) -> Self {
        self.store_type = store_type;
        self
    }

    /// Validate a dynamic configuration value
    pub fn from_json(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::invalid(format!("store config must be an object, got {value}")));
        }
        serde_json::from_value(value).map_err(|e| Error::invalid(format!("store config: {e}")))
    }
}

/// Scroll helper options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScrollOptions {
    /// Distance kept between the viewport top and the target
    pub top_offset: f64,
    /// Animated scroll when true, immediate otherwise
    pub smooth: bool,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            top_offset: 0.0,
            smooth: true,
        }
    }
}

impl ScrollOptions {
    pub fn new(top_offset: f64, smooth: bool) -> Self {
        Self { top_offset, smooth }
    }
}

/// Opacity fade options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FadeOptions {
    /// Opacity change per frame
    pub step: f64,
}

impl Default for FadeOptions {
    fn default() -> Self {
        Self { step: 0.1 }
    }
}

impl FadeOptions {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.step.is_finite() && self.step > 0.0 && self.step <= 1.0 {
            Ok(())
        } else {
            Err(Error::invalid(format!("fade step must be in (0, 1], got {}", self.step)))
        }
    }
}

/// Custom event flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomEventInit {
    pub bubbles: bool,
    pub cancelable: bool,
}

impl Default for CustomEventInit {
    fn default() -> Self {
        Self {
            bubbles: true,
            cancelable: true,
        }
    }
}
