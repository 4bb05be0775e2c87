//! Typed settings: values, setters, and the registry
//!
//! This module contains the configuration half of the crate:
//! - `ConfigValue` / `ConfigStore` - typed values and the in-memory store
//! - setter functions - coercion and validation of raw textual input
//! - `SettingsRegistry` - the catalog of known settings and the write path

mod registry;
mod setters;
mod value;

pub use registry::{Setting, SettingsRegistry, apply_setting};
pub use setters::{SetterFn, matching, parse_bool, require_positive, set_bool, set_int, set_string};
pub use value::{ConfigStore, ConfigValue};
