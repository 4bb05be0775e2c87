//! Setting registry and the validation aggregator
//!
//! The registry is an explicit value built at startup and passed to whoever
//! writes settings; there is no ambient global catalog. Each registered
//! setting carries an ordered list of setter functions that all run on every
//! write, with failures aggregated rather than short-circuited.

use log::{debug, info};

use crate::config::setters::{self, SetterFn};
use crate::config::value::ConfigStore;
use crate::error::{Error, Result, ValidationErrors};

/// A named setting with its ordered setter/validator chain.
///
/// Immutable once registered; looked up by exact name match.
pub struct Setting {
    name: String,
    setters: Vec<SetterFn>,
}

impl Setting {
    /// Create a setting with its setter chain. Order is significant: setters
    /// run and report failures in this order.
    #[must_use]
    pub fn new(name: impl Into<String>, setters: Vec<SetterFn>) -> Self {
        Self {
            name: name.into(),
            setters,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn setters(&self) -> &[SetterFn] {
        &self.setters
    }
}

impl std::fmt::Debug for Setting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Setting")
            .field("name", &self.name)
            .field("setters", &self.setters.len())
            .finish()
    }
}

/// Catalog of known settings.
#[derive(Debug, Default)]
pub struct SettingsRegistry {
    settings: Vec<Setting>,
}

impl SettingsRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the stock cluster settings.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Setting::new("driver", vec![setters::set_string()]));
        registry.register(Setting::new(
            "cpus",
            vec![setters::set_int(), setters::require_positive()],
        ));
        registry.register(Setting::new(
            "memory",
            vec![setters::set_int(), setters::require_positive()],
        ));
        registry.register(Setting::new(
            "disk-size",
            vec![setters::matching(r"^\d+(mb|gb)$")],
        ));
        registry.register(Setting::new("verbose", vec![setters::set_bool()]));
        registry.register(Setting::new("update-check", vec![setters::set_bool()]));
        registry.register(Setting::new(
            "update-interval-hours",
            vec![setters::set_int(), setters::require_positive()],
        ));
        registry
    }

    /// Register an additional setting.
    pub fn register(&mut self, setting: Setting) {
        debug!("Registered setting '{}'", setting.name());
        self.settings.push(setting);
    }

    /// Names of all registered settings, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.settings.iter().map(Setting::name).collect()
    }

    /// Look up a setting by exact name.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownSetting` if no setting with that name exists.
    pub fn find(&self, name: &str) -> Result<&Setting> {
        self.settings
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| Error::UnknownSetting(name.to_string()))
    }

    /// Write a raw textual value to a named setting.
    ///
    /// This is the settings write entry point: the setting is looked up and
    /// every registered setter runs against `(name, raw)`.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownSetting` for an unregistered name, or
    /// `Error::Validation` aggregating every setter failure.
    pub fn set(&self, store: &mut ConfigStore, name: &str, raw: &str) -> Result<()> {
        let setting = self.find(name)?;
        apply_setting(store, name, raw, setting.setters())?;
        info!("Set '{name}' to '{raw}'");
        Ok(())
    }
}

/// Run every setter in order and aggregate failures.
///
/// All setters receive the same `(name, raw)` pair; a failing setter does not
/// stop the rest. Setters are independent and non-transactional: values
/// stored by succeeding setters remain in place even when a sibling fails.
///
/// # Errors
///
/// Returns `Error::Validation` carrying one entry per failing setter, in
/// setter order. Succeeds iff no setter failed.
pub fn apply_setting(
    store: &mut ConfigStore,
    name: &str,
    raw: &str,
    setters: &[SetterFn],
) -> Result<()> {
    let mut failures = ValidationErrors::new();
    for setter in setters {
        if let Err(err) = setter(store, name, raw) {
            failures.push(err);
        }
    }
    if failures.is_empty() {
        Ok(())
    } else {
        debug!(
            "{} of {} setters failed for '{name}'",
            failures.len(),
            setters.len()
        );
        Err(Error::Validation {
            name: name.to_string(),
            errors: failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::value::ConfigValue;

    #[test]
    fn test_find_exact_match() {
        let registry = SettingsRegistry::with_defaults();
        assert_eq!(registry.find("cpus").unwrap().name(), "cpus");
        assert_eq!(registry.find("driver").unwrap().name(), "driver");
    }

    #[test]
    fn test_find_unknown_setting() {
        let registry = SettingsRegistry::with_defaults();
        let err = registry.find("no-such-setting").unwrap_err();
        assert!(matches!(err, Error::UnknownSetting(ref n) if n == "no-such-setting"));
    }

    #[test]
    fn test_set_valid_value_stores_coerced() {
        let registry = SettingsRegistry::with_defaults();
        let mut store = ConfigStore::new();

        registry.set(&mut store, "cpus", "4").unwrap();
        registry.set(&mut store, "verbose", "1").unwrap();
        registry.set(&mut store, "driver", "kvm").unwrap();

        assert_eq!(store.get("cpus"), Some(&ConfigValue::Int(4)));
        assert_eq!(store.get("verbose"), Some(&ConfigValue::Bool(true)));
        assert_eq!(store.get("driver"), Some(&ConfigValue::String("kvm".into())));
    }

    #[test]
    fn test_set_aggregates_all_failures_in_order() {
        let registry = SettingsRegistry::with_defaults();
        let mut store = ConfigStore::new();

        // "cpus" runs set_int then require_positive; both reject "zero"
        let err = registry.set(&mut store, "cpus", "zero").unwrap_err();
        let Error::Validation { name, errors } = err else {
            panic!("expected Validation, got {err:?}");
        };
        assert_eq!(name, "cpus");
        assert_eq!(errors.len(), 2);

        let collected: Vec<_> = errors.iter().collect();
        assert!(matches!(collected[0], Error::InvalidIntegerFormat { .. }));
        assert!(matches!(collected[1], Error::InvalidIntegerFormat { .. }));
        assert!(!store.contains("cpus"));
    }

    #[test]
    fn test_set_partial_failure_keeps_sibling_writes() {
        // First setter stores, second rejects: aggregation reports the
        // failure but the stored value stays (setters are independent).
        let mut registry = SettingsRegistry::new();
        registry.register(Setting::new(
            "memory",
            vec![setters::set_int(), setters::require_positive()],
        ));
        let mut store = ConfigStore::new();

        let err = registry.set(&mut store, "memory", "-64").unwrap_err();
        let Error::Validation { errors, .. } = err else {
            panic!("expected Validation");
        };
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors.iter().next(), Some(Error::ValueOutOfRange { .. })));
        assert_eq!(store.get("memory"), Some(&ConfigValue::Int(-64)));
    }

    #[test]
    fn test_set_unknown_setting_does_not_touch_store() {
        let registry = SettingsRegistry::with_defaults();
        let mut store = ConfigStore::new();
        assert!(registry.set(&mut store, "bogus", "1").is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_defaults_catalog_names() {
        let registry = SettingsRegistry::with_defaults();
        let names = registry.names();
        for expected in [
            "driver",
            "cpus",
            "memory",
            "disk-size",
            "verbose",
            "update-check",
            "update-interval-hours",
        ] {
            assert!(names.contains(&expected), "missing {expected}");
        }
    }

    #[test]
    fn test_apply_setting_empty_chain_succeeds() {
        let mut store = ConfigStore::new();
        apply_setting(&mut store, "anything", "value", &[]).unwrap();
        assert!(store.is_empty());
    }
}
