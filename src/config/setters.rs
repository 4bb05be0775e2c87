//! Setter functions that coerce raw textual values into the store
//!
//! A setter validates and/or coerces one raw value and writes it into the
//! [`ConfigStore`]. Setters run independently of each other: a failing setter
//! does not stop its siblings, and it never stores a malformed value.

use regex::Regex;

use crate::config::value::ConfigStore;
use crate::error::{Error, Result};

/// A setter/validator invoked with `(store, setting name, raw value)`.
pub type SetterFn = Box<dyn Fn(&mut ConfigStore, &str, &str) -> Result<()> + Send + Sync>;

/// Parse a raw boolean token.
///
/// Accepts `1`, `t`, `true`, `0`, `f`, `false` (ASCII case-insensitive).
#[must_use]
pub fn parse_bool(raw: &str) -> Option<bool> {
    if raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("t") || raw == "1" {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") || raw.eq_ignore_ascii_case("f") || raw == "0" {
        Some(false)
    } else {
        None
    }
}

/// Setter that stores the raw value verbatim as a string. Never fails.
#[must_use]
pub fn set_string() -> SetterFn {
    Box::new(|store, name, raw| {
        store.insert(name, raw);
        Ok(())
    })
}

/// Setter that parses the raw value as a base-10 integer and stores it.
#[must_use]
pub fn set_int() -> SetterFn {
    Box::new(|store, name, raw| {
        let value: i64 = raw
            .parse()
            .map_err(|_| Error::InvalidIntegerFormat {
                name: name.to_string(),
                value: raw.to_string(),
            })?;
        store.insert(name, value);
        Ok(())
    })
}

/// Setter that parses the raw value as a boolean and stores it.
#[must_use]
pub fn set_bool() -> SetterFn {
    Box::new(|store, name, raw| {
        let value = parse_bool(raw).ok_or_else(|| Error::InvalidBooleanFormat {
            name: name.to_string(),
            value: raw.to_string(),
        })?;
        store.insert(name, value);
        Ok(())
    })
}

/// Validator that rejects integers below 1. Stores nothing itself; pair it
/// with [`set_int`] on settings like CPU or memory counts.
#[must_use]
pub fn require_positive() -> SetterFn {
    Box::new(|_store, name, raw| {
        let value: i64 = raw
            .parse()
            .map_err(|_| Error::InvalidIntegerFormat {
                name: name.to_string(),
                value: raw.to_string(),
            })?;
        if value < 1 {
            return Err(Error::ValueOutOfRange {
                name: name.to_string(),
                reason: format!("must be at least 1, got {value}"),
            });
        }
        Ok(())
    })
}

/// Setter that stores the raw value as a string only if it matches `pattern`.
///
/// The pattern is compiled on each invocation; setting writes are rare enough
/// that this keeps construction infallible.
#[must_use]
pub fn matching(pattern: impl Into<String>) -> SetterFn {
    let pattern = pattern.into();
    Box::new(move |store, name, raw| {
        let re = Regex::new(&pattern).map_err(|e| Error::InvalidPattern {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        if !re.is_match(raw) {
            return Err(Error::PatternMismatch {
                name: name.to_string(),
                value: raw.to_string(),
                pattern: pattern.clone(),
            });
        }
        store.insert(name, raw);
        Ok(())
    })
}
