//! Provider call options

use serde::Serialize;
use serde_json::{Map, Value};

/// Key-value overrides passed to every provider call, e.g. a configuration set.
///
/// Merging never mutates the receiver; it yields a new map so a base configuration can be reused
/// across messages.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DeliveryOptions(Map<String, Value>);

impl DeliveryOptions {
    /// Creates an empty options map
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Returns a copy of these options with `key` set to `value`
    pub fn with(&self, key: &str, value: impl Into<Value>) -> Self {
        self.merged([(key.to_string(), value.into())])
    }

    /// Returns a copy of these options with `overrides` layered on top.
    ///
    /// Keys in `overrides` take precedence over existing keys.
    pub fn merged(&self, overrides: impl IntoIterator<Item = (String, Value)>) -> Self {
        let mut merged = self.0.clone();
        merged.extend(overrides);
        Self(merged)
    }

    /// Looks up an option
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether the map has no options
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the options in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for DeliveryOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
