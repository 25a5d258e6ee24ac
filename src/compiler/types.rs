//! Type definitions for compiled engine overrides.
//!
//! An `OverrideList` is an ordered sequence, not a map: the same key may
//! appear several times and the last occurrence wins when the list is
//! consumed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Value of a single engine parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverrideValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl OverrideValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OverrideValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OverrideValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OverrideValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// JSON form; non-finite numbers become null.
    pub fn to_json(&self) -> Value {
        match self {
            OverrideValue::Bool(b) => Value::Bool(*b),
            OverrideValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            OverrideValue::Text(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for OverrideValue {
    /// Engine text form: integral numbers print without a decimal point.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideValue::Bool(b) => write!(f, "{}", b),
            OverrideValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            OverrideValue::Number(n) => write!(f, "{}", n),
            OverrideValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for OverrideValue {
    fn from(value: f64) -> Self {
        OverrideValue::Number(value)
    }
}

impl From<u8> for OverrideValue {
    fn from(value: u8) -> Self {
        OverrideValue::Number(value.into())
    }
}

impl From<u32> for OverrideValue {
    fn from(value: u32) -> Self {
        OverrideValue::Number(value.into())
    }
}

impl From<bool> for OverrideValue {
    fn from(value: bool) -> Self {
        OverrideValue::Bool(value)
    }
}

impl From<&str> for OverrideValue {
    fn from(value: &str) -> Self {
        OverrideValue::Text(value.to_string())
    }
}

impl From<String> for OverrideValue {
    fn from(value: String) -> Self {
        OverrideValue::Text(value)
    }
}

/// A single engine parameter assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterOverride {
    /// Engine-specific target qualifier, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Engine parameter identifier (e.g., "speed_print")
    pub key: String,
    pub value: OverrideValue,
}

impl ParameterOverride {
    pub fn new(key: impl Into<String>, value: impl Into<OverrideValue>) -> Self {
        Self {
            scope: None,
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Key used when folding the list: `scope:key` for scoped entries.
    pub fn qualified_key(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{}:{}", scope, self.key),
            None => self.key.clone(),
        }
    }
}

/// Ordered, append-only sequence of overrides with last-write-wins semantics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverrideList {
    entries: Vec<ParameterOverride>,
}

impl OverrideList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an unscoped `key = value` entry. Only the compiler appends;
    /// a compiled list is read-only to callers.
    pub(crate) fn set(&mut self, key: &str, value: impl Into<OverrideValue>) {
        self.entries.push(ParameterOverride::new(key, value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParameterOverride> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[ParameterOverride] {
        &self.entries
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Number of entries (of any scope) for `key`.
    pub fn count(&self, key: &str) -> usize {
        self.entries.iter().filter(|e| e.key == key).count()
    }

    /// The winning unscoped value for `key`: its last occurrence.
    pub fn effective(&self, key: &str) -> Option<&OverrideValue> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.scope.is_none() && e.key == key)
            .map(|e| &e.value)
    }

    /// Distinct keys in order of first appearance.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !keys.contains(&entry.key.as_str()) {
                keys.push(&entry.key);
            }
        }
        keys
    }

    /// Fold the sequence into the effective parameter set.
    ///
    /// Keys keep the position of their first appearance; values come from
    /// their last. Scoped entries are keyed as `scope:key`.
    pub fn resolve(&self) -> Map<String, Value> {
        let mut resolved = Map::new();
        for entry in &self.entries {
            // preserve_order: re-inserting an existing key keeps its slot
            resolved.insert(entry.qualified_key(), entry.value.to_json());
        }
        resolved
    }

    /// Render as engine command-line settings: `-s key=value` per entry,
    /// in emission order so the engine applies the same precedence.
    pub fn to_engine_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.entries.len() * 2);
        for entry in &self.entries {
            args.push("-s".to_string());
            args.push(format!("{}={}", entry.qualified_key(), entry.value));
        }
        args
    }
}

impl<'a> IntoIterator for &'a OverrideList {
    type Item = &'a ParameterOverride;
    type IntoIter = std::slice::Iter<'a, ParameterOverride>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<ParameterOverride> for OverrideList {
    fn from_iter<I: IntoIterator<Item = ParameterOverride>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
