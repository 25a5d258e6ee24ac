use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Result metadata exactly as the slicing engine returned it.
///
/// Wraps the raw JSON object without assuming a schema. Field names vary
/// between engine versions, so every read goes through an ordered list of
/// candidate names (see `fields`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawMetadata {
    data: Map<String, Value>,
}

impl RawMetadata {
    /// Parse metadata from a JSON string. The top level must be an object.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: Map<String, Value> = serde_json::from_str(json)?;
        Ok(Self { data })
    }

    pub fn from_map(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// Accept any JSON value; anything but an object is treated as empty.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(data) => Self { data },
            other => {
                warn!("Engine metadata is not an object ({}), ignoring it", type_name(&other));
                Self::default()
            }
        }
    }

    /// Look up a field by name, falling back to a dotted path into nested
    /// objects (e.g., `dimensions.height`).
    pub fn get(&self, name: &str) -> Option<&Value> {
        if let Some(value) = self.data.get(name) {
            return Some(value);
        }
        if !name.contains('.') {
            return None;
        }
        let mut parts = name.split('.');
        let mut current = self.data.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// A field as a non-negative finite number.
    ///
    /// Numeric strings count as numbers. Negative, non-finite, and
    /// non-numeric values are treated as absent.
    pub fn number(&self, name: &str) -> Option<f64> {
        let value = self.get(name)?;
        let number = coerce_number(value);
        if number.is_none() && !value.is_null() {
            warn!("Ignoring unusable metadata field {} = {}", name, value);
        }
        number
    }

    /// First usable number among `candidates`, tried in order.
    pub fn first_number(&self, candidates: &[&str]) -> Option<f64> {
        candidates.iter().find_map(|name| self.number(name))
    }

    /// First usable non-negative integer among `candidates`.
    /// Fractional values are truncated.
    pub fn first_count(&self, candidates: &[&str]) -> Option<u64> {
        self.first_number(candidates).map(|n| n.trunc() as u64)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn raw(&self) -> &Map<String, Value> {
        &self.data
    }
}

impl From<Map<String, Value>> for RawMetadata {
    fn from(data: Map<String, Value>) -> Self {
        Self::from_map(data)
    }
}

/// Interpret a JSON value as a non-negative finite number.
pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (number.is_finite() && number >= 0.0).then_some(number)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawMetadata {
        RawMetadata::from_value(value)
    }

    #[test]
    fn test_first_number_respects_candidate_order() {
        let meta = raw(json!({ "print_time": 100, "printTime": 200 }));
        assert_eq!(meta.first_number(&["printTime", "print_time"]), Some(200.0));
        assert_eq!(meta.first_number(&["print_time", "printTime"]), Some(100.0));
        assert_eq!(meta.first_number(&["estimated_time"]), None);
    }

    #[test]
    fn test_invalid_values_are_skipped() {
        let meta = raw(json!({
            "printTime": -5,
            "print_time": "soon",
            "estimated_time": "3725"
        }));
        assert_eq!(
            meta.first_number(&["printTime", "print_time", "estimated_time"]),
            Some(3725.0)
        );
    }

    #[test]
    fn test_non_numeric_types_are_absent() {
        let meta = raw(json!({
            "a": null,
            "b": true,
            "c": [1, 2],
            "d": { "value": 1 },
            "e": "NaN",
            "f": "inf"
        }));
        for name in ["a", "b", "c", "d", "e", "f"] {
            assert_eq!(meta.number(name), None, "{} should be absent", name);
        }
    }

    #[test]
    fn test_dotted_path_lookup() {
        let meta = raw(json!({
            "dimensions": { "height": 12.5, "size": { "x": 3 } },
            "flat.key": 7
        }));
        assert_eq!(meta.number("dimensions.height"), Some(12.5));
        assert_eq!(meta.number("dimensions.size.x"), Some(3.0));
        assert_eq!(meta.number("flat.key"), Some(7.0));
        assert_eq!(meta.number("dimensions.width"), None);
        assert_eq!(meta.number("dimensions.height.value"), None);
    }

    #[test]
    fn test_first_count_truncates() {
        let meta = raw(json!({ "layers": 120.9 }));
        assert_eq!(meta.first_count(&["layerCount", "layers"]), Some(120));
    }

    #[test]
    fn test_non_object_is_empty() {
        assert!(raw(json!([1, 2, 3])).is_empty());
        assert!(raw(json!("text")).is_empty());
        assert!(raw(Value::Null).is_empty());
    }

    #[test]
    fn test_from_json() {
        let meta = RawMetadata::from_json(r#"{ "printTime": 60 }"#).unwrap();
        assert_eq!(meta.number("printTime"), Some(60.0));
        assert!(RawMetadata::from_json("[1]").is_err());
    }
}
