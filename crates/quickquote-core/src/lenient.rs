//! Field deserializers for persisted payloads written by older builds.
//!
//! A field that has the wrong shape deserializes as `None` instead of
//! failing the whole document. Use with `#[serde(default, deserialize_with = ...)]`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A finite number, or numeric text (`"12.5"`). Blank text reads as `0`.
pub(crate) fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(&value))
}

pub(crate) fn number_from_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

/// Any `T`; `None` if the value does not fit.
pub(crate) fn value<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// An array of `T`, skipping elements that do not fit.
pub(crate) fn list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "number")]
        n: Option<f64>,
        #[serde(default, deserialize_with = "value")]
        s: Option<String>,
        #[serde(default, deserialize_with = "list")]
        v: Option<Vec<u32>>,
    }

    #[test]
    fn test_shapes() {
        let probe: Probe = serde_json::from_value(json!({
            "n": "12.5",
            "s": 42,
            "v": [1, "two", 3]
        }))
        .unwrap();

        assert_eq!(probe.n, Some(12.5));
        assert_eq!(probe.s, None);
        assert_eq!(probe.v, Some(vec![1, 3]));
    }

    #[test]
    fn test_missing_and_non_numeric() {
        let probe: Probe = serde_json::from_value(json!({ "n": "abc", "v": {} })).unwrap();
        assert_eq!(probe.n, None);
        assert_eq!(probe.s, None);
        assert_eq!(probe.v, None);

        assert_eq!(number_from_value(&json!("")), Some(0.0));
        assert_eq!(number_from_value(&json!(null)), None);
    }
}
