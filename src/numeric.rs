//! Measurements that may be missing.

use serde::{Serialize, Serializer};
use serde_json::Value;

/// A weather value that is either a finite number or unknown.
///
/// Every comparison against `Unknown` is false, so threshold rules never
/// fire on missing data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Numeric {
    Known(f64),
    #[default]
    Unknown,
}

impl Numeric {
    /// Wrap a float; NaN and infinities become `Unknown`.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self::Known(value)
        } else {
            Self::Unknown
        }
    }

    /// Coerce an optional JSON field.
    ///
    /// Numbers and numeric strings are accepted. Absent fields, `null`,
    /// booleans, empty or non-numeric strings, arrays and objects are
    /// all `Unknown`.
    #[must_use]
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => n.as_f64().map_or(Self::Unknown, Self::new),
            Some(Value::String(s)) => {
                let s = s.trim();
                if s.is_empty() {
                    Self::Unknown
                } else {
                    s.parse::<f64>().map_or(Self::Unknown, Self::new)
                }
            }
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Known(v) => Some(v),
            Self::Unknown => None,
        }
    }

    #[must_use]
    pub fn is_known(self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// `self >= threshold`; false when unknown.
    #[must_use]
    pub fn at_least(self, threshold: f64) -> bool {
        self.value().is_some_and(|v| v >= threshold)
    }
}

impl From<Option<f64>> for Numeric {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Unknown, Self::new)
    }
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_finite_is_unknown() {
        assert_eq!(Numeric::new(f64::NAN), Numeric::Unknown);
        assert_eq!(Numeric::new(f64::INFINITY), Numeric::Unknown);
        assert_eq!(Numeric::new(-3.5), Numeric::Known(-3.5));
    }

    #[test]
    fn test_from_json_numbers_and_strings() {
        assert_eq!(Numeric::from_json(Some(&json!(37))), Numeric::Known(37.0));
        assert_eq!(Numeric::from_json(Some(&json!(21.4))), Numeric::Known(21.4));
        assert_eq!(Numeric::from_json(Some(&json!(" 18.5 "))), Numeric::Known(18.5));
    }

    #[test]
    fn test_from_json_rejects_everything_else() {
        assert_eq!(Numeric::from_json(None), Numeric::Unknown);
        assert_eq!(Numeric::from_json(Some(&Value::Null)), Numeric::Unknown);
        assert_eq!(Numeric::from_json(Some(&json!("warm"))), Numeric::Unknown);
        assert_eq!(Numeric::from_json(Some(&json!(""))), Numeric::Unknown);
        assert_eq!(Numeric::from_json(Some(&json!(true))), Numeric::Unknown);
        assert_eq!(Numeric::from_json(Some(&json!([1, 2]))), Numeric::Unknown);
        assert_eq!(Numeric::from_json(Some(&json!({"v": 1}))), Numeric::Unknown);
    }

    #[test]
    fn test_comparisons_against_unknown_are_false() {
        assert!(!Numeric::Unknown.at_least(f64::NEG_INFINITY));
        assert!(Numeric::Known(28.0).at_least(28.0));
        assert!(!Numeric::Known(27.9).at_least(28.0));
    }

    #[test]
    fn test_serializes_as_number_or_null() {
        assert_eq!(serde_json::to_value(Numeric::Known(2.5)).unwrap(), json!(2.5));
        assert_eq!(serde_json::to_value(Numeric::Unknown).unwrap(), Value::Null);
    }
}
