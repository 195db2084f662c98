//! Attribute value types.
//!
//! Metadata fields hold scalars only: strings, numbers and booleans. Values are
//! serialized as bare JSON scalars so the record file stays readable by hand.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Runtime representation of a metadata value.
///
/// Variant order matters for deserialization: serde tries them top to bottom,
/// so `3` becomes `Integer` and `3.5` becomes `Float`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl AttrValue {
    /// Interpret free-form text (as typed on a command line).
    ///
    /// `true`/`false` become booleans, numeric literals become numbers, and
    /// anything else stays a string. Quote-wrapped text is always a string,
    /// which is how a caller stores the literal `"42"`.
    pub fn parse_loose(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
            return AttrValue::String(trimmed[1..trimmed.len() - 1].to_string());
        }
        match trimmed {
            "true" => return AttrValue::Bool(true),
            "false" => return AttrValue::Bool(false),
            _ => {}
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return AttrValue::Integer(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            if f.is_finite() {
                return AttrValue::Float(f);
            }
        }
        AttrValue::String(trimmed.to_string())
    }

    /// Whether the value survives a JSON round-trip. Non-finite floats are
    /// written as `null` by serde_json and cannot be read back.
    pub fn is_storable(&self) -> bool {
        match self {
            AttrValue::Float(f) => f.is_finite(),
            _ => true,
        }
    }

    /// Get the type name as a string (for error messages).
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Bool(_) => "boolean",
            AttrValue::Integer(_) => "integer",
            AttrValue::Float(_) => "float",
            AttrValue::String(_) => "string",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttrValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view; integers widen to `f64`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttrValue::Float(f) => Some(*f),
            AttrValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Query-time equality. Integers and floats compare numerically;
    /// values of different kinds never match.
    pub fn loosely_equals(&self, other: &AttrValue) -> bool {
        match (self, other) {
            (AttrValue::Integer(_), AttrValue::Float(_))
            | (AttrValue::Float(_), AttrValue::Integer(_)) => {
                self.compare(other) == Some(Ordering::Equal)
            }
            _ => self == other,
        }
    }

    /// Ordering used by range matchers. `None` when the kinds are incompatible.
    pub fn compare(&self, other: &AttrValue) -> Option<Ordering> {
        match (self, other) {
            (AttrValue::Integer(a), AttrValue::Integer(b)) => Some(a.cmp(b)),
            (AttrValue::String(a), AttrValue::String(b)) => Some(a.cmp(b)),
            (AttrValue::Bool(a), AttrValue::Bool(b)) => Some(a.cmp(b)),
            (a, b) => match (a.as_float(), b.as_float()) {
                (Some(x), Some(y)) => x.partial_cmp(&y),
                _ => None,
            },
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(b) => write!(f, "{}", b),
            AttrValue::Integer(i) => write!(f, "{}", i),
            AttrValue::Float(x) => write!(f, "{}", x),
            AttrValue::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::String(s)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::String(s.to_string())
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        AttrValue::Integer(i)
    }
}

impl From<i32> for AttrValue {
    fn from(i: i32) -> Self {
        AttrValue::Integer(i as i64)
    }
}

impl From<u32> for AttrValue {
    fn from(i: u32) -> Self {
        AttrValue::Integer(i as i64)
    }
}

impl From<f64> for AttrValue {
    fn from(f: f64) -> Self {
        AttrValue::Float(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_loose_detects_scalars() {
        assert_eq!(AttrValue::parse_loose("true"), AttrValue::Bool(true));
        assert_eq!(AttrValue::parse_loose("false"), AttrValue::Bool(false));
        assert_eq!(AttrValue::parse_loose("42"), AttrValue::Integer(42));
        assert_eq!(AttrValue::parse_loose("-7"), AttrValue::Integer(-7));
        assert_eq!(AttrValue::parse_loose("0.25"), AttrValue::Float(0.25));
        assert_eq!(
            AttrValue::parse_loose("train"),
            AttrValue::String("train".into())
        );
    }

    #[test]
    fn parse_loose_keeps_quoted_text_as_string() {
        assert_eq!(
            AttrValue::parse_loose("\"42\""),
            AttrValue::String("42".into())
        );
    }

    #[test]
    fn parse_loose_rejects_non_finite_floats() {
        assert_eq!(AttrValue::parse_loose("inf"), AttrValue::String("inf".into()));
        assert_eq!(AttrValue::parse_loose("NaN"), AttrValue::String("NaN".into()));
    }

    #[test]
    fn parse_loose_trims_strings_like_numbers() {
        assert_eq!(AttrValue::parse_loose(" 42 "), AttrValue::Integer(42));
        assert_eq!(
            AttrValue::parse_loose(" train "),
            AttrValue::String("train".into())
        );
    }

    #[test]
    fn non_finite_floats_are_not_storable() {
        assert!(AttrValue::Float(0.5).is_storable());
        assert!(AttrValue::String("inf".into()).is_storable());
        assert!(!AttrValue::Float(f64::INFINITY).is_storable());
        assert!(!AttrValue::Float(f64::NAN).is_storable());
    }

    #[test]
    fn numbers_compare_across_kinds() {
        let int = AttrValue::Integer(3);
        let float = AttrValue::Float(3.0);
        assert!(int.loosely_equals(&float));
        assert_ne!(int, float);
        assert_eq!(
            AttrValue::Integer(2).compare(&AttrValue::Float(2.5)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn mismatched_kinds_never_match() {
        let s = AttrValue::String("3".into());
        assert!(!s.loosely_equals(&AttrValue::Integer(3)));
        assert_eq!(s.compare(&AttrValue::Integer(3)), None);
        assert_eq!(AttrValue::Bool(true).compare(&AttrValue::Integer(1)), None);
    }

    #[test]
    fn serializes_as_bare_json_scalars() {
        assert_eq!(serde_json::to_string(&AttrValue::Integer(5)).unwrap(), "5");
        assert_eq!(
            serde_json::to_string(&AttrValue::String("x".into())).unwrap(),
            "\"x\""
        );
        let parsed: Vec<AttrValue> = serde_json::from_str("[true, 1, 1.5, \"a\"]").unwrap();
        assert_eq!(
            parsed,
            vec![
                AttrValue::Bool(true),
                AttrValue::Integer(1),
                AttrValue::Float(1.5),
                AttrValue::String("a".into()),
            ]
        );
    }

    #[test]
    fn display_is_plain() {
        assert_eq!(AttrValue::String("csv".into()).to_string(), "csv");
        assert_eq!(AttrValue::Integer(12).to_string(), "12");
        assert_eq!(AttrValue::Bool(false).to_string(), "false");
    }
}
