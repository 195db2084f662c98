//! Predicate evaluation.
//!
//! A [`Query`] is a list of [`Condition`]s, each pairing a field name with a
//! [`Matcher`]. A record satisfies the query when every condition's field is
//! present and its value satisfies the matcher. An empty query matches all
//! records.
//!
//! The fields `path` and `name` are special: they are matched against the
//! record's full path and its basename rather than its metadata. Directory
//! listings are expressed through `path`.

use super::{validate_field_name, AttrValue, FieldValidationError, Metadata};
use crate::error::{FiletagError, Result};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// The field name that resolves to the record path.
pub const PATH_FIELD: &str = "path";

/// The field name that resolves to the basename of the record path.
pub const NAME_FIELD: &str = "name";

/// Comparison rule applied to a stored field value.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Exact equality (numbers compare across integer/float).
    Eq(AttrValue),
    /// Present and not equal.
    Ne(AttrValue),
    Lt(AttrValue),
    Lte(AttrValue),
    Gt(AttrValue),
    Gte(AttrValue),
    /// Equal to any of the listed values.
    In(Vec<AttrValue>),
    /// String value matches the pattern (unanchored).
    Regex(Regex),
    /// Field is present with any value.
    Exists,
}

impl Matcher {
    /// Compile a regex matcher.
    pub fn regex(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Matcher::Regex)
            .map_err(|e| FiletagError::InvalidQuery(format!("bad pattern '{}': {}", pattern, e)))
    }

    /// Check a stored value against this matcher.
    pub fn matches(&self, value: &AttrValue) -> bool {
        match self {
            Matcher::Eq(expected) => value.loosely_equals(expected),
            Matcher::Ne(expected) => !value.loosely_equals(expected),
            Matcher::Lt(bound) => value.compare(bound) == Some(Ordering::Less),
            Matcher::Lte(bound) => matches!(
                value.compare(bound),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Matcher::Gt(bound) => value.compare(bound) == Some(Ordering::Greater),
            Matcher::Gte(bound) => matches!(
                value.compare(bound),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Matcher::In(options) => options.iter().any(|o| value.loosely_equals(o)),
            Matcher::Regex(re) => value.as_str().is_some_and(|s| re.is_match(s)),
            Matcher::Exists => true,
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Eq(v) => write!(f, "={}", v),
            Matcher::Ne(v) => write!(f, "!={}", v),
            Matcher::Lt(v) => write!(f, "<{}", v),
            Matcher::Lte(v) => write!(f, "<={}", v),
            Matcher::Gt(v) => write!(f, ">{}", v),
            Matcher::Gte(v) => write!(f, ">={}", v),
            Matcher::In(vs) => {
                let joined: Vec<String> = vs.iter().map(|v| v.to_string()).collect();
                write!(f, "={}", joined.join("|"))
            }
            Matcher::Regex(re) => write!(f, "~{}", re.as_str()),
            Matcher::Exists => write!(f, "?"),
        }
    }
}

/// A single field constraint.
#[derive(Debug, Clone)]
pub struct Condition {
    pub field: String,
    pub matcher: Matcher,
}

impl Condition {
    pub fn new(field: impl Into<String>, matcher: Matcher) -> Self {
        Self {
            field: field.into(),
            matcher,
        }
    }

    /// Convenience: create an equality condition.
    pub fn eq(field: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self::new(field, Matcher::Eq(value.into()))
    }

    /// Check this condition against a record.
    pub fn matches(&self, path: &Path, metadata: &Metadata) -> bool {
        if self.field == PATH_FIELD {
            let path_value = AttrValue::String(path.to_string_lossy().into_owned());
            return self.matcher.matches(&path_value);
        }
        if self.field == NAME_FIELD {
            return match path.file_name() {
                Some(name) => self
                    .matcher
                    .matches(&AttrValue::String(name.to_string_lossy().into_owned())),
                None => false,
            };
        }
        match metadata.get(&self.field) {
            Some(value) => self.matcher.matches(value),
            None => false,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.field, self.matcher)
    }
}

impl FromStr for Condition {
    type Err = FiletagError;

    /// Parses `field<op>value`.
    ///
    /// | Syntax | Matcher |
    /// |--------|---------|
    /// | `k=v` | `Eq` (or `In` when `v` is `a\|b\|c`) |
    /// | `k!=v` | `Ne` |
    /// | `k<v`, `k<=v`, `k>v`, `k>=v` | range |
    /// | `k~pattern` | `Regex` |
    /// | `k?` | `Exists` |
    ///
    /// Values go through [`AttrValue::parse_loose`]; wrap a value in double
    /// quotes to force a string.
    fn from_str(s: &str) -> Result<Self> {
        if let Some(field) = s.strip_suffix('?') {
            if !field.contains(['=', '!', '<', '>', '~']) {
                check_query_field(field)?;
                return Ok(Condition::new(field, Matcher::Exists));
            }
        }

        let op_start = s
            .find(['=', '!', '<', '>', '~'])
            .ok_or_else(|| FiletagError::InvalidQuery(format!("no operator in '{}'", s)))?;
        let field = &s[..op_start];
        check_query_field(field)?;

        let rest = &s[op_start..];
        let (op, raw) = ["!=", "<=", ">=", "=", "<", ">", "~"]
            .iter()
            .find_map(|op| rest.strip_prefix(op).map(|raw| (*op, raw)))
            .ok_or_else(|| FiletagError::InvalidQuery(format!("bad operator in '{}'", s)))?;

        let matcher = match op {
            "=" => parse_eq_value(raw),
            "!=" => Matcher::Ne(AttrValue::parse_loose(raw)),
            "<" => Matcher::Lt(AttrValue::parse_loose(raw)),
            "<=" => Matcher::Lte(AttrValue::parse_loose(raw)),
            ">" => Matcher::Gt(AttrValue::parse_loose(raw)),
            ">=" => Matcher::Gte(AttrValue::parse_loose(raw)),
            "~" => Matcher::regex(raw)?,
            _ => unreachable!("operator list is fixed"),
        };

        Ok(Condition::new(field, matcher))
    }
}

fn parse_eq_value(raw: &str) -> Matcher {
    let quoted = raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"');
    if !quoted && raw.contains('|') {
        Matcher::In(raw.split('|').map(AttrValue::parse_loose).collect())
    } else {
        Matcher::Eq(AttrValue::parse_loose(raw))
    }
}

/// Query fields follow the field name rules, except that reserved names may
/// be read.
fn check_query_field(field: &str) -> Result<()> {
    match validate_field_name(field) {
        Ok(()) | Err(FieldValidationError::Reserved(_)) => Ok(()),
        Err(e) => Err(FiletagError::InvalidQuery(format!("'{}': {}", field, e))),
    }
}

/// A conjunction of conditions.
#[derive(Debug, Clone, Default)]
pub struct Query {
    conditions: Vec<Condition>,
}

impl Query {
    /// The empty query; matches every record.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(conditions: Vec<Condition>) -> Self {
        Self { conditions }
    }

    /// Add an equality condition.
    pub fn eq(self, field: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.with(Condition::eq(field, value))
    }

    pub fn with(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Parse each input as a [`Condition`].
    pub fn parse<I: AsRef<str>>(inputs: &[I]) -> Result<Self> {
        let conditions = inputs
            .iter()
            .map(|s| s.as_ref().parse())
            .collect::<Result<Vec<Condition>>>()?;
        Ok(Self { conditions })
    }

    /// Records whose path lies under `dir` (or is `dir` itself).
    pub fn under(dir: &Path) -> Self {
        let prefix = regex::escape(&dir.to_string_lossy());
        let sep = regex::escape(std::path::MAIN_SEPARATOR_STR);
        let pattern = format!("^{}({}|$)", prefix.trim_end_matches(sep.as_str()), sep);
        let re = Regex::new(&pattern).expect("escaped path is a valid pattern");
        Self::all().with(Condition::new(PATH_FIELD, Matcher::Regex(re)))
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// True if every condition holds for the record.
    pub fn matches(&self, path: &Path, metadata: &Metadata) -> bool {
        self.conditions.iter().all(|c| c.matches(path, metadata))
    }
}

impl From<Metadata> for Query {
    /// A literal predicate mapping: every field must equal the given value.
    fn from(metadata: Metadata) -> Self {
        let conditions = metadata
            .iter()
            .map(|(k, v)| Condition::eq(k.clone(), v.clone()))
            .collect();
        Self { conditions }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conditions.is_empty() {
            return write!(f, "*");
        }
        let parts: Vec<String> = self.conditions.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(" "))
    }
}
