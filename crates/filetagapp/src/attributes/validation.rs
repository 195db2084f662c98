//! Field name validation.
//!
//! Valid field names:
//! - Are non-empty
//! - Do not start with `$`
//! - Contain no whitespace and none of the condition operators (`=`, `!`, `<`, `>`, `~`, `?`, `|`)
//! - Are not one of the reserved names (`path`, `name`), which are derived from the file itself

/// Names that describe the file rather than user metadata.
pub const RESERVED_FIELDS: &[&str] = &["path", "name"];

const OPERATOR_CHARS: &[char] = &['=', '!', '<', '>', '~', '?', '|'];

/// Validates a metadata field name.
///
/// # Examples
/// ```
/// use filetagapp::attributes::validate_field_name;
///
/// assert!(validate_field_name("group").is_ok());
/// assert!(validate_field_name("line_count").is_ok());
/// assert!(validate_field_name("data.type").is_ok());
///
/// assert!(validate_field_name("").is_err());
/// assert!(validate_field_name("$regex").is_err());
/// assert!(validate_field_name("a=b").is_err());
/// assert!(validate_field_name("two words").is_err());
/// assert!(validate_field_name("path").is_err());
/// ```
pub fn validate_field_name(name: &str) -> Result<(), FieldValidationError> {
    if name.is_empty() {
        return Err(FieldValidationError::Empty);
    }

    if name.starts_with('$') {
        return Err(FieldValidationError::DollarPrefix);
    }

    if RESERVED_FIELDS.contains(&name) {
        return Err(FieldValidationError::Reserved(name.to_string()));
    }

    for ch in name.chars() {
        if ch.is_whitespace() || OPERATOR_CHARS.contains(&ch) {
            return Err(FieldValidationError::InvalidCharacter(ch));
        }
    }

    Ok(())
}

/// Error type for field name validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValidationError {
    /// Field name is empty
    Empty,
    /// Field name starts with `$`
    DollarPrefix,
    /// Field name is derived from the file and cannot be set
    Reserved(String),
    /// Field name contains whitespace or an operator character
    InvalidCharacter(char),
}

impl std::fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValidationError::Empty => write!(f, "field name cannot be empty"),
            FieldValidationError::DollarPrefix => {
                write!(f, "field name cannot start with '$'")
            }
            FieldValidationError::Reserved(name) => {
                write!(f, "'{}' is derived from the file and cannot be set", name)
            }
            FieldValidationError::InvalidCharacter(ch) => {
                write!(f, "invalid character '{}' in field name", ch)
            }
        }
    }
}

impl std::error::Error for FieldValidationError {}
