//! # Attribute System
//!
//! Files carry an open-ended set of metadata fields. There is no schema: any
//! valid field name can hold any scalar value, and different files may hold
//! different fields. This module provides:
//!
//! - **Values**: [`AttrValue`], the scalar a field holds
//! - **Maps**: [`Metadata`], the field map with merge semantics used by `add`
//! - **Validation**: rules for what a field name may look like
//! - **Filtering**: [`Query`] / [`Condition`] / [`Matcher`] predicates evaluated
//!   by the query engine
//!
//! ## Value Types
//!
//! | Kind | JSON | Example |
//! |------|------|---------|
//! | `String` | `"train"` | `group=train` |
//! | `Integer` | `42` | `count=42` |
//! | `Float` | `0.5` | `ratio=0.5` |
//! | `Bool` | `true` | `reviewed=true` |
//!
//! ## Usage
//!
//! ```
//! use filetagapp::attributes::{AttrValue, Metadata, Query};
//! use std::path::Path;
//!
//! let mut meta = Metadata::new();
//! meta.set("group", "train");
//! meta.set("count", 12);
//!
//! let query = Query::parse(&["group=train", "count<30"]).unwrap();
//! assert!(query.matches(Path::new("/data/a.csv"), &meta));
//! assert_eq!(meta.get("missing"), None::<&AttrValue>);
//! ```

mod filter;
mod metadata;
mod validation;
mod value;

pub use filter::{Condition, Matcher, Query, NAME_FIELD, PATH_FIELD};
pub use metadata::Metadata;
pub use validation::{validate_field_name, FieldValidationError, RESERVED_FIELDS};
pub use value::AttrValue;
