//! # Pluck: Declarative Extraction for Nested Structured Data
//!
//! Pluck resolves declarative extraction specs against nested records -
//! aliasing, defaults, positional access with skip placeholders, and rest
//! capture - and provides a small validated entity type with a guarded
//! mutator.
//!
//! ## Features
//!
//! - **Tagged value model**: a closed sum type over primitives, ordered
//!   sequences, and ordered records, convertible to and from JSON
//! - **Path-based addressing**: dotted paths with `[N]` indices and `[_]`
//!   skip placeholders
//! - **Declarative specs**: build bindings programmatically or load them
//!   from YAML files
//! - **Validated entities**: construction and mutation reject invalid
//!   input before any state changes
//!
//! ## Example
//!
//! ```
//! use pluck::{extract, ExtractionSpec, FieldBinding, Value};
//!
//! let source = Value::from(serde_json::json!({
//!     "nombre": "Ichigo Kurosaki",
//!     "anime": "Bleach",
//!     "powers": {
//!         "primary": "Getsuga Tensho",
//!         "secondary": ["Hollow Mask", "Bankai"]
//!     }
//! }));
//!
//! let spec = ExtractionSpec::from_bindings(vec![
//!     FieldBinding::dotted("nombre").aliased("name"),
//!     FieldBinding::dotted("edad").aliased("age").or_default(18),
//!     FieldBinding::dotted("powers.secondary.[_].[0]").aliased("second_power"),
//! ]);
//!
//! let result = extract(&source, &spec).unwrap();
//! assert_eq!(result["name"].as_str(), Some("Ichigo Kurosaki"));
//! assert_eq!(result["age"].as_int(), Some(18));
//! assert_eq!(result["second_power"].as_str(), Some("Bankai"));
//! ```

// Core modules
pub mod entity;
pub mod extract;
pub mod path;
pub mod spec;
pub mod value;

// Re-export key types
pub use entity::{Character, EntityError, Powers, DEFAULT_AGE};
pub use extract::{extract, ExtractError};
pub use path::{FieldPath, PathSegment};
pub use spec::{ExtractionSpec, FieldBinding};
pub use value::{Record, Value};
