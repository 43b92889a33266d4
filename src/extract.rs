//! Path resolution engine for extraction specs.
//!
//! [`extract`] applies an [`ExtractionSpec`] to a source value and returns
//! a flat record of named results. The engine is a pure function over its
//! inputs: the source is never mutated and no state is kept across calls.

use std::collections::HashSet;
use std::fmt;

use crate::path::{FieldPath, PathSegment};
use crate::spec::ExtractionSpec;
use crate::value::{Record, Value};

/// Error type for extraction operations
#[derive(Debug, Clone)]
pub enum ExtractError {
    /// Two bindings in one spec resolve to the same target name
    DuplicateTargetName(String),
    /// A path descends into a value of the wrong shape
    InvalidPath { path: String, reason: String },
    /// The spec itself is malformed (nameless binding, multiple rest
    /// bindings, unreadable spec file)
    SpecError(String),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::DuplicateTargetName(name) => {
                write!(f, "Duplicate target name in spec: '{}'", name)
            }
            ExtractError::InvalidPath { path, reason } => {
                write!(f, "Invalid path '{}': {}", path, reason)
            }
            ExtractError::SpecError(msg) => write!(f, "Spec error: {}", msg),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Apply an extraction spec to a source value.
///
/// Resolves each binding's path against `source` and returns a flat record
/// mapping target names to resolved values, in spec order. A path that
/// resolves to nothing binds the binding's default, or null when there is
/// none - a missing optional field never errors. A path that descends into
/// a value of the wrong shape is a structural error and aborts the whole
/// call; partial results are never returned.
///
/// # Example
/// ```
/// use pluck::{extract, ExtractionSpec, FieldBinding, Value};
///
/// let source = Value::from(serde_json::json!({
///     "nombre": "Ichigo Kurosaki",
///     "powers": {"primary": "Getsuga Tensho", "secondary": ["Hollow Mask", "Bankai"]}
/// }));
///
/// let spec = ExtractionSpec::from_bindings(vec![
///     FieldBinding::dotted("nombre").aliased("name"),
///     FieldBinding::dotted("powers.secondary.[_].[0]").aliased("second_power"),
/// ]);
///
/// let result = extract(&source, &spec).unwrap();
/// assert_eq!(result["name"].as_str(), Some("Ichigo Kurosaki"));
/// assert_eq!(result["second_power"].as_str(), Some("Bankai"));
/// ```
///
/// # Errors
/// * [`ExtractError::DuplicateTargetName`] - detected before any resolution
/// * [`ExtractError::InvalidPath`] - a path hit a value of the wrong shape
/// * [`ExtractError::SpecError`] - the spec is malformed
pub fn extract(source: &Value, spec: &ExtractionSpec) -> Result<Record, ExtractError> {
    spec.validate()?;

    // Top-level fields claimed by non-rest bindings, for rest capture.
    let claimed: HashSet<&str> = spec
        .bindings()
        .iter()
        .filter(|b| !b.rest)
        .filter_map(|b| match b.path.segments.first() {
            Some(PathSegment::Key(name)) => Some(name.as_str()),
            _ => None,
        })
        .collect();

    let mut result = Record::new();

    for binding in spec.bindings() {
        // validate() guarantees every binding has a name
        let name = binding
            .target_name()
            .ok_or_else(|| ExtractError::SpecError("binding has no target name".to_string()))?;

        let value = if binding.rest {
            capture_rest(source, &claimed)?
        } else {
            match resolve(source, &binding.path)? {
                Some(found) => found.clone(),
                None => binding.default.clone().unwrap_or(Value::Null),
            }
        };

        result.insert(name.to_string(), value);
    }

    Ok(result)
}

/// Walk a path against a source value.
///
/// Returns `Ok(None)` when the path runs off the data (missing field,
/// index past the end of a sequence, trailing skip) - the caller decides
/// between a default and null. Returns `Err` when a segment meets a value
/// of the wrong shape.
fn resolve<'a>(source: &'a Value, path: &FieldPath) -> Result<Option<&'a Value>, ExtractError> {
    let mut current = source;
    // Pending positions consumed by skip placeholders, applied to the
    // next index segment.
    let mut skipped = 0usize;

    for segment in &path.segments {
        match segment {
            PathSegment::Key(key) => match current {
                Value::Record(map) => match map.get(key) {
                    Some(child) => current = child,
                    None => return Ok(None),
                },
                other => {
                    return Err(invalid_path(
                        path,
                        format!("cannot read field '{}' of {} value", key, other.type_name()),
                    ));
                }
            },
            PathSegment::Index(index) => match current {
                Value::Sequence(items) => match items.get(skipped + index) {
                    Some(child) => {
                        current = child;
                        skipped = 0;
                    }
                    None => return Ok(None),
                },
                other => {
                    return Err(invalid_path(
                        path,
                        format!("cannot index into {} value", other.type_name()),
                    ));
                }
            },
            PathSegment::Skip => match current {
                Value::Sequence(_) => skipped += 1,
                other => {
                    return Err(invalid_path(
                        path,
                        format!("skip placeholder applied to {} value", other.type_name()),
                    ));
                }
            },
        }
    }

    if skipped > 0 {
        // Path ended on a skip placeholder; nothing was selected.
        return Ok(None);
    }

    Ok(Some(current))
}

/// Collect every top-level field of `source` not claimed by a non-rest
/// binding into an independent record.
fn capture_rest(source: &Value, claimed: &HashSet<&str>) -> Result<Value, ExtractError> {
    let record = source.as_record().ok_or_else(|| ExtractError::InvalidPath {
        path: "<rest>".to_string(),
        reason: format!(
            "rest capture needs a record source, got {} value",
            source.type_name()
        ),
    })?;

    let rest: Record = record
        .iter()
        .filter(|(name, _)| !claimed.contains(name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    Ok(Value::Record(rest))
}

fn invalid_path(path: &FieldPath, reason: String) -> ExtractError {
    ExtractError::InvalidPath {
        path: path.raw.clone(),
        reason,
    }
}
