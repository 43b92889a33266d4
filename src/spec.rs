//! Declarative extraction specs.
//!
//! An [`ExtractionSpec`] is an ordered list of field bindings. Each binding
//! names a path into the source record, an optional alias to bind the value
//! under, and an optional default for when the path resolves to nothing.
//! A spec may also carry one "rest" binding that captures every top-level
//! field not claimed by the other bindings.
//!
//! Specs can be built programmatically or loaded from YAML files.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::extract::ExtractError;
use crate::path::FieldPath;
use crate::value::Value;

/// A single named extraction instruction.
///
/// # Example
/// ```
/// use pluck::{FieldBinding, FieldPath};
///
/// let binding = FieldBinding::dotted("powers.primary")
///     .aliased("main_power")
///     .or_default("Unknown Power");
///
/// assert_eq!(binding.target_name(), Some("main_power"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldBinding {
    /// Path to the value inside the source record. Unused for rest bindings.
    #[serde(default, skip_serializing_if = "FieldPath::is_empty")]
    pub path: FieldPath,

    /// Name to bind the extracted value under. Defaults to the path's
    /// final field name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Value to bind when the path resolves to nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Capture all top-level fields not claimed by other bindings.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub rest: bool,
}

impl FieldBinding {
    /// Create a binding for a path.
    pub fn new(path: FieldPath) -> Self {
        Self {
            path,
            target: None,
            default: None,
            rest: false,
        }
    }

    /// Create a binding from a dotted path string.
    pub fn dotted(path: &str) -> Self {
        Self::new(FieldPath::from_dotted(path))
    }

    /// Bind the extracted value under an alias instead of the path's
    /// final field name.
    pub fn aliased(mut self, name: impl Into<String>) -> Self {
        self.target = Some(name.into());
        self
    }

    /// Use a fallback value when the path resolves to nothing.
    pub fn or_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Create a rest binding that captures all unclaimed top-level fields
    /// under the given name.
    pub fn rest(name: impl Into<String>) -> Self {
        Self {
            path: FieldPath::default(),
            target: Some(name.into()),
            default: None,
            rest: true,
        }
    }

    /// The name this binding's value is bound under: the explicit target
    /// if set, else the path's final field name.
    pub fn target_name(&self) -> Option<&str> {
        self.target.as_deref().or_else(|| self.path.last_key())
    }
}

/// An ordered list of field bindings applied together to one source record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExtractionSpec {
    pub bindings: Vec<FieldBinding>,
}

impl ExtractionSpec {
    /// Create a spec from pre-built bindings.
    pub fn from_bindings(bindings: Vec<FieldBinding>) -> Self {
        Self { bindings }
    }

    /// Load an extraction spec from a YAML file.
    ///
    /// # Arguments
    /// * `path` - Path to the spec file
    ///
    /// # Returns
    /// The parsed and validated spec
    ///
    /// # Errors
    /// Returns error if the file is unreadable, the YAML is malformed, or
    /// the spec fails [`validate`](Self::validate)
    ///
    /// # Example
    /// ```ignore
    /// use pluck::ExtractionSpec;
    ///
    /// let spec = ExtractionSpec::load_from_file("config/character_bindings.yaml")?;
    /// println!("{} bindings", spec.len());
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|e| {
            ExtractError::SpecError(format!("Failed to read spec file {}: {}", path.display(), e))
        })?;

        let spec: ExtractionSpec = serde_yaml::from_str(&contents)
            .map_err(|e| ExtractError::SpecError(format!("Failed to parse spec YAML: {}", e)))?;

        spec.validate()?;

        Ok(spec)
    }

    /// Check that the spec is well-formed.
    ///
    /// Runs before any path resolution: every binding must produce a target
    /// name, target names must be unique, and at most one binding may be a
    /// rest capture.
    pub fn validate(&self) -> Result<(), ExtractError> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut rest_count = 0;

        for binding in &self.bindings {
            let name = binding.target_name().ok_or_else(|| {
                ExtractError::SpecError(format!(
                    "binding for path '{}' has no target name; paths ending on an \
                     index or skip need an explicit target",
                    binding.path
                ))
            })?;

            if !seen.insert(name) {
                return Err(ExtractError::DuplicateTargetName(name.to_string()));
            }

            if binding.rest {
                rest_count += 1;
                if rest_count > 1 {
                    return Err(ExtractError::SpecError(
                        "spec has more than one rest binding".to_string(),
                    ));
                }
            }
        }

        Ok(())
    }

    pub fn bindings(&self) -> &[FieldBinding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_target_name_defaults_to_last_key() {
        let binding = FieldBinding::dotted("powers.primary");
        assert_eq!(binding.target_name(), Some("primary"));
    }

    #[test]
    fn test_target_name_alias_wins() {
        let binding = FieldBinding::dotted("nombre").aliased("character_name");
        assert_eq!(binding.target_name(), Some("character_name"));
    }

    #[test]
    fn test_index_terminated_path_has_no_default_name() {
        let binding = FieldBinding::dotted("powers.secondary.[1]");
        assert_eq!(binding.target_name(), None);

        let spec = ExtractionSpec::from_bindings(vec![binding]);
        assert!(matches!(
            spec.validate(),
            Err(ExtractError::SpecError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_targets() {
        let spec = ExtractionSpec::from_bindings(vec![
            FieldBinding::dotted("a").aliased("x"),
            FieldBinding::dotted("b").aliased("x"),
        ]);

        match spec.validate() {
            Err(ExtractError::DuplicateTargetName(name)) => assert_eq!(name, "x"),
            other => panic!("expected DuplicateTargetName, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_two_rest_bindings() {
        let spec = ExtractionSpec::from_bindings(vec![
            FieldBinding::rest("extra"),
            FieldBinding::rest("more"),
        ]);

        assert!(matches!(spec.validate(), Err(ExtractError::SpecError(_))));
    }

    #[test]
    fn test_spec_yaml_round_trip() {
        let spec = ExtractionSpec::from_bindings(vec![
            FieldBinding::dotted("nombre").aliased("name"),
            FieldBinding::dotted("powers.primary").or_default("Unknown Power"),
            FieldBinding::rest("extra"),
        ]);

        let yaml = serde_yaml::to_string(&spec).unwrap();
        let back: ExtractionSpec = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(back, spec);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "bindings:\n\
             \x20 - path: nombre\n\
             \x20   target: name\n\
             \x20 - path: powers.secondary.[_].[0]\n\
             \x20   target: second_power\n\
             \x20 - target: extra\n\
             \x20   rest: true\n"
        )
        .unwrap();

        let spec = ExtractionSpec::load_from_file(file.path()).unwrap();

        assert_eq!(spec.len(), 3);
        assert_eq!(spec.bindings()[0].target_name(), Some("name"));
        assert_eq!(spec.bindings()[1].path.segments.len(), 4);
        assert!(spec.bindings()[2].rest);
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = ExtractionSpec::load_from_file("/nonexistent/spec.yaml");

        match result {
            Err(ExtractError::SpecError(msg)) => assert!(msg.contains("Failed to read")),
            other => panic!("expected SpecError, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_duplicate_targets() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "bindings:\n\
             \x20 - path: a\n\
             \x20 - path: nested.a\n"
        )
        .unwrap();

        let result = ExtractionSpec::load_from_file(file.path());
        assert!(matches!(result, Err(ExtractError::DuplicateTargetName(_))));
    }
}
