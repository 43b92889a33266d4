//! Validated character entity.
//!
//! [`Character`] is a record with a fixed field set: an immutable non-empty
//! name, an optional series, an optional set of powers, and one guarded
//! mutable field, `age`. Invalid updates are rejected before being applied,
//! so there is no reachable invalid state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value::{Record, Value};

/// Age assigned when construction omits one.
pub const DEFAULT_AGE: u32 = 18;

/// Error type for entity operations
#[derive(Debug, Clone)]
pub enum EntityError {
    /// Caller supplied a value violating a documented precondition
    InvalidArgument(String),
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for EntityError {}

/// A character's abilities: one main ability plus any number of extras.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Powers {
    pub primary: String,
    #[serde(default)]
    pub secondary: Vec<String>,
}

/// A character record with validated construction and a guarded age mutator.
///
/// Deserialization goes through the same validation as construction, so a
/// `Character` parsed from JSON upholds the same invariants as one built
/// with [`Character::new`].
///
/// # Example
/// ```
/// use pluck::Character;
///
/// let mut ichigo = Character::new("Ichigo Kurosaki")
///     .unwrap()
///     .with_series("Bleach")
///     .with_age(27)
///     .unwrap();
///
/// assert_eq!(ichigo.describe(), "Ichigo Kurosaki (Bleach)");
///
/// ichigo.update_age(25).unwrap();
/// assert_eq!(ichigo.age(), 25);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "CharacterDef")]
pub struct Character {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    series: Option<String>,
    age: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    powers: Option<Powers>,
}

/// Raw deserialization shape for [`Character`], funneled through the
/// validating constructor.
#[derive(Deserialize)]
struct CharacterDef {
    name: String,
    #[serde(default)]
    series: Option<String>,
    #[serde(default)]
    age: Option<i64>,
    #[serde(default)]
    powers: Option<Powers>,
}

impl TryFrom<CharacterDef> for Character {
    type Error = EntityError;

    fn try_from(def: CharacterDef) -> Result<Self, EntityError> {
        let mut character = Character::new(def.name)?;
        if let Some(series) = def.series {
            character = character.with_series(series);
        }
        if let Some(age) = def.age {
            character = character.with_age(age)?;
        }
        if let Some(powers) = def.powers {
            character = character.with_powers(powers);
        }
        Ok(character)
    }
}

impl Character {
    /// Create a character with the default age and no series or powers.
    ///
    /// # Errors
    /// Returns [`EntityError::InvalidArgument`] if `name` is empty or blank.
    pub fn new(name: impl Into<String>) -> Result<Self, EntityError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(EntityError::InvalidArgument(
                "Name must not be empty".to_string(),
            ));
        }

        Ok(Self {
            name,
            series: None,
            age: DEFAULT_AGE,
            powers: None,
        })
    }

    pub fn with_series(mut self, series: impl Into<String>) -> Self {
        self.series = Some(series.into());
        self
    }

    /// Set the initial age, subject to the same rule as [`update_age`](Self::update_age).
    pub fn with_age(mut self, age: i64) -> Result<Self, EntityError> {
        self.age = validate_age(age)?;
        Ok(self)
    }

    pub fn with_powers(mut self, powers: Powers) -> Self {
        self.powers = Some(powers);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn series(&self) -> Option<&str> {
        self.series.as_deref()
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn powers(&self) -> Option<&Powers> {
        self.powers.as_ref()
    }

    /// Formatted character description: `"Name (Series)"`, or the name
    /// alone when there is no series.
    pub fn describe(&self) -> String {
        match &self.series {
            Some(series) => format!("{} ({})", self.name, series),
            None => self.name.clone(),
        }
    }

    /// Replace the age, rejecting invalid values.
    ///
    /// On failure the existing age is left unchanged.
    ///
    /// # Errors
    /// Returns [`EntityError::InvalidArgument`] if `new_age` is negative.
    pub fn update_age(&mut self, new_age: i64) -> Result<(), EntityError> {
        self.age = validate_age(new_age)?;
        Ok(())
    }

    /// Snapshot the character as a plain nested record, suitable as an
    /// extraction source.
    pub fn to_value(&self) -> Value {
        let mut record = Record::new();
        record.insert("name".to_string(), Value::from(self.name.as_str()));
        if let Some(series) = &self.series {
            record.insert("series".to_string(), Value::from(series.as_str()));
        }
        record.insert("age".to_string(), Value::from(self.age));
        if let Some(powers) = &self.powers {
            let mut powers_record = Record::new();
            powers_record.insert("primary".to_string(), Value::from(powers.primary.as_str()));
            powers_record.insert(
                "secondary".to_string(),
                Value::Sequence(
                    powers
                        .secondary
                        .iter()
                        .map(|s| Value::from(s.as_str()))
                        .collect(),
                ),
            );
            record.insert("powers".to_string(), Value::Record(powers_record));
        }
        Value::Record(record)
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}

fn validate_age(age: i64) -> Result<u32, EntityError> {
    u32::try_from(age)
        .map_err(|_| EntityError::InvalidArgument("Age must be positive number".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ichigo() -> Character {
        Character::new("Ichigo Kurosaki")
            .unwrap()
            .with_series("Bleach")
            .with_age(27)
            .unwrap()
    }

    #[test]
    fn test_describe_with_series() {
        assert_eq!(ichigo().describe(), "Ichigo Kurosaki (Bleach)");
    }

    #[test]
    fn test_describe_without_series() {
        let character = Character::new("Ichigo Kurosaki").unwrap();
        assert_eq!(character.describe(), "Ichigo Kurosaki");
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(matches!(
            Character::new(""),
            Err(EntityError::InvalidArgument(_))
        ));
        assert!(matches!(
            Character::new("   "),
            Err(EntityError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_age_defaults_when_omitted() {
        let character = Character::new("Rukia Kuchiki").unwrap();
        assert_eq!(character.age(), DEFAULT_AGE);
    }

    #[test]
    fn test_update_age() {
        let mut character = ichigo();

        character.update_age(25).unwrap();
        assert_eq!(character.age(), 25);
    }

    #[test]
    fn test_negative_age_rejected_and_state_unchanged() {
        let mut character = ichigo();

        let result = character.update_age(-5);

        match result {
            Err(EntityError::InvalidArgument(msg)) => {
                assert_eq!(msg, "Age must be positive number");
            }
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
        assert_eq!(character.age(), 27);
    }

    #[test]
    fn test_construction_rejects_negative_age() {
        let result = Character::new("Ichigo Kurosaki").unwrap().with_age(-1);
        assert!(matches!(result, Err(EntityError::InvalidArgument(_))));
    }

    #[test]
    fn test_deserialization_validates() {
        let character: Character =
            serde_json::from_str(r#"{"name": "Ichigo Kurosaki", "series": "Bleach", "age": 27}"#)
                .unwrap();
        assert_eq!(character.describe(), "Ichigo Kurosaki (Bleach)");
        assert_eq!(character.age(), 27);

        let bad: Result<Character, _> = serde_json::from_str(r#"{"name": "", "age": 27}"#);
        assert!(bad.is_err());

        let bad: Result<Character, _> =
            serde_json::from_str(r#"{"name": "Ichigo Kurosaki", "age": -5}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_to_value_snapshot() {
        let character = ichigo().with_powers(Powers {
            primary: "Getsuga Tensho".to_string(),
            secondary: vec!["Hollow Mask".to_string(), "Bankai".to_string()],
        });

        let value = character.to_value();

        assert_eq!(
            value.get("name").and_then(Value::as_str),
            Some("Ichigo Kurosaki")
        );
        assert_eq!(value.get("age").and_then(Value::as_int), Some(27));
        let secondary = value
            .get("powers")
            .and_then(|p| p.get("secondary"))
            .and_then(Value::as_sequence)
            .unwrap();
        assert_eq!(secondary[1].as_str(), Some("Bankai"));
    }
}
