//! Attribute Values
//!
//! An attribute of a planned or configured token can be in one of three
//! states: a concrete value, explicitly absent, or not known until a later
//! phase (for example a remote identifier that only exists after apply).

use serde::{Deserialize, Serialize};

/// Three-way attribute value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value<T> {
    /// A concrete value.
    Known(T),

    /// The attribute is absent (unset in configuration, or never assigned).
    #[default]
    Null,

    /// The attribute will only be known after a later phase.
    Unknown,
}

impl<T> Value<T> {
    /// Returns `true` if the value is concrete.
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }

    /// Borrow the concrete value, if any.
    pub const fn as_known(&self) -> Option<&T> {
        match self {
            Self::Known(value) => Some(value),
            Self::Null | Self::Unknown => None,
        }
    }
}

impl<T> From<Option<T>> for Value<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Known)
    }
}

/// Serde adapter that reads and writes a [`Value`] as a plain optional value.
///
/// Documents written by an operator have no way to express `Unknown`, so it
/// is written as `null`.
pub mod as_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Value;

    /// Serialize `Known` as the value and anything else as `null`.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error.
    pub fn serialize<T, S>(value: &Value<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        value.as_known().serialize(serializer)
    }

    /// Deserialize a missing or `null` field as `Null`.
    ///
    /// # Errors
    ///
    /// Returns the deserializer's error.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Value<T>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Value::from)
    }
}
