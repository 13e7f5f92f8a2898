//! The four-valued logic domain.
//!
//! Every node in a network carries exactly one [`Value`]. The domain is
//! closed: gates are total functions over it and the resolution rule
//! ([`Value::combine`]) always yields a member of it, so disconnection
//! and multi-driver conflict are representable states rather than errors.

use std::fmt;
use std::ops::Not;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A logic level.
///
/// Serialized and displayed with the conventional single-character
/// symbols: `1`, `0`, `X` (conflict) and `Z` (floating).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// Driven high.
    #[serde(rename = "1")]
    High,
    /// Driven low.
    #[serde(rename = "0")]
    Low,
    /// Two or more simultaneous drivers.
    #[serde(rename = "X")]
    Conflict,
    /// No driver. The state of every freshly created node.
    #[default]
    #[serde(rename = "Z")]
    Floating,
}

impl Value {
    /// All four values, in declaration order.
    pub const ALL: [Value; 4] = [Value::High, Value::Low, Value::Conflict, Value::Floating];

    /// Resolve the level of a node from the levels of its drivers.
    ///
    /// Zero drivers float, exactly one driver wins, and two or more
    /// drivers conflict even when they assert the same level: the rule
    /// counts drivers, not distinct values.
    ///
    /// ```
    /// use volt_core::Value;
    ///
    /// assert_eq!(Value::combine([]), Value::Floating);
    /// assert_eq!(Value::combine([Value::Low]), Value::Low);
    /// assert_eq!(Value::combine([Value::High, Value::High]), Value::Conflict);
    /// ```
    pub fn combine<I>(drivers: I) -> Value
    where
        I: IntoIterator<Item = Value>,
    {
        let mut drivers = drivers.into_iter();
        match (drivers.next(), drivers.next()) {
            (None, _) => Value::Floating,
            (Some(only), None) => only,
            (Some(_), Some(_)) => Value::Conflict,
        }
    }

    /// `true` for every value except [`Value::Floating`].
    pub fn is_driven(self) -> bool {
        self != Value::Floating
    }

    /// `true` for the two proper logic levels.
    pub fn is_level(self) -> bool {
        matches!(self, Value::High | Value::Low)
    }

    /// The conventional symbol for this value.
    pub fn symbol(self) -> char {
        match self {
            Value::High => '1',
            Value::Low => '0',
            Value::Conflict => 'X',
            Value::Floating => 'Z',
        }
    }
}

/// Logical negation. Anything that is not a proper level negates to
/// [`Value::Conflict`].
impl Not for Value {
    type Output = Value;

    fn not(self) -> Value {
        match self {
            Value::High => Value::Low,
            Value::Low => Value::High,
            Value::Conflict | Value::Floating => Value::Conflict,
        }
    }
}

impl From<bool> for Value {
    fn from(level: bool) -> Self {
        if level {
            Value::High
        } else {
            Value::Low
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Error returned when parsing a [`Value`] from an unknown symbol.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown logic value '{0}', expected one of 1, 0, X, Z")]
pub struct ParseValueError(pub String);

impl FromStr for Value {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1" => Ok(Value::High),
            "0" => Ok(Value::Low),
            "X" | "x" => Ok(Value::Conflict),
            "Z" | "z" => Ok(Value::Floating),
            other => Err(ParseValueError(other.to_string())),
        }
    }
}
