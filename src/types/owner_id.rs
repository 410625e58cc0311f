use std::{borrow::Cow, fmt::Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifies the edit (or the author of the edit) that an `Insert` or a
/// `Delete` belongs to.
///
/// Callers tend to use either small integers (the index of a suggestion) or
/// short strings (a user name), so both are supported without a generic
/// parameter leaking into every signature.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OwnerId {
    Number(i64),
    Text(String),
}

impl Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OwnerId::Number(number) => write!(f, "{number}"),
            OwnerId::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<i64> for OwnerId {
    fn from(value: i64) -> Self { OwnerId::Number(value) }
}

impl From<String> for OwnerId {
    fn from(value: String) -> Self { OwnerId::Text(value) }
}

impl From<&str> for OwnerId {
    fn from(value: &str) -> Self { OwnerId::Text(value.to_owned()) }
}

impl<'a> From<Cow<'a, str>> for OwnerId {
    fn from(value: Cow<'a, str>) -> Self { OwnerId::Text(value.into_owned()) }
}

impl From<&OwnerId> for OwnerId {
    fn from(value: &OwnerId) -> Self { value.clone() }
}
