use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Marks the start of a semantic range inside a target text.
pub const RANGE_START: char = '\u{E000}';

/// Marks the end of a semantic range inside a target text.
pub const RANGE_END: char = '\u{E001}';

/// Stands in for one run of already-deleted text while layering a new diff.
/// Never leaves the crate.
pub(crate) const PLACEHOLDER: char = '\u{E002}';

/// The code points reserved by the engine. They live in the Unicode private
/// use area and must not appear in caller-supplied text, except for the two
/// range markers which callers place in target texts on purpose.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedCharacter {
    RangeStart,
    RangeEnd,
    Placeholder,
}

impl ReservedCharacter {
    #[must_use]
    pub fn from_char(character: char) -> Option<Self> {
        match character {
            RANGE_START => Some(ReservedCharacter::RangeStart),
            RANGE_END => Some(ReservedCharacter::RangeEnd),
            PLACEHOLDER => Some(ReservedCharacter::Placeholder),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            ReservedCharacter::RangeStart => RANGE_START,
            ReservedCharacter::RangeEnd => RANGE_END,
            ReservedCharacter::Placeholder => PLACEHOLDER,
        }
    }

    #[must_use]
    pub fn is_range_marker(self) -> bool { self != ReservedCharacter::Placeholder }

    /// Returns the character index and kind of the first reserved character in
    /// `text` that `is_allowed` rejects.
    pub fn find_disallowed(
        text: &str,
        is_allowed: impl Fn(ReservedCharacter) -> bool,
    ) -> Option<(usize, ReservedCharacter)> {
        text.chars()
            .enumerate()
            .filter_map(|(index, character)| {
                ReservedCharacter::from_char(character).map(|reserved| (index, reserved))
            })
            .find(|(_, reserved)| !is_allowed(*reserved))
    }
}

impl Display for ReservedCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReservedCharacter::RangeStart => write!(f, "range start (U+E000)"),
            ReservedCharacter::RangeEnd => write!(f, "range end (U+E001)"),
            ReservedCharacter::Placeholder => write!(f, "placeholder (U+E002)"),
        }
    }
}

/// Returns `text` without any range markers, ready for rendering.
#[must_use]
pub fn strip_range_markers(text: &str) -> String {
    text.chars()
        .filter(|character| *character != RANGE_START && *character != RANGE_END)
        .collect()
}
