use std::fmt::Display;

use thiserror::Error;

use crate::{types::reserved_character::ReservedCharacter, utils::side::Side};

/// Reasons two diffs of the same paragraph cannot be merged.
///
/// Merging is all-or-nothing: a conflict means no partial result exists for
/// the pair.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeConflict {
    /// The diffs were not computed against base texts of the same length
    #[error(
        "Cannot merge: the {side} diff's base text has {actual} characters but the other diff's \
         has {expected}"
    )]
    BaseLengthMismatch {
        side: Side,
        /// Length of the base text of the other diff
        expected: usize,
        /// Length of the base text of this side's diff
        actual: usize,
    },

    /// The diffs have base texts of the same length that differ in content
    #[error("Cannot merge: the {side} diff's base text differs from the other's at character {offset}")]
    BaseMismatch { side: Side, offset: usize },

    /// Both diffs delete the same base character
    #[error("Cannot merge: both diffs delete the character at {offset}")]
    OverlappingDelete { offset: usize },

    /// One diff inserts strictly inside a span the other one deletes
    #[error(
        "Cannot merge: the {side} diff inserts at character {offset}, inside text deleted by the \
         {} diff",
        .side.other()
    )]
    InsertInsideDelete { side: Side, offset: usize },
}

/// Which caller-supplied text a problem was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputLocation {
    ExistingDiff,
    /// Target text of the edit at the given index
    EditTarget(usize),
}

impl Display for InputLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputLocation::ExistingDiff => write!(f, "the existing diff"),
            InputLocation::EditTarget(index) => write!(f, "the target of edit #{index}"),
        }
    }
}

/// Error type of `apply_edits`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// Caller text contains a code point the engine reserves for itself
    #[error("Invalid input: {character} found at character {position} of {location}")]
    ReservedCharacter {
        character: ReservedCharacter,
        /// Character index within the concatenated text of `location`
        position: usize,
        location: InputLocation,
    },

    #[error(transparent)]
    Conflict(#[from] MergeConflict),
}
