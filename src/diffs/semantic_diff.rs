//! Human-readable character diff: small coincidental matches are folded into
//! the surrounding edits and edits are slid onto word and line boundaries.
//! The heavy lifting is done by `dissimilar`, a port of diff-match-patch with
//! its semantic cleanup.

use dissimilar::Chunk;

use crate::diffs::raw_operation::{RawOperation, join_adjacent};

/// Diffs `old` against `new` with semantic cleanup applied.
pub fn semantic_diff(old: &str, new: &str) -> Vec<RawOperation> {
    join_adjacent(dissimilar::diff(old, new).into_iter().map(|chunk| match chunk {
        Chunk::Equal(text) => RawOperation::Equal(text.chars().collect()),
        Chunk::Delete(text) => RawOperation::Delete(text.chars().collect()),
        Chunk::Insert(text) => RawOperation::Insert(text.chars().collect()),
    }))
}
