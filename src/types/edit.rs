#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::owner_id::OwnerId;

/// A proposed rewrite of a paragraph's visible text by `owner`.
///
/// `target` may contain `RANGE_START`/`RANGE_END` pairs to mark the part of
/// the rewrite that forms one semantic edit.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub target: String,
    pub owner: OwnerId,
}

impl Edit {
    #[must_use]
    pub fn new(target: impl Into<String>, owner: impl Into<OwnerId>) -> Self {
        Self {
            target: target.into(),
            owner: owner.into(),
        }
    }

    #[must_use]
    pub fn target(&self) -> &str { &self.target }

    #[must_use]
    pub fn owner(&self) -> &OwnerId { &self.owner }
}
