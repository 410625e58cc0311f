#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Post-processing applied to the raw character diff before it is attributed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cleanup {
    /// Keep the minimal character diff as is.
    None,

    /// Fold coincidental matches into the surrounding edits and align edits
    /// to word and line boundaries.
    #[default]
    Semantic,
}

/// Settings shared by diffing, layering and the edit orchestration.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffOptions {
    pub cleanup: Cleanup,
}

impl DiffOptions {
    #[must_use]
    pub fn with_cleanup(cleanup: Cleanup) -> Self { Self { cleanup } }
}
