use core::fmt::{Debug, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{
    owner_id::OwnerId,
    reserved_character::{RANGE_END, RANGE_START, ReservedCharacter},
};

/// A single span of a tracked paragraph.
///
/// Only `Insert` and `Delete` are attributed to an owner; unchanged text
/// belongs to nobody. Changes are never empty: use the `create_*`
/// constructors which return `None` for empty text.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Change {
    Equal {
        text: String,
    },

    Insert {
        text: String,
        #[cfg_attr(feature = "serde", serde(rename = "ownerId"))]
        owner: OwnerId,
    },

    Delete {
        text: String,
        #[cfg_attr(feature = "serde", serde(rename = "ownerId"))]
        owner: OwnerId,
    },
}

impl Change {
    /// Creates an equal span. Returns `None` if `text` is empty.
    pub fn create_equal(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            return None;
        }

        Some(Change::Equal { text })
    }

    /// Creates an insertion attributed to `owner`. Returns `None` if `text`
    /// is empty.
    pub fn create_insert(text: impl Into<String>, owner: impl Into<OwnerId>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            return None;
        }

        Some(Change::Insert {
            text,
            owner: owner.into(),
        })
    }

    /// Creates a deletion attributed to `owner`. Returns `None` if `text` is
    /// empty.
    pub fn create_delete(text: impl Into<String>, owner: impl Into<OwnerId>) -> Option<Self> {
        let text = text.into();
        if text.is_empty() {
            return None;
        }

        Some(Change::Delete {
            text,
            owner: owner.into(),
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Change::Equal { text } | Change::Insert { text, .. } | Change::Delete { text, .. } => {
                text
            }
        }
    }

    #[must_use]
    pub fn owner(&self) -> Option<&OwnerId> {
        match self {
            Change::Equal { .. } => None,
            Change::Insert { owner, .. } | Change::Delete { owner, .. } => Some(owner),
        }
    }

    /// Number of characters (not bytes) in the span.
    #[must_use]
    pub fn len(&self) -> usize { self.text().chars().count() }

    /// Always `false` for changes built through the constructors.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.text().is_empty() }

    #[must_use]
    pub fn is_equal(&self) -> bool { matches!(self, Change::Equal { .. }) }

    #[must_use]
    pub fn is_insert(&self) -> bool { matches!(self, Change::Insert { .. }) }

    #[must_use]
    pub fn is_delete(&self) -> bool { matches!(self, Change::Delete { .. }) }

    /// Whether the change contributes to the text before the edits.
    #[must_use]
    pub fn is_in_base(&self) -> bool { !self.is_insert() }

    /// Whether the change contributes to the text after the edits.
    #[must_use]
    pub fn is_visible(&self) -> bool { !self.is_delete() }

    /// Returns the marker kind if this change is an insertion consisting of
    /// exactly one range marker.
    #[must_use]
    pub fn range_marker(&self) -> Option<ReservedCharacter> {
        let Change::Insert { text, .. } = self else {
            return None;
        };

        let mut characters = text.chars();
        match (characters.next(), characters.next()) {
            (Some(character @ (RANGE_START | RANGE_END)), None) => {
                ReservedCharacter::from_char(character)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn is_range_start_of(&self, owner: &OwnerId) -> bool {
        self.range_marker() == Some(ReservedCharacter::RangeStart) && self.owner() == Some(owner)
    }

    #[must_use]
    pub fn is_range_end_of(&self, owner: &OwnerId) -> bool {
        self.range_marker() == Some(ReservedCharacter::RangeEnd) && self.owner() == Some(owner)
    }

    /// Whether this is an edit by `owner` that carries actual content, i.e.
    /// anything but a lone range marker.
    #[must_use]
    pub fn is_content_of(&self, owner: &OwnerId) -> bool {
        self.owner() == Some(owner) && self.range_marker().is_none()
    }

    /// Whether `self` and `other` can be represented as a single change.
    /// Range markers always stay on their own.
    #[must_use]
    pub fn is_joinable_with(&self, other: &Change) -> bool {
        if self.range_marker().is_some() || other.range_marker().is_some() {
            return false;
        }

        match (self, other) {
            (Change::Equal { .. }, Change::Equal { .. }) => true,
            (Change::Insert { owner, .. }, Change::Insert { owner: other_owner, .. })
            | (Change::Delete { owner, .. }, Change::Delete { owner: other_owner, .. }) => {
                owner == other_owner
            }
            _ => false,
        }
    }

    /// Appends `text` to the change, keeping its kind and owner.
    pub(crate) fn push_str(&mut self, addition: &str) {
        match self {
            Change::Equal { text } | Change::Insert { text, .. } | Change::Delete { text, .. } => {
                text.push_str(addition);
            }
        }
    }
}

/// Text as it was before the changes: every `Equal` and `Delete` span.
#[must_use]
pub fn base_text(changes: &[Change]) -> String {
    changes
        .iter()
        .filter(|change| change.is_in_base())
        .map(Change::text)
        .collect()
}

/// Text as it reads after the changes: every `Equal` and `Insert` span.
#[must_use]
pub fn visible_text(changes: &[Change]) -> String {
    changes
        .iter()
        .filter(|change| change.is_visible())
        .map(Change::text)
        .collect()
}

impl Display for Change {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let escape = |text: &str| {
            text.replace('\n', "\\n")
                .replace(RANGE_START, "⟦")
                .replace(RANGE_END, "⟧")
        };

        match self {
            Change::Equal { text } => write!(f, "<equal '{}'>", escape(text)),
            Change::Insert { text, owner } => write!(f, "<insert '{}' by {owner}>", escape(text)),
            Change::Delete { text, owner } => write!(f, "<delete '{}' by {owner}>", escape(text)),
        }
    }
}

impl Debug for Change {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result { write!(f, "{self}") }
}
