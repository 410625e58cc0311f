use crate::{
    diffs::myers::myers_diff,
    types::{change::Change, owner_id::OwnerId},
};

/// Unattributed diff operation over characters, the output of the diff
/// primitive before any owner is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOperation {
    Insert(Vec<char>),
    Delete(Vec<char>),
    Equal(Vec<char>),
}

impl RawOperation {
    /// Character-level diff of `old` and `new`. Every returned operation
    /// wraps exactly one character.
    pub fn vec_from(old: &[char], new: &[char]) -> Vec<Self> { myers_diff(old, new) }

    pub fn chars(&self) -> &[char] {
        match self {
            RawOperation::Insert(chars) | RawOperation::Delete(chars) | RawOperation::Equal(chars) => {
                chars
            }
        }
    }

    pub fn len(&self) -> usize { self.chars().len() }

    pub fn is_empty(&self) -> bool { self.chars().is_empty() }

    pub fn text(&self) -> String { self.chars().iter().collect() }

    pub fn is_same_kind(&self, other: &RawOperation) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Extends the operation with another operation. Only operations of the
    /// same type as self can be used to extend self.
    pub fn join(self, other: RawOperation) -> RawOperation {
        debug_assert!(
            self.is_same_kind(&other),
            "Cannot extend operations of different types. This should have been handled before \
             calling this function."
        );

        match (self, other) {
            (RawOperation::Insert(mut chars), RawOperation::Insert(other_chars)) => {
                chars.extend(other_chars);
                RawOperation::Insert(chars)
            }
            (RawOperation::Delete(mut chars), RawOperation::Delete(other_chars)) => {
                chars.extend(other_chars);
                RawOperation::Delete(chars)
            }
            (RawOperation::Equal(mut chars), RawOperation::Equal(other_chars)) => {
                chars.extend(other_chars);
                RawOperation::Equal(chars)
            }
            _ => unreachable!("Only operations of the same type can be extended"),
        }
    }

    /// Attributes the operation to `owner`. Returns `None` for empty
    /// operations.
    pub fn into_change(self, owner: &OwnerId) -> Option<Change> {
        let text = self.text();
        match self {
            RawOperation::Equal(..) => Change::create_equal(text),
            RawOperation::Insert(..) => Change::create_insert(text, owner),
            RawOperation::Delete(..) => Change::create_delete(text, owner),
        }
    }
}

/// Joins subsequent operations of the same type and drops empty ones.
pub fn join_adjacent<I>(operations: I) -> Vec<RawOperation>
where
    I: IntoIterator<Item = RawOperation>,
{
    let mut result: Vec<RawOperation> = Vec::new();

    for operation in operations {
        if operation.is_empty() {
            continue;
        }

        match result.pop() {
            Some(previous) if previous.is_same_kind(&operation) => {
                result.push(previous.join(operation));
            }
            Some(previous) => {
                result.push(previous);
                result.push(operation);
            }
            None => result.push(operation),
        }
    }

    result
}
