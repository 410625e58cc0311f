use crate::types::{change::Change, owner_id::OwnerId};

/// A helper for building a canonical `Change` sequence in-order. Empty spans
/// are dropped and every pushed span is joined onto the previous one when
/// both have the same kind and owner, so the result never needs a separate
/// coalescing pass. Range markers are kept as standalone changes.
#[derive(Debug, Default)]
pub struct ChangeBuilder {
    changes: Vec<Change>,
}

impl ChangeBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            changes: Vec::with_capacity(capacity),
        }
    }

    /// Append a change, joining it with the last one if possible.
    pub fn push(&mut self, change: Change) {
        if change.is_empty() {
            return;
        }

        match self.changes.last_mut() {
            Some(last) if last.is_joinable_with(&change) => last.push_str(change.text()),
            _ => self.changes.push(change),
        }
    }

    pub fn equal(&mut self, text: &str) { self.push_option(Change::create_equal(text)); }

    pub fn insert(&mut self, text: &str, owner: &OwnerId) {
        self.push_option(Change::create_insert(text, owner));
    }

    pub fn delete(&mut self, text: &str, owner: &OwnerId) {
        self.push_option(Change::create_delete(text, owner));
    }

    pub fn push_option(&mut self, change: Option<Change>) {
        if let Some(change) = change {
            self.push(change);
        }
    }

    /// Returns the built sequence.
    pub fn build(self) -> Vec<Change> { self.changes }
}

impl Extend<Change> for ChangeBuilder {
    fn extend<I: IntoIterator<Item = Change>>(&mut self, changes: I) {
        for change in changes {
            self.push(change);
        }
    }
}

/// Joins adjacent changes of the same kind and owner and drops empty ones.
pub fn coalesce<I>(changes: I) -> Vec<Change>
where
    I: IntoIterator<Item = Change>,
{
    let mut builder = ChangeBuilder::new();
    builder.extend(changes);
    builder.build()
}
