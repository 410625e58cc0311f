use pretty_assertions::assert_eq;
use redline_text::{
    Change, Edit, RANGE_END, RANGE_START, ReconcileError, apply_edits, base_text, diff,
};
use serde::Deserialize;

/// `ExampleDocument` represents a test case for applying concurrent edits to
/// a tracked paragraph.
///
/// The paragraph starts out as the diff of `base` and `seed.visible` by
/// `seed.owner` (or as untouched `base` without a seed). Every edit proposes
/// a new visible text. The result is either a conflict or the `expected`
/// rendering of the changes.
///
/// '⟪' and '⟫' in targets and renderings stand for the range markers.
/// Renderings write insertions as `[+text+]{owner}` and deletions as
/// `[-text-]{owner}`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ExampleDocument {
    name: String,
    base: String,
    #[serde(default)]
    seed: Option<ExampleSeed>,
    edits: Vec<ExampleEdit>,
    #[serde(default)]
    expected: Option<String>,
    #[serde(default)]
    conflict: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ExampleSeed {
    visible: String,
    owner: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ExampleEdit {
    target: String,
    owner: String,
}

impl ExampleDocument {
    #[must_use]
    pub fn name(&self) -> &str { &self.name }

    #[must_use]
    pub fn existing(&self) -> Vec<Change> {
        match &self.seed {
            Some(seed) => diff(
                &self.base,
                &Self::with_markers(&seed.visible),
                seed.owner.as_str(),
            ),
            None => Change::create_equal(self.base.as_str()).into_iter().collect(),
        }
    }

    #[must_use]
    pub fn edits(&self) -> Vec<Edit> {
        self.edits
            .iter()
            .map(|edit| Edit::new(Self::with_markers(&edit.target), edit.owner.as_str()))
            .collect()
    }

    /// Applies the edits and checks the outcome against the expectation.
    ///
    /// # Panics
    ///
    /// If the outcome differs from the expected one.
    pub fn assert_outcome(&self) {
        let result = apply_edits(&self.existing(), &self.edits());

        if self.conflict {
            assert!(
                matches!(result, Err(ReconcileError::Conflict(..))),
                "{}: expected a conflict, got {result:?}",
                self.name
            );
            return;
        }

        let changes = result.unwrap_or_else(|error| panic!("{}: {error}", self.name));
        assert_eq!(base_text(&changes), self.base, "{}", self.name);

        if let Some(expected) = &self.expected {
            assert_eq!(&Self::render(&changes), expected, "{}", self.name);
        }
    }

    #[must_use]
    pub fn render(changes: &[Change]) -> String {
        changes
            .iter()
            .map(|change| {
                let text = Self::without_markers(change.text());
                match change {
                    Change::Equal { .. } => text,
                    Change::Insert { owner, .. } => format!("[+{text}+]{{{owner}}}"),
                    Change::Delete { owner, .. } => format!("[-{text}-]{{{owner}}}"),
                }
            })
            .collect()
    }

    fn with_markers(text: &str) -> String {
        text.replace('⟪', &RANGE_START.to_string())
            .replace('⟫', &RANGE_END.to_string())
    }

    fn without_markers(text: &str) -> String {
        text.replace(RANGE_START, "⟪").replace(RANGE_END, "⟫")
    }
}
