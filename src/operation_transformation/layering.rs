use std::mem;

use log::trace;

use crate::{
    diffs::{
        diff_options::{Cleanup, DiffOptions},
        raw_operation::RawOperation,
    },
    operation_transformation::{
        attributed_diff::{attribute, raw_diff},
        canonicalize_ranges::split_range_markers,
    },
    types::{
        change::{Change, base_text, visible_text},
        owner_id::OwnerId,
        reserved_character::{PLACEHOLDER, ReservedCharacter},
    },
    utils::change_builder::{ChangeBuilder, coalesce},
};

/// Computes the changes needed to turn the visible text of `existing` into
/// `target`, attributed to `owner`, without ever deleting text that
/// `existing` already deletes.
///
/// The result restates the whole of `existing`'s text (every `Equal`,
/// `Insert` and `Delete` span of `existing` reads as `Equal` in it) so that
/// several layers computed against the same `existing` can be merged.
/// Deleted text of `existing` is kept as context: it never becomes `Delete`
/// again. The same holds for the range markers and placeholders `existing`
/// carries, so the ranges of earlier edits survive a new layer.
///
/// `target` must not contain the placeholder (U+E002); `apply_edits`
/// rejects such targets before layering.
///
/// ```
/// use redline_text::{Change, diff, layer};
///
/// let existing = diff("The quick brown fox.", "The quick fox.", "alice");
///
/// assert_eq!(
///     layer(&existing, "The quick fox.", "bob"),
///     vec![Change::create_equal("The quick brown fox.").unwrap()]
/// );
/// ```
#[must_use]
pub fn layer(existing: &[Change], target: &str, owner: impl Into<OwnerId>) -> Vec<Change> {
    layer_with_options(existing, target, owner, &DiffOptions::default())
}

/// Same as `layer` but with control over the cleanup pass.
#[must_use]
pub fn layer_with_options(
    existing: &[Change],
    target: &str,
    owner: impl Into<OwnerId>,
    options: &DiffOptions,
) -> Vec<Change> {
    let owner = owner.into();
    debug_assert!(
        !target.contains(PLACEHOLDER),
        "Target text must not contain the placeholder"
    );

    let skeleton = Skeleton::from_changes(existing);
    let target: Vec<char> = target.chars().collect();
    trace!(
        "layering {} characters over a skeleton of {} characters with {} pinned spans",
        target.len(),
        skeleton.chars.len(),
        skeleton.pinned.len()
    );

    // The placeholders must map one-to-one to the pinned spans, so no
    // cleanup may run before they are swapped back.
    let operations = RawOperation::vec_from(&skeleton.chars, &target);

    let mut spans = restore_pinned_spans(operations, skeleton.pinned, &owner);
    expand_collapsed_ranges(&mut spans);

    let mut builder = ChangeBuilder::with_capacity(spans.len());
    let mut segment: Vec<Change> = Vec::new();
    for span in spans {
        match span {
            Span::Change(change) => segment.push(change),
            pinned => {
                builder.extend(clean_up_segment(mem::take(&mut segment), &owner, options));
                builder.equal(pinned.text());
            }
        }
    }
    builder.extend(clean_up_segment(segment, &owner, options));

    split_range_markers(builder.build())
}

/// Visible text of a change sequence where every run of deletions, every
/// range marker and every placeholder is replaced by a single placeholder.
#[derive(Debug)]
struct Skeleton {
    chars: Vec<char>,
    /// What each placeholder stands for, left to right
    pinned: Vec<Span>,
}

impl Skeleton {
    fn from_changes(changes: &[Change]) -> Self {
        let mut chars = Vec::new();
        let mut pinned: Vec<Span> = Vec::new();
        let mut in_deleted_run = false;

        for change in split_range_markers(changes.iter().cloned()) {
            match change {
                Change::Delete { text, .. } => {
                    match pinned.last_mut() {
                        Some(Span::Restored(run)) if in_deleted_run => run.push_str(&text),
                        _ => {
                            chars.push(PLACEHOLDER);
                            pinned.push(Span::Restored(text));
                        }
                    }
                    in_deleted_run = true;
                }
                marker if marker.range_marker().is_some() => {
                    chars.push(PLACEHOLDER);
                    pinned.push(Span::Pinned(marker));
                    in_deleted_run = false;
                }
                Change::Equal { text } | Change::Insert { text, .. } => {
                    for character in text.chars() {
                        if character == PLACEHOLDER {
                            pinned.push(Span::Pinned(Change::Equal {
                                text: PLACEHOLDER.to_string(),
                            }));
                        }
                        chars.push(character);
                    }
                    in_deleted_run = false;
                }
            }
        }

        Self { chars, pinned }
    }
}

/// A span of the layered result before pinned text turns into `Equal`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Span {
    Change(Change),
    /// Text deleted by the existing changes, kept as context
    Restored(String),
    /// A range marker or placeholder of the existing changes, kept as context
    Pinned(Change),
}

impl Span {
    fn change(&self) -> Option<&Change> {
        match self {
            Span::Change(change) => Some(change),
            Span::Restored(..) | Span::Pinned(..) => None,
        }
    }

    fn text(&self) -> &str {
        match self {
            Span::Change(change) | Span::Pinned(change) => change.text(),
            Span::Restored(text) => text,
        }
    }

    fn range_marker(&self) -> Option<ReservedCharacter> {
        match self {
            Span::Change(change) | Span::Pinned(change) => change.range_marker(),
            Span::Restored(..) => None,
        }
    }

    fn owner(&self) -> Option<&OwnerId> {
        match self {
            Span::Change(change) | Span::Pinned(change) => change.owner(),
            Span::Restored(..) => None,
        }
    }
}

/// Swaps every placeholder of the raw diff back to the span it stands for,
/// whatever the diff made of it, and splits range markers out of the
/// insertions.
fn restore_pinned_spans(
    operations: Vec<RawOperation>,
    pinned: Vec<Span>,
    owner: &OwnerId,
) -> Vec<Span> {
    let mut pinned = pinned.into_iter();
    let mut spans: Vec<Span> = Vec::with_capacity(operations.len());

    for operation in operations {
        if operation.chars() == [PLACEHOLDER] {
            spans.extend(pinned.next());
            continue;
        }

        let Some(change) = operation.into_change(owner) else {
            continue;
        };

        match spans.last_mut() {
            Some(Span::Change(last)) if last.is_joinable_with(&change) => {
                last.push_str(change.text());
            }
            _ => spans.push(Span::Change(change)),
        }
    }

    debug_assert!(pinned.next().is_none(), "Every pinned span must be restored");

    spans
        .into_iter()
        .flat_map(|span| match span {
            Span::Change(change) => split_range_markers([change])
                .into_iter()
                .map(Span::Change)
                .collect::<Vec<_>>(),
            pinned => vec![pinned],
        })
        .collect()
}

/// An empty range right after restored text is moved to enclose it, so that
/// an edit anchored at a deletion brackets the deletion instead of trailing
/// it. A range end of another owner right before the restored text is left
/// alone together with its neighbourhood.
fn expand_collapsed_ranges(spans: &mut [Span]) {
    for index in (1..spans.len().saturating_sub(1)).rev() {
        let Some(start) = spans[index]
            .change()
            .filter(|change| change.range_marker() == Some(ReservedCharacter::RangeStart))
        else {
            continue;
        };
        let Some(owner) = start.owner() else {
            continue;
        };

        let is_empty_range = spans[index + 1]
            .change()
            .is_some_and(|change| change.is_range_end_of(owner));
        let follows_restored = matches!(spans[index - 1], Span::Restored(..));
        let follows_other_range = index >= 2
            && spans[index - 2].range_marker() == Some(ReservedCharacter::RangeEnd)
            && spans[index - 2].owner() != Some(owner);

        if is_empty_range && follows_restored && !follows_other_range {
            trace!("expanding the empty range of {owner} over restored text");
            spans.swap(index - 1, index);
        }
    }
}

/// Re-diffs a run of changes between two pinned spans with the selected
/// cleanup. Pinned text is never part of a segment, so the cleanup cannot
/// turn it into a deletion.
fn clean_up_segment(segment: Vec<Change>, owner: &OwnerId, options: &DiffOptions) -> Vec<Change> {
    match options.cleanup {
        Cleanup::Semantic => attribute(
            raw_diff(&base_text(&segment), &visible_text(&segment), options),
            owner,
        ),
        Cleanup::None => coalesce(segment),
    }
}
