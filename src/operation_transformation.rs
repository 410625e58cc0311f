pub mod attributed_diff;
pub mod canonicalize_ranges;
pub mod layering;
pub mod merge;
mod restore;

use log::debug;

use crate::{
    diffs::diff_options::DiffOptions,
    errors::{InputLocation, ReconcileError},
    operation_transformation::{
        canonicalize_ranges::canonicalize_ranges, layering::layer_with_options, merge::merge,
        restore::restore_existing,
    },
    types::{change::Change, edit::Edit, reserved_character::ReservedCharacter},
};

/// Given the tracked changes of a paragraph and a set of concurrent edits to
/// its visible text, return the tracked changes with every edit applied.
///
/// Each edit is layered onto `existing` independently, as if its author had
/// been the only one editing, and the layers are then merged. Text that
/// `existing` deletes is never deleted again and keeps its original
/// attribution. Text that `existing` inserts and an edit removes simply
/// disappears.
///
/// Fails when an input contains a reserved character or when two edits
/// conflict, e.g. both remove the same text. There is no partial result.
///
/// ```
/// use redline_text::{Edit, apply_edits, base_text, diff, visible_text};
///
/// let existing = diff("The quick brown fox.", "The quick fox.", "alice");
/// let edits = [
///     Edit::new("The quick fox jumps.", "bob"),
///     Edit::new("A quick fox.", "carol"),
/// ];
///
/// let result = apply_edits(&existing, &edits).unwrap();
/// assert_eq!(base_text(&result), "The quick brown fox.");
/// assert_eq!(visible_text(&result), "A quick fox jumps.");
/// ```
pub fn apply_edits(existing: &[Change], edits: &[Edit]) -> Result<Vec<Change>, ReconcileError> {
    apply_edits_with_options(existing, edits, &DiffOptions::default())
}

/// Same as `apply_edits` but with control over the cleanup pass.
pub fn apply_edits_with_options(
    existing: &[Change],
    edits: &[Edit],
    options: &DiffOptions,
) -> Result<Vec<Change>, ReconcileError> {
    if edits.is_empty() {
        return Ok(existing.to_vec());
    }

    validate(existing, edits).inspect_err(|error| debug!("{error}"))?;

    let layers: Vec<Vec<Change>> = edits
        .iter()
        .map(|edit| {
            canonicalize_ranges(layer_with_options(
                existing,
                edit.target(),
                edit.owner(),
                options,
            ))
        })
        .collect();

    let merged = canonicalize_ranges(merge(&layers)?);

    Ok(canonicalize_ranges(restore_existing(existing, &merged)))
}

/// Rejects reserved characters in the inputs. Range markers are allowed in
/// edit targets and as insertions of `existing`.
fn validate(existing: &[Change], edits: &[Edit]) -> Result<(), ReconcileError> {
    let mut offset = 0;
    for change in existing {
        let is_allowed =
            |reserved: ReservedCharacter| reserved.is_range_marker() && change.is_insert();
        if let Some((position, character)) =
            ReservedCharacter::find_disallowed(change.text(), is_allowed)
        {
            return Err(ReconcileError::ReservedCharacter {
                character,
                position: offset + position,
                location: InputLocation::ExistingDiff,
            });
        }

        offset += change.len();
    }

    for (index, edit) in edits.iter().enumerate() {
        if let Some((position, character)) =
            ReservedCharacter::find_disallowed(edit.target(), ReservedCharacter::is_range_marker)
        {
            return Err(ReconcileError::ReservedCharacter {
                character,
                position,
                location: InputLocation::EditTarget(index),
            });
        }
    }

    Ok(())
}
