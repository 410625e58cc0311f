use crate::{types::change::Change, utils::change_builder::ChangeBuilder};

/// Projects `merged`, a sequence whose base text is the full text of
/// `existing` (deleted spans included), back onto the base text of
/// `existing`.
///
/// Characters that `merged` keeps regain the kind and owner they had in
/// `existing`. Characters deleted by `merged` become deletions of the new
/// owner, except for text `existing` had inserted which simply disappears:
/// a retracted insertion leaves no trace. New insertions pass through.
pub fn restore_existing(existing: &[Change], merged: &[Change]) -> Vec<Change> {
    let mut origins = existing
        .iter()
        .flat_map(|change| change.text().chars().map(move |character| (character, change)));

    let mut builder = ChangeBuilder::with_capacity(existing.len() + merged.len());
    let mut buffer = [0; 4];

    for change in merged {
        let deleted_by = match change {
            Change::Insert { .. } => {
                builder.push(change.clone());
                continue;
            }
            Change::Equal { .. } => None,
            Change::Delete { owner, .. } => Some(owner),
        };

        for character in change.text().chars() {
            let Some((original, origin)) = origins.next() else {
                break;
            };
            debug_assert_eq!(character, original, "Merged text must match the existing text");

            let text = character.encode_utf8(&mut buffer);
            match (deleted_by, origin) {
                // Layering never deletes deleted text, keep the original attribution.
                (_, Change::Delete { owner, .. }) => builder.delete(text, owner),
                (None, Change::Equal { .. }) => builder.equal(text),
                (None, Change::Insert { owner, .. }) => builder.insert(text, owner),
                (Some(owner), Change::Equal { .. }) => builder.delete(text, owner),
                (Some(_), Change::Insert { .. }) => {}
            }
        }
    }

    debug_assert!(
        origins.next().is_none(),
        "Merged text must be as long as the existing text"
    );

    builder.build()
}
