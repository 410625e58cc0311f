use log::trace;

use crate::{
    types::{
        change::Change,
        owner_id::OwnerId,
        reserved_character::{RANGE_END, RANGE_START},
    },
    utils::change_builder::ChangeBuilder,
};

fn is_range_marker(character: char) -> bool { character == RANGE_START || character == RANGE_END }

/// Splits every insertion containing range markers so that each marker ends
/// up in its own `Insert`, keeping the order and the owner of the text around
/// it.
pub fn split_range_markers<I>(changes: I) -> Vec<Change>
where
    I: IntoIterator<Item = Change>,
{
    let mut result = Vec::new();

    for change in changes {
        match change {
            Change::Insert { text, owner }
                if text.contains(is_range_marker) && change_needs_split(&text) =>
            {
                let mut rest = text.as_str();
                while let Some(index) = rest.find(is_range_marker) {
                    let (prefix, tail) = rest.split_at(index);
                    let marker_length = tail.chars().next().map_or(0, char::len_utf8);
                    let (marker, suffix) = tail.split_at(marker_length);

                    result.extend(Change::create_insert(prefix, &owner));
                    result.extend(Change::create_insert(marker, &owner));
                    rest = suffix;
                }
                result.extend(Change::create_insert(rest, owner));
            }
            change => result.push(change),
        }
    }

    result
}

fn change_needs_split(text: &str) -> bool { text.chars().nth(1).is_some() }

/// Moves every owner's range markers so that they bracket exactly that
/// owner's edits: the first `RANGE_START` goes right before the owner's first
/// content change unless it is already in front of it, and the last
/// `RANGE_END` goes right after the owner's last content change unless it is
/// already behind it.
///
/// Owners without any content change keep their markers where they are.
/// The pass is idempotent and never removes a marker.
pub fn canonicalize_ranges<I>(changes: I) -> Vec<Change>
where
    I: IntoIterator<Item = Change>,
{
    let changes = split_range_markers(changes);
    let length = changes.len();

    // For every index, the marker to emit right before / after it.
    let mut moved_before: Vec<Option<usize>> = vec![None; length];
    let mut moved_after: Vec<Option<usize>> = vec![None; length];
    let mut is_moved = vec![false; length];

    for owner in owners_in_order(&changes) {
        let Some(first_content) = changes.iter().position(|change| change.is_content_of(&owner))
        else {
            continue;
        };
        let last_content = changes
            .iter()
            .rposition(|change| change.is_content_of(&owner))
            .unwrap_or(first_content);

        if let Some(start) = changes
            .iter()
            .position(|change| change.is_range_start_of(&owner))
            .filter(|start| *start > first_content)
        {
            trace!("moving range start of {owner} from {start} to before {first_content}");
            is_moved[start] = true;
            moved_before[first_content] = Some(start);
        }

        if let Some(end) = changes
            .iter()
            .rposition(|change| change.is_range_end_of(&owner))
            .filter(|end| *end < last_content)
        {
            trace!("moving range end of {owner} from {end} to after {last_content}");
            is_moved[end] = true;
            moved_after[last_content] = Some(end);
        }
    }

    let mut slots: Vec<Option<Change>> = changes.into_iter().map(Some).collect();
    let mut builder = ChangeBuilder::with_capacity(length);

    for index in 0..length {
        if let Some(start) = moved_before[index] {
            builder.push_option(slots[start].take());
        }

        if !is_moved[index] {
            builder.push_option(slots[index].take());
        }

        if let Some(end) = moved_after[index] {
            builder.push_option(slots[end].take());
        }
    }

    builder.build()
}

/// Distinct owners of the changes in order of their first appearance.
fn owners_in_order(changes: &[Change]) -> Vec<OwnerId> {
    let mut owners: Vec<OwnerId> = Vec::new();
    for owner in changes.iter().filter_map(Change::owner) {
        if !owners.contains(owner) {
            owners.push(owner.clone());
        }
    }

    owners
}
