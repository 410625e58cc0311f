use log::debug;

use crate::{
    errors::MergeConflict,
    operation_transformation::canonicalize_ranges::canonicalize_ranges,
    types::{
        change::{Change, base_text},
        owner_id::OwnerId,
    },
    utils::{change_builder::ChangeBuilder, side::Side},
};

/// Merges two diffs of the same base text into one.
///
/// Insertions anchored at the same position keep their relative order, the
/// ones of `left` come before the ones of `right`. Fails when the diffs
/// disagree on the base text, delete the same character, or when one of them
/// inserts into the middle of a span deleted by the other.
///
/// ```
/// use redline_text::{Change, diff, merge_two};
///
/// let base = "The quick brown fox";
/// let alice = diff(base, "The brown fox", "alice");
/// let bob = diff(base, "The quick fox", "bob");
///
/// assert_eq!(
///     merge_two(&alice, &bob).unwrap(),
///     vec![
///         Change::create_equal("The ").unwrap(),
///         Change::create_delete("quick ", "alice").unwrap(),
///         Change::create_delete("brown ", "bob").unwrap(),
///         Change::create_equal("fox").unwrap(),
///     ]
/// );
/// ```
pub fn merge_two(left: &[Change], right: &[Change]) -> Result<Vec<Change>, MergeConflict> {
    merge_all(&[left, right])
}

/// Merges any number of diffs of the same base text, as if folding them from
/// left to right with `merge_two`.
///
/// Every diff is checked against every other one on its own, so whether the
/// merge fails does not depend on the order of `diffs`; only insertions
/// anchored at the same position follow it. No diffs merge into an empty
/// sequence and a single diff is returned with its range markers
/// canonicalized.
pub fn merge<I>(diffs: I) -> Result<Vec<Change>, MergeConflict>
where
    I: IntoIterator,
    I::Item: AsRef<[Change]>,
{
    let diffs: Vec<I::Item> = diffs.into_iter().collect();
    let diffs: Vec<&[Change]> = diffs.iter().map(|diff| diff.as_ref()).collect();

    merge_all(&diffs)
}

fn merge_all(diffs: &[&[Change]]) -> Result<Vec<Change>, MergeConflict> {
    let Some(first) = diffs.first() else {
        return Ok(Vec::new());
    };
    let base: Vec<char> = base_text(first).chars().collect();

    let edits = diffs
        .iter()
        .enumerate()
        .map(|(index, changes)| {
            let side = if index == 0 { Side::Left } else { Side::Right };
            EditsOnBase::collect(changes, &base, side)
        })
        .collect::<Result<Vec<_>, _>>()?;

    for (index, left) in edits.iter().enumerate() {
        for right in &edits[index + 1..] {
            check_compatibility(left, right)?;
        }
    }

    let mut builder = ChangeBuilder::with_capacity(diffs.iter().map(|diff| diff.len()).sum());
    let mut buffer = [0; 4];

    for offset in 0..=base.len() {
        for insertion in edits.iter().flat_map(|on_base| &on_base.insertions[offset]) {
            builder.push((*insertion).clone());
        }

        let Some(character) = base.get(offset) else {
            break;
        };
        let text = character.encode_utf8(&mut buffer);

        match edits.iter().find_map(|on_base| on_base.deletions[offset]) {
            Some(deletion) => builder.delete(text, deletion.owner),
            None => builder.equal(text),
        }
    }

    Ok(canonicalize_ranges(builder.build()))
}

#[derive(Debug, Clone, Copy)]
struct Deletion<'a> {
    owner: &'a OwnerId,
    /// Index of the deleting change within its own diff, equal for
    /// characters of the same span
    span: usize,
}

/// What one diff does to each position of the shared base text.
#[derive(Debug)]
struct EditsOnBase<'a> {
    /// The deletion covering each base character, if any
    deletions: Vec<Option<Deletion<'a>>>,
    /// Insertions anchored before each base character; the extra last bucket
    /// holds the ones at the end of the text.
    insertions: Vec<Vec<&'a Change>>,
}

impl<'a> EditsOnBase<'a> {
    fn collect(changes: &'a [Change], base: &[char], side: Side) -> Result<Self, MergeConflict> {
        let length: usize = changes
            .iter()
            .filter(|change| change.is_in_base())
            .map(Change::len)
            .sum();
        if length != base.len() {
            return Err(MergeConflict::BaseLengthMismatch {
                side,
                expected: base.len(),
                actual: length,
            })
            .inspect_err(log_conflict);
        }

        let mut deletions = vec![None; base.len()];
        let mut insertions = vec![Vec::new(); base.len() + 1];
        let mut offset = 0;

        for (index, change) in changes.iter().enumerate() {
            let text = match change {
                Change::Insert { .. } => {
                    insertions[offset].push(change);
                    continue;
                }
                Change::Equal { text } | Change::Delete { text, .. } => text,
            };

            let end = offset + change.len();
            if let Some(mismatch) = text
                .chars()
                .zip(&base[offset..end])
                .position(|(character, expected)| character != *expected)
            {
                return Err(MergeConflict::BaseMismatch {
                    side,
                    offset: offset + mismatch,
                })
                .inspect_err(log_conflict);
            }

            if let Change::Delete { owner, .. } = change {
                deletions[offset..end].fill(Some(Deletion { owner, span: index }));
            }

            offset = end;
        }

        Ok(Self {
            deletions,
            insertions,
        })
    }

    /// Whether the characters on both sides of `offset` are deleted by the
    /// same change, i.e. an insertion there would split the deletion.
    fn deletes_around(&self, offset: usize) -> bool {
        let before = offset
            .checked_sub(1)
            .and_then(|previous| self.deletions.get(previous));

        match (before, self.deletions.get(offset)) {
            (Some(Some(before)), Some(Some(after))) => before.span == after.span,
            _ => false,
        }
    }
}

fn check_compatibility(
    left: &EditsOnBase<'_>,
    right: &EditsOnBase<'_>,
) -> Result<(), MergeConflict> {
    for offset in 0..left.insertions.len() {
        if !right.insertions[offset].is_empty() && left.deletes_around(offset) {
            return Err(MergeConflict::InsertInsideDelete {
                side: Side::Right,
                offset,
            })
            .inspect_err(log_conflict);
        }

        if !left.insertions[offset].is_empty() && right.deletes_around(offset) {
            return Err(MergeConflict::InsertInsideDelete {
                side: Side::Left,
                offset,
            })
            .inspect_err(log_conflict);
        }

        if let (Some(Some(_)), Some(Some(_))) =
            (left.deletions.get(offset), right.deletions.get(offset))
        {
            return Err(MergeConflict::OverlappingDelete { offset }).inspect_err(log_conflict);
        }
    }

    Ok(())
}

fn log_conflict(conflict: &MergeConflict) { debug!("{conflict}"); }

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        operation_transformation::attributed_diff::diff,
        types::{
            change::visible_text,
            reserved_character::{RANGE_END, RANGE_START},
        },
    };

    fn equal(text: &str) -> Change { Change::create_equal(text).unwrap() }

    fn insert(text: &str, owner: i64) -> Change { Change::create_insert(text, owner).unwrap() }

    fn delete(text: &str, owner: i64) -> Change { Change::create_delete(text, owner).unwrap() }

    #[test]
    fn test_disjoint_deletions() {
        let base = "The quick brown fox";
        let left = diff(base, "The brown fox", "A");
        let right = diff(base, "The quick fox", "B");

        let expected = vec![
            equal("The "),
            Change::create_delete("quick ", "A").unwrap(),
            Change::create_delete("brown ", "B").unwrap(),
            equal("fox"),
        ];

        assert_eq!(merge_two(&left, &right).unwrap(), expected);
        assert_eq!(merge([&left, &right]).unwrap(), expected);
    }

    #[test]
    fn test_insertions_at_the_same_position_keep_argument_order() {
        let left = vec![equal("ab"), insert("x", 1)];
        let right = vec![equal("ab"), insert("y", 2)];

        assert_eq!(
            merge_two(&left, &right).unwrap(),
            vec![equal("ab"), insert("x", 1), insert("y", 2)]
        );
        assert_eq!(
            merge_two(&right, &left).unwrap(),
            vec![equal("ab"), insert("y", 2), insert("x", 1)]
        );
    }

    #[test]
    fn test_insertion_next_to_deletion() {
        let left = vec![equal("a"), delete("bc", 1), equal("d")];
        let right = vec![equal("a"), insert("x", 2), equal("bcd")];

        assert_eq!(
            merge_two(&left, &right).unwrap(),
            vec![equal("a"), insert("x", 2), delete("bc", 1), equal("d")]
        );

        let right = vec![equal("abc"), insert("x", 2), equal("d")];
        assert_eq!(
            merge_two(&left, &right).unwrap(),
            vec![equal("a"), delete("bc", 1), insert("x", 2), equal("d")]
        );
    }

    #[test]
    fn test_overlapping_deletions_conflict() {
        let left = vec![equal("a"), delete("bc", 1), equal("d")];
        let right = vec![equal("ab"), delete("cd", 2)];

        assert_eq!(
            merge_two(&left, &right),
            Err(MergeConflict::OverlappingDelete { offset: 2 })
        );
    }

    #[test]
    fn test_identical_deletions_conflict() {
        let base = "The quick brown fox";
        let left = diff(base, "The brown fox", 1);
        let right = diff(base, "The brown fox", 2);

        assert!(matches!(
            merge_two(&left, &right),
            Err(MergeConflict::OverlappingDelete { .. })
        ));
    }

    #[test]
    fn test_insertion_inside_deletion_conflicts_both_ways() {
        let deleting = vec![equal("a"), delete("bcd", 1), equal("e")];
        let inserting = vec![equal("ab"), insert("x", 2), equal("cde")];

        assert_eq!(
            merge_two(&deleting, &inserting),
            Err(MergeConflict::InsertInsideDelete {
                side: Side::Right,
                offset: 2
            })
        );
        assert_eq!(
            merge_two(&inserting, &deleting),
            Err(MergeConflict::InsertInsideDelete {
                side: Side::Left,
                offset: 2
            })
        );
    }

    #[test]
    fn test_insertion_between_adjacent_deletions_is_allowed() {
        let left = vec![equal("a"), delete("b", 1), delete("c", 3), equal("d")];
        let right = vec![equal("ab"), insert("x", 2), equal("cd")];

        assert_eq!(
            merge_two(&left, &right).unwrap(),
            vec![
                equal("a"),
                delete("b", 1),
                insert("x", 2),
                delete("c", 3),
                equal("d"),
            ]
        );
    }

    #[test]
    fn test_adjacent_deletions_of_one_owner_stay_separate_spans() {
        let first = vec![equal("a"), delete("b", 1), equal("cd")];
        let second = vec![equal("ab"), delete("c", 1), equal("d")];
        let inserting = vec![equal("ab"), insert("x", 2), equal("cd")];

        let expected = vec![
            equal("a"),
            delete("b", 1),
            insert("x", 2),
            delete("c", 1),
            equal("d"),
        ];

        for diffs in [
            [&first, &second, &inserting],
            [&first, &inserting, &second],
            [&second, &first, &inserting],
            [&second, &inserting, &first],
            [&inserting, &first, &second],
            [&inserting, &second, &first],
        ] {
            assert_eq!(merge(diffs).unwrap(), expected);
        }
    }

    #[test]
    fn test_conflicts_do_not_depend_on_argument_order() {
        let deleting = vec![equal("a"), delete("bcd", 1), equal("e")];
        let inserting = vec![equal("ab"), insert("x", 2), equal("cde")];
        let unrelated = vec![equal("abcde"), insert("!", 3)];

        for diffs in [
            [&deleting, &unrelated, &inserting],
            [&inserting, &unrelated, &deleting],
            [&unrelated, &inserting, &deleting],
        ] {
            assert!(matches!(
                merge(diffs),
                Err(MergeConflict::InsertInsideDelete { offset: 2, .. })
            ));
        }
    }

    #[test]
    fn test_base_mismatch() {
        let left = vec![equal("abc")];
        let right = vec![equal("abd")];

        assert_eq!(
            merge_two(&left, &right),
            Err(MergeConflict::BaseMismatch {
                side: Side::Right,
                offset: 2
            })
        );

        let right = vec![equal("ab")];
        assert_eq!(
            merge_two(&left, &right),
            Err(MergeConflict::BaseLengthMismatch {
                side: Side::Right,
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_merge_many() {
        let base = "one two three";
        let diffs = vec![
            diff(base, "one 2 three", 1),
            diff(base, "1 two three", 2),
            diff(base, "one two three!", 3),
        ];

        let merged = merge(&diffs).unwrap();

        assert_eq!(base_text(&merged), base);
        assert_eq!(visible_text(&merged), "1 2 three!");
    }

    #[test]
    fn test_merge_nothing_or_one() {
        assert_eq!(merge(Vec::<Vec<Change>>::new()), Ok(vec![]));

        let only = vec![
            equal("a"),
            insert(&format!("x{RANGE_START}y{RANGE_END}"), 1),
        ];
        assert_eq!(
            merge([only]).unwrap(),
            vec![
                equal("a"),
                insert(&RANGE_START.to_string(), 1),
                insert("xy", 1),
                insert(&RANGE_END.to_string(), 1),
            ]
        );
    }
}
