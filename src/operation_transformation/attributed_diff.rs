use crate::{
    diffs::{
        diff_options::{Cleanup, DiffOptions},
        raw_operation::{RawOperation, join_adjacent},
        semantic_diff::semantic_diff,
    },
    operation_transformation::canonicalize_ranges::canonicalize_ranges,
    types::{change::Change, owner_id::OwnerId},
    utils::change_builder::coalesce,
};

/// Computes the changes turning `old` into `new`, attributing every insertion
/// and deletion to `owner`.
///
/// Range markers in `new` end up as standalone insertions bracketing the
/// edits of `owner`. Any two strings are diffable.
///
/// ```
/// use redline_text::{Change, diff};
///
/// assert_eq!(
///     diff("The quick fox", "The quick brown fox", "alice"),
///     vec![
///         Change::create_equal("The quick ").unwrap(),
///         Change::create_insert("brown ", "alice").unwrap(),
///         Change::create_equal("fox").unwrap(),
///     ]
/// );
/// ```
#[must_use]
pub fn diff(old: &str, new: &str, owner: impl Into<OwnerId>) -> Vec<Change> {
    diff_with_options(old, new, owner, &DiffOptions::default())
}

/// Same as `diff` but with control over the cleanup pass.
#[must_use]
pub fn diff_with_options(
    old: &str,
    new: &str,
    owner: impl Into<OwnerId>,
    options: &DiffOptions,
) -> Vec<Change> {
    let owner = owner.into();
    canonicalize_ranges(attribute(raw_diff(old, new, options), &owner))
}

/// Unattributed diff of `old` and `new` with the cleanup selected in
/// `options`.
pub(crate) fn raw_diff(old: &str, new: &str, options: &DiffOptions) -> Vec<RawOperation> {
    match options.cleanup {
        Cleanup::Semantic => semantic_diff(old, new),
        Cleanup::None => {
            let old: Vec<char> = old.chars().collect();
            let new: Vec<char> = new.chars().collect();
            join_adjacent(RawOperation::vec_from(&old, &new))
        }
    }
}

/// Attaches `owner` to every insertion and deletion and coalesces the result.
pub(crate) fn attribute<I>(operations: I, owner: &OwnerId) -> Vec<Change>
where
    I: IntoIterator<Item = RawOperation>,
{
    coalesce(
        operations
            .into_iter()
            .filter_map(|operation| operation.into_change(owner)),
    )
}

#[cfg(test)]
mod tests {
    use insta::assert_debug_snapshot;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;
    use crate::types::{
        change::{base_text, visible_text},
        reserved_character::{RANGE_END, RANGE_START, strip_range_markers},
    };

    #[test_case("", ""; "both empty")]
    #[test_case("", "new text"; "from empty")]
    #[test_case("old text", ""; "to empty")]
    #[test_case("The quick brown fox", "The slow brown cat"; "words")]
    #[test_case("Árvíztűrő tükörfúrógép", "Árvíztűrő tükörfúró"; "accents")]
    #[test_case("line one\n\nline two", "line one\nline 2\n\nline two"; "lines")]
    fn test_reconstructs_both_texts(old: &str, new: &str) {
        for cleanup in [Cleanup::Semantic, Cleanup::None] {
            let changes = diff_with_options(old, new, 1, &DiffOptions::with_cleanup(cleanup));

            assert_eq!(base_text(&changes), old);
            assert_eq!(visible_text(&changes), new);
        }
    }

    #[test]
    fn test_attribution() {
        let changes = diff("The quick brown fox", "The quick fox", "alice");

        assert_eq!(
            changes,
            vec![
                Change::create_equal("The quick ").unwrap(),
                Change::create_delete("brown ", "alice").unwrap(),
                Change::create_equal("fox").unwrap(),
            ]
        );
    }

    #[test]
    fn test_identical_texts() {
        assert_eq!(diff("same", "same", 1), vec![Change::create_equal("same").unwrap()]);
        assert_eq!(diff("", "", 1), vec![]);
    }

    #[test]
    fn test_cleanup_prefers_whole_words() {
        assert_debug_snapshot!(diff("a cat sat", "a dog sat", 7), @r"
        [
            <equal 'a '>,
            <delete 'cat' by 7>,
            <insert 'dog' by 7>,
            <equal ' sat'>,
        ]
        ");
    }

    #[test]
    fn test_markers_bracket_the_edit() {
        let old = "First sentence. Second sentence.";
        let new = format!("First sentence. {RANGE_START}Second line.{RANGE_END}");

        let changes = diff(old, &new, 2);

        assert_eq!(base_text(&changes), old);
        assert_eq!(strip_range_markers(&visible_text(&changes)), "First sentence. Second line.");

        let first_edit = changes.iter().position(|change| !change.is_equal()).unwrap();
        let last_edit = changes.iter().rposition(|change| !change.is_equal()).unwrap();
        assert_eq!(changes[first_edit].text(), RANGE_START.to_string());
        assert_eq!(changes[last_edit].text(), RANGE_END.to_string());
    }
}
