//! Adapted from <https://github.com/mitsuhiko/similar/blob/7e15c44de11a1cd61e1149189929e189ef977fd8/src/algorithms/utils.rs>

use core::ops::Range;

/// Length of the common prefix of `old[old_range]` and `new[new_range]`.
pub fn common_prefix_len<T>(
    old: &[T],
    old_range: Range<usize>,
    new: &[T],
    new_range: Range<usize>,
) -> usize
where
    T: PartialEq,
{
    old[old_range]
        .iter()
        .zip(&new[new_range])
        .take_while(|(a, b)| a == b)
        .count()
}

/// Length of the common suffix of `old[old_range]` and `new[new_range]`.
pub fn common_suffix_len<T>(
    old: &[T],
    old_range: Range<usize>,
    new: &[T],
    new_range: Range<usize>,
) -> usize
where
    T: PartialEq,
{
    old[old_range]
        .iter()
        .rev()
        .zip(new[new_range].iter().rev())
        .take_while(|(a, b)| a == b)
        .count()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn chars(text: &str) -> Vec<char> { text.chars().collect() }

    #[test]
    fn test_common_prefix_len() {
        assert_eq!(common_prefix_len(&chars(""), 0..0, &chars(""), 0..0), 0);
        assert_eq!(
            common_prefix_len(&chars("foobarbaz"), 0..9, &chars("foobarblah"), 0..10),
            7
        );
        assert_eq!(
            common_prefix_len(&chars("foobarbaz"), 0..9, &chars("blablabla"), 0..9),
            0
        );
        assert_eq!(
            common_prefix_len(&chars("foobarbaz"), 3..9, &chars("foobarblah"), 3..10),
            4
        );
        assert_eq!(common_prefix_len(&chars("héllo"), 0..5, &chars("hélp"), 0..4), 3);
    }

    #[test]
    fn test_common_suffix_len() {
        assert_eq!(common_suffix_len(&chars(""), 0..0, &chars(""), 0..0), 0);
        assert_eq!(
            common_suffix_len(&chars("1234"), 0..4, &chars("X0001234"), 0..8),
            4
        );
        assert_eq!(common_suffix_len(&chars("1234"), 0..4, &chars("Xxxx"), 0..4), 0);
        assert_eq!(common_suffix_len(&chars("1234"), 2..4, &chars("01234"), 2..5), 2);
        assert_eq!(common_suffix_len(&chars("naïve"), 0..5, &chars("ïve"), 0..3), 3);
    }
}
