//! Exact comparison of result vectors

/// Counts the positions at which two vectors differ
///
/// Zero means the vectors are identical. Positions present in only one of the
/// vectors count as mismatches.
///
/// # Examples
///
/// ```
/// use sparse_matvecs::vector_diffs;
///
/// assert_eq!(vector_diffs(&[8, 14, 16], &[8, 14, 16]), 0);
/// assert_eq!(vector_diffs(&[8, 14, 16], &[8, 0, 0]), 2);
/// ```
pub fn vector_diffs<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let differing = a.iter().zip(b).filter(|(x, y)| x != y).count();
    differing + a.len().abs_diff(b.len())
}
