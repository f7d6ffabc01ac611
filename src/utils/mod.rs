//! Utility functions and helpers

pub mod formats;

pub use formats::{from_sprs_csr, to_sprs_csr};

use std::ops::Range;

/// Computes an exclusive prefix sum (scan) for a vector
///
/// The result has one more element than the input; the last one is the total.
pub fn exclusive_scan(input: &[usize]) -> Vec<usize> {
    let mut result = Vec::with_capacity(input.len() + 1);
    let mut sum = 0;

    result.push(0); // First element is always 0

    for &val in input {
        sum += val;
        result.push(sum);
    }

    result
}

/// Splits `0..rows` into `n_parts` contiguous ranges, in order
///
/// Sizes differ by at most one; the first `rows % n_parts` ranges get the extra
/// row. When `n_parts > rows` the trailing ranges are empty.
pub fn partition_rows(rows: usize, n_parts: usize) -> Vec<Range<usize>> {
    if n_parts == 0 {
        return Vec::new();
    }

    let base = rows / n_parts;
    let extra = rows % n_parts;

    let mut start = 0;
    (0..n_parts)
        .map(|t| {
            let len = base + usize::from(t < extra);
            let range = start..start + len;
            start += len;
            range
        })
        .collect()
}

/// Cuts `slice` into consecutive disjoint pieces of the given lengths
///
/// # Panics
///
/// Panics if the lengths add up to more than `slice.len()`.
pub fn split_mut_by_lengths<'a, T>(mut slice: &'a mut [T], lengths: &[usize]) -> Vec<&'a mut [T]> {
    let mut parts = Vec::with_capacity(lengths.len());
    for &len in lengths {
        let (head, tail) = std::mem::take(&mut slice).split_at_mut(len);
        parts.push(head);
        slice = tail;
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusive_scan() {
        let input = vec![1, 2, 3, 4];
        let expected = vec![0, 1, 3, 6, 10];
        assert_eq!(exclusive_scan(&input), expected);

        let input = vec![0, 0, 5, 0];
        let expected = vec![0, 0, 0, 5, 5];
        assert_eq!(exclusive_scan(&input), expected);
    }

    #[test]
    fn test_partition_uneven() {
        let parts = partition_rows(10, 3);
        assert_eq!(parts, vec![0..4, 4..7, 7..10]);
    }

    #[test]
    fn test_partition_more_parts_than_rows() {
        let parts = partition_rows(2, 4);
        assert_eq!(parts, vec![0..1, 1..2, 2..2, 2..2]);
        assert!(parts[3].is_empty());
    }

    #[test]
    fn test_partition_covers_all_rows() {
        for rows in 0..20 {
            for n in 1..8 {
                let parts = partition_rows(rows, n);
                assert_eq!(parts.len(), n);
                assert_eq!(parts.first().map(|r| r.start), Some(0));
                assert_eq!(parts.last().map(|r| r.end), Some(rows));
                for pair in parts.windows(2) {
                    assert_eq!(pair[0].end, pair[1].start);
                    assert!(pair[0].len() >= pair[1].len());
                }
            }
        }
    }

    #[test]
    fn test_split_mut_by_lengths() {
        let mut data = [1, 2, 3, 4, 5, 6];
        let parts = split_mut_by_lengths(&mut data, &[2, 0, 3]);
        assert_eq!(parts.len(), 3);
        assert_eq!(&*parts[0], &[1, 2]);
        assert!(parts[1].is_empty());
        assert_eq!(&*parts[2], &[3, 4, 5]);

        for part in split_mut_by_lengths(&mut data, &[3, 3]) {
            part[0] = 0;
        }
        assert_eq!(data, [0, 2, 3, 0, 5, 6]);
    }
}
