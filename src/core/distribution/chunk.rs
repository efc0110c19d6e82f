//! Even chunking of ordered sequences

/// Split `items` into `n_chunks` consecutive chunks whose sizes differ by at most 1
///
/// Chunk `i` covers `[i * len / n, (i + 1) * len / n)`, so the larger chunks are
/// spread through the sequence rather than piled at the end. Order is preserved.
///
/// A request for zero chunks returns the items as a single chunk, or nothing
/// when there are no items.
///
/// # Examples
///
/// ```
/// use rollforge::core::distribution::even_chunks;
///
/// let chunks = even_chunks((0..100).collect::<Vec<_>>(), 6);
/// let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
/// assert_eq!(sizes, vec![16, 17, 17, 16, 17, 17]);
/// ```
pub fn even_chunks<T>(items: Vec<T>, n_chunks: usize) -> Vec<Vec<T>> {
    if n_chunks == 0 {
        return if items.is_empty() {
            Vec::new()
        } else {
            vec![items]
        };
    }

    let len = items.len();
    let mut remaining = items.into_iter();
    (0..n_chunks)
        .map(|i| {
            let size = (i + 1) * len / n_chunks - i * len / n_chunks;
            remaining.by_ref().take(size).collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn sizes(len: usize, n_chunks: usize) -> Vec<usize> {
        even_chunks((0..len).collect::<Vec<_>>(), n_chunks)
            .iter()
            .map(Vec::len)
            .collect()
    }

    #[test_case(100, 3, vec![33, 33, 34])]
    #[test_case(100, 5, vec![20, 20, 20, 20, 20])]
    #[test_case(100, 6, vec![16, 17, 17, 16, 17, 17])]
    #[test_case(100, 7, vec![14, 14, 14, 15, 14, 14, 15])]
    #[test_case(100, 8, vec![12, 13, 12, 13, 12, 13, 12, 13])]
    #[test_case(100, 9, vec![11, 11, 11, 11, 11, 11, 11, 11, 12])]
    #[test_case(560, 2, vec![280, 280])]
    #[test_case(1, 1, vec![1])]
    fn test_even_chunk_sizes(len: usize, n_chunks: usize, expected: Vec<usize>) {
        assert_eq!(sizes(len, n_chunks), expected);
    }

    #[test]
    fn test_sizes_differ_by_at_most_one() {
        for len in 0..200 {
            for n_chunks in 1..12 {
                let chunk_sizes = sizes(len, n_chunks);
                assert_eq!(chunk_sizes.len(), n_chunks);
                assert_eq!(chunk_sizes.iter().sum::<usize>(), len);
                let max = *chunk_sizes.iter().max().unwrap();
                let min = *chunk_sizes.iter().min().unwrap();
                assert!(max - min <= 1, "len={len} n={n_chunks} sizes={chunk_sizes:?}");
            }
        }
    }

    #[test]
    fn test_order_preserved() {
        let chunks = even_chunks(vec!['a', 'b', 'c', 'd', 'e'], 2);
        assert_eq!(chunks, vec![vec!['a', 'b'], vec!['c', 'd', 'e']]);
    }

    #[test]
    fn test_zero_chunks() {
        assert!(even_chunks(Vec::<u8>::new(), 0).is_empty());
        assert_eq!(even_chunks(vec![1, 2], 0), vec![vec![1, 2]]);
    }
}
