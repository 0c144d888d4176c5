//! Helpers shared by the sort paths.

/// Build a new sequence where position `i` holds `items[indices[i]]`.
pub fn reorder_by_indices<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
    debug_assert_eq!(
        items.len(),
        indices.len(),
        "Indices length must match items length"
    );

    indices.iter().map(|&idx| items[idx].clone()).collect()
}

/// Check if a slice is already sorted according to a comparison function.
pub fn is_sorted_by<T, F>(items: &[T], mut compare: F) -> bool
where
    F: FnMut(&T, &T) -> std::cmp::Ordering,
{
    items.windows(2).all(|w| {
        matches!(
            compare(&w[0], &w[1]),
            std::cmp::Ordering::Less | std::cmp::Ordering::Equal
        )
    })
}
