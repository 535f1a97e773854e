//! Client-side pagination over an already-fetched sequence.
//!
//! Page numbers are 1-indexed. Changing pages never touches the network;
//! these functions only re-slice data the controllers already hold.

/// Lists per page on the overview screen.
pub const LIST_PAGE_SIZE: usize = 4;
/// Todos per page on the detail screen.
pub const TODO_PAGE_SIZE: usize = 6;

/// Number of pages needed for `total_items`. Zero items means zero pages.
pub fn page_count(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size)
}

/// The slice of `items` shown on `page`. Out-of-range pages yield an empty
/// slice rather than erroring.
pub fn visible_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// "Previous" is enabled only past the first page.
pub fn has_prev(page: usize) -> bool {
    page > 1
}

/// "Next" is enabled only before the last page; with zero pages neither
/// direction is enabled.
pub fn has_next(page: usize, total_items: usize, page_size: usize) -> bool {
    page < page_count(total_items, page_size)
}

/// Snap `page` back into range after the data shrank underneath it.
/// An empty sequence parks the view on page 1.
pub fn clamp_page(page: usize, total_items: usize, page_size: usize) -> usize {
    page.clamp(1, page_count(total_items, page_size).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_of_empty_is_zero() {
        for size in [1, 4, 6, 100] {
            assert_eq!(page_count(0, size), 0);
        }
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(13, 4), 4);
        assert_eq!(page_count(12, 4), 3);
        assert_eq!(page_count(1, 6), 1);
        assert_eq!(page_count(6, 6), 1);
        assert_eq!(page_count(7, 6), 2);
    }

    #[test]
    fn empty_sequence_slices_empty_on_any_page() {
        let items: Vec<u32> = vec![];
        for page in 0..5 {
            assert!(visible_slice(&items, page, 4).is_empty());
        }
    }

    #[test]
    fn out_of_range_page_is_empty_not_a_panic() {
        let items = vec![1, 2, 3];
        assert!(visible_slice(&items, 2, 4).is_empty());
        assert!(visible_slice(&items, usize::MAX, 4).is_empty());
    }

    #[test]
    fn concatenated_pages_reconstruct_the_sequence() {
        let items: Vec<usize> = (0..13).collect();
        let size = 4;
        let mut rebuilt = Vec::new();
        for page in 1..=page_count(items.len(), size) {
            rebuilt.extend_from_slice(visible_slice(&items, page, size));
        }
        assert_eq!(rebuilt, items);
    }

    #[test]
    fn partial_last_page() {
        let items: Vec<usize> = (0..13).collect();
        assert_eq!(visible_slice(&items, 4, 4), &[12]);
    }

    #[test]
    fn navigation_contract() {
        // 13 items, page size 4 -> 4 pages
        assert!(!has_prev(1));
        assert!(has_prev(2));
        assert!(has_next(1, 13, 4));
        assert!(has_next(3, 13, 4));
        assert!(!has_next(4, 13, 4));
    }

    #[test]
    fn both_directions_disabled_when_empty() {
        assert!(!has_prev(1));
        assert!(!has_next(1, 0, 4));
    }

    #[test]
    fn clamp_snaps_to_last_valid_page() {
        // 5 items on page 2, one deleted -> 4 items fit on a single page
        assert_eq!(clamp_page(2, 4, 4), 1);
        // still in range: untouched
        assert_eq!(clamp_page(2, 13, 4), 2);
        // empty data parks on page 1
        assert_eq!(clamp_page(3, 0, 4), 1);
        assert_eq!(clamp_page(0, 13, 4), 1);
    }
}
