//! Page arithmetic for the bookmark grid.
//!
//! Pure and total: every function accepts any item count and page index and
//! never indexes out of bounds.

use sherwood_model::GridSettings;

/// Slots per page, always at least one.
pub fn page_capacity(grid: &GridSettings) -> usize {
    grid.capacity()
}

/// Pages that hold at least one item.
pub fn content_pages(item_count: usize, grid: &GridSettings) -> usize {
    item_count.div_ceil(page_capacity(grid))
}

/// Pages offered to the user. When the last page is exactly full an extra
/// empty page is reserved so the add tile has somewhere to live.
pub fn total_pages(item_count: usize, grid: &GridSettings) -> usize {
    let pages = content_pages(item_count, grid);
    if item_count > 0 && item_count % page_capacity(grid) == 0 {
        pages.saturating_add(1)
    } else {
        pages
    }
}

/// Items shown on `page`. Empty for pages past the end.
pub fn page_slice<'a, T>(items: &'a [T], page: usize, grid: &GridSettings) -> &'a [T] {
    let capacity = page_capacity(grid);
    let start = page.saturating_mul(capacity).min(items.len());
    let end = start.saturating_add(capacity).min(items.len());
    &items[start..end]
}

/// Forces `page` into `[0, total_pages)`, or 0 when there are no pages.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.min(total_pages.saturating_sub(1))
}

/// Page the item at `index` lands on.
pub fn page_of(index: usize, grid: &GridSettings) -> usize {
    index / page_capacity(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(columns: u32, rows: u32) -> GridSettings {
        GridSettings {
            columns,
            rows,
            gap: 1,
        }
    }

    #[test]
    fn empty_collection_has_no_pages() {
        assert_eq!(total_pages(0, &grid(4, 3)), 0);
        assert_eq!(content_pages(0, &grid(4, 3)), 0);
        assert_eq!(clamp_page(7, 0), 0);
    }

    #[test]
    fn exactly_full_page_reserves_a_trailing_page() {
        let g = grid(4, 3);
        assert_eq!(total_pages(11, &g), 1);
        assert_eq!(total_pages(12, &g), 2);
        assert_eq!(total_pages(13, &g), 2);
        assert_eq!(total_pages(24, &g), 3);
        assert_eq!(content_pages(24, &g), 2);
    }

    #[test]
    fn slices_cover_every_item_exactly_once() {
        let grids = [grid(3, 1), grid(4, 3), grid(10, 5), grid(7, 2)];
        for g in grids {
            for count in 0..=120usize {
                let items: Vec<usize> = (0..count).collect();
                let pages = total_pages(count, &g);
                let flattened: Vec<usize> = (0..pages)
                    .flat_map(|p| page_slice(&items, p, &g).iter().copied())
                    .collect();
                assert_eq!(flattened, items, "count={count} grid={g:?}");
            }
        }
    }

    #[test]
    fn slices_past_the_end_are_empty() {
        let items = [1, 2, 3];
        let g = grid(3, 1);
        assert_eq!(page_slice(&items, 1, &g), &[] as &[i32]);
        assert_eq!(page_slice(&items, usize::MAX, &g), &[] as &[i32]);
    }

    #[test]
    fn clamp_page_is_idempotent() {
        for total in 0..8 {
            for page in [0, 1, 3, 7, 100, usize::MAX] {
                let once = clamp_page(page, total);
                assert_eq!(clamp_page(once, total), once);
                if total > 0 {
                    assert!(once < total);
                }
            }
        }
    }

    #[test]
    fn capacity_survives_out_of_range_grid() {
        let broken = grid(0, 0);
        assert_eq!(page_capacity(&broken), 1);
        assert_eq!(total_pages(2, &broken), 3);
        assert_eq!(page_of(5, &grid(4, 3)), 0);
        assert_eq!(page_of(12, &grid(4, 3)), 1);
    }
}
