// src/paging.rs
//! Client-side pagination over the in-memory job list.

use crate::types::Job;

pub const PAGE_SIZE: usize = 10;

/// Always at least 1, so an empty result still has a well-defined page.
pub fn total_pages(total_count: usize) -> u32 {
    (total_count.div_ceil(PAGE_SIZE).max(1)) as u32
}

pub fn clamp_page(page: u32, total_pages: u32) -> u32 {
    page.clamp(1, total_pages.max(1))
}

/// The slice shown for `page` (1-based, assumed already clamped).
pub fn page_slice(jobs: &[Job], page: u32) -> &[Job] {
    let start = (page.saturating_sub(1) as usize) * PAGE_SIZE;
    if start >= jobs.len() {
        return &[];
    }
    let end = (start + PAGE_SIZE).min(jobs.len());
    &jobs[start..end]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Number(u32),
    Ellipsis,
}

/// Compact page-number sequence for display: first and last page always,
/// a window of up to 3 pages around the current one, gaps collapsed into a
/// single ellipsis. Empty when there is only one page (no controls render).
pub fn pagination_items(page: u32, total_pages: u32) -> Vec<PageItem> {
    if total_pages <= 1 {
        return Vec::new();
    }
    let current = clamp_page(page, total_pages);

    let mut items = vec![PageItem::Number(1)];

    let left = current.saturating_sub(1).max(2);
    let right = (current + 1).min(total_pages - 1);

    if left > 2 {
        items.push(PageItem::Ellipsis);
    }
    for p in left..=right {
        items.push(PageItem::Number(p));
    }
    if right < total_pages - 1 {
        items.push(PageItem::Ellipsis);
    }
    items.push(PageItem::Number(total_pages));

    // Edge windows can duplicate the boundary pages or stack markers.
    let mut cleaned: Vec<PageItem> = Vec::with_capacity(items.len());
    for item in items {
        match (cleaned.last(), item) {
            (Some(PageItem::Ellipsis), PageItem::Ellipsis) => {}
            (Some(PageItem::Number(a)), PageItem::Number(b)) if *a == b => {}
            _ => cleaned.push(item),
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jobs(n: usize) -> Vec<Job> {
        (0..n)
            .map(|i| Job {
                job_id: format!("J-{i}"),
                ..Default::default()
            })
            .collect()
    }

    fn numbers(items: &[PageItem]) -> Vec<i64> {
        // Ellipsis rendered as -1 for compact assertions.
        items
            .iter()
            .map(|it| match it {
                PageItem::Number(n) => *n as i64,
                PageItem::Ellipsis => -1,
            })
            .collect()
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0), 1);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(10), 1);
        assert_eq!(total_pages(11), 2);
        assert_eq!(total_pages(95), 10);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 5), 1);
        assert_eq!(clamp_page(3, 5), 3);
        assert_eq!(clamp_page(99, 5), 5);
        assert_eq!(clamp_page(7, 0), 1);
    }

    #[test]
    fn test_page_slice_lengths() {
        let all = jobs(23);
        assert_eq!(page_slice(&all, 1).len(), 10);
        assert_eq!(page_slice(&all, 2).len(), 10);
        assert_eq!(page_slice(&all, 3).len(), 3);
        assert_eq!(page_slice(&all, 1)[0].job_id, "J-0");
        assert_eq!(page_slice(&all, 3)[0].job_id, "J-20");
        assert!(page_slice(&all, 9).is_empty());
        assert!(page_slice(&[], 1).is_empty());
    }

    #[test]
    fn test_single_page_renders_no_controls() {
        assert!(pagination_items(1, 1).is_empty());
        assert!(pagination_items(5, 1).is_empty());
    }

    #[test]
    fn test_small_total_has_no_ellipsis() {
        assert_eq!(numbers(&pagination_items(2, 3)), vec![1, 2, 3]);
        assert_eq!(numbers(&pagination_items(1, 3)), vec![1, 2, 3]);
        assert_eq!(numbers(&pagination_items(3, 3)), vec![1, 2, 3]);
        assert_eq!(numbers(&pagination_items(1, 2)), vec![1, 2]);
    }

    #[test]
    fn test_middle_page_collapses_both_sides() {
        assert_eq!(
            numbers(&pagination_items(5, 10)),
            vec![1, -1, 4, 5, 6, -1, 10]
        );
    }

    #[test]
    fn test_boundary_pages() {
        assert_eq!(numbers(&pagination_items(1, 10)), vec![1, 2, -1, 10]);
        assert_eq!(numbers(&pagination_items(10, 10)), vec![1, -1, 9, 10]);
    }

    #[test]
    fn test_out_of_range_page_is_clamped_before_display() {
        assert_eq!(
            numbers(&pagination_items(99, 10)),
            numbers(&pagination_items(10, 10))
        );
    }
}
