// web_app/pagination.rs - Page window for the table view
//
// Which page buttons to show around the current page:
//
//   [Prev] 1 … 6 7 [8] 9 10 [Next]
//
// Page 1 and the last page are always reachable, a window of two pages on
// each side of the current one is shown, and ellipses mark the gaps.

/// Pages shown before and after the current page
pub const WINDOW_DELTA: i64 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
    Page { number: u32, current: bool },
    LeftEllipsis,
    RightEllipsis,
}

impl PageItem {
    pub fn number(&self) -> Option<u32> {
        match self {
            PageItem::Page { number, .. } => Some(*number),
            _ => None,
        }
    }
}

/// `ceil(total / page_size)`; zero when there is nothing to show
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
}

/// Numbered buttons and ellipsis markers for `current` out of `total_pages`.
///
/// Every number produced lies in `[1, total_pages]`; with no pages at all
/// nothing is produced.
pub fn page_window(current: u32, total_pages: u32) -> Vec<PageItem> {
    if total_pages == 0 {
        return Vec::new();
    }

    let current_i = i64::from(current);
    let total_i = i64::from(total_pages);
    let mut items = vec![PageItem::Page {
        number: 1,
        current: current == 1,
    }];

    if current > 4 {
        items.push(PageItem::LeftEllipsis);
    }

    let start = (current_i - WINDOW_DELTA).max(2);
    let end = (current_i + WINDOW_DELTA).min(total_i - 1);
    for number in start..=end {
        items.push(PageItem::Page {
            number: number as u32,
            current: number == current_i,
        });
    }

    if current_i < total_i - 3 {
        items.push(PageItem::RightEllipsis);
    }

    if total_pages > 1 {
        items.push(PageItem::Page {
            number: total_pages,
            current: current == total_pages,
        });
    }

    items
}

/// Everything the pagination bar renders
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationModel {
    pub current: u32,
    pub total_pages: u32,
    pub total: u64,
    pub items: Vec<PageItem>,
    pub can_previous: bool,
    pub can_next: bool,
}

impl PaginationModel {
    pub fn new(current: u32, total: u64, page_size: u32) -> Self {
        let total_pages = total_pages(total, page_size);
        Self {
            current,
            total_pages,
            total,
            items: page_window(current, total_pages),
            can_previous: total_pages > 0 && current > 1,
            can_next: total_pages > 0 && current < total_pages,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Page {} of {} ({} total)",
            self.current, self.total_pages, self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(items: &[PageItem]) -> String {
        items
            .iter()
            .map(|item| match item {
                PageItem::Page { number, current: true } => format!("{}*", number),
                PageItem::Page { number, .. } => number.to_string(),
                PageItem::LeftEllipsis | PageItem::RightEllipsis => "…".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(45, 20), 3);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_first_page_of_ten() {
        assert_eq!(render(&page_window(1, 10)), "1* 2 3 … 10");
    }

    #[test]
    fn test_eighth_page_of_ten() {
        assert_eq!(render(&page_window(8, 10)), "1 … 6 7 8* 9 10");
    }

    #[test]
    fn test_middle_page() {
        assert_eq!(render(&page_window(5, 10)), "1 … 3 4 5* 6 7 … 10");
    }

    #[test]
    fn test_fourth_page_has_no_left_ellipsis() {
        assert_eq!(render(&page_window(4, 10)), "1 2 3 4* 5 6 … 10");
    }

    #[test]
    fn test_last_page() {
        assert_eq!(render(&page_window(10, 10)), "1 … 8 9 10*");
    }

    #[test]
    fn test_small_totals() {
        assert_eq!(render(&page_window(1, 1)), "1*");
        assert_eq!(render(&page_window(1, 2)), "1* 2");
        assert_eq!(render(&page_window(2, 2)), "1 2*");
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn test_no_results_keeps_controls_disabled() {
        let model = PaginationModel::new(1, 0, 10);
        assert_eq!(model.total_pages, 0);
        assert!(model.items.is_empty());
        assert!(!model.can_previous);
        assert!(!model.can_next);
        assert_eq!(model.summary(), "Page 1 of 0 (0 total)");
    }

    #[test]
    fn test_navigation_flags() {
        let first = PaginationModel::new(1, 100, 10);
        assert!(!first.can_previous);
        assert!(first.can_next);

        let last = PaginationModel::new(10, 100, 10);
        assert!(last.can_previous);
        assert!(!last.can_next);
    }
}
