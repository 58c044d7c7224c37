//! Client-side pagination of an already fetched list.
//!
//! Pages are 1-based. A list of `n` items has `ceil(n / page_size)` pages, and zero pages when empty.

/// Cursor over the pages of a list of `total_items` items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    current_page: usize,
    total_items: usize,
}

/// The items shown for one page, with the information needed to render its controls.
#[derive(Clone)]
pub struct PageWindow<'a, T> {
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
    pub start_index: usize,
    pub end_index: usize,
    pub items: &'a [T],
}

impl<T> std::fmt::Debug for PageWindow<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageWindow")
            .field("page", &self.page)
            .field("per_page", &self.per_page)
            .field("total_items", &self.total_items)
            .field("total_pages", &self.total_pages)
            .field("has_next", &self.has_next)
            .field("has_prev", &self.has_prev)
            .field("start_index", &self.start_index)
            .field("end_index", &self.end_index)
            .field("items", &format!("[{} items]", self.items.len()))
            .finish()
    }
}

/// One control of the pagination bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageControl {
    Prev { target: usize, disabled: bool },
    Number { page: usize, current: bool },
    Next { target: usize, disabled: bool },
}

impl Paginator {
    pub fn new(page_size: usize, total_items: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
            total_items,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// Moves to page `page`. Out-of-range pages are ignored.
    ///
    /// Returns whether the request was accepted.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }

        self.current_page = page;
        true
    }

    /// Slice of `items` shown on the current page.
    pub fn window<'a, T>(&self, items: &'a [T]) -> PageWindow<'a, T> {
        let total_items = items.len().min(self.total_items);
        let total_pages = self.total_pages();

        let start_index = ((self.current_page - 1) * self.page_size).min(total_items);
        let end_index = (self.current_page * self.page_size).min(total_items);

        PageWindow {
            page: self.current_page,
            per_page: self.page_size,
            total_items,
            total_pages,
            has_next: self.current_page < total_pages,
            has_prev: self.current_page > 1,
            start_index,
            end_index,
            items: &items[start_index..end_index],
        }
    }

    /// Prev, every page number, then Next. Empty when there is nothing to paginate.
    pub fn controls(&self) -> Vec<PageControl> {
        let total_pages = self.total_pages();
        if total_pages == 0 {
            return vec![];
        }

        let mut controls = Vec::with_capacity(total_pages + 2);
        controls.push(PageControl::Prev {
            target: self.current_page.saturating_sub(1).max(1),
            disabled: self.current_page == 1,
        });
        controls.extend((1..=total_pages).map(|page| PageControl::Number {
            page,
            current: page == self.current_page,
        }));
        controls.push(PageControl::Next {
            target: (self.current_page + 1).min(total_pages),
            disabled: self.current_page == total_pages,
        });

        controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(Paginator::new(6, 0).total_pages(), 0);
        assert_eq!(Paginator::new(6, 1).total_pages(), 1);
        assert_eq!(Paginator::new(6, 6).total_pages(), 1);
        assert_eq!(Paginator::new(6, 7).total_pages(), 2);
        assert_eq!(Paginator::new(6, 13).total_pages(), 3);
    }

    #[test]
    fn out_of_range_pages_are_ignored() {
        let mut paginator = Paginator::new(6, 13);
        assert!(paginator.go_to_page(3));

        for page in [0, 4, 100] {
            assert!(!paginator.go_to_page(page));
            assert_eq!(paginator.current_page(), 3);
        }
    }

    #[test]
    fn empty_list_never_changes_page() {
        let mut paginator = Paginator::new(6, 0);
        assert!(!paginator.go_to_page(1));
        assert_eq!(paginator.current_page(), 1);
        assert!(paginator.controls().is_empty());
        assert!(paginator.window::<u8>(&[]).items.is_empty());
    }

    #[test]
    fn windows_are_contiguous_slices() {
        let items: Vec<usize> = (0..13).collect();
        let mut paginator = Paginator::new(6, items.len());

        for page in 1..=paginator.total_pages() {
            paginator.go_to_page(page);
            let window = paginator.window(&items);
            let expected_end = (page * 6).min(items.len());
            assert_eq!(window.items, &items[(page - 1) * 6..expected_end]);
        }

        let last = paginator.window(&items);
        assert_eq!(last.items, &[12]);
        assert!(!last.has_next);
        assert!(last.has_prev);
    }

    #[test]
    fn controls_disable_boundaries() {
        let mut paginator = Paginator::new(6, 13);

        let controls = paginator.controls();
        assert_eq!(controls.len(), 5);
        assert_eq!(controls[0], PageControl::Prev { target: 1, disabled: true });
        assert_eq!(controls[1], PageControl::Number { page: 1, current: true });
        assert_eq!(controls[4], PageControl::Next { target: 2, disabled: false });

        paginator.go_to_page(3);
        let controls = paginator.controls();
        assert_eq!(controls[0], PageControl::Prev { target: 2, disabled: false });
        assert_eq!(controls[4], PageControl::Next { target: 3, disabled: true });
    }
}
