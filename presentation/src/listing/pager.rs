//! Paged, selectable listing
//!
//! Shows the first page of the filtered collection and grows by one page per
//! "load more". One row is selected at a time; a selection that falls outside
//! a shrunken collection snaps back to the first row.

/// Rows shown initially and added by each "load more"
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceListing {
    page_size: usize,
    visible: usize,
    selected: usize,
}

impl Default for ResourceListing {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ResourceListing {
    /// A zero page size falls back to [`DEFAULT_PAGE_SIZE`]
    pub fn new(page_size: usize) -> Self {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        Self {
            page_size,
            visible: page_size,
            selected: 0,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Back to the first page with the first row selected
    pub fn reset(&mut self) {
        self.visible = self.page_size;
        self.selected = 0;
    }

    /// Rows currently shown out of `total`
    pub fn visible_count(&self, total: usize) -> usize {
        self.visible.min(total)
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.visible < total
    }

    /// Show one more page; returns whether anything was added
    pub fn load_more(&mut self, total: usize) -> bool {
        if !self.has_more(total) {
            return false;
        }
        self.visible = (self.visible + self.page_size).min(total);
        true
    }

    /// The shown prefix of `items`
    pub fn page<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible_count(items.len())]
    }

    /// Selected row, after snapping it into range for `total` rows
    pub fn selected(&mut self, total: usize) -> usize {
        self.clamp_selection(total);
        self.selected
    }

    /// Select row `index`; out-of-range rows are rejected
    pub fn select(&mut self, index: usize, total: usize) -> bool {
        if index >= self.visible_count(total) {
            return false;
        }
        self.selected = index;
        true
    }

    /// Reset the selection to the first row when it is out of range
    pub fn clamp_selection(&mut self, total: usize) {
        if self.selected >= total {
            self.selected = 0;
        }
    }
}
