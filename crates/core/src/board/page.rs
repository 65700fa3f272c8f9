/// One page of a table. Pages are 1-based.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

impl<T> Page<'_, T> {
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.total.div_ceil(self.page_size)
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Slice out page `page` (1-based). Page 0, a zero page size, or a page past
/// the end yields an empty slice.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let empty = Page {
        items: &items[..0],
        page,
        page_size,
        total: items.len(),
    };
    if page == 0 || page_size == 0 {
        return empty;
    }

    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return empty;
    }
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        items: &items[start..end],
        ..empty
    }
}
