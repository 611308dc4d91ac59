//! Page arithmetic for the pagination bar.

use serde::Serialize;

use crate::constants::DEFAULT_PAGE;
use crate::query_state::PageSize;

/// `ceil(total_elements / page_size)`; an empty result has zero pages.
pub fn total_pages(total_elements: u64, page_size: PageSize) -> u64 {
    total_elements.div_ceil(u64::from(page_size.get()))
}

/// Zero-based inclusive row offsets `(from, to)` of `page`.
pub fn row_range(page: u32, page_size: PageSize) -> (u64, u64) {
    let size = u64::from(page_size.get());
    let page = u64::from(page.max(DEFAULT_PAGE));
    ((page - 1) * size, page * size - 1)
}

/// One-based inclusive `(from, to)` of the rows shown, e.g. "11 to 20 of 42".
/// `(0, 0)` when the page lies past the end of the result set.
pub fn visible_range(page: u32, page_size: PageSize, total_elements: u64) -> (u64, u64) {
    let (from, to) = row_range(page, page_size);
    if from >= total_elements {
        return (0, 0);
    }
    (from + 1, (to + 1).min(total_elements))
}

pub const fn has_previous(page: u32) -> bool {
    page > DEFAULT_PAGE
}

pub const fn has_next(page: u32, total_pages: u64) -> bool {
    (page as u64) < total_pages
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "lowercase")]
pub enum PageButton {
    Page(u64),
    Ellipsis,
}

/// Numbered buttons around `page`, with runs of hidden pages collapsed.
///
/// Up to five pages are all shown. Near the start the first four and the last
/// page are kept; near the end the first and the last four. In the middle the
/// first, last, one page before and two pages after the current one are kept.
pub fn page_buttons(page: u32, total_pages: u64) -> Vec<PageButton> {
    let page = u64::from(page);
    let last = total_pages;
    let hidden = |r: u64| -> bool {
        if last <= 5 {
            false
        } else if page <= 3 {
            r > 4 && r < last
        } else if last.saturating_sub(page) <= 2 {
            r > 1 && r + 3 < last
        } else {
            (r > 1 && r + 1 < page) || (r > page + 2 && r < last)
        }
    };

    let mut buttons: Vec<PageButton> = Vec::new();
    for r in 1..=last {
        let button = if hidden(r) { PageButton::Ellipsis } else { PageButton::Page(r) };
        if button == PageButton::Ellipsis && buttons.last() == Some(&PageButton::Ellipsis) {
            continue;
        }
        buttons.push(button);
    }
    buttons
}

/// Everything the pagination bar renders for one response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSummary {
    pub page: u32,
    pub page_size: PageSize,
    pub total_elements: u64,
    pub total_pages: u64,
    pub from: u64,
    pub to: u64,
    pub has_previous: bool,
    pub has_next: bool,
    pub buttons: Vec<PageButton>,
}

impl PaginationSummary {
    pub fn new(page: u32, page_size: PageSize, total_elements: u64) -> Self {
        let pages = total_pages(total_elements, page_size);
        let (from, to) = visible_range(page, page_size, total_elements);
        Self {
            page,
            page_size,
            total_elements,
            total_pages: pages,
            from,
            to,
            has_previous: has_previous(page),
            has_next: has_next(page, pages),
            buttons: page_buttons(page, pages),
        }
    }
}
