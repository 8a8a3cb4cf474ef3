//! This modules defines the common functionality for paging data.

use maud::{Markup, html};

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of expenses to display per page.
    pub page_size: u64,
    /// The maximum number of pages to show in the pagination indicator.
    pub max_pages: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            page_size: 5,
            max_pages: 5,
        }
    }
}

/// The number of pages needed to show `len` items, `page_size` items at a time.
///
/// An empty list, or a page size of zero, has no pages.
pub fn page_count(len: usize, page_size: u64) -> u64 {
    if page_size == 0 {
        return 0;
    }

    (len as u64).div_ceil(page_size)
}

/// Get page `page_number` (starting from 1) of `items`.
///
/// Pages outside of `1..=page_count` are empty.
pub fn paginate<T>(items: &[T], page_size: u64, page_number: u64) -> &[T] {
    if page_number == 0 || page_size == 0 {
        return &[];
    }

    let offset = (page_number - 1).saturating_mul(page_size);
    let start = usize::try_from(offset).unwrap_or(usize::MAX);

    if start >= items.len() {
        return &[];
    }

    let end = usize::try_from(page_size)
        .map_or(items.len(), |size| start.saturating_add(size))
        .min(items.len());

    &items[start..end]
}

/// Clamp a requested page number into the pages that exist.
///
/// An empty list still shows a single (empty) page.
pub fn clamp_page(page: u64, page_count: u64) -> u64 {
    page.clamp(1, page_count.max(1))
}

#[derive(Debug, PartialEq, Eq)]
pub enum PaginationIndicator {
    Page(u64),
    CurrPage(u64),
    Ellipsis,
    NextButton(u64),
    BackButton(u64),
}

pub fn create_pagination_indicators(
    curr_page: u64,
    page_count: u64,
    max_pages: u64,
) -> Vec<PaginationIndicator> {
    let map_page = |page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    };

    let half_window = max_pages / 2;

    let window = if page_count <= max_pages {
        1..=page_count
    } else if curr_page <= half_window {
        1..=max_pages
    } else if curr_page > page_count - half_window {
        (page_count - max_pages + 1)..=page_count
    } else {
        (curr_page - half_window)..=(curr_page + half_window)
    };

    let mut indicators = Vec::new();

    if curr_page > 1 {
        indicators.push(PaginationIndicator::BackButton(curr_page - 1));
    }

    let shows_first_page = page_count > max_pages && curr_page > half_window + 1;
    let shows_last_page = page_count > max_pages && curr_page < page_count - half_window;

    if shows_first_page {
        indicators.push(PaginationIndicator::Page(1));
        indicators.push(PaginationIndicator::Ellipsis);
    }

    indicators.extend(window.map(map_page));

    if shows_last_page {
        indicators.push(PaginationIndicator::Ellipsis);
        indicators.push(PaginationIndicator::Page(page_count));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}

/// Render the pagination indicators as a list of links.
///
/// `page_url` gives the link target for a page number.
pub fn pagination_view(
    indicators: &[PaginationIndicator],
    page_url: impl Fn(u64) -> String,
) -> Markup {
    const PAGE_LINK_STYLE: &str = "block px-3 py-2 rounded-sm text-blue-600 hover:underline";

    html! {
        nav class="pagination flex justify-center" aria-label="Pagination"
        {
            ul class="pagination flex items-center gap-2 p-0 m-0"
            {
                @for indicator in indicators {
                    li
                    {
                        @match indicator {
                            PaginationIndicator::Page(page) => {
                                a href=(page_url(*page)) class=(PAGE_LINK_STYLE) { (page) }
                            }
                            PaginationIndicator::CurrPage(page) => {
                                p
                                    aria-current="page"
                                    class="block px-3 py-2 rounded-sm font-bold text-black dark:text-white"
                                { (page) }
                            }
                            PaginationIndicator::Ellipsis => {
                                span class="px-3 py-2 text-gray-500" { "..." }
                            }
                            PaginationIndicator::BackButton(page) => {
                                a href=(page_url(*page)) role="button" class=(PAGE_LINK_STYLE)
                                { "Back" }
                            }
                            PaginationIndicator::NextButton(page) => {
                                a href=(page_url(*page)) role="button" class=(PAGE_LINK_STYLE)
                                { "Next" }
                            }
                        }
                    }
                }
            }
        }
    }
}
