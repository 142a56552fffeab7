//! Search, category filter, sort and pagination over a bulk-fetched set of
//! press releases. Pure: nothing here touches the store.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::PressRelease;
use crate::services::html::strip_html;

pub const PAGE_SIZE: usize = 10;

/// Page numbers shown around the current page.
pub const WINDOW_SIZE: usize = 5;

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Company,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Newest, SortKey::Oldest, SortKey::Company];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Company => "company",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Newest => "Newest First",
            Self::Oldest => "Oldest First",
            Self::Company => "Company A-Z",
        }
    }

    /// Unknown keys fall back to [`SortKey::Newest`].
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "oldest" => Self::Oldest,
            "company" => Self::Company,
            _ => Self::Newest,
        }
    }

    fn compare(&self, a: &PressRelease, b: &PressRelease) -> Ordering {
        match self {
            Self::Newest => b.display_date().cmp(&a.display_date()),
            Self::Oldest => a.display_date().cmp(&b.display_date()),
            Self::Company => a.company.to_lowercase().cmp(&b.company.to_lowercase()),
        }
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub const ALL_LABEL: &'static str = "All Categories";

    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") || s.eq_ignore_ascii_case(Self::ALL_LABEL) {
            Self::All
        } else {
            Self::Only(s.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    /// Value used in query strings and `<select>` options.
    pub fn as_param(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Only(label) => label,
        }
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct ListingCriteria {
    pub query: String,
    pub category: CategoryFilter,
    pub sort: SortKey,
}

impl ListingCriteria {
    pub fn is_filtered(&self) -> bool {
        !self.query.trim().is_empty() || self.category != CategoryFilter::All
    }

    fn matches(&self, release: &PressRelease, needle: &str) -> bool {
        if !release.is_published() || !self.category.matches(&release.category) {
            return false;
        }

        needle.is_empty()
            || release.title.to_lowercase().contains(needle)
            || release.company.to_lowercase().contains(needle)
            || release.author.to_lowercase().contains(needle)
            || strip_html(&release.content).to_lowercase().contains(needle)
    }
}

/// Filters then sorts. Records that are not published never pass, whatever
/// the criteria.
pub fn apply<'a>(releases: &'a [PressRelease], criteria: &ListingCriteria) -> Vec<&'a PressRelease> {
    let needle = criteria.query.trim().to_lowercase();

    let mut matched: Vec<&PressRelease> = releases
        .iter()
        .filter(|r| criteria.matches(r, &needle))
        .collect();

    matched.sort_by(|a, b| criteria.sort.compare(a, b));
    matched
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based, clamped into `1..=total_pages` (page 1 when empty).
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// 1-based position of the first item shown, 0 when empty.
    pub start: usize,
    /// 1-based position of the last item shown, 0 when empty.
    pub end: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn previous(&self) -> usize {
        self.page.saturating_sub(1).max(1)
    }

    pub fn next(&self) -> usize {
        (self.page + 1).min(self.total_pages.max(1))
    }

    pub fn window(&self) -> Vec<PageLink> {
        pagination_window(self.page, self.total_pages)
    }
}

pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));

    let skip = (page - 1) * page_size;
    let items: Vec<T> = items.into_iter().skip(skip).take(page_size).collect();

    let (start, end) = if items.is_empty() {
        (0, 0)
    } else {
        (skip + 1, skip + items.len())
    };

    Page {
        items,
        page,
        total_pages,
        total_items,
        start,
        end,
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PageLink {
    Number(usize),
    Ellipsis,
}

/// Up to [`WINDOW_SIZE`] consecutive pages centred on `current`, plus the
/// first and last page, with an ellipsis wherever pages are skipped.
pub fn pagination_window(current: usize, total_pages: usize) -> Vec<PageLink> {
    if total_pages == 0 {
        return Vec::new();
    }

    let current = current.clamp(1, total_pages);
    let mut start = current.saturating_sub(WINDOW_SIZE / 2).max(1);
    let end = (start + WINDOW_SIZE - 1).min(total_pages);
    if end + 1 - start < WINDOW_SIZE {
        start = (end + 1).saturating_sub(WINDOW_SIZE).max(1);
    }

    let mut links = Vec::with_capacity(WINDOW_SIZE + 4);
    if start > 1 {
        links.push(PageLink::Number(1));
        if start > 2 {
            links.push(PageLink::Ellipsis);
        }
    }
    links.extend((start..=end).map(PageLink::Number));
    if end < total_pages {
        if end + 1 < total_pages {
            links.push(PageLink::Ellipsis);
        }
        links.push(PageLink::Number(total_pages));
    }
    links
}

/// Selection state of a listing view. Any change to the criteria sends the
/// view back to page 1.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ListingState {
    criteria: ListingCriteria,
    page: usize,
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new(ListingCriteria::default())
    }
}

impl ListingState {
    pub fn new(criteria: ListingCriteria) -> Self {
        Self { criteria, page: 1 }
    }

    pub fn criteria(&self) -> &ListingCriteria {
        &self.criteria
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.criteria.query {
            self.criteria.query = query;
            self.page = 1;
        }
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        if category != self.criteria.category {
            self.criteria.category = category;
            self.page = 1;
        }
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        if sort != self.criteria.sort {
            self.criteria.sort = sort;
            self.page = 1;
        }
    }

    pub fn clear_filters(&mut self) {
        self.set_query(String::new());
        self.set_category(CategoryFilter::All);
    }

    pub fn go_to(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn view<'a>(&self, releases: &'a [PressRelease]) -> Page<&'a PressRelease> {
        paginate(apply(releases, &self.criteria), self.page, PAGE_SIZE)
    }
}
