//! Listing query normalization and pagination.
//!
//! Every listing parameter is permissive: anything unrecognized falls back to
//! its default instead of producing an error.

use crate::domain::book::Status;
use serde::Serialize;

pub const PAGE_SIZES: [u32; 4] = [5, 10, 20, 50];
pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortKey {
    Title,
    Author,
    Year,
    Rating,
    #[default]
    Created,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Title,
        SortKey::Author,
        SortKey::Year,
        SortKey::Rating,
        SortKey::Created,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "title" => Some(SortKey::Title),
            "author" => Some(SortKey::Author),
            "year" => Some(SortKey::Year),
            "rating" => Some(SortKey::Rating),
            "created" => Some(SortKey::Created),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Author => "author",
            SortKey::Year => "year",
            SortKey::Rating => "rating",
            SortKey::Created => "created",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

impl SortDir {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "asc" => Some(SortDir::Asc),
            "desc" => Some(SortDir::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            SortDir::Asc => SortDir::Desc,
            SortDir::Desc => SortDir::Asc,
        }
    }
}

/// Raw `GET /books` query parameters.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub q: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

/// Filters shared by the page query and the COUNT query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Trimmed, non-empty search term.
    pub search: Option<String>,
    pub status: Option<Status>,
}

impl ListFilter {
    /// Case-insensitive substring match on title or author, plus status equality.
    pub fn matches(&self, title: &str, author: &str, status: Status) -> bool {
        if let Some(want) = self.status {
            if want != status {
                return false;
            }
        }
        match &self.search {
            Some(term) => {
                let term = term.to_lowercase();
                title.to_lowercase().contains(&term) || author.to_lowercase().contains(&term)
            }
            None => true,
        }
    }
}

/// A fully normalized listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub filter: ListFilter,
    pub sort: SortKey,
    pub dir: SortDir,
    /// Requested page (>= 1), before clamping against the total count.
    pub page: u32,
    pub page_size: u32,
    /// Set when `page_size` came from a valid query parameter and should be remembered.
    pub remember_page_size: bool,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filter: ListFilter::default(),
            sort: SortKey::default(),
            dir: SortDir::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            remember_page_size: false,
        }
    }
}

pub fn parse_page_size(raw: &str) -> Option<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|n| PAGE_SIZES.contains(n))
}

impl ListParams {
    /// Collects decoded query pairs; the first value of a repeated key wins and
    /// unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "q" => &mut params.q,
                "status" => &mut params.status,
                "sort" => &mut params.sort,
                "dir" => &mut params.dir,
                "page" => &mut params.page,
                "page_size" => &mut params.page_size,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        params
    }

    /// Maps raw parameters onto a `ListQuery`, falling back to defaults.
    ///
    /// Page size precedence: valid query parameter, then the stored cookie
    /// preference, then `DEFAULT_PAGE_SIZE`.
    pub fn normalize(&self, stored_page_size: Option<&str>) -> ListQuery {
        let search = self
            .q
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let status = self
            .status
            .as_deref()
            .and_then(|s| s.trim().parse::<Status>().ok());

        let sort = self
            .sort
            .as_deref()
            .and_then(SortKey::parse)
            .unwrap_or_default();

        let dir = self
            .dir
            .as_deref()
            .and_then(SortDir::parse)
            .unwrap_or_default();

        let page = self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);

        let explicit = self.page_size.as_deref().and_then(parse_page_size);
        let page_size = explicit
            .or_else(|| stored_page_size.and_then(parse_page_size))
            .unwrap_or(DEFAULT_PAGE_SIZE);

        ListQuery {
            filter: ListFilter { search, status },
            sort,
            dir,
            page,
            page_size,
            remember_page_size: explicit.is_some(),
        }
    }
}

/// Page window after the total count is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
    pub total_pages: u32,
}

impl Pagination {
    /// Clamps `requested` into `[1, total_pages]`; an empty result still has one page.
    pub fn clamp(requested: u32, page_size: u32, total: i64) -> Self {
        let page_size = page_size.max(1);
        let total = total.max(0);
        let pages = (total as u64).div_ceil(page_size as u64).max(1);
        let total_pages = u32::try_from(pages).unwrap_or(u32::MAX);
        Self {
            page: requested.clamp(1, total_pages),
            page_size,
            total,
            total_pages,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.page_size as i64
    }

    pub fn limit(&self) -> i64 {
        self.page_size as i64
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 1-based index of the first row on this page, 0 when empty.
    pub fn first_item(&self) -> i64 {
        if self.total == 0 {
            0
        } else {
            self.offset() + 1
        }
    }

    pub fn last_item(&self) -> i64 {
        (self.offset() + self.limit()).min(self.total)
    }
}

impl ListQuery {
    /// Builds a `/books?...` link that keeps the current filters.
    pub fn href(&self, sort: SortKey, dir: SortDir, page: u32) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(q) = &self.filter.search {
            pairs.push(("q", q.clone()));
        }
        if let Some(st) = self.filter.status {
            pairs.push(("status", st.as_str().to_string()));
        }
        pairs.push(("sort", sort.as_str().to_string()));
        pairs.push(("dir", dir.as_str().to_string()));
        pairs.push(("page", page.to_string()));
        pairs.push(("page_size", self.page_size.to_string()));
        let qs = serde_urlencoded::to_string(&pairs).unwrap_or_default();
        format!("/books?{}", qs)
    }

    pub fn page_href(&self, page: u32) -> String {
        self.href(self.sort, self.dir, page)
    }

    /// Column header link: toggles direction when already sorted by `key`.
    pub fn sort_href(&self, key: SortKey) -> String {
        let dir = if self.sort == key {
            self.dir.flipped()
        } else if key == SortKey::Title || key == SortKey::Author {
            SortDir::Asc
        } else {
            SortDir::Desc
        };
        self.href(key, dir, 1)
    }

    pub fn sort_indicator(&self, key: SortKey) -> &'static str {
        match (self.sort == key, self.dir) {
            (false, _) => "",
            (true, SortDir::Asc) => "▲",
            (true, SortDir::Desc) => "▼",
        }
    }

    pub fn search_text(&self) -> &str {
        self.filter.search.as_deref().unwrap_or("")
    }
}
