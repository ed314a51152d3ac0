//! Query inputs and paginated results for list and task reads.

use super::{ParseCompletionFilterError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Page size used when none is configured.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Largest page size a caller may request.
pub const MAX_PER_PAGE: u32 = 100;

/// Case-insensitive substring matched against title or description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Creates a search term, returning `None` for blank input.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    /// Parses an optional query-string value.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Option<Self> {
        value.and_then(Self::new)
    }

    /// Returns the term as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the term occurs in the title or the description.
    #[must_use]
    pub fn matches(&self, title: &str, description: Option<&str>) -> bool {
        let needle = self.0.to_lowercase();
        title.to_lowercase().contains(&needle)
            || description.is_some_and(|text| text.to_lowercase().contains(&needle))
    }

    /// Returns a SQL `LIKE` pattern matching the term anywhere in a value.
    ///
    /// `%`, `_` and `\` are escaped with a backslash so they match
    /// literally.
    #[must_use]
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for ch in self.0.chars() {
            if matches!(ch, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Completion-state filter applied to task queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionFilter {
    /// No completion predicate.
    #[default]
    All,
    /// Only completed tasks.
    Completed,
    /// Only tasks that are not completed.
    Pending,
}

impl CompletionFilter {
    /// Parses an optional query-string value; absent or blank means
    /// [`CompletionFilter::All`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseCompletionFilterError`] for any other value.
    pub fn parse(value: Option<&str>) -> Result<Self, ParseCompletionFilterError> {
        let Some(raw) = value else {
            return Ok(Self::All);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            _ => Err(ParseCompletionFilterError(raw.to_owned())),
        }
    }

    /// Returns the canonical query-string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Completed => "completed",
            Self::Pending => "pending",
        }
    }

    /// Returns the required completion flag, or `None` when unfiltered.
    #[must_use]
    pub const fn completion(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Completed => Some(true),
            Self::Pending => Some(false),
        }
    }

    /// Returns `true` when a task with the given flag passes the filter.
    #[must_use]
    pub fn admits(self, is_completed: bool) -> bool {
        self.completion()
            .is_none_or(|required| required == is_completed)
    }
}

/// Owner visibility applied to every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerScope {
    /// Every list, owned or not.
    All,
    /// Only lists owned by the given user.
    Owner(UserId),
}

impl OwnerScope {
    /// Returns `true` when a list with the given owner is visible.
    #[must_use]
    pub fn admits(self, owner_id: Option<UserId>) -> bool {
        match self {
            Self::All => true,
            Self::Owner(user) => owner_id == Some(user),
        }
    }
}

/// One-based page position and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Creates a page request, clamping the page to at least 1 and the size
    /// to `1..=MAX_PER_PAGE`.
    #[must_use]
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// Creates a request for the first page.
    #[must_use]
    pub fn first(per_page: u32) -> Self {
        Self::new(1, per_page)
    }

    /// Parses an optional query-string page number; absent, malformed or
    /// non-positive values select the first page.
    #[must_use]
    pub fn parse_number(value: Option<&str>) -> u32 {
        value
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or(1)
            .max(1)
    }

    /// Returns the one-based page number.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn per_page(self) -> u32 {
        self.per_page
    }

    /// Returns the number of items preceding this page.
    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PER_PAGE)
    }
}

/// Pagination metadata echoed back to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// One-based number of the returned page.
    pub current_page: u32,
    /// Number of the last page; at least 1 even when empty.
    pub last_page: u32,
    /// Page size.
    pub per_page: u32,
    /// Number of matching items across all pages.
    pub total: u64,
    /// One-based index of the first returned item, if any.
    pub from: Option<u64>,
    /// One-based index of the last returned item, if any.
    pub to: Option<u64>,
}

impl PageMeta {
    /// Computes metadata for a page holding `item_count` of `total` items.
    #[must_use]
    pub fn new(request: PageRequest, total: u64, item_count: usize) -> Self {
        let pages = total.div_ceil(u64::from(request.per_page())).max(1);
        let last_page = u32::try_from(pages).unwrap_or(u32::MAX);
        let count = u64::try_from(item_count).unwrap_or(u64::MAX);
        let (from, to) = if count == 0 {
            (None, None)
        } else {
            let offset = request.offset();
            (Some(offset + 1), Some(offset + count))
        };

        Self {
            current_page: request.page(),
            last_page,
            per_page: request.per_page(),
            total,
            from,
            to,
        }
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    #[serde(rename = "data")]
    items: Vec<T>,
    #[serde(flatten)]
    meta: PageMeta,
}

impl<T> Page<T> {
    /// Creates a page from its items and the total match count.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        let meta = PageMeta::new(request, total, items.len());
        Self { items, meta }
    }

    /// Returns the items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Returns the pagination metadata.
    #[must_use]
    pub const fn meta(&self) -> &PageMeta {
        &self.meta
    }

    /// Converts every item, keeping the metadata.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `convert`.
    pub fn try_map<U, E>(self, convert: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        let items = self.items.into_iter().map(convert).collect::<Result<_, _>>()?;
        Ok(Page {
            items,
            meta: self.meta,
        })
    }
}

/// Read query over lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Owner visibility.
    pub scope: OwnerScope,
    /// Optional search term.
    pub search: Option<SearchTerm>,
}

impl ListQuery {
    /// Creates an unfiltered query within the scope.
    #[must_use]
    pub const fn new(scope: OwnerScope) -> Self {
        Self {
            scope,
            search: None,
        }
    }

    /// Sets the search term.
    #[must_use]
    pub fn with_search(mut self, search: Option<SearchTerm>) -> Self {
        self.search = search;
        self
    }
}

/// Paginated read query over tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    /// Owner visibility, applied through each task's list.
    pub scope: OwnerScope,
    /// Optional search term.
    pub search: Option<SearchTerm>,
    /// Completion-state filter.
    pub completion: CompletionFilter,
    /// Requested page.
    pub page: PageRequest,
}

impl TaskQuery {
    /// Creates an unfiltered first-page query within the scope.
    #[must_use]
    pub fn new(scope: OwnerScope) -> Self {
        Self {
            scope,
            search: None,
            completion: CompletionFilter::All,
            page: PageRequest::default(),
        }
    }

    /// Sets the search term.
    #[must_use]
    pub fn with_search(mut self, search: Option<SearchTerm>) -> Self {
        self.search = search;
        self
    }

    /// Sets the completion filter.
    #[must_use]
    pub const fn with_completion(mut self, completion: CompletionFilter) -> Self {
        self.completion = completion;
        self
    }

    /// Sets the requested page.
    #[must_use]
    pub const fn with_page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }
}
