//! Sorting and pagination types.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Ascending,
    /// Descending order.
    Descending,
}

impl SortDirection {
    /// Returns the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        }
    }
}

/// Orders results by one entity property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDirective {
    /// Property name as it appears in the JSON representation.
    pub property: String,
    /// The direction.
    pub direction: SortDirection,
}

impl SortDirective {
    /// Ascending order on `property`.
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Descending order on `property`.
    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Descending,
        }
    }

    /// Parses one `sort` parameter value such as `floor,roomno,desc`.
    ///
    /// A trailing `asc` or `desc` applies to every property before it.
    /// Blank segments are skipped.
    pub fn parse_param(value: &str) -> Vec<Self> {
        let mut parts: Vec<&str> = value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        let direction = match parts.last().map(|s| s.to_ascii_lowercase()) {
            Some(last) if last == "desc" => {
                parts.pop();
                SortDirection::Descending
            }
            Some(last) if last == "asc" => {
                parts.pop();
                SortDirection::Ascending
            }
            _ => SortDirection::Ascending,
        };

        parts
            .into_iter()
            .map(|property| Self {
                property: property.to_string(),
                direction,
            })
            .collect()
    }
}

/// A zero-based page request with optional sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page: u32,
    /// Page size, at least 1.
    pub size: u32,
    /// Explicit sort, applied before the identity tie-breaker.
    #[serde(default)]
    pub sort: Vec<SortDirective>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: 20,
            sort: Vec::new(),
        }
    }
}

impl PageRequest {
    /// Creates an unsorted page request.
    pub fn new(page: u32, size: u32) -> Result<Self, SearchError> {
        if size == 0 {
            return Err(SearchError::InvalidPageRequest {
                message: "page size must be at least 1".to_string(),
            });
        }
        Ok(Self {
            page,
            size,
            sort: Vec::new(),
        })
    }

    /// Adds sort directives.
    pub fn with_sort(mut self, sort: Vec<SortDirective>) -> Self {
        self.sort = sort;
        self
    }

    /// Row offset of the first item on this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// Totals for a page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Zero-based page index.
    pub page: u32,
    /// Requested page size.
    pub size: u32,
    /// Total number of matching rows.
    pub total: u64,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_previous: bool,
}

impl PageInfo {
    /// Computes page metadata for `request` given the total row count.
    pub fn new(request: &PageRequest, total: u64) -> Self {
        let end = request.offset() + u64::from(request.size);
        Self {
            page: request.page,
            size: request.size,
            total,
            has_next: end < total,
            has_previous: request.page > 0,
        }
    }

    /// Number of pages needed for `total` rows, never less than 1.
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 1;
        }
        self.total.div_ceil(u64::from(self.size)).max(1)
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The rows on this page.
    pub items: Vec<T>,
    /// Page metadata.
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    /// Creates a page.
    pub fn new(items: Vec<T>, page_info: PageInfo) -> Self {
        Self { items, page_info }
    }

    /// Returns true if the page holds no rows.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of rows on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }
}
