//! Query-string validation for listing endpoints.
//!
//! Raw parameters arrive as untrusted strings. Everything that reaches the
//! query composer has been mapped onto a closed enum or a bounded integer;
//! no caller-supplied text is ever used as SQL clause text.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

/// Page size used when `limit` is absent.
pub const DEFAULT_LIMIT: u32 = 10;

/// Page number used when `p` is absent.
pub const DEFAULT_PAGE: u32 = 1;

/// Largest row offset handed to a store. PostgreSQL OFFSET is a signed
/// 64-bit value.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Positive integer without sign or leading zeros.
#[allow(clippy::expect_used)]
static POSITIVE_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]*$").expect("valid regex literal"));

/// A string made only of digits can never be a topic slug filter.
#[allow(clippy::expect_used)]
static ALL_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid regex literal"));

/// Parameter that failed whitelist validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("sort_by is not a sortable column")]
    SortBy,

    #[error("order must be asc or desc")]
    Order,

    #[error("topic must not be numeric")]
    Topic,

    #[error("limit must be a positive integer")]
    Limit,

    #[error("page must be a positive integer")]
    Page,

    #[error("query string could not be decoded")]
    Undecodable,
}

/// Column an article listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    CreatedAt,
    ArticleId,
    Author,
    Topic,
}

impl SortColumn {
    /// Parse an exact, case-sensitive column name.
    pub fn parse(raw: &str) -> Result<Self, ParamError> {
        match raw {
            "created_at" => Ok(Self::CreatedAt),
            "article_id" => Ok(Self::ArticleId),
            "author" => Ok(Self::Author),
            "topic" => Ok(Self::Topic),
            _ => Err(ParamError::SortBy),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::ArticleId => "article_id",
            Self::Author => "author",
            Self::Topic => "topic",
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse `asc`/`desc` in any letter case.
    pub fn parse(raw: &str) -> Result<Self, ParamError> {
        if raw.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(ParamError::Order)
        }
    }
}

/// Validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    limit: u32,
    page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: DEFAULT_PAGE,
        }
    }
}

impl Pagination {
    /// Build a page window from already-typed values.
    ///
    /// Both values must be at least 1.
    pub fn new(limit: u32, page: u32) -> Result<Self, ParamError> {
        if limit == 0 {
            return Err(ParamError::Limit);
        }
        if page == 0 {
            return Err(ParamError::Page);
        }
        Ok(Self { limit, page })
    }

    /// Validate raw `limit` and `p` values, applying defaults when absent.
    pub fn from_raw(limit: Option<&str>, page: Option<&str>) -> Result<Self, ParamError> {
        let limit = match limit {
            Some(raw) => parse_positive(raw).ok_or(ParamError::Limit)?,
            None => DEFAULT_LIMIT,
        };
        let page = match page {
            Some(raw) => parse_positive(raw).ok_or(ParamError::Page)?,
            None => DEFAULT_PAGE,
        };
        Ok(Self { limit, page })
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Rows to skip: `(page - 1) * limit`, saturated at [`MAX_OFFSET`].
    pub fn offset(&self) -> u64 {
        (u64::from(self.page - 1) * u64::from(self.limit)).min(MAX_OFFSET)
    }
}

fn parse_positive(raw: &str) -> Option<u32> {
    if !POSITIVE_INTEGER.is_match(raw) {
        return None;
    }
    raw.parse().ok()
}

/// Raw query string of `GET /api/articles`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArticleParams {
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub topic: Option<String>,
    pub limit: Option<String>,
    #[serde(alias = "page")]
    pub p: Option<String>,
}

/// Raw query string of paginated child listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPageParams {
    pub limit: Option<String>,
    #[serde(alias = "page")]
    pub p: Option<String>,
}

impl RawPageParams {
    pub fn validate(&self) -> Result<Pagination, ParamError> {
        Pagination::from_raw(self.limit.as_deref(), self.p.as_deref())
    }
}

/// Validated configuration for an article listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArticleListParams {
    pub sort_by: SortColumn,
    pub order: SortOrder,

    /// Topic slug filter. An empty `topic=` is treated as no filter.
    pub topic: Option<String>,

    pub pagination: Pagination,
}

impl ArticleListParams {
    /// Validate every raw parameter. The first failing field rejects the
    /// whole listing.
    pub fn from_raw(raw: &RawArticleParams) -> Result<Self, ParamError> {
        let sort_by = match raw.sort_by.as_deref() {
            Some(value) => SortColumn::parse(value)?,
            None => SortColumn::default(),
        };

        let order = match raw.order.as_deref() {
            Some(value) => SortOrder::parse(value)?,
            None => SortOrder::default(),
        };

        let topic = match raw.topic.as_deref() {
            Some(value) if ALL_DIGITS.is_match(value) => return Err(ParamError::Topic),
            Some(value) if !value.is_empty() => Some(value.to_string()),
            _ => None,
        };

        let pagination = Pagination::from_raw(raw.limit.as_deref(), raw.p.as_deref())?;

        Ok(Self {
            sort_by,
            order,
            topic,
            pagination,
        })
    }
}
