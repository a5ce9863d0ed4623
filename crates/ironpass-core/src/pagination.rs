//! Page-based listing parameters.
//!
//! Admin listings accept `page`, `limit` and `search` query parameters and
//! answer with `total`, `totalPages` and `currentPage` next to the data.
//!
//! ```ignore
//! // GET /api/v1/admin/users?page=3&limit=20&search=ann
//! let query: ListQuery = ...;
//! assert_eq!(query.offset(), 40);
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Deserializes an optional string into an optional i64.
///
/// Query parameters may arrive as empty strings, which are treated as `None`.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Case-insensitive substring filter
    #[serde(default)]
    pub search: Option<String>,
}

impl ListQuery {
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(10).clamp(1, 100)
    }

    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// The trimmed search term, if any non-blank term was given.
    pub fn search(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn meta(&self, total: i64) -> PageMeta {
        let limit = self.limit();
        PageMeta {
            total,
            total_pages: (total + limit - 1) / limit,
            current_page: self.page(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: i64,
    pub total_pages: i64,
    pub current_page: i64,
}
