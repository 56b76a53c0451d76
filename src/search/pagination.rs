//! Page slicing over the filtered, sorted result list.

use serde::{Deserialize, Serialize};

/// A resolved page request: `page >= 1`, `1 <= limit <= max_limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Clamp raw request values. An absent or non-positive limit falls back to
    /// `default_limit`; an oversized one is capped at `max_limit`.
    #[must_use]
    pub fn resolve(page: Option<i64>, limit: Option<i64>, default_limit: u32, max_limit: u32) -> Self {
        let max_limit = max_limit.max(1);
        let page = page
            .map_or(1, |p| u32::try_from(p.max(1)).unwrap_or(u32::MAX));
        let limit = match limit {
            Some(l) if l >= 1 => u32::try_from(l).unwrap_or(u32::MAX),
            _ => default_limit,
        };
        Self {
            page,
            limit: limit.clamp(1, max_limit),
        }
    }

    fn offset(self) -> usize {
        let page_index = usize::try_from(self.page.saturating_sub(1)).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        page_index.saturating_mul(limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub total_pages: usize,
}

/// Slice `[(page-1)*limit, page*limit)` out of `items`.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> (Vec<T>, PageInfo) {
    let total = items.len();
    let limit = usize::try_from(request.limit).unwrap_or(usize::MAX).max(1);
    let page_items = items
        .into_iter()
        .skip(request.offset())
        .take(limit)
        .collect();
    let info = PageInfo {
        total,
        page: request.page,
        limit: request.limit,
        total_pages: total.div_ceil(limit),
    };
    (page_items, info)
}
