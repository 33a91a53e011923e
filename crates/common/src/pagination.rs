//! Pagination utilities shared by the service and transport layers
//!
//! Provides a simple `Pagination` struct and helpers to normalize inputs.

/// Page used when the caller gives none or an unusable one.
pub const DEFAULT_PAGE: u32 = 1;
/// Items per page used when the caller gives none or an unusable value.
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest row offset handed to storage; SQL offsets are signed 64-bit.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub limit: u32,
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self { Self { page, limit } }

    /// Build from raw query string values. Missing, non-numeric or
    /// non-positive values fall back to the defaults; numbers past `u32::MAX`
    /// saturate.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        fn positive(raw: Option<&str>) -> Option<u32> {
            let v = raw?.trim();
            if !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()) {
                // all digits but too large for u64 still saturates
                let n = v.parse::<u64>().unwrap_or(u64::MAX);
                (n >= 1).then(|| u32::try_from(n).unwrap_or(u32::MAX))
            } else {
                None
            }
        }
        Self {
            page: positive(page).unwrap_or(DEFAULT_PAGE),
            limit: positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Return `(page_index, limit)` with a 0-based page index. Zeroes become 1.
    pub fn normalize(self) -> (u64, u64) {
        let page = self.page.max(1);
        let limit = self.limit.max(1);
        (u64::from(page - 1), u64::from(limit))
    }

    /// Row offset of the first item on this page: `(page - 1) * limit`,
    /// capped at [`MAX_OFFSET`].
    pub fn offset(self) -> u64 {
        let (idx, limit) = self.normalize();
        idx.saturating_mul(limit).min(MAX_OFFSET)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT } }
}
