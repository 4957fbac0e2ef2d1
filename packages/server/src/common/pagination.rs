//! Offset pagination for directory listings.

use serde::Deserialize;

/// Default page size of the back-office tables
pub const DEFAULT_PAGE_SIZE: i64 = 5;

/// Largest page a caller may request
pub const MAX_PAGE_SIZE: i64 = 100;

/// Raw `?limit=&offset=` query parameters
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageArgs {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Pagination arguments clamped to sane bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedPage {
    pub limit: i64,
    pub offset: i64,
}

impl PageArgs {
    pub fn validate(self) -> ValidatedPage {
        ValidatedPage {
            limit: self
                .limit
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE),
            offset: self.offset.unwrap_or(0).max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = PageArgs::default().validate();
        assert_eq!(page, ValidatedPage { limit: 5, offset: 0 });
    }

    #[test]
    fn test_clamps_out_of_range_values() {
        let page = PageArgs {
            limit: Some(10_000),
            offset: Some(-3),
        }
        .validate();
        assert_eq!(page, ValidatedPage { limit: 100, offset: 0 });

        let page = PageArgs {
            limit: Some(0),
            offset: Some(20),
        }
        .validate();
        assert_eq!(page, ValidatedPage { limit: 1, offset: 20 });
    }
}
