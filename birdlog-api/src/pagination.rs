//! Page arithmetic for the community checklist listing

/// Rows per page
pub const PAGE_SIZE: i64 = 100;

/// Sanitized page position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: i64,
    pub total_pages: i64,
    /// Offset for `LIMIT`/`OFFSET`
    pub offset: i64,
}

/// Clamp `requested_page` into `[1, total_pages]` and compute its offset.
///
/// An empty result set still reports page 1 with zero pages.
///
/// ```
/// use birdlog_api::pagination::calculate_pagination;
///
/// let p = calculate_pagination(250, 99);
/// assert_eq!(p.page, 3);
/// assert_eq!(p.offset, 200);
/// ```
pub fn calculate_pagination(total_rows: i64, requested_page: i64) -> Pagination {
    let total_pages = (total_rows + PAGE_SIZE - 1) / PAGE_SIZE;
    let page = requested_page.clamp(1, total_pages.max(1));

    Pagination {
        page,
        total_pages,
        offset: (page - 1) * PAGE_SIZE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page() {
        assert_eq!(
            calculate_pagination(250, 2),
            Pagination { page: 2, total_pages: 3, offset: 100 }
        );
    }

    #[test]
    fn test_clamps_low_and_high() {
        assert_eq!(calculate_pagination(150, 0).page, 1);
        assert_eq!(calculate_pagination(150, -4).offset, 0);
        assert_eq!(calculate_pagination(150, 99).page, 2);
    }

    #[test]
    fn test_exact_boundary() {
        let p = calculate_pagination(200, 3);
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.page, 2);
        assert_eq!(p.offset, 100);
    }

    #[test]
    fn test_empty() {
        assert_eq!(
            calculate_pagination(0, 1),
            Pagination { page: 1, total_pages: 0, offset: 0 }
        );
    }
}
