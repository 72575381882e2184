use crate::domain::entities::search::ColumnSearchItem;

pub const DEFAULT_PER_PAGE: u32 = 20;

/// Pagination shown by a list page. `current` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub current: u32,
    pub limit: u32,
    pub total: u64,
}

impl PaginationConfig {
    pub fn first(limit: u32) -> Self {
        Self {
            current: 1,
            limit: limit.max(1),
            total: 0,
        }
    }

    pub fn last_page(&self) -> u32 {
        let limit = u64::from(self.limit.max(1));
        self.total.div_ceil(limit).max(1) as u32
    }

    /// 1-based row number of the `index`-th row on the current page.
    pub fn row_number(&self, index: usize) -> u64 {
        u64::from(self.current.saturating_sub(1)) * u64::from(self.limit) + index as u64 + 1
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::first(DEFAULT_PER_PAGE)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
    pub searches: Vec<ColumnSearchItem>,
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.limit)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub collection: Vec<T>,
    pub total: u64,
    pub current_page: u32,
    pub last_page: u32,
}

impl<T> Page<T> {
    pub fn new(collection: Vec<T>, total: u64, current_page: u32, limit: u32) -> Self {
        let limit = u64::from(limit.max(1));
        Self {
            collection,
            total,
            current_page,
            last_page: total.div_ceil(limit).max(1) as u32,
        }
    }
}

/// Which table interaction routed through the change handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    Paginate,
    Sort,
    Filter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableChange {
    pub current: u32,
    pub page_size: u32,
    pub action: TableAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_rounds_up_and_never_drops_below_one() {
        let pagination = PaginationConfig {
            current: 1,
            limit: 20,
            total: 41,
        };
        assert_eq!(pagination.last_page(), 3);
        assert_eq!(PaginationConfig::first(20).last_page(), 1);
    }

    #[test]
    fn row_number_accounts_for_previous_pages() {
        let pagination = PaginationConfig {
            current: 3,
            limit: 10,
            total: 100,
        };
        assert_eq!(pagination.row_number(0), 21);
        assert_eq!(pagination.row_number(4), 25);
    }

    #[test]
    fn page_request_offset_is_zero_for_first_page() {
        let request = PageRequest {
            page: 1,
            limit: 20,
            searches: Vec::new(),
        };
        assert_eq!(request.offset(), 0);
        let request = PageRequest { page: 4, ..request };
        assert_eq!(request.offset(), 60);
    }
}
