use serde::Serialize;

pub mod appointments;
pub mod catalog;
pub mod dashboard;
pub mod invoices;
pub mod manager;
pub mod models;
pub mod patients;
pub mod tasks;
pub mod users;

/// Uniform page envelope returned by every list query.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

/// OFFSET for a 1-indexed page.
pub(crate) fn offset(page: i64, limit: i64) -> i64 {
    (page - 1) * limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_zero_based_from_one_indexed_pages() {
        assert_eq!(offset(1, 10), 0);
        assert_eq!(offset(2, 10), 10);
        assert_eq!(offset(5, 25), 100);
    }
}
