use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_size() -> u32 {
    50
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            size: default_size(),
        }
    }
}

impl PaginationParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err("page must be >= 1".to_string());
        }
        if self.size < 1 || self.size > 100 {
            return Err("size must be between 1 and 100".to_string());
        }
        Ok(())
    }

    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.size as usize
    }

    pub fn limit(&self) -> usize {
        self.size as usize
    }
}

/// Page envelope wrapping a list result. Pure post-processing over the
/// already-filtered list; carries no domain logic.
#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: u32,
    pub size: u32,
}

impl<T> Page<T> {
    pub fn paginate(items: Vec<T>, params: &PaginationParams) -> Self {
        let total = items.len() as i64;
        let items = items
            .into_iter()
            .skip(params.offset())
            .take(params.limit())
            .collect();

        Self {
            items,
            total,
            page: params.page,
            size: params.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_fifty() {
        let params = PaginationParams::default();
        assert_eq!(params.page, 1);
        assert_eq!(params.size, 50);
        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), 50);
    }

    #[test]
    fn rejects_out_of_range_params() {
        assert!(PaginationParams { page: 0, size: 10 }.validate().is_err());
        assert!(PaginationParams { page: 1, size: 0 }.validate().is_err());
        assert!(PaginationParams { page: 1, size: 101 }.validate().is_err());
        assert!(PaginationParams { page: 3, size: 100 }.validate().is_ok());
    }

    #[test]
    fn paginate_slices_and_reports_full_total() {
        let items: Vec<i32> = (1..=7).collect();
        let params = PaginationParams { page: 2, size: 3 };

        let page = Page::paginate(items, &params);

        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.total, 7);
        assert_eq!(page.page, 2);
        assert_eq!(page.size, 3);
    }

    #[test]
    fn offset_does_not_overflow_on_huge_page_numbers() {
        let params = PaginationParams {
            page: u32::MAX,
            size: 100,
        };
        assert!(params.validate().is_ok());
        assert_eq!(params.offset(), (u32::MAX as usize - 1) * 100);

        let page = Page::paginate((1..=5).collect::<Vec<i32>>(), &params);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
    }

    #[test]
    fn paginate_past_the_end_is_empty_not_an_error() {
        let items: Vec<i32> = (1..=3).collect();
        let params = PaginationParams { page: 5, size: 10 };

        let page = Page::paginate(items, &params);

        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
    }
}
