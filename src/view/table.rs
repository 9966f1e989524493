use std::cmp::Ordering;

pub const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Default for Order {
    fn default() -> Self {
        Order::Asc
    }
}

impl Order {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Order::Asc => ordering,
            Order::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Cut one page out of `items`. Page 0 reads as page 1, anything past the end as the last page.
pub fn paginate<T>(items: Vec<T>, page: usize, size: usize) -> Page<T> {
    let size = size.max(1);
    let total_items = items.len();
    let total_pages = ((total_items + size - 1) / size).max(1);
    let number = page.max(1).min(total_pages);
    let items = items.into_iter()
        .skip((number - 1) * size)
        .take(size)
        .collect();
    Page { items, number, total_pages, total_items }
}

/// Case-insensitive text ordering, close to what a browser `localeCompare` gives for plain names
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

pub fn compare_amount(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Case-insensitive substring test; an empty needle matches everything
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
