pub mod designers;
pub mod dress_rentals;
pub mod dress_reviews;
pub mod dress_sizes;
pub mod dress_styles;
pub mod dresses;
pub mod groups;
pub mod profiles;
pub mod sizes;
pub mod styles;
pub mod user_groups;
pub mod users;

use serde::{Deserialize, Serialize};

/// `?page=` as sent by list pages. Kept as a raw string so junk input falls
/// back to the first page instead of failing the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// Resolve the requested page against the number of pages available.
    ///
    /// Missing or non-numeric input gives page 1; anything outside
    /// `1..=num_pages` gives the last page.
    pub fn resolve(&self, num_pages: u64) -> u64 {
        let num_pages = num_pages.max(1);
        match self.page.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some(raw) => match raw.parse::<i64>() {
                Ok(n) if n >= 1 && (n as u64) <= num_pages => n as u64,
                Ok(_) => num_pages,
                Err(_) => 1,
            },
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub num_pages: u64,
    pub total: u64,
    pub per_page: u64,
}

/// Number of pages for `total` items; an empty listing still has one page.
pub fn page_count(total: u64, per_page: u64) -> u64 {
    total.div_ceil(per_page.max(1)).max(1)
}
