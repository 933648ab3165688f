//! Yelp business search and reviews.
//!
//! Search parameters are checked against fixed whitelists before any request
//! is made: categories from [`CATEGORIES`], the four [`SortBy`] orders, and
//! price tiers 1 to 4.

mod dto;
pub mod render;
pub mod simplify;

pub use render::{business_list_table, business_table, reviews_table, Format};
pub use simplify::{simplify_businesses, simplify_reviews, Business, Coordinates, Review};

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::api::{quote_plus, Transport};
use crate::auth::{Gateway, Provider};
use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.yelp.com/v3";
pub const DEFAULT_LOCATION: &str = "Evanston, IL";
pub const DEFAULT_LIMIT: u32 = 10;

/// Category aliases accepted by the search filter, sorted.
pub const CATEGORIES: [&str; 20] = [
    "african", "asianfusion", "brazilian", "chinese", "coffee", "dessert", "ethiopian",
    "filipino", "greek", "indpak", "italian", "japanese", "korean", "mexican", "mideastern",
    "pakistani", "pizza", "tapas", "thai", "vietnamese",
];

const PRICE_TIERS: [&str; 4] = ["1", "2", "3", "4"];

pub fn categories() -> Vec<String> {
    CATEGORIES.iter().map(|c| c.to_string()).collect()
}

/// Result ordering for a business search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    BestMatch,
    Rating,
    ReviewCount,
    Distance,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::BestMatch => "best_match",
            SortBy::Rating => "rating",
            SortBy::ReviewCount => "review_count",
            SortBy::Distance => "distance",
        }
    }
}

impl FromStr for SortBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "best_match" => Ok(SortBy::BestMatch),
            "rating" => Ok(SortBy::Rating),
            "review_count" => Ok(SortBy::ReviewCount),
            "distance" => Ok(SortBy::Distance),
            other => Err(Error::InvalidSortBy(other.to_string())),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business search criteria. Empty strings count as unset.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessQuery {
    pub location: String,
    /// Records to return, at most 50
    pub limit: u32,
    pub term: Option<String>,
    /// Comma separated aliases from [`CATEGORIES`]
    pub categories: Option<String>,
    /// One of `best_match`, `rating`, `review_count`, `distance`
    pub sort_by: Option<String>,
    /// `1` to `4` or a comma separated combination such as `1,2`
    pub price: Option<String>,
    pub open_now: bool,
}

impl Default for BusinessQuery {
    fn default() -> Self {
        Self {
            location: DEFAULT_LOCATION.to_string(),
            limit: DEFAULT_LIMIT,
            term: None,
            categories: None,
            sort_by: None,
            price: None,
            open_now: false,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Check every comma separated category against the whitelist.
pub fn validate_categories(categories: &str) -> Result<()> {
    for token in categories.split(',') {
        if !CATEGORIES.contains(&token) {
            return Err(Error::InvalidCategory {
                token: token.to_string(),
                categories: categories.to_string(),
            });
        }
    }
    Ok(())
}

/// Validate price tiers and return them sorted, e.g. `"3, 1"` becomes `"1,3"`.
pub fn normalize_price(price: &str) -> Result<String> {
    let mut tiers = Vec::new();
    for token in price.split(',') {
        let token = token.trim();
        if !PRICE_TIERS.contains(&token) {
            return Err(Error::InvalidPrice(price.to_string()));
        }
        tiers.push(token);
    }
    tiers.sort_unstable();
    Ok(tiers.join(","))
}

impl BusinessQuery {
    /// Build the `/businesses/search` URL, validating every filter.
    pub fn search_url(&self, base_url: &str) -> Result<String> {
        let mut url = format!(
            "{}/businesses/search?location={}&limit={}",
            base_url.trim_end_matches('/'),
            quote_plus(&self.location),
            self.limit
        );
        if let Some(term) = non_empty(&self.term) {
            url += &format!("&term={}", quote_plus(term));
        }
        if let Some(categories) = non_empty(&self.categories) {
            validate_categories(categories)?;
            url += &format!("&categories={categories}");
        }
        if let Some(sort_by) = non_empty(&self.sort_by) {
            let sort_by: SortBy = sort_by.parse()?;
            url += &format!("&sort_by={sort_by}");
        }
        if let Some(price) = non_empty(&self.price) {
            url += &format!("&price={}", normalize_price(price)?);
        }
        if self.open_now {
            url += "&open_now=true";
        }
        Ok(url)
    }
}

/// Yelp Fusion API client.
pub struct Yelp<'a, T> {
    gateway: &'a Gateway<T>,
    base_url: String,
}

impl<'a, T: Transport> Yelp<'a, T> {
    pub fn new(gateway: &'a Gateway<T>) -> Self {
        Self::with_base_url(gateway, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(gateway: &'a Gateway<T>, base_url: impl Into<String>) -> Self {
        Yelp {
            gateway,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn businesses_raw(&self, query: &BusinessQuery) -> Result<Value> {
        let url = query.search_url(&self.base_url)?;
        self.gateway.get(Provider::Yelp, &url)
    }

    pub fn businesses(&self, query: &BusinessQuery) -> Result<Vec<Business>> {
        let data = self.businesses_raw(query)?;
        simplify_businesses(&data["businesses"]).map_err(|e| e.with_response(&data))
    }

    pub fn reviews_raw(&self, business_id: &str) -> Result<Value> {
        let url = format!("{}/businesses/{}/reviews", self.base_url, business_id);
        self.gateway.get(Provider::Yelp, &url)
    }

    pub fn reviews(&self, business_id: &str) -> Result<Vec<Review>> {
        let data = self.reviews_raw(business_id)?;
        simplify_reviews(&data["reviews"]).map_err(|e| e.with_response(&data))
    }
}
