//! Yelp Fusion response shapes, limited to the fields we read.

use serde::Deserialize;

use super::simplify::Coordinates;

#[derive(Debug, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: String,
    pub rating: f64,
    #[serde(default)]
    pub image_url: String,
    pub location: Location,
    pub coordinates: Coordinates,
    pub review_count: u64,
    pub url: String,
    pub categories: Vec<Category>,
    pub price: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Location {
    pub display_address: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Category {
    pub alias: String,
}

#[derive(Debug, Deserialize)]
pub struct Review {
    pub id: String,
    pub rating: f64,
    pub text: String,
    pub time_created: String,
    pub url: String,
}
