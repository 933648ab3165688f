//! Reduce Yelp businesses and reviews to their display fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::dto;
use crate::error::Result;
use crate::providers::simplify_list;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: String,
    pub name: String,
    pub rating: f64,
    pub image_url: String,
    pub display_address: String,
    pub coordinates: Coordinates,
    pub review_count: u64,
    pub share_url: String,
    /// Comma separated category aliases
    pub categories: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub rating: f64,
    pub text: String,
    /// Date part only, `YYYY-MM-DD`
    pub time_created: String,
    pub url: String,
}

pub fn simplify_businesses(businesses: &Value) -> Result<Vec<Business>> {
    simplify_list("business", businesses, to_business)
}

pub fn simplify_reviews(reviews: &Value) -> Result<Vec<Review>> {
    simplify_list("review", reviews, to_review)
}

fn to_business(item: dto::Business) -> Business {
    let share_url = item.url.split('?').next().unwrap_or_default().to_string();
    let categories: Vec<&str> = item.categories.iter().map(|c| c.alias.as_str()).collect();
    Business {
        display_address: item.location.display_address.join("., "),
        categories: categories.join(", "),
        share_url,
        id: item.id,
        name: item.name,
        rating: item.rating,
        image_url: item.image_url,
        coordinates: item.coordinates,
        review_count: item.review_count,
        price: item.price,
    }
}

fn to_review(item: dto::Review) -> Review {
    Review {
        text: item.text.replace('\n', " "),
        time_created: item
            .time_created
            .split(' ')
            .next()
            .unwrap_or_default()
            .to_string(),
        id: item.id,
        rating: item.rating,
        url: item.url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    fn raw_business(price: Option<&str>) -> Value {
        let mut b = json!({
            "id": "0b6AU869xq6KXdK3NtVJnw",
            "alias": "kabul-house-skokie",
            "name": "Kabul House",
            "rating": 4.5,
            "image_url": "https://s3-media.fl.yelpcdn.com/o.jpg",
            "location": {
                "address1": "3320 Dempster St",
                "display_address": ["3320 Dempster St", "Skokie, IL 60076"]
            },
            "coordinates": {"latitude": 42.04, "longitude": -87.72},
            "review_count": 641,
            "url": "https://www.yelp.com/biz/kabul-house-skokie?adjust_creative=abc&utm_source=x",
            "categories": [{"alias": "afghani", "title": "Afghan"}, {"alias": "halal", "title": "Halal"}],
            "is_closed": false
        });
        if let Some(p) = price {
            b["price"] = json!(p);
        }
        b
    }

    #[test]
    fn test_simplify_business() {
        let list = simplify_businesses(&json!([raw_business(Some("$$"))])).unwrap();
        let b = &list[0];
        assert_eq!(b.display_address, "3320 Dempster St., Skokie, IL 60076");
        assert_eq!(b.share_url, "https://www.yelp.com/biz/kabul-house-skokie");
        assert_eq!(b.categories, "afghani, halal");
        assert_eq!(b.price.as_deref(), Some("$$"));
        assert_eq!(b.coordinates.latitude, Some(42.04));
    }

    #[test]
    fn test_simplify_business_key_set() {
        let list = simplify_businesses(&json!([raw_business(None)])).unwrap();
        let value = serde_json::to_value(&list[0]).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            [
                "categories",
                "coordinates",
                "display_address",
                "id",
                "image_url",
                "name",
                "rating",
                "review_count",
                "share_url"
            ]
        );
    }

    #[test]
    fn test_simplify_business_missing_location() {
        let mut raw = raw_business(None);
        raw.as_object_mut().unwrap().remove("location");
        let err = simplify_businesses(&json!([raw])).unwrap_err();
        assert!(matches!(err, Error::Simplify { kind: "business", .. }));
    }

    #[test]
    fn test_simplify_reviews() {
        let raw = json!([{
            "id": "r1",
            "url": "https://www.yelp.com/biz/x?hrid=r1",
            "text": "Great food.\nFriendly staff.",
            "rating": 5,
            "time_created": "2023-02-14 18:19:05",
            "user": {"name": "Pat"}
        }]);
        let reviews = simplify_reviews(&raw).unwrap();
        assert_eq!(reviews[0].text, "Great food. Friendly staff.");
        assert_eq!(reviews[0].time_created, "2023-02-14");
        assert_eq!(reviews[0].rating, 5.0);

        let value = serde_json::to_value(&reviews[0]).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 5);
    }
}
