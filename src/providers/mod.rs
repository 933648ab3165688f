//! One module per third-party API.
//!
//! Each provider builds its request URLs, sends them through the shared
//! [`Gateway`](crate::auth::Gateway) and reduces the JSON it gets back to a
//! few display fields. Every listing call has a `_raw` twin returning the
//! unmodified response.

pub mod sendgrid;
pub mod spotify;
pub mod yelp;
pub mod youtube;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, Result};

/// Deserialize every entry of a JSON array as `D` and adapt it.
///
/// An empty array gives an empty list. Anything that is not an array, or an
/// entry missing a required key, fails with [`Error::Simplify`] echoing the
/// whole of `items`. Null entries are skipped.
pub(crate) fn simplify_list<D, T>(
    kind: &'static str,
    items: &Value,
    adapt: impl Fn(D) -> T,
) -> Result<Vec<T>>
where
    D: DeserializeOwned,
{
    let list = items.as_array().ok_or_else(|| Error::simplify(kind, items))?;
    list.iter()
        .filter(|item| {
            if item.is_null() {
                warn!("skipping null {kind} entry");
            }
            !item.is_null()
        })
        .map(|item| {
            serde_json::from_value::<D>(item.clone())
                .map(&adapt)
                .map_err(|_| Error::simplify(kind, items))
        })
        .collect()
}

/// Read `data[field]` as a list of strings.
pub(crate) fn string_list(data: &Value, url: &str, field: &'static str) -> Result<Vec<String>> {
    let list = data
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::MissingField {
            url: url.to_string(),
            field,
        })?;
    Ok(list
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect())
}
