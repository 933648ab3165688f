//! Text and HTML views of businesses and their reviews.

use super::simplify::{Business, Review};
use crate::render::{image_html, link_html, rule, wrap, CELL_CSS, TABLE_CSS};

const LINE_WIDTH: usize = 85;
const FIRST_CELL_CSS: &str =
    r#"style="min-width:100px;padding:3px;border-bottom:solid 1px #CCC;border-right:solid 1px #CCC;""#;

/// Output flavour for [`business_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Html,
}

fn rating(value: f64) -> String {
    format!("{value:.1}")
}

/// One line per business: name, address, rating and review count.
pub fn business_list_table(businesses: &[Business]) -> String {
    let mut text = rule(LINE_WIDTH);
    text += &format!(
        "{:2} | {:22.22} | {:<30.30} | {:<6} | {:<10}\n",
        "", "Name", "Address", "Rating", "# Reviews"
    );
    text += &rule(LINE_WIDTH);
    for (i, business) in businesses.iter().enumerate() {
        text += &format!(
            "{:2} | {:22.22} | {:<30.30} | {:<6} | {:<10}\n",
            i + 1,
            business.name,
            business.display_address,
            rating(business.rating),
            business.review_count
        );
    }
    text += &rule(LINE_WIDTH);
    text
}

fn business_fields(business: &Business) -> [(&'static str, String); 6] {
    [
        ("Rating", rating(business.rating)),
        ("Price", business.price.clone().unwrap_or_default()),
        ("Review Count", business.review_count.to_string()),
        ("Address", business.display_address.clone()),
        ("Categories", business.categories.clone()),
        ("Learn More", business.share_url.clone()),
    ]
}

fn business_text(business: &Business) -> String {
    let mut content = rule(LINE_WIDTH);
    content += &business.name.to_uppercase();
    content.push('\n');
    content += &rule(LINE_WIDTH);
    for (key, value) in business_fields(business) {
        content += &format!("{:15} | {}\n", format!("{key}:"), value);
    }
    content += &rule(LINE_WIDTH);
    content
}

fn reviews_text(reviews: &[Review]) -> String {
    let mut content = String::from("REVIEWS:\n");
    content += &rule(LINE_WIDTH);
    for review in reviews {
        content += &format!("{:10} {}\n", "Date:", review.time_created);
        content += &format!("{:10} {}\n", "Rating:", rating(review.rating));
        content += &wrap(&review.text, LINE_WIDTH);
        content.push('\n');
        content += &rule(LINE_WIDTH);
    }
    content
}

fn business_html(business: &Business) -> String {
    let mut fields = vec![("Name", business.name.clone())];
    fields.extend(business_fields(business).into_iter().filter(|(k, _)| *k != "Learn More"));
    fields.push(("More Info", link_html(&business.share_url)));
    fields.push(("Image", image_html(&business.image_url, "300px")));

    let rows: String = fields
        .iter()
        .map(|(key, value)| {
            format!(
                r#"
            <tr>
                <th {css}>{key}:</th>
                <td {css}>{value}</td>
            </tr>"#,
                css = CELL_CSS
            )
        })
        .collect();
    format!(
        r#"
        <table {css}>{rows}
        </table>"#,
        css = TABLE_CSS
    )
}

fn reviews_html(reviews: &[Review]) -> String {
    let rows: String = reviews
        .iter()
        .map(|review| {
            format!(
                r#"
        <tr>
            <td {first}>{date}</td>
            <td {css}>{rating}</td>
            <td {css}>{text}</td>
        </tr>"#,
                first = FIRST_CELL_CSS,
                css = CELL_CSS,
                date = review.time_created,
                rating = rating(review.rating),
                text = review.text,
            )
        })
        .collect();
    format!(
        r#"<table {table_css}>
        <tr>
            <th {css}>Date</th>
            <th {css}>Rating</th>
            <th {css}>Comments</th>
        </tr>{rows}
    </table>"#,
        table_css = TABLE_CSS,
        css = CELL_CSS,
    )
}

/// Reviews on their own.
pub fn reviews_table(reviews: &[Review], format: Format) -> String {
    match format {
        Format::Html => reviews_html(reviews),
        Format::Text => reviews_text(reviews),
    }
}

/// A business followed by its reviews, for the terminal or an email body.
/// The reviews section is left out when `reviews` is empty.
pub fn business_table(business: &Business, reviews: &[Review], format: Format) -> String {
    match format {
        Format::Html => {
            let mut html = business_html(business);
            if !reviews.is_empty() {
                html += &reviews_html(reviews);
            }
            html
        }
        Format::Text => {
            let mut text = business_text(business);
            if !reviews.is_empty() {
                text += &reviews_text(reviews);
            }
            text
        }
    }
}
