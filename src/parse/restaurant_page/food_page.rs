use scraper::Html;

use super::{coordinates::extract_coordinates, meal::Meal, Coordinates};
use crate::parse::{
    text_from_selection::{first_match, text_of},
    Error,
};
use crate::static_selector;

const DAYS: [&str; 7] = [
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];

/// The menu of one restaurant for the day shown on its page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodPage {
    pub name: String,
    pub url: String,
    /// Date title with the weekday stripped, e.g. "12 mars 2025".
    pub time: String,
    pub menus: Vec<Meal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantDetails {
    pub coordinates: Option<Coordinates>,
    pub food_page: FoodPage,
}

/// Whatever follows the weekday name in the menu date title. When several
/// weekday names appear the last one of the week wins.
fn strip_weekday(date_title: &str) -> String {
    let mut time = String::new();
    for day in DAYS {
        if let Some(position) = date_title.find(day) {
            let mut rest = date_title[position + day.len()..].chars();
            rest.next(); // separator
            time = rest.as_str().to_string();
        }
    }
    time
}

/// Reads the full menu page of a restaurant. Any missing anchor (menu,
/// date title, map, heading, meal title) fails the whole page.
pub fn extract_restaurant_details(document: &Html, url: &str) -> Result<RestaurantDetails, Error> {
    static_selector!(MENU_SELECTOR <- ".menu");
    static_selector!(DATE_SELECTOR <- ".menu_date_title");
    static_selector!(MEAL_SELECTOR <- ".meal");
    static_selector!(HEADING_SELECTOR <- "h1");

    let root = document.root_element();
    let menu = first_match(&MENU_SELECTOR, root, ".menu")?;
    let date_title = first_match(&DATE_SELECTOR, menu, ".menu_date_title")?.inner_html();
    let coordinates = extract_coordinates(document)?;

    let name = first_match(&HEADING_SELECTOR, root, "h1").map(text_of)?;
    if name.is_empty() {
        return Err(Error::missing("h1 text"));
    }

    let menus = menu
        .select(&MEAL_SELECTOR)
        .map(Meal::from_html_element)
        .collect::<Result<_, Error>>()?;

    Ok(RestaurantDetails {
        coordinates: Some(coordinates),
        food_page: FoodPage {
            name,
            url: url.to_string(),
            time: strip_weekday(&date_title),
            menus,
        },
    })
}
