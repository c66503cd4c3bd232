use scraper::Html;

use super::Restaurant;
use crate::parse::text_from_selection::text_from_selection;
use crate::static_selector;

/// Cities whose restaurants are kept from the listing.
pub const ALLOWED_CITIES: [&str; 2] = ["Montpellier", "Sète"];

/// Reads every restaurant link of the listing page and keeps the ones
/// located in `city_filter`. Links without a `href` are dropped.
pub fn extract_listing(document: &Html, city_filter: &[&str]) -> Vec<Restaurant> {
    static_selector!(RESTAURANT_SELECTOR <- ".vc_restaurants ul li a");
    static_selector!(CITY_SELECTOR <- ".restaurant_area");
    static_selector!(NAME_SELECTOR <- ".restaurant_title");

    let mut restaurants = Vec::new();
    for element in document.select(&RESTAURANT_SELECTOR) {
        let Some(city) = text_from_selection(&CITY_SELECTOR, element) else {
            log::debug!("listing entry without .restaurant_area");
            continue;
        };
        if !city_filter.contains(&city.trim()) {
            continue;
        }
        let Some(url) = element.attr("href") else {
            log::debug!("restaurant in {city} has no url");
            continue;
        };
        let name = text_from_selection(&NAME_SELECTOR, element).unwrap_or_default();
        restaurants.push(Restaurant::new(name, url));
    }
    restaurants
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_extract_listing() {
        let html = fs::read_to_string("./src/parse/html_examples/listing.html").unwrap();
        let document = Html::parse_document(&html);
        let restaurants = extract_listing(&document, &ALLOWED_CITIES);
        let names: Vec<&str> = restaurants.iter().map(Restaurant::name).collect();
        assert_eq!(
            names,
            ["Brasserie Triolet", "Resto U Richter", "Cafétéria Sète"]
        );
        assert_eq!(restaurants[0].url(), "/restaurant/brasserie-triolet/");
        assert!(restaurants.iter().all(|r| r.id() == 0));
        assert!(restaurants.iter().all(|r| r.coordinates().is_none()));
        assert!(restaurants.iter().all(|r| r.open_hours().is_none()));
    }

    #[test]
    fn test_extract_listing_filters_other_cities() {
        let html = r#"
            <section class="vc_restaurants"><ul>
                <li><a href="https://example.org/r/a/">
                    <div class="restaurant_title">Resto A</div>
                    <span class="restaurant_area">Montpellier</span>
                </a></li>
                <li><a href="https://example.org/r/b/">
                    <div class="restaurant_title">Resto B</div>
                    <span class="restaurant_area">Nîmes</span>
                </a></li>
            </ul></section>
        "#;
        let document = Html::parse_document(html);
        let restaurants = extract_listing(&document, &ALLOWED_CITIES);
        assert_eq!(restaurants.len(), 1);
        assert_eq!(restaurants[0].name(), "Resto A");
        assert_eq!(restaurants[0].url(), "https://example.org/r/a/");
    }

    #[test]
    fn test_extract_listing_empty_page() {
        let document = Html::parse_document("<html><body><p>maintenance</p></body></html>");
        assert!(extract_listing(&document, &ALLOWED_CITIES).is_empty());
    }
}
