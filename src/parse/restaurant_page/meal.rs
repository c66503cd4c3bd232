use scraper::ElementRef;

use crate::parse::{
    text_from_selection::{first_match, text_of},
    Error,
};
use crate::static_selector;

/// A labelled group of dishes, e.g. "Entrées" followed by its items.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Foody {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: Vec<String>,
}

impl Foody {
    // example html li element in ./html_examples/restaurant.html
    pub fn from_html_element(element: ElementRef<'_>) -> Self {
        static_selector!(FOOD_SELECTOR <- "ul li");
        let mut content = Vec::new();
        let mut items_len = 0;
        for food in element.select(&FOOD_SELECTOR) {
            content.push(food.inner_html());
            items_len += text_of(food).chars().count();
        }

        // the label is whatever text precedes the item list
        let full_text = text_of(element);
        let keep = full_text.chars().count().saturating_sub(items_len);
        let kind = full_text.chars().take(keep).collect();

        Self { kind, content }
    }
}

/// One serving slot of the day ("Déjeuner", "Dîner", ...).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Meal {
    pub title: String,
    pub foodies: Vec<Foody>,
}

impl Meal {
    pub fn from_html_element(element: ElementRef<'_>) -> Result<Self, Error> {
        static_selector!(TITLE_SELECTOR <- ".meal_title");
        static_selector!(FOODY_SELECTOR <- ".meal_foodies > li");

        let title = first_match(&TITLE_SELECTOR, element, ".meal_title")?.inner_html();
        let foodies = element
            .select(&FOODY_SELECTOR)
            .map(Foody::from_html_element)
            .collect();

        Ok(Self { title, foodies })
    }

    /// Every dish of the meal, group by group.
    pub fn foods(&self) -> impl Iterator<Item = &str> {
        self.foodies
            .iter()
            .flat_map(|foody| foody.content.iter().map(String::as_str))
    }
}
