//! Reversed index used by the search bar: keyword -> restaurants.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::parse::{Restaurant, RestaurantDetails};

/// What a keyword matched. The ids are the rows of `cat_suggestions`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Restaurant,
    Food,
    Period,
}

impl Category {
    pub const ALL: [Self; 3] = [Self::Restaurant, Self::Food, Self::Period];

    pub const fn id(self) -> i32 {
        match self {
            Self::Restaurant => 1,
            Self::Food => 2,
            Self::Period => 3,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Restaurant => "RESTAURANT",
            Self::Food => "FOOD",
            Self::Period => "PERIOD",
        }
    }
}

impl TryFrom<i32> for Category {
    type Error = i32;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        Self::ALL.into_iter().find(|c| c.id() == id).ok_or(id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Association {
    pub id: i32,
    pub category: Category,
}

/// One `suggestions_restaurant` row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeywordRow {
    pub keyword: String,
    pub idrestaurant: i32,
    pub category: Category,
}

/// Keywords in the order they were first seen, each with every association
/// in the order it was found. Identical associations are kept.
#[derive(Debug, Default)]
pub struct KeywordIndex(IndexMap<String, Vec<Association>>);

impl KeywordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, keyword: impl Into<String>, id: i32, category: Category) {
        self.0
            .entry(keyword.into())
            .or_default()
            .push(Association { id, category });
    }

    pub fn get(&self, keyword: &str) -> Option<&[Association]> {
        self.0.get(keyword).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Flattens the index into `(keyword, restaurant, category)` rows.
    pub fn rows(&self) -> Vec<KeywordRow> {
        self.0
            .iter()
            .flat_map(|(keyword, associations)| {
                associations.iter().map(move |a| KeywordRow {
                    keyword: keyword.clone(),
                    idrestaurant: a.id,
                    category: a.category,
                })
            })
            .collect()
    }
}

/// Indexes restaurant names, meal titles and dishes.
///
/// Meal titles ("Déjeuner", "Dîner") are filed under `Category::Restaurant`:
/// they tell which restaurant serves at that time. `Category::Period` is
/// never produced here.
pub fn build_index(
    restaurants: &[Restaurant],
    details: &HashMap<i32, RestaurantDetails>,
) -> KeywordIndex {
    let mut index = KeywordIndex::new();
    for restaurant in restaurants {
        let id = restaurant.id();
        index.push(restaurant.name(), id, Category::Restaurant);

        let Some(details) = details.get(&id) else {
            continue;
        };
        for meal in &details.food_page.menus {
            index.push(meal.title.as_str(), id, Category::Restaurant);
            for food in meal.foods() {
                index.push(food, id, Category::Food);
            }
        }
    }
    index
}
