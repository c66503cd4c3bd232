use std::sync::Arc;

use tokio::sync::Mutex;

use super::MealRow;
use crate::index::{Category, KeywordRow};
use crate::parse::{OpenHours, Restaurant, School};

#[derive(Debug, Default)]
struct Tables {
    last_id: i32,
    restaurants: Vec<Restaurant>,
    meals: Vec<MealRow>,
    categories: Vec<Category>,
    keywords: Vec<KeywordRow>,
    schools: Vec<School>,
    /// Meal titles, keywords and category names whose insert fails.
    rejected: Vec<String>,
}

impl Tables {
    fn check(&self, value: &str) -> Result<(), sqlx::Error> {
        if self.rejected.iter().any(|r| r == value) {
            return Err(sqlx::Error::Protocol(format!("row {value:?} rejected")));
        }
        Ok(())
    }
}

/// Keeps every table in process. Clones share the same tables, so a caller
/// can keep a handle to look at what a sync wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub async fn clear_meals_and_keywords(&self) {
        let mut tables = self.tables.lock().await;
        tables.meals.clear();
        tables.keywords.clear();
    }

    pub async fn clear_restaurants(&self) {
        let mut tables = self.tables.lock().await;
        tables.restaurants.clear();
        tables.meals.clear();
        tables.keywords.clear();
    }

    pub async fn insert_category(&self, category: Category) -> Result<(), sqlx::Error> {
        let mut tables = self.tables.lock().await;
        tables.check(category.name())?;
        if !tables.categories.contains(&category) {
            tables.categories.push(category);
        }
        Ok(())
    }

    pub async fn insert_restaurant(&self, restaurant: &Restaurant) -> i32 {
        let mut tables = self.tables.lock().await;
        tables.last_id += 1;
        let id = tables.last_id;
        tables.restaurants.push(restaurant.clone().with_id(id));
        id
    }

    /// Unknown ids are ignored, like an UPDATE matching no row.
    pub async fn update_hours(&self, id: i32, hours: &OpenHours) {
        let mut tables = self.tables.lock().await;
        if let Some(restaurant) = tables.restaurants.iter_mut().find(|r| r.id() == id) {
            restaurant.set_open_hours(hours.clone());
        }
    }

    pub async fn restaurants(&self) -> Vec<Restaurant> {
        self.tables.lock().await.restaurants.clone()
    }

    pub async fn insert_meal(&self, meal: &MealRow) -> Result<(), sqlx::Error> {
        let mut tables = self.tables.lock().await;
        tables.check(&meal.typemeal)?;
        tables.meals.push(meal.clone());
        Ok(())
    }

    pub async fn insert_keyword(&self, row: &KeywordRow) -> Result<(), sqlx::Error> {
        let mut tables = self.tables.lock().await;
        tables.check(&row.keyword)?;
        tables.keywords.push(row.clone());
        Ok(())
    }

    pub async fn clear_schools(&self) {
        self.tables.lock().await.schools.clear();
    }

    pub async fn insert_school(&self, school: &School) {
        self.tables.lock().await.schools.push(school.clone());
    }

    /// Row counts, for the end of a dry run.
    pub async fn summary(&self) -> String {
        let tables = self.tables.lock().await;
        format!(
            "{} restaurants, {} meals, {} keywords, {} categories, {} schools",
            tables.restaurants.len(),
            tables.meals.len(),
            tables.keywords.len(),
            tables.categories.len(),
            tables.schools.len()
        )
    }

    /// Makes every later insert of `value` fail.
    #[cfg(test)]
    pub async fn reject(&self, value: &str) {
        self.tables.lock().await.rejected.push(value.to_string());
    }

    #[cfg(test)]
    pub async fn meals(&self) -> Vec<MealRow> {
        self.tables.lock().await.meals.clone()
    }

    #[cfg(test)]
    pub async fn keywords(&self) -> Vec<KeywordRow> {
        self.tables.lock().await.keywords.clone()
    }

    #[cfg(test)]
    pub async fn categories(&self) -> Vec<Category> {
        self.tables.lock().await.categories.clone()
    }

    #[cfg(test)]
    pub async fn schools(&self) -> Vec<School> {
        self.tables.lock().await.schools.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_are_assigned_in_order() {
        let store = MemoryStore::default();
        let first = store
            .insert_restaurant(&Restaurant::new("Triolet", "https://example.org/triolet/"))
            .await;
        let second = store
            .insert_restaurant(&Restaurant::new("Richter", "https://example.org/richter/"))
            .await;
        assert_eq!((first, second), (1, 2));

        let ids: Vec<i32> = store.restaurants().await.iter().map(Restaurant::id).collect();
        assert_eq!(ids, [1, 2]);
    }

    #[tokio::test]
    async fn test_clearing_restaurants_cascades() {
        let store = MemoryStore::default();
        let id = store
            .insert_restaurant(&Restaurant::new("Triolet", "https://example.org/triolet/"))
            .await;
        store
            .insert_keyword(&KeywordRow {
                keyword: "Triolet".into(),
                idrestaurant: id,
                category: Category::Restaurant,
            })
            .await
            .unwrap();
        store.clear_restaurants().await;
        assert!(store.restaurants().await.is_empty());
        assert!(store.keywords().await.is_empty());
    }

    #[tokio::test]
    async fn test_update_hours() {
        let store = MemoryStore::default();
        let id = store
            .insert_restaurant(&Restaurant::new("Triolet", "https://example.org/triolet/"))
            .await;
        store
            .update_hours(id, &OpenHours::new("11:30", "14:00"))
            .await;
        store.update_hours(42, &OpenHours::new("00:00", "00:00")).await;

        let restaurants = store.restaurants().await;
        assert_eq!(
            restaurants[0].open_hours(),
            Some(&OpenHours::new("11:30", "14:00"))
        );
    }

    #[tokio::test]
    async fn test_categories_are_seeded_once() {
        let store = MemoryStore::default();
        for _ in 0..2 {
            for category in Category::ALL {
                store.insert_category(category).await.unwrap();
            }
        }
        assert_eq!(store.categories().await, Category::ALL);
        assert_eq!(
            store.summary().await,
            "0 restaurants, 0 meals, 0 keywords, 3 categories, 0 schools"
        );
    }

    #[tokio::test]
    async fn test_rejected_rows_are_not_written() {
        let store = MemoryStore::default();
        store.reject("Frites").await;
        let row = |keyword: &str| KeywordRow {
            keyword: keyword.into(),
            idrestaurant: 1,
            category: Category::Food,
        };
        assert!(store.insert_keyword(&row("Frites")).await.is_err());
        store.insert_keyword(&row("Soupe")).await.unwrap();
        assert_eq!(store.keywords().await, [row("Soupe")]);

        store.reject("PERIOD").await;
        assert!(store.insert_category(Category::Period).await.is_err());
        assert!(store.categories().await.is_empty());
    }
}
