//! Where the sync writes its tables.

mod memory;
mod postgres;

use futures::future::join_all;

use crate::index::{Category, KeywordRow};
use crate::parse::{Meal, OpenHours, Restaurant, School};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// One `meal` row: a serving slot of one restaurant with its groups as JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealRow {
    pub typemeal: String,
    pub foodies: String,
    /// `YYYY-M-DD`, empty when the menu date could not be read.
    pub day: String,
    pub idrestaurant: i32,
}

impl MealRow {
    pub fn new(meal: &Meal, day: &str, idrestaurant: i32) -> serde_json::Result<Self> {
        Ok(Self {
            typemeal: meal.title.clone(),
            foodies: serde_json::to_string(&meal.foodies)?,
            day: day.to_string(),
            idrestaurant,
        })
    }
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Store {
    Postgres(PgStore),
    /// Nothing leaves the process.
    Memory(MemoryStore),
}

impl Store {
    #[inline]
    pub async fn postgres(database_url: &str) -> crate::Result<Self> {
        Ok(Self::Postgres(PgStore::connect(database_url).await?))
    }

    #[inline]
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::default())
    }

    pub async fn close(&self) {
        if let Self::Postgres(pg) = self {
            pg.close().await;
        }
    }

    /// Applies the bundled schema.
    pub async fn migrate(&self) -> crate::Result<()> {
        match self {
            Self::Postgres(pg) => pg.migrate().await?,
            Self::Memory(_) => {}
        }
        Ok(())
    }

    pub async fn clear_meals_and_keywords(&self) -> crate::Result<()> {
        match self {
            Self::Postgres(pg) => pg.clear_meals_and_keywords().await?,
            Self::Memory(mem) => mem.clear_meals_and_keywords().await,
        }
        Ok(())
    }

    pub async fn clear_restaurants(&self) -> crate::Result<()> {
        match self {
            Self::Postgres(pg) => pg.clear_restaurants().await?,
            Self::Memory(mem) => mem.clear_restaurants().await,
        }
        Ok(())
    }

    /// Inserts the missing categories, all at once. Every insert settles,
    /// one result per category in `Category::ALL` order.
    pub async fn seed_categories(&self) -> Vec<crate::Result<()>> {
        join_all(Category::ALL.map(|category| self.insert_category(category))).await
    }

    async fn insert_category(&self, category: Category) -> crate::Result<()> {
        match self {
            Self::Postgres(pg) => pg.insert_category(category).await?,
            Self::Memory(mem) => mem.insert_category(category).await?,
        }
        Ok(())
    }

    /// Returns the id given to the restaurant.
    pub async fn insert_restaurant(&self, restaurant: &Restaurant) -> crate::Result<i32> {
        Ok(match self {
            Self::Postgres(pg) => pg.insert_restaurant(restaurant).await?,
            Self::Memory(mem) => mem.insert_restaurant(restaurant).await,
        })
    }

    pub async fn update_hours(&self, id: i32, hours: &OpenHours) -> crate::Result<()> {
        match self {
            Self::Postgres(pg) => pg.update_hours(id, hours).await?,
            Self::Memory(mem) => mem.update_hours(id, hours).await,
        }
        Ok(())
    }

    /// The whole roster, in id order.
    pub async fn restaurants(&self) -> crate::Result<Vec<Restaurant>> {
        Ok(match self {
            Self::Postgres(pg) => pg.restaurants().await?,
            Self::Memory(mem) => mem.restaurants().await,
        })
    }

    pub async fn insert_meal(&self, meal: &MealRow) -> crate::Result<()> {
        match self {
            Self::Postgres(pg) => pg.insert_meal(meal).await?,
            Self::Memory(mem) => mem.insert_meal(meal).await?,
        }
        Ok(())
    }

    pub async fn insert_keyword(&self, row: &KeywordRow) -> crate::Result<()> {
        match self {
            Self::Postgres(pg) => pg.insert_keyword(row).await?,
            Self::Memory(mem) => mem.insert_keyword(row).await?,
        }
        Ok(())
    }

    pub async fn clear_schools(&self) -> crate::Result<()> {
        match self {
            Self::Postgres(pg) => pg.clear_schools().await?,
            Self::Memory(mem) => mem.clear_schools().await,
        }
        Ok(())
    }

    pub async fn insert_school(&self, school: &School) -> crate::Result<()> {
        match self {
            Self::Postgres(pg) => pg.insert_school(school).await?,
            Self::Memory(mem) => mem.insert_school(school).await,
        }
        Ok(())
    }
}
