use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

use super::MealRow;
use crate::index::{Category, KeywordRow};
use crate::parse::{Coordinates, OpenHours, Restaurant, School};

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT_SECS: u64 = 10;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

#[derive(sqlx::FromRow)]
struct RestaurantRow {
    idrestaurant: i32,
    url: String,
    name: String,
    lat: Option<f64>,
    lon: Option<f64>,
    hours: Option<String>,
}

impl From<RestaurantRow> for Restaurant {
    fn from(row: RestaurantRow) -> Self {
        let coordinates = row
            .lat
            .zip(row.lon)
            .and_then(|(x, y)| Coordinates::new(x, y).ok());
        let open_hours = row.hours.and_then(|hours| match hours.parse::<OpenHours>() {
            Ok(h) => Some(h),
            Err(e) => {
                log::warn!("restaurant {} has unreadable hours: {e}", row.idrestaurant);
                None
            }
        });
        Restaurant::new(row.name, row.url)
            .with_id(row.idrestaurant)
            .with_coordinates(coordinates)
            .with_open_hours(open_hours)
    }
}

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        MIGRATOR.run(&self.pool).await
    }

    pub async fn clear_meals_and_keywords(&self) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM suggestions_restaurant")
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM meal").execute(&self.pool).await?;
        Ok(())
    }

    /// Meals and keywords go with their restaurant through the cascade.
    pub async fn clear_restaurants(&self) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM restaurant")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn insert_category(&self, category: Category) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO cat_suggestions (idcat, namecat) VALUES ($1, $2) \
             ON CONFLICT (idcat) DO NOTHING",
        )
        .bind(category.id())
        .bind(category.name())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn insert_restaurant(&self, restaurant: &Restaurant) -> Result<i32, sqlx::Error> {
        let hours = restaurant.open_hours().map(ToString::to_string);
        match restaurant.coordinates() {
            Some(coordinates) => {
                sqlx::query_scalar(
                    "INSERT INTO restaurant (url, name, gpscoord, hours) \
                     VALUES ($1, $2, point($3, $4), $5) RETURNING idrestaurant",
                )
                .bind(restaurant.url())
                .bind(restaurant.name())
                .bind(coordinates.x())
                .bind(coordinates.y())
                .bind(hours)
                .fetch_one(&self.pool)
                .await
            }
            None => {
                sqlx::query_scalar(
                    "INSERT INTO restaurant (url, name, hours) VALUES ($1, $2, $3) \
                     RETURNING idrestaurant",
                )
                .bind(restaurant.url())
                .bind(restaurant.name())
                .bind(hours)
                .fetch_one(&self.pool)
                .await
            }
        }
    }

    pub async fn update_hours(&self, id: i32, hours: &OpenHours) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE restaurant SET hours = $1 WHERE idrestaurant = $2")
            .bind(hours.to_string())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn restaurants(&self) -> Result<Vec<Restaurant>, sqlx::Error> {
        let rows: Vec<RestaurantRow> = sqlx::query_as(
            "SELECT idrestaurant, url, name, gpscoord[0] AS lat, gpscoord[1] AS lon, hours \
             FROM restaurant ORDER BY idrestaurant",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Restaurant::from).collect())
    }

    pub async fn insert_meal(&self, meal: &MealRow) -> Result<(), sqlx::Error> {
        // an unreadable menu date is stored as NULL
        sqlx::query(
            "INSERT INTO meal (typemeal, foodies, day, idrestaurant) \
             VALUES ($1, $2, NULLIF($3, '')::date, $4)",
        )
        .bind(&meal.typemeal)
        .bind(&meal.foodies)
        .bind(&meal.day)
        .bind(meal.idrestaurant)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn insert_keyword(&self, row: &KeywordRow) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO suggestions_restaurant (keyword, idrestaurant, idcat) VALUES ($1, $2, $3)",
        )
        .bind(&row.keyword)
        .bind(row.idrestaurant)
        .bind(row.category.id())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn clear_schools(&self) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM school").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn insert_school(&self, school: &School) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO school (name, long_name, coords) VALUES ($1, $2, point($3, $4))",
        )
        .bind(&school.name)
        .bind(&school.long_name)
        .bind(school.coordinates.x())
        .bind(school.coordinates.y())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
