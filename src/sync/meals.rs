use std::collections::HashMap;
use std::fmt::{self, Display};

use futures::future::join_all;

use super::Crawler;
use crate::index::build_index;
use crate::parse::{extract_restaurant_details, normalize_menu_date, Restaurant, RestaurantDetails};
use crate::store::MealRow;

/// What one meal refresh did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MealsReport {
    pub processed: usize,
    pub skipped: usize,
    pub meals_written: usize,
    pub meals_failed: usize,
    pub keywords_written: usize,
    pub keywords_failed: usize,
}

impl Display for MealsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} restaurants processed ({} skipped), {} meals ({} failed), {} keywords ({} failed)",
            self.processed,
            self.skipped,
            self.meals_written,
            self.meals_failed,
            self.keywords_written,
            self.keywords_failed
        )
    }
}

/// Counts the outcome of a group of writes, logging every failure.
fn tally<E: Display>(results: Vec<Result<(), E>>, what: &str) -> (usize, usize) {
    let mut written = 0;
    let mut failed = 0;
    for result in results {
        match result {
            Ok(()) => written += 1,
            Err(e) => {
                log::error!("could not write {what}: {e}");
                failed += 1;
            }
        }
    }
    (written, failed)
}

impl Crawler {
    /// Rebuilds the meal and keyword tables from the restaurant pages.
    ///
    /// A restaurant whose page cannot be read is skipped entirely: none of
    /// its meals nor its keywords are written.
    pub async fn refresh_meals(&self) -> crate::Result<MealsReport> {
        self.store.clear_meals_and_keywords().await?;
        let (seeded, _) = tally(self.store.seed_categories().await, "category");
        log::debug!("{seeded} categories in place");
        let roster = self.store.restaurants().await?;
        log::info!("refreshing meals of {} restaurants", roster.len());

        let mut report = MealsReport::default();
        let mut processed: Vec<Restaurant> = Vec::with_capacity(roster.len());
        let mut details: HashMap<i32, RestaurantDetails> = HashMap::new();
        for restaurant in roster {
            if !restaurant.is_scrapable() {
                log::warn!("{:?} has no page to visit, skipping", restaurant.name());
                report.skipped += 1;
                continue;
            }
            let url = restaurant.url();
            let scraped = self
                .scrape(url, |document| extract_restaurant_details(document, url))
                .await;
            match scraped {
                Ok(found) => {
                    details.insert(restaurant.id(), found);
                    processed.push(restaurant);
                }
                Err(crate::Error::Parse(e)) if !e.is_recoverable() => {
                    log::error!("page of {:?} changed shape, skipping: {e}", restaurant.name());
                    report.skipped += 1;
                }
                Err(e) => {
                    log::warn!("skipping {:?}: {e}", restaurant.name());
                    report.skipped += 1;
                }
            }
        }
        report.processed = processed.len();

        let mut rows = Vec::new();
        for restaurant in &processed {
            let Some(found) = details.get(&restaurant.id()) else {
                continue;
            };
            let day = normalize_menu_date(&found.food_page.time);
            if day.is_empty() {
                log::debug!("no date for {:?}: {:?}", restaurant.name(), found.food_page.time);
            }
            for meal in &found.food_page.menus {
                match MealRow::new(meal, &day, restaurant.id()) {
                    Ok(row) => rows.push(row),
                    Err(e) => {
                        log::error!("could not serialize {:?}: {e}", meal.title);
                        report.meals_failed += 1;
                    }
                }
            }
        }
        let results = join_all(rows.iter().map(|row| self.store.insert_meal(row))).await;
        let (written, failed) = tally(results, "meal");
        report.meals_written = written;
        report.meals_failed += failed;

        let index = build_index(&processed, &details);
        log::debug!("{} distinct keywords", index.len());
        let keywords = index.rows();
        let results = join_all(keywords.iter().map(|row| self.store.insert_keyword(row))).await;
        (report.keywords_written, report.keywords_failed) = tally(results, "keyword");

        log::info!("{report}");
        Ok(report)
    }
}
