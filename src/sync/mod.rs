//! End to end refresh of the restaurant, meal, keyword and school tables.

mod meals;
mod roster;
mod schools;

use scraper::Html;
use tracing::instrument;
use url::Url;

use crate::config::Config;
use crate::fetch::Fetcher;
use crate::store::Store;

pub use meals::MealsReport;

pub struct Crawler {
    store: Store,
    fetcher: Fetcher,
    listing_url: String,
    schools_url: String,
}

impl Crawler {
    pub fn new(config: &Config, store: Store) -> crate::Result<Self> {
        Ok(Self {
            store,
            fetcher: Fetcher::new(config.rate_limit)?,
            listing_url: config.listing_url.clone(),
            schools_url: config.schools_url.clone(),
        })
    }

    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Fetches `url` and hands the parsed page to `extract`. The document
    /// never outlives the call.
    async fn scrape<T, E>(
        &self,
        url: &str,
        extract: impl FnOnce(&Html) -> Result<T, E>,
    ) -> crate::Result<T>
    where
        crate::Error: From<E>,
    {
        let body = self.fetcher.page(url).await?;
        Ok(extract(&Html::parse_document(&body))?)
    }

    /// Listing links may be relative to the listing page.
    fn absolute_url(&self, href: &str) -> crate::Result<String> {
        let base = Url::parse(&self.listing_url)
            .map_err(|e| crate::Error::Config(format!("{}: {e}", self.listing_url)))?;
        base.join(href)
            .map(String::from)
            .map_err(|e| crate::parse::Error::malformed(&format!("link {href:?}: {e}")).into())
    }

    /// Creates the tables.
    pub async fn up(&self) -> crate::Result<()> {
        self.store.migrate().await?;
        log::info!("schema is up to date");
        Ok(())
    }

    /// Schema, roster then meals.
    pub async fn bootstrap(&self) -> crate::Result<MealsReport> {
        self.up().await?;
        self.refresh_roster().await?;
        self.refresh_meals().await
    }

    /// Checks that `url`, or the listing page when none is given, answers.
    #[instrument(skip(self))]
    pub async fn ping(&self, url: Option<&str>) -> crate::Result<()> {
        let url = url.unwrap_or(&self.listing_url);
        match self.fetcher.page(url).await {
            Ok(_) => {
                log::info!("{url} is reachable");
                Ok(())
            }
            Err(e) => {
                log::error!("{url} is unreachable: {e}");
                Err(e.into())
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{crawler, fixture, serve};
    use super::*;
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_absolute_url() {
        let server = MockServer::start().await;
        let (crawler, _) = crawler(&server);
        assert_eq!(
            crawler.absolute_url("/restaurant/brasserie-triolet/").unwrap(),
            format!("{}/restaurant/brasserie-triolet/", server.uri())
        );
        assert_eq!(
            crawler
                .absolute_url("https://www.crous-montpellier.fr/restaurant/resto-u-triolet/")
                .unwrap(),
            "https://www.crous-montpellier.fr/restaurant/resto-u-triolet/"
        );
    }

    #[tokio::test]
    async fn test_ping() {
        let server = MockServer::start().await;
        serve(&server, "/ou-manger/", 200, fixture("listing.html")).await;
        let (crawler, _) = crawler(&server);

        crawler.ping(None).await.unwrap();
        let missing = format!("{}/nowhere", server.uri());
        assert!(matches!(
            crawler.ping(Some(&missing)).await,
            Err(crate::Error::Request(_))
        ));
    }

    #[tokio::test]
    async fn test_bootstrap_fills_every_table() {
        let server = MockServer::start().await;
        serve(&server, "/ou-manger/", 200, fixture("listing.html")).await;
        for slug in ["brasserie-triolet", "resto-u-richter", "cafeteria-sete"] {
            serve(
                &server,
                &format!("/restaurant/{slug}/"),
                200,
                fixture("restaurant.html"),
            )
            .await;
        }
        let (crawler, memory) = crawler(&server);

        let report = crawler.bootstrap().await.unwrap();
        assert_eq!(memory.restaurants().await.len(), 3);
        assert_eq!(report.processed, 3);
        assert_eq!(report.skipped, 0);
        assert_eq!(memory.meals().await.len(), 6);
        assert!(!memory.keywords().await.is_empty());
    }
}
