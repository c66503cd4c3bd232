use super::Crawler;
use crate::parse::{self, extract_coordinates, extract_listing, extract_open_hours, ALLOWED_CITIES};

impl Crawler {
    /// Replaces the restaurant table with what the listing page shows.
    ///
    /// Every restaurant page is visited in turn for its position and hours;
    /// the first failure aborts the refresh before anything is inserted.
    pub async fn refresh_roster(&self) -> crate::Result<usize> {
        self.store.clear_restaurants().await?;

        let listed = self
            .scrape(&self.listing_url, |document| {
                Ok::<_, parse::Error>(extract_listing(document, &ALLOWED_CITIES))
            })
            .await?;
        log::info!("{} restaurants listed", listed.len());

        let mut roster = Vec::with_capacity(listed.len());
        for mut restaurant in listed {
            let url = self.absolute_url(restaurant.url())?;
            let (coordinates, hours) = self
                .scrape(&url, |document| {
                    Ok::<_, parse::Error>((
                        extract_coordinates(document)?,
                        extract_open_hours(document, &url)?,
                    ))
                })
                .await?;
            log::debug!("{:?} at {coordinates}, open {hours}", restaurant.name());
            restaurant.set_url(url);
            restaurant.set_coordinates(coordinates);
            restaurant.set_open_hours(hours);
            roster.push(restaurant);
        }

        for restaurant in &roster {
            self.store.insert_restaurant(restaurant).await?;
        }
        log::info!("{} restaurants saved", roster.len());
        Ok(roster.len())
    }

    /// Reads the opening hours of every known restaurant again. Pages that
    /// cannot be read keep their previous hours.
    pub async fn refresh_hours(&self) -> crate::Result<usize> {
        let mut updated = 0;
        for restaurant in self.store.restaurants().await? {
            if !restaurant.is_scrapable() {
                continue;
            }
            let url = restaurant.url();
            let scraped = self
                .scrape(url, |document| extract_open_hours(document, url))
                .await;
            match scraped {
                Ok(hours) => {
                    self.store.update_hours(restaurant.id(), &hours).await?;
                    updated += 1;
                }
                Err(e) => log::warn!("no hours for {:?}: {e}", restaurant.name()),
            }
        }
        log::info!("updated the hours of {updated} restaurants");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{crawler, fixture, serve};
    use crate::parse::{Coordinates, OpenHours, Restaurant};
    use wiremock::MockServer;

    async fn serve_listing(server: &MockServer) {
        serve(server, "/ou-manger/", 200, fixture("listing.html")).await;
    }

    #[tokio::test]
    async fn test_refresh_roster() {
        let server = MockServer::start().await;
        serve_listing(&server).await;
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

        assert_eq!(crawler.refresh_roster().await.unwrap(), 3);
        let roster = memory.restaurants().await;
        let names: Vec<&str> = roster.iter().map(Restaurant::name).collect();
        assert_eq!(names, ["Brasserie Triolet", "Resto U Richter", "Cafétéria Sète"]);
        assert_eq!(
            roster[0].url(),
            format!("{}/restaurant/brasserie-triolet/", server.uri())
        );
        assert!(roster.iter().all(Restaurant::is_scrapable));
        assert_eq!(roster[1].coordinates(), Coordinates::new(43.631_8, 3.862).ok());
        assert_eq!(
            roster[2].open_hours(),
            Some(&OpenHours::new("11:30", "14:00"))
        );
    }

    #[tokio::test]
    async fn test_roster_aborts_on_missing_map() {
        let server = MockServer::start().await;
        serve_listing(&server).await;
        serve(
            &server,
            "/restaurant/brasserie-triolet/",
            200,
            fixture("restaurant.html"),
        )
        .await;
        serve(
            &server,
            "/restaurant/resto-u-richter/",
            200,
            fixture("restaurant_without_map.html"),
        )
        .await;
        let (crawler, memory) = crawler(&server);
        crawler
            .store()
            .insert_restaurant(&Restaurant::new("Ancien", "https://example.org/ancien/"))
            .await
            .unwrap();

        let err = crawler.refresh_roster().await.unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Parse(crate::parse::Error::Missing(ref what)) if what == "#map"
        ));
        assert!(memory.restaurants().await.is_empty());
    }

    #[tokio::test]
    async fn test_roster_aborts_when_listing_is_down() {
        let server = MockServer::start().await;
        serve(&server, "/ou-manger/", 500, String::new()).await;
        let (crawler, _) = crawler(&server);
        assert!(matches!(
            crawler.refresh_roster().await,
            Err(crate::Error::Request(_))
        ));
    }

    #[tokio::test]
    async fn test_refresh_hours_skips_unreadable_pages() {
        let server = MockServer::start().await;
        serve(
            &server,
            "/restaurant/resto-u-richter/",
            200,
            fixture("restaurant_without_map.html"),
        )
        .await;
        let (crawler, memory) = crawler(&server);
        let store = crawler.store();
        store
            .insert_restaurant(&Restaurant::new(
                "Resto U Richter",
                format!("{}/restaurant/resto-u-richter/", server.uri()),
            ))
            .await
            .unwrap();
        store
            .insert_restaurant(
                &Restaurant::new("Disparu", format!("{}/restaurant/gone/", server.uri()))
                    .with_open_hours(Some(OpenHours::new("12:00", "13:00"))),
            )
            .await
            .unwrap();

        assert_eq!(crawler.refresh_hours().await.unwrap(), 1);
        let roster = memory.restaurants().await;
        assert_eq!(
            roster[0].open_hours(),
            Some(&OpenHours::new("11:15", "13:45"))
        );
        assert_eq!(
            roster[1].open_hours(),
            Some(&OpenHours::new("12:00", "13:00"))
        );
    }
}
