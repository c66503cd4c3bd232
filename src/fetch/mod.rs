use std::{num::NonZeroU32, time::Duration};

use governor::{DefaultDirectRateLimiter, Jitter, Quota, RateLimiter};
use reqwest::{Client, Error as RequestError};
use serde::de::DeserializeOwned;
use tracing::{instrument, Level};

static DELAY_JITTER_MS: u64 = 200;
static REQUEST_TIMEOUT: u64 = 30;

pub fn make_client() -> Result<Client, RequestError> {
    Client::builder()
        .gzip(true)
        .timeout(Duration::from_secs(REQUEST_TIMEOUT))
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
}

/// Rate limited access to the Crous site and the open data API.
pub struct Fetcher {
    client: Client,
    rate_limiter: DefaultDirectRateLimiter,
}

impl Fetcher {
    pub fn new(rate_limit: NonZeroU32) -> Result<Self, RequestError> {
        Ok(Self {
            client: make_client()?,
            rate_limiter: RateLimiter::direct(Quota::per_second(rate_limit)),
        })
    }

    async fn wait_turn(&self) {
        let jitter = Jitter::new(Duration::ZERO, Duration::from_millis(DELAY_JITTER_MS));
        self.rate_limiter.until_ready_with_jitter(jitter).await;
    }

    /// Body of the page at `url`. Non success statuses are errors.
    #[instrument(skip(self), level = Level::TRACE)]
    pub async fn page(&self, url: &str) -> Result<String, RequestError> {
        self.wait_turn().await;
        let start = std::time::Instant::now();
        let text = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        log::trace!("Got text of {url} in \t {:?}", start.elapsed());
        Ok(text)
    }

    #[instrument(skip(self), level = Level::TRACE)]
    pub async fn json<T: DeserializeOwned>(&self, url: &str) -> crate::Result<T> {
        let text = self.page(url).await?;
        serde_json::from_str(&text).map_err(From::from)
    }
}
