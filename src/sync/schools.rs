use tracing::instrument;

use super::Crawler;
use crate::parse::{extract_schools, ApiResponse, ApiSchool};

impl Crawler {
    /// Replaces the school table with the public establishments of the
    /// catalog. Nothing is cleared if the catalog cannot be read.
    #[instrument(skip(self))]
    pub async fn refresh_schools(&self) -> crate::Result<usize> {
        let response: ApiResponse<ApiSchool> = self.fetcher.json(&self.schools_url).await?;
        log::debug!("catalog lists {} establishments", response.total_count);
        let schools = extract_schools(response);

        self.store.clear_schools().await?;
        for school in &schools {
            self.store.insert_school(school).await?;
        }
        log::info!("{} schools saved", schools.len());
        Ok(schools.len())
    }
}
