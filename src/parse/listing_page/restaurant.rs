use crate::parse::{Coordinates, OpenHours};

/// A restaurant as listed on the "où manger" page.
///
/// The id stays `0` until the store hands one back.
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    id: i32,
    name: String,
    url: String,
    coordinates: Option<Coordinates>,
    open_hours: Option<OpenHours>,
}

impl Restaurant {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            url: url.into(),
            coordinates: None,
            open_hours: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_coordinates(mut self, coordinates: Option<Coordinates>) -> Self {
        self.coordinates = coordinates;
        self
    }

    #[must_use]
    pub fn with_open_hours(mut self, open_hours: Option<OpenHours>) -> Self {
        self.open_hours = open_hours;
        self
    }

    pub const fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub const fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub const fn open_hours(&self) -> Option<&OpenHours> {
        self.open_hours.as_ref()
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn set_coordinates(&mut self, coordinates: Coordinates) {
        self.coordinates = Some(coordinates);
    }

    pub fn set_open_hours(&mut self, open_hours: OpenHours) {
        self.open_hours = Some(open_hours);
    }

    /// Only persisted restaurants with a page to visit can be scraped.
    pub fn is_scrapable(&self) -> bool {
        self.id != 0 && !self.url.is_empty()
    }
}
