use std::fmt::{self, Display};

use scraper::Html;

use crate::parse::{text_from_selection::first_match, Error};
use crate::static_selector;

/// A geographic point, `x` being the latitude and `y` the longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinates {
    x: f64,
    y: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64) -> Result<Self, Error> {
        if x.is_finite() && y.is_finite() {
            Ok(Self { x, y })
        } else {
            Err(Error::malformed(&format!(
                "coordinates ({x}, {y}) are not finite"
            )))
        }
    }

    pub const fn x(&self) -> f64 {
        self.x
    }

    pub const fn y(&self) -> f64 {
        self.y
    }
}

impl Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

fn read_axis(element: scraper::ElementRef<'_>, attr: &str) -> Result<f64, Error> {
    let raw = element
        .attr(attr)
        .ok_or_else(|| Error::missing(&format!("#map[{attr}]")))?;
    raw.trim()
        .parse()
        .map_err(|_| Error::malformed(&format!("#map[{attr}] = {raw:?} is not a number")))
}

/// Reads the `data-lat`/`data-lon` attributes of the `#map` element.
pub fn extract_coordinates(document: &Html) -> Result<Coordinates, Error> {
    static_selector!(MAP_SELECTOR <- "#map");
    let map = first_match(&MAP_SELECTOR, document.root_element(), "#map")?;
    Coordinates::new(read_axis(map, "data-lat")?, read_axis(map, "data-lon")?)
}
