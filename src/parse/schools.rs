//! Higher education establishments from the Hérault open data catalog.
//!
//! Documentation: <https://www.herault-data.fr/explore/dataset/onisep-etablissements-denseignement-superieur-herault/api/>

use serde::Deserialize;

use super::Coordinates;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiResponse<T> {
    pub total_count: i64,
    pub results: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiSchool {
    pub nom: String,
    pub sigle: Option<String>,
    pub point_geo: PointGeo,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PointGeo {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct School {
    /// Acronym when the catalog has one, otherwise the full name.
    pub name: String,
    pub long_name: String,
    pub coordinates: Coordinates,
}

impl School {
    fn from_api(record: ApiSchool) -> Option<Self> {
        let coordinates = match Coordinates::new(record.point_geo.lat, record.point_geo.lon) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("skipping school {}: {e}", record.nom);
                return None;
            }
        };
        let name = record
            .sigle
            .filter(|sigle| !sigle.trim().is_empty())
            .unwrap_or_else(|| record.nom.clone());
        Some(Self {
            name,
            long_name: record.nom,
            coordinates,
        })
    }
}

/// Maps every establishment of an API page to a school. The catalog request
/// itself selects which establishments are listed.
pub fn extract_schools(response: ApiResponse<ApiSchool>) -> Vec<School> {
    response
        .results
        .into_iter()
        .filter_map(School::from_api)
        .collect()
}
