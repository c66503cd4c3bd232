use std::{env::VarError, num::NonZeroU32};

use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_LISTING_URL: &str = "https://www.crous-montpellier.fr/se-restaurer/ou-manger/";
pub const DEFAULT_SCHOOLS_URL: &str = "https://www.herault-data.fr/api/explore/v2.1/catalog/datasets/onisep-etablissements-denseignement-superieur-herault/records?where=statut%20%3D%20%22Public%22&limit=-1";
const DEFAULT_RATE_LIMIT: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    database_url: Option<String>,
    pub listing_url: String,
    pub schools_url: String,
    /// Outgoing requests per second.
    pub rate_limit: NonZeroU32,
}

/// Assembles a connection url from the `PG_*` parts, `None` when one is missing.
/// The user name and password are percent-encoded.
fn pg_url<F>(lookup: &F) -> Result<Option<String>>
where
    F: Fn(&str) -> std::result::Result<String, VarError>,
{
    let (Ok(user), Ok(host), Ok(database)) =
        (lookup("PG_USER"), lookup("PG_HOST"), lookup("PG_DATABASE"))
    else {
        return Ok(None);
    };
    let password = lookup("PG_PASSWORD").unwrap_or_default();
    let raw_port = lookup("PG_PORT").unwrap_or_else(|_| "5432".to_string());
    let port = raw_port
        .parse::<u16>()
        .map_err(|e| Error::Config(format!("PG_PORT={raw_port:?}: {e}")))?;

    let invalid = |part: &str| Error::Config(format!("invalid {part} in PG_* settings"));
    let mut url = Url::parse("postgres://localhost").map_err(|e| Error::Config(e.to_string()))?;
    url.set_host(Some(&host))
        .map_err(|e| Error::Config(format!("PG_HOST={host:?}: {e}")))?;
    url.set_port(Some(port)).map_err(|()| invalid("PG_PORT"))?;
    url.set_username(&user).map_err(|()| invalid("PG_USER"))?;
    if !password.is_empty() {
        url.set_password(Some(&password))
            .map_err(|()| invalid("PG_PASSWORD"))?;
    }
    url.set_path(&format!("/{}", database.trim_start_matches('/')));
    Ok(Some(url.into()))
}

impl Config {
    /// Reads the process environment; `.env` is expected to be loaded already.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key))
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, VarError>,
    {
        let or_default = |key: &str, default: &str| -> String {
            lookup(key).unwrap_or_else(|_| default.to_string())
        };

        let database_url = match lookup("DATABASE_URL") {
            Ok(url) => Some(url),
            Err(_) => pg_url(&lookup)?,
        };

        let raw_rate = or_default("CROUS_RATE_LIMIT", &DEFAULT_RATE_LIMIT.to_string());
        let rate_limit = raw_rate
            .parse::<NonZeroU32>()
            .map_err(|e| Error::Config(format!("CROUS_RATE_LIMIT={raw_rate:?}: {e}")))?;

        Ok(Self {
            database_url,
            listing_url: or_default("CROUS_LISTING_URL", DEFAULT_LISTING_URL),
            schools_url: or_default("SCHOOLS_API_URL", DEFAULT_SCHOOLS_URL),
            rate_limit,
        })
    }

    #[cfg(test)]
    pub fn for_tests(listing_url: &str, schools_url: &str) -> Self {
        Self {
            database_url: None,
            listing_url: listing_url.to_string(),
            schools_url: schools_url.to_string(),
            rate_limit: NonZeroU32::new(1000).unwrap(),
        }
    }

    pub fn database_url(&self) -> Result<&str> {
        self.database_url.as_deref().ok_or_else(|| {
            Error::config_error("DATABASE_URL env variable not found (nor PG_USER/PG_HOST/PG_DATABASE)")
        })
    }
}
