mod listing;
mod restaurant;

pub use listing::{extract_listing, ALLOWED_CITIES};
pub use restaurant::Restaurant;
