mod error;
mod listing_page;
mod normalize;
mod restaurant_page;
mod schools;
mod static_selector;
mod text_from_selection;

pub use error::Error;
pub use listing_page::{extract_listing, Restaurant, ALLOWED_CITIES};
pub use normalize::{normalize_menu_date, parse_open_hours, OpenHours};
pub use restaurant_page::{
    extract_coordinates, extract_open_hours, extract_restaurant_details, Coordinates, FoodPage,
    Foody, Meal, RestaurantDetails,
};
pub use schools::{extract_schools, ApiResponse, ApiSchool, School};
