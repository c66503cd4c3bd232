mod coordinates;
mod food_page;
mod meal;
mod open_hours;

pub use coordinates::{extract_coordinates, Coordinates};
pub use food_page::{extract_restaurant_details, FoodPage, RestaurantDetails};
pub use meal::{Foody, Meal};
pub use open_hours::extract_open_hours;
