mod client;
mod record;

pub use client::{FoodLookup, OpenFoodFactsClient};
pub use record::FoodFactsRecord;
