//! Domain entities

mod forecast;
mod forecast_schema;

pub use forecast::Forecast;
pub use forecast_schema::{ForecastSchema, SlotSpec};
