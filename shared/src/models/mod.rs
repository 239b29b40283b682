//! Domain models for the Raincast platform

mod air_quality;
mod forecast;
mod model_info;
mod rain;

pub use air_quality::*;
pub use forecast::*;
pub use model_info::*;
pub use rain::*;
