pub mod calculations;
pub mod engine;
pub mod models;

pub use engine::{ComparisonRequest, TaxEngine};
pub use models::*;
