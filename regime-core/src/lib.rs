pub mod calculations;
pub mod engine;
pub mod models;

pub use engine::{TaxEngine, compare_regimes};
pub use models::*;
