//! Tax calculation building blocks.
//!
//! The slab function and surcharge lookup are regime-agnostic; everything
//! regime-specific arrives through [`crate::RegimeRules`].

pub mod common;
mod pipeline;
mod slab_tax;
mod surcharge;

pub use pipeline::{TaxableIncome, assess_liability};
pub use slab_tax::slab_tax;
pub use surcharge::{surcharge, surcharge_rate};
