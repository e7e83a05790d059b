//! Pipeline module - the pure filter-and-metrics core

pub mod aggregate;
pub mod coerce;
pub mod correlation;
pub mod derive;
pub mod error;
pub mod filter;
pub mod grouping;
pub mod loader;
pub mod session;

pub use aggregate::*;
pub use coerce::*;
pub use correlation::*;
pub use derive::*;
pub use error::*;
pub use filter::*;
pub use grouping::*;
pub use loader::*;
pub use session::*;
