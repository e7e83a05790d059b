//! Result table rendering and JSON export
//!
//! Presentation-layer collaborators: everything here consumes the pipeline's
//! result shapes and turns them into terminal tables or JSON. No analysis
//! logic lives in this module.

pub mod json_export;
pub mod tables;

pub use json_export::*;
pub use tables::*;
