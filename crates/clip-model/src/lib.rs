//! clipsift Clip Model
//!
//! Defines the data contracts for clipsift:
//! - **Record:** One annotated clip row, typed fields plus the raw CSV
//!   cells so opaque columns pass through to the output unchanged
//! - **Table:** The metadata table: load, column validation, and
//!   sampled-manifest writing
//! - **Manifest:** The lighter path-pair view of a sampled manifest used
//!   by the fetch utility

pub mod manifest;
pub mod record;
pub mod table;

pub use manifest::*;
pub use record::*;
pub use table::*;
