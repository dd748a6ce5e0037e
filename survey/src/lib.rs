//! Bundled sample dataset from an instrumented research farm.
//!
//! The bundle holds three sub-tables and a coordinate-reference-system
//! descriptor:
//!
//! * a sites table: instrumented locations with planar coordinates and
//!   categorical/continuous attributes,
//! * a grid table: a 10 m cell lattice with elevation, wetness index,
//!   and two apparent-conductivity surveys,
//! * a readings table: hourly soil temperature and moisture per site.
//!
//! Everything is parsed once from JSON embedded in the crate and is
//! immutable afterwards.

mod bundle;
mod crs;
mod error;
mod reading;
mod table;

pub use crate::{
    bundle::Survey,
    crs::Crs,
    error::SurveyError,
    reading::{Measure, Reading},
    table::{GridTable, SiteTable, Value},
};
