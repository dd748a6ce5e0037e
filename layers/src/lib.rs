//! Layer builder: one-shot reshaping of survey tables into
//! renderer-ready map layers.
//!
//! * [`PointCollection`] attaches a geometry to every sites-table row,
//!   preserving the remaining attributes unchanged.
//! * [`Raster`] rebuilds the grid table's coordinate lattice and turns
//!   each selected attribute column into a band.
//! * [`SiteSeries`] pulls one site's measurement history out of the
//!   readings table.
//!
//! All transformations are pure and deterministic: building the same
//! layer from the same table twice yields identical values.

mod error;
mod math;
mod points;
mod raster;
mod series;

pub use crate::{
    error::LayerError,
    points::{PointCollection, SitePoint},
    raster::{Band, Raster},
    series::SiteSeries,
};
