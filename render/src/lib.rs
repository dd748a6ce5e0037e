//! Renderer: turns survey layers into visual artifacts.
//!
//! Static plots go through `plotters`; interactive maps are written as
//! single self-contained HTML files driving Leaflet, with raster
//! overlays embedded as base64 data URIs. Nothing here persists state:
//! every function takes layers in and hands an artifact back.

pub mod color;
mod error;
pub mod geojson;
pub mod overlay;
pub mod plot;
pub mod popup;
mod webmap;

pub use crate::{
    error::RenderError,
    webmap::{Legend, Panel, WebMap},
};
