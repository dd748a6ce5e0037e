//! Static plots of survey layers.

use crate::{color, RenderError};
use layers::{PointCollection, Raster, SiteSeries};
use log::debug;
use plotters::{coord::Shift, prelude::*};
use std::{fmt, path::Path};

const BAND_PLOT_SIZE: (u32, u32) = (900, 780);
const SERIES_PLOT_SIZE: (u32, u32) = (900, 500);

/// Plots one raster band as colormapped cells, optionally with the
/// survey sites drawn on top. PNG or SVG, by file extension.
pub fn band_plot(
    raster: &Raster,
    band: &str,
    sites: Option<&PointCollection>,
    path: &Path,
) -> Result<(), RenderError> {
    if is_svg(path) {
        let root = SVGBackend::new(path, BAND_PLOT_SIZE).into_drawing_area();
        draw_band(&root, raster, band, sites)?;
        root.present().map_err(draw_err)?;
    } else {
        let root = BitMapBackend::new(path, BAND_PLOT_SIZE).into_drawing_area();
        draw_band(&root, raster, band, sites)?;
        root.present().map_err(draw_err)?;
    }
    debug!("wrote band plot; band: {band}, out: {path:?}");
    Ok(())
}

/// Plots one site's measurement history as a line chart. PNG or SVG,
/// by file extension.
pub fn series_chart(series: &SiteSeries, path: &Path) -> Result<(), RenderError> {
    if is_svg(path) {
        let root = SVGBackend::new(path, SERIES_PLOT_SIZE).into_drawing_area();
        draw_series(&root, series)?;
        root.present().map_err(draw_err)?;
    } else {
        let root = BitMapBackend::new(path, SERIES_PLOT_SIZE).into_drawing_area();
        draw_series(&root, series)?;
        root.present().map_err(draw_err)?;
    }
    debug!("wrote series chart; site: {}, out: {path:?}", series.site);
    Ok(())
}

/// Renders a site's measurement history to an in-memory SVG, sized for
/// embedding in a map popup.
pub fn series_svg(series: &SiteSeries, size: (u32, u32)) -> Result<String, RenderError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw_series(&root, series)?;
        root.present().map_err(draw_err)?;
    }
    Ok(svg)
}

fn draw_band<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    raster: &Raster,
    band: &str,
    sites: Option<&PointCollection>,
) -> Result<(), RenderError> {
    let band_data = raster
        .band(band)
        .ok_or_else(|| RenderError::UnknownBand(band.to_owned()))?;
    let (lo, hi) = band_data
        .min_max()
        .ok_or_else(|| RenderError::EmptyBand(band.to_owned()))?;

    root.fill(&WHITE).map_err(draw_err)?;

    let (sw, ne) = raster.bounds();
    let mut chart = ChartBuilder::on(root)
        .caption(band, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(sw.x..ne.x, sw.y..ne.y)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("easting (m)")
        .y_desc("northing (m)")
        .x_labels(6)
        .y_labels(6)
        .label_style(("sans-serif", 12))
        .draw()
        .map_err(draw_err)?;

    let half = raster.cell_size() / 2.0;
    let origin = raster.origin();
    chart
        .draw_series(
            band_data
                .samples()
                .iter()
                .enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(|(idx, v)| {
                    let (col, row) = raster.linear_index_to_xy(idx);
                    #[allow(clippy::cast_precision_loss)]
                    let cx = origin.x + col as f64 * raster.cell_size();
                    #[allow(clippy::cast_precision_loss)]
                    let cy = origin.y + row as f64 * raster.cell_size();
                    let (r, g, b) = color::viridis(color::normalize(*v, lo, hi));
                    Rectangle::new(
                        [(cx - half, cy - half), (cx + half, cy + half)],
                        RGBColor(r, g, b).filled(),
                    )
                }),
        )
        .map_err(draw_err)?;

    if let Some(sites) = sites {
        chart
            .draw_series(
                sites
                    .points()
                    .iter()
                    .map(|p| Circle::new((p.geometry.x(), p.geometry.y()), 4, WHITE.filled())),
            )
            .map_err(draw_err)?;
        chart
            .draw_series(
                sites
                    .points()
                    .iter()
                    .map(|p| Circle::new((p.geometry.x(), p.geometry.y()), 4, &BLACK)),
            )
            .map_err(draw_err)?;
    }

    Ok(())
}

fn draw_series<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &SiteSeries,
) -> Result<(), RenderError> {
    let (start, end) = series.time_range().ok_or(RenderError::EmptySeries)?;
    let (lo, hi) = series.value_range().ok_or(RenderError::EmptySeries)?;

    root.fill(&WHITE).map_err(draw_err)?;

    #[allow(clippy::cast_precision_loss)]
    let hours = (end - start).num_minutes() as f64 / 60.0;
    let pad = ((hi - lo) * 0.05).max(1e-6);

    let mut chart = ChartBuilder::on(root)
        .caption(
            format!("{} — {}", series.site, series.measure.label()),
            ("sans-serif", 20),
        )
        .margin(12)
        .x_label_area_size(36)
        .y_label_area_size(56)
        .build_cartesian_2d(0.0..hours.max(1.0), (lo - pad)..(hi + pad))
        .map_err(draw_err)?;

    let fmt_tick = |h: &f64| {
        #[allow(clippy::cast_possible_truncation)]
        let at = start + chrono::Duration::minutes((h * 60.0).round() as i64);
        at.format("%m-%d %H:%M").to_string()
    };
    chart
        .configure_mesh()
        .x_desc("time (UTC)")
        .y_desc(series.measure.label())
        .x_labels(6)
        .x_label_formatter(&fmt_tick)
        .label_style(("sans-serif", 11))
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(LineSeries::new(
            series.samples.iter().map(|(t, v)| {
                #[allow(clippy::cast_precision_loss)]
                let h = (*t - start).num_minutes() as f64 / 60.0;
                (h, *v)
            }),
            &RGBColor(31, 119, 180),
        ))
        .map_err(draw_err)?;

    Ok(())
}

fn is_svg(path: &Path) -> bool {
    path.extension()
        .and_then(std::ffi::OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

fn draw_err<E: fmt::Display>(e: E) -> RenderError {
    RenderError::Draw(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::{is_svg, series_svg};
    use layers::SiteSeries;
    use std::path::Path;
    use survey::{Measure, Survey};

    #[test]
    fn test_series_svg_embeds_chart() {
        let survey = Survey::load().unwrap();
        let series = SiteSeries::extract(&survey.readings, "CAF005", Measure::Vwc).unwrap();
        let svg = series_svg(&series, (420, 240)).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("CAF005"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn test_backend_choice_by_extension() {
        assert!(is_svg(Path::new("out/map.svg")));
        assert!(is_svg(Path::new("out/map.SVG")));
        assert!(!is_svg(Path::new("out/map.png")));
        assert!(!is_svg(Path::new("map")));
    }

    #[test]
    fn test_band_plot_rejects_unknown_band() {
        let survey = Survey::load().unwrap();
        let raster = layers::Raster::from_table(&survey.grid, &["x", "y", "dem"]).unwrap();
        let out = std::env::temp_dir().join("fieldmap_unknown_band.png");
        assert!(matches!(
            super::band_plot(&raster, "ndvi", None, &out).unwrap_err(),
            crate::RenderError::UnknownBand(_)
        ));
    }

    #[test]
    fn test_band_plot_writes_svg() {
        let survey = Survey::load().unwrap();
        let raster = layers::Raster::from_table(&survey.grid, &["x", "y", "twi"]).unwrap();
        let pc =
            layers::PointCollection::from_table(&survey.sites, survey.crs, "easting", "northing")
                .unwrap();
        let out = std::env::temp_dir().join("fieldmap_band_plot.svg");
        super::band_plot(&raster, "twi", Some(&pc), &out).unwrap();
        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.contains("<svg"));
        assert!(written.contains("northing (m)"));
        std::fs::remove_file(&out).ok();
    }
}
