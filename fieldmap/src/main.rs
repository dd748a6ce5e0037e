mod options;

use anyhow::{anyhow, Result};
use clap::Parser;
use layers::{PointCollection, Raster, SiteSeries};
use log::info;
use options::{Cli, Command};
use render::{color, geojson, overlay, plot, popup, Legend, Panel, WebMap};
use survey::Survey;
use textplots::{Chart, Plot as _, Shape};

/// Columns kept when rasterizing the grid table, coordinates first.
const GRID_COLUMNS: [&str; 6] = ["x", "y", "dem", "twi", "eca_sh", "eca_dp"];

/// Size of the SVG charts embedded in marker popups.
const POPUP_GRAPH_SIZE: (u32, u32) = (440, 260);

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let survey = Survey::load()?;

    match cli.cmd {
        Command::Sites(args) => sites(&survey, &args),
        Command::Choropleth(args) => choropleth(&survey, &args),
        Command::Composite(args) => composite(&survey, &args),
        Command::Compare(args) => compare(&survey, &args),
        Command::Series(args) => series(&survey, &args),
        Command::Plot(args) => band_plot(&survey, &args),
        Command::Graph(args) => graph(&survey, &args),
        Command::Preview(args) => preview(&survey, &args),
        Command::Json => json(&survey),
    }
}

fn site_points(survey: &Survey) -> Result<PointCollection> {
    Ok(PointCollection::from_table(
        &survey.sites,
        survey.crs,
        "easting",
        "northing",
    )?)
}

fn grid_raster(survey: &Survey) -> Result<Raster> {
    Ok(Raster::from_table(&survey.grid, &GRID_COLUMNS)?)
}

/// Legend for one band, spanning its finite value range.
fn band_legend(raster: &Raster, band: &str) -> Result<Legend> {
    let (min, max) = raster
        .band(band)
        .and_then(|b| b.min_max())
        .ok_or_else(|| anyhow!("no data in band {band}"))?;
    Ok(Legend {
        title: band.to_owned(),
        stops: color::ramp_stops(9),
        min,
        max,
    })
}

fn sites(survey: &Survey, args: &options::Sites) -> Result<()> {
    let points = site_points(survey)?;

    let mut panel = Panel::new("survey sites");
    for (point, coord) in points.points().iter().zip(points.wgs84_coords()) {
        panel.add_marker(coord, Some(popup::attribute_table(&points, point)));
    }

    let mut map = WebMap::new("survey sites");
    map.add_panel(panel);
    map.save(&args.out)?;
    info!("wrote {:?}", args.out);
    Ok(())
}

fn choropleth(survey: &Survey, args: &options::Choropleth) -> Result<()> {
    let raster = grid_raster(survey)?;
    let legend = band_legend(&raster, &args.band)?;
    let png = overlay::band_png(&raster, &args.band)?;
    let (sw, ne) = raster.wgs84_bounds(survey.crs)?;

    let mut panel = Panel::new(args.band.clone());
    panel.add_overlay(&png, sw, ne, Some(legend));

    let mut map = WebMap::new(format!("{} choropleth", args.band));
    map.add_panel(panel);
    map.save(&args.out)?;
    info!("wrote {:?}", args.out);
    Ok(())
}

fn composite(survey: &Survey, args: &options::Composite) -> Result<()> {
    let raster = grid_raster(survey)?;
    let png = overlay::composite_png(&raster, &args.red, &args.green, &args.blue)?;
    let (sw, ne) = raster.wgs84_bounds(survey.crs)?;

    let label = format!("{}/{}/{}", args.red, args.green, args.blue);
    let mut panel = Panel::new(label.clone());
    panel.add_overlay(&png, sw, ne, None);

    let mut map = WebMap::new(format!("{label} composite"));
    map.add_panel(panel);
    map.save(&args.out)?;
    info!("wrote {:?}", args.out);
    Ok(())
}

fn compare(survey: &Survey, args: &options::Compare) -> Result<()> {
    let raster = grid_raster(survey)?;
    let (sw, ne) = raster.wgs84_bounds(survey.crs)?;

    let mut map = WebMap::new(format!("{} vs {}", args.left, args.right));
    for band in [&args.left, &args.right] {
        let legend = band_legend(&raster, band)?;
        let png = overlay::band_png(&raster, band)?;
        let mut panel = Panel::new(band.clone());
        panel.add_overlay(&png, sw, ne, Some(legend));
        map.add_panel(panel);
    }
    map.save(&args.out)?;
    info!("wrote {:?}", args.out);
    Ok(())
}

fn series(survey: &Survey, args: &options::Series) -> Result<()> {
    let points = site_points(survey)?;

    let mut panel = Panel::new(format!("{} by site", args.measure));
    for (point, coord) in points.points().iter().zip(points.wgs84_coords()) {
        let site = points
            .attr(point, "site")
            .and_then(survey::Value::as_str)
            .ok_or_else(|| anyhow!("sites table has no usable site column"))?;
        let series = SiteSeries::extract(&survey.readings, site, args.measure)?;
        let svg = plot::series_svg(&series, POPUP_GRAPH_SIZE)?;
        panel.add_marker(coord, Some(popup::graph_popup(site, &svg)));
    }

    let mut map = WebMap::new(format!("{} readings", args.measure));
    map.add_panel(panel);
    map.save(&args.out)?;
    info!("wrote {:?}", args.out);
    Ok(())
}

fn band_plot(survey: &Survey, args: &options::Plot) -> Result<()> {
    let raster = grid_raster(survey)?;
    let points = site_points(survey)?;
    plot::band_plot(&raster, &args.band, Some(&points), &args.out)?;
    info!("wrote {:?}", args.out);
    Ok(())
}

fn graph(survey: &Survey, args: &options::Graph) -> Result<()> {
    let series = SiteSeries::extract(&survey.readings, &args.site, args.measure)?;
    plot::series_chart(&series, &args.out)?;
    info!("wrote {:?}", args.out);
    Ok(())
}

fn preview(survey: &Survey, args: &options::Preview) -> Result<()> {
    let series = SiteSeries::extract(&survey.readings, &args.site, args.measure)?;
    let (start, end) = series
        .time_range()
        .ok_or_else(|| anyhow!("series is empty"))?;

    #[allow(clippy::cast_precision_loss)]
    let samples: Vec<(f32, f32)> = series
        .samples
        .iter()
        .map(|(t, v)| {
            let hours = (*t - start).num_minutes() as f32 / 60.0;
            (hours, *v as f32)
        })
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let span = (end - start).num_minutes() as f32 / 60.0;

    println!("{} — {}", series.site, series.measure.label());
    Chart::new(160, 60, 0.0, span.max(1.0))
        .lineplot(&Shape::Lines(&samples))
        .display();
    Ok(())
}

fn json(survey: &Survey) -> Result<()> {
    let points = site_points(survey)?;
    let collection = geojson::feature_collection(&points);
    println!("{}", serde_json::to_string_pretty(&collection)?);
    Ok(())
}
