use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use survey::Measure;

/// Render the bundled field survey as maps and plots.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Marker map of the survey sites with attribute popups.
    Sites(Sites),

    /// Colormapped grid-band overlay with a legend.
    Choropleth(Choropleth),

    /// Three-band RGB composite overlay.
    Composite(Composite),

    /// Two synced panels comparing grid bands.
    Compare(Compare),

    /// Marker map with each site's sensor graph in its popup.
    Series(Series),

    /// Static plot of a grid band with sites overlaid.
    Plot(Plot),

    /// Static time-series chart for one site.
    Graph(Graph),

    /// Terminal preview of one site's readings.
    Preview(Preview),

    /// Print the survey sites as GeoJSON.
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct Sites {
    /// Output HTML file.
    #[arg(short, long)]
    pub out: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct Choropleth {
    /// Grid band to map.
    #[arg(short, long, default_value = "twi")]
    pub band: String,

    /// Output HTML file.
    #[arg(short, long)]
    pub out: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct Composite {
    /// Band driving the red channel.
    #[arg(long, default_value = "dem")]
    pub red: String,

    /// Band driving the green channel.
    #[arg(long, default_value = "eca_dp")]
    pub green: String,

    /// Band driving the blue channel.
    #[arg(long, default_value = "eca_sh")]
    pub blue: String,

    /// Output HTML file.
    #[arg(short, long)]
    pub out: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct Compare {
    /// Band shown in the left panel.
    #[arg(long, default_value = "dem")]
    pub left: String,

    /// Band shown in the right panel.
    #[arg(long, default_value = "twi")]
    pub right: String,

    /// Output HTML file.
    #[arg(short, long)]
    pub out: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct Series {
    /// Measurement graphed in the popups (temp or vwc).
    #[arg(short, long, default_value = "vwc")]
    pub measure: Measure,

    /// Output HTML file.
    #[arg(short, long)]
    pub out: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct Plot {
    /// Grid band to plot.
    #[arg(short, long, default_value = "dem")]
    pub band: String,

    /// Output image (.png or .svg).
    #[arg(short, long)]
    pub out: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct Graph {
    /// Site identifier, e.g. CAF003.
    #[arg(short, long)]
    pub site: String,

    /// Measurement to chart (temp or vwc).
    #[arg(short, long, default_value = "temp")]
    pub measure: Measure,

    /// Output image (.png or .svg).
    #[arg(short, long)]
    pub out: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct Preview {
    /// Site identifier, e.g. CAF003.
    #[arg(short, long)]
    pub site: String,

    /// Measurement to preview (temp or vwc).
    #[arg(short, long, default_value = "vwc")]
    pub measure: Measure,
}
