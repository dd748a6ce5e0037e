use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("drawing failed: {0}")]
    Draw(String),

    #[error("{0}")]
    Image(#[from] image::ImageError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("no such band {0}")]
    UnknownBand(String),

    #[error("band {0} has no finite samples")]
    EmptyBand(String),

    #[error("series has no samples")]
    EmptySeries,

    #[error("a web map needs 1 or 2 panels, got {0}")]
    PanelCount(usize),
}
