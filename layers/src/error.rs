use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayerError {
    #[error("no such column {0}")]
    MissingColumn(String),

    #[error("column {column} row {row} is not a usable coordinate")]
    BadCoordinate { column: String, row: usize },

    #[error("coordinate columns must be selected first (got {0})")]
    CoordinateOrder(String),

    #[error("a raster needs at least one attribute column")]
    NoBands,

    #[error("grid coordinates do not form a regular lattice")]
    IrregularLattice,

    #[error("duplicate grid cell at ({x}, {y})")]
    DuplicateCell { x: f64, y: f64 },

    #[error("CRS {0} does not name a UTM zone")]
    UnsupportedCrs(String),

    #[error("no readings for site {0}")]
    UnknownSite(String),
}
