use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurveyError {
    #[error("malformed {table} table: row {row} has {got} values, expected {want}")]
    RaggedRow {
        table: &'static str,
        row: usize,
        got: usize,
        want: usize,
    },

    #[error("not an EPSG descriptor: {0}")]
    Epsg(String),

    #[error("unsupported CRS {0}")]
    UnsupportedCrs(String),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
