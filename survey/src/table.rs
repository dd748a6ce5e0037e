use crate::SurveyError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One cell of the sites table.
///
/// Attribute columns are a mix of categorical and continuous values, so
/// cells are loosely typed. Deserialization order matters: `null` must
/// be tried before numbers and strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Num(f64),
    Text(String),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Num(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Survey sites table: named columns, one row per instrumented location.
///
/// The coordinate columns (`easting`, `northing`) hold planar
/// coordinates under the bundle's CRS; remaining columns are free-form
/// attributes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SiteTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl SiteTable {
    /// Returns the index of column `name`, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn validate(&self, table: &'static str) -> Result<(), SurveyError> {
        validate_rows(table, self.columns.len(), self.rows.iter().map(Vec::len))
    }
}

/// Grid table: named numeric columns, one row per lattice cell.
///
/// Invariant: the coordinate columns are the first two columns; the
/// layer builder rejects any other ordering.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl GridTable {
    /// Returns the index of column `name`, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn validate(&self, table: &'static str) -> Result<(), SurveyError> {
        validate_rows(table, self.columns.len(), self.rows.iter().map(Vec::len))
    }
}

fn validate_rows(
    table: &'static str,
    want: usize,
    lens: impl Iterator<Item = usize>,
) -> Result<(), SurveyError> {
    for (row, got) in lens.enumerate() {
        if got != want {
            return Err(SurveyError::RaggedRow {
                table,
                row,
                got,
                want,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{SiteTable, Value};

    #[test]
    fn test_value_parses_mixed_cells() {
        let json = r#"{"columns": ["site", "easting", "om_pct"],
                       "rows": [["CAF001", 493240.0, 2.4], [null, 493250.5, 3]]}"#;
        let table: SiteTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][0], Value::Text("CAF001".to_owned()));
        assert_eq!(table.rows[0][1], Value::Num(493_240.0));
        assert_eq!(table.rows[1][0], Value::Null);
        // Integer literals land in the numeric variant.
        assert_eq!(table.rows[1][2], Value::Num(3.0));
    }

    #[test]
    fn test_ragged_row_detected() {
        let json = r#"{"columns": ["site", "easting"], "rows": [["CAF001"]]}"#;
        let table: SiteTable = serde_json::from_str(json).unwrap();
        assert!(table.validate("sites").is_err());
    }

    #[test]
    fn test_column_index() {
        let json = r#"{"columns": ["site", "easting", "northing"], "rows": []}"#;
        let table: SiteTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.column_index("northing"), Some(2));
        assert_eq!(table.column_index("elevation"), None);
    }
}
