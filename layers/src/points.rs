use crate::{math::utm_to_geographic, LayerError};
use geo::geometry::{Coord, Point};
use log::debug;
use survey::{Crs, SiteTable, Value};

/// One survey record with its location attached as a geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct SitePoint {
    /// Planar location in the collection's CRS.
    pub geometry: Point<f64>,

    /// Non-coordinate attribute values, in source column order.
    pub attrs: Vec<Value>,
}

/// A sites table reshaped into geometry-tagged records.
///
/// Row count and attribute values match the source table exactly; only
/// the two coordinate columns are consumed, becoming the geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCollection {
    crs: Crs,
    zone: u8,
    northern: bool,
    attr_names: Vec<String>,
    points: Vec<SitePoint>,
}

impl PointCollection {
    /// Reshapes `table` into a point collection.
    ///
    /// `x_col` and `y_col` name the planar coordinate columns under
    /// `crs`. Every record must carry finite numeric coordinates;
    /// a missing or non-numeric coordinate fails the whole build.
    pub fn from_table(
        table: &SiteTable,
        crs: Crs,
        x_col: &str,
        y_col: &str,
    ) -> Result<Self, LayerError> {
        let (zone, northern) = crs
            .utm_zone()
            .ok_or_else(|| LayerError::UnsupportedCrs(crs.to_string()))?;

        let x_idx = table
            .column_index(x_col)
            .ok_or_else(|| LayerError::MissingColumn(x_col.to_owned()))?;
        let y_idx = table
            .column_index(y_col)
            .ok_or_else(|| LayerError::MissingColumn(y_col.to_owned()))?;

        let attr_names: Vec<String> = table
            .columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != x_idx && *i != y_idx)
            .map(|(_, name)| name.clone())
            .collect();

        let mut points = Vec::with_capacity(table.len());
        for (row_idx, row) in table.rows.iter().enumerate() {
            let x = coordinate(row, x_idx, row_idx, x_col)?;
            let y = coordinate(row, y_idx, row_idx, y_col)?;

            let attrs: Vec<Value> = row
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != x_idx && *i != y_idx)
                .map(|(_, value)| value.clone())
                .collect();

            points.push(SitePoint {
                geometry: Point::new(x, y),
                attrs,
            });
        }

        debug!("built point collection; records: {}, crs: {crs}", points.len());

        Ok(Self {
            crs,
            zone,
            northern,
            attr_names,
            points,
        })
    }

    pub fn crs(&self) -> Crs {
        self.crs
    }

    /// Names of the preserved attribute columns, in source order.
    pub fn attr_names(&self) -> &[String] {
        &self.attr_names
    }

    pub fn points(&self) -> &[SitePoint] {
        &self.points
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Looks up one of `point`'s attributes by column name.
    pub fn attr<'a>(&self, point: &'a SitePoint, name: &str) -> Option<&'a Value> {
        let idx = self.attr_names.iter().position(|n| n == name)?;
        point.attrs.get(idx)
    }

    /// Returns the record whose `key` attribute equals `value`.
    pub fn find(&self, key: &str, value: &str) -> Option<&SitePoint> {
        self.points
            .iter()
            .find(|p| self.attr(p, key).and_then(Value::as_str) == Some(value))
    }

    /// Geographic (lon, lat) coordinate of each record, in order.
    pub fn wgs84_coords(&self) -> Vec<Coord<f64>> {
        self.points
            .iter()
            .map(|p| utm_to_geographic(self.zone, self.northern, p.geometry.x(), p.geometry.y()))
            .collect()
    }
}

fn coordinate(row: &[Value], idx: usize, row_idx: usize, col: &str) -> Result<f64, LayerError> {
    match row.get(idx).and_then(Value::as_f64) {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(LayerError::BadCoordinate {
            column: col.to_owned(),
            row: row_idx,
        }),
    }
}
