use crate::{math::utm_to_geographic, LayerError};
use geo::geometry::Coord;
use log::debug;
use survey::{Crs, GridTable};

/// Relative tolerance when checking coordinate spacing against the
/// inferred cell size.
const LATTICE_EPS: f64 = 1e-6;

/// One named per-cell variable of a [`Raster`].
#[derive(Debug, Clone)]
pub struct Band {
    name: String,
    /// Row-major samples, row 0 southernmost. Absent cells are NaN.
    samples: Box<[f64]>,
}

/// Bands compare bitwise, so NaN cells compare equal.
impl PartialEq for Band {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.samples.len() == other.samples.len()
            && self
                .samples
                .iter()
                .zip(other.samples.iter())
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Band {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Smallest and largest finite sample, if any.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for &v in self.samples.iter().filter(|v| v.is_finite()) {
            bounds = Some(match bounds {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            });
        }
        bounds
    }
}

/// A grid table reshaped into a regular multi-band lattice.
///
/// The lattice is reconstructed from the table's two coordinate
/// columns: cell size is the smallest spacing observed on either axis,
/// and every other spacing must be a whole multiple of it. Cells the
/// table does not mention hold NaN in every band.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    /// Center of the southwest-most cell.
    origin: Coord<f64>,

    /// Lattice spacing, same on both axes.
    cell_size: f64,

    /// Number of (columns, rows).
    dimensions: (usize, usize),

    bands: Vec<Band>,
}

impl Raster {
    /// Reshapes `table` into a multi-band raster.
    ///
    /// `columns` selects which columns to keep. The first two must be
    /// the table's coordinate columns (which the grid table keeps
    /// first); every following name becomes one band, in selection
    /// order.
    pub fn from_table(table: &GridTable, columns: &[&str]) -> Result<Self, LayerError> {
        if columns.len() < 3 {
            return Err(LayerError::NoBands);
        }

        let mut indices = Vec::with_capacity(columns.len());
        for &name in columns {
            let idx = table
                .column_index(name)
                .ok_or_else(|| LayerError::MissingColumn(name.to_owned()))?;
            indices.push(idx);
        }
        if indices[0] != 0 || indices[1] != 1 {
            let offender = if indices[0] != 0 { columns[0] } else { columns[1] };
            return Err(LayerError::CoordinateOrder(offender.to_owned()));
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            for (idx, name) in indices[..2].iter().zip(columns) {
                if !row[*idx].is_finite() {
                    return Err(LayerError::BadCoordinate {
                        column: (*name).to_owned(),
                        row: row_idx,
                    });
                }
            }
        }

        let xs = axis_values(table, indices[0]);
        let ys = axis_values(table, indices[1]);
        let cell_size = infer_cell_size(&xs, &ys)?;

        let origin = Coord { x: xs[0], y: ys[0] };
        let width = lattice_steps(&xs, cell_size) + 1;
        let height = lattice_steps(&ys, cell_size) + 1;
        // A lattice that dwarfs its own cell count means the spacing
        // inference latched onto noise.
        if width * height > table.len().max(1) * 4 {
            return Err(LayerError::IrregularLattice);
        }

        let band_names = &columns[2..];
        let mut samples = vec![vec![f64::NAN; width * height]; band_names.len()];
        let mut seen = vec![false; width * height];

        for row in &table.rows {
            let x = row[indices[0]];
            let y = row[indices[1]];
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let col = ((x - origin.x) / cell_size).round() as usize;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let row_i = ((y - origin.y) / cell_size).round() as usize;
            let idx = row_i * width + col;
            if seen[idx] {
                return Err(LayerError::DuplicateCell { x, y });
            }
            seen[idx] = true;
            for (band, &col_idx) in samples.iter_mut().zip(&indices[2..]) {
                band[idx] = row[col_idx];
            }
        }

        let bands = band_names
            .iter()
            .zip(samples)
            .map(|(name, samples)| Band {
                name: (*name).to_owned(),
                samples: samples.into_boxed_slice(),
            })
            .collect();

        debug!(
            "built raster; {width}x{height} cells of {cell_size}, bands: {}",
            band_names.len()
        );

        Ok(Self {
            origin,
            cell_size,
            dimensions: (width, height),
            bands,
        })
    }

    /// Center of the southwest-most cell.
    pub fn origin(&self) -> Coord<f64> {
        self.origin
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of (columns, rows).
    pub fn dimensions(&self) -> (usize, usize) {
        self.dimensions
    }

    pub fn width(&self) -> usize {
        self.dimensions.0
    }

    pub fn height(&self) -> usize {
        self.dimensions.1
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn band(&self, name: &str) -> Option<&Band> {
        self.bands.iter().find(|b| b.name == name)
    }

    /// Row-major index (row 0 southernmost) for `(col, row)`.
    pub fn xy_to_linear_index(&self, (col, row): (usize, usize)) -> usize {
        row * self.dimensions.0 + col
    }

    pub fn linear_index_to_xy(&self, idx: usize) -> (usize, usize) {
        (idx % self.dimensions.0, idx / self.dimensions.0)
    }

    /// Sample of `band` in the cell containing planar `coord`.
    ///
    /// `None` if the coordinate is outside the lattice or the band does
    /// not exist; NaN if the cell exists but was absent from the table.
    pub fn sample(&self, band: &str, coord: Coord<f64>) -> Option<f64> {
        let band = self.band(band)?;
        let half = self.cell_size / 2.0;
        let col = (coord.x - (self.origin.x - half)) / self.cell_size;
        let row = (coord.y - (self.origin.y - half)) / self.cell_size;
        #[allow(clippy::cast_precision_loss)]
        if col < 0.0
            || row < 0.0
            || col >= self.dimensions.0 as f64
            || row >= self.dimensions.1 as f64
        {
            return None;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let idx = self.xy_to_linear_index((col as usize, row as usize));
        Some(band.samples[idx])
    }

    /// Outer (southwest, northeast) cell-edge corners, planar.
    pub fn bounds(&self) -> (Coord<f64>, Coord<f64>) {
        let half = self.cell_size / 2.0;
        #[allow(clippy::cast_precision_loss)]
        let sw = Coord {
            x: self.origin.x - half,
            y: self.origin.y - half,
        };
        #[allow(clippy::cast_precision_loss)]
        let ne = Coord {
            x: self.origin.x + (self.dimensions.0 - 1) as f64 * self.cell_size + half,
            y: self.origin.y + (self.dimensions.1 - 1) as f64 * self.cell_size + half,
        };
        (sw, ne)
    }

    /// Outer (southwest, northeast) corners in geographic (lon, lat)
    /// degrees.
    pub fn wgs84_bounds(&self, crs: Crs) -> Result<(Coord<f64>, Coord<f64>), LayerError> {
        let (zone, northern) = crs
            .utm_zone()
            .ok_or_else(|| LayerError::UnsupportedCrs(crs.to_string()))?;
        let (sw, ne) = self.bounds();
        Ok((
            utm_to_geographic(zone, northern, sw.x, sw.y),
            utm_to_geographic(zone, northern, ne.x, ne.y),
        ))
    }
}

/// Sorted, deduplicated values of one coordinate column.
fn axis_values(table: &GridTable, idx: usize) -> Vec<f64> {
    let mut values: Vec<f64> = table.rows.iter().map(|row| row[idx]).collect();
    values.sort_unstable_by(f64::total_cmp);
    values.dedup();
    values
}

/// Smallest spacing on either axis, after checking every spacing is a
/// whole multiple of it.
fn infer_cell_size(xs: &[f64], ys: &[f64]) -> Result<f64, LayerError> {
    let diffs: Vec<f64> = xs
        .windows(2)
        .chain(ys.windows(2))
        .map(|w| w[1] - w[0])
        .collect();
    let Some(cell_size) = diffs.iter().copied().reduce(f64::min) else {
        // A single unique coordinate on both axes has no spacing to
        // infer from.
        return Err(LayerError::IrregularLattice);
    };
    if cell_size <= 0.0 {
        return Err(LayerError::IrregularLattice);
    }
    for diff in diffs {
        let steps = diff / cell_size;
        if steps.round() < 1.0 || (steps - steps.round()).abs() > LATTICE_EPS * steps.round() {
            return Err(LayerError::IrregularLattice);
        }
    }
    Ok(cell_size)
}

/// Whole lattice steps spanned by a sorted axis.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lattice_steps(values: &[f64], cell_size: f64) -> usize {
    match (values.first(), values.last()) {
        (Some(first), Some(last)) => ((last - first) / cell_size).round() as usize,
        _ => 0,
    }
}
