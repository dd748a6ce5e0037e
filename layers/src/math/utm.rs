//! Inverse transverse-Mercator projection for UTM coordinates.
//!
//! Series expansion per Snyder, *Map Projections — A Working Manual*
//! (USGS PP 1395), accurate to well under a meter across a zone. GRS80
//! ellipsoid; the WGS84 flattening differs only in the 12th digit,
//! far below the accuracy of the series.

use geo::geometry::Coord;

/// Semi-major axis, meters.
const A: f64 = 6_378_137.0;
/// GRS80 inverse flattening.
const INV_F: f64 = 298.257_222_101;
/// UTM central-meridian scale factor.
const K0: f64 = 0.9996;
/// UTM false easting, meters.
const FALSE_EASTING: f64 = 500_000.0;
/// UTM false northing for the southern hemisphere, meters.
const FALSE_NORTHING_S: f64 = 10_000_000.0;

/// Converts UTM `easting`/`northing` in `zone` to geographic
/// (lon, lat) degrees.
pub(crate) fn utm_to_geographic(
    zone: u8,
    northern: bool,
    easting: f64,
    northing: f64,
) -> Coord<f64> {
    let f = 1.0 / INV_F;
    let e2 = f * (2.0 - f);
    let ep2 = e2 / (1.0 - e2);
    let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());

    let northing = if northern {
        northing
    } else {
        northing - FALSE_NORTHING_S
    };

    // Footpoint latitude from the rectified meridional arc.
    let m = northing / K0;
    let mu = m / (A * (1.0 - e2 / 4.0 - 3.0 * e2.powi(2) / 64.0 - 5.0 * e2.powi(3) / 256.0));
    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1.powi(2) / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

    let sin_phi1 = phi1.sin();
    let cos_phi1 = phi1.cos();
    let tan_phi1 = phi1.tan();

    let c1 = ep2 * cos_phi1 * cos_phi1;
    let t1 = tan_phi1 * tan_phi1;
    let n1 = A / (1.0 - e2 * sin_phi1 * sin_phi1).sqrt();
    let r1 = A * (1.0 - e2) / (1.0 - e2 * sin_phi1 * sin_phi1).powf(1.5);
    let d = (easting - FALSE_EASTING) / (n1 * K0);

    let lat = phi1
        - (n1 * tan_phi1 / r1)
            * (d.powi(2) / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1.powi(2) - 9.0 * ep2) * d.powi(4) / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1.powi(2)
                    - 252.0 * ep2
                    - 3.0 * c1.powi(2))
                    * d.powi(6)
                    / 720.0);

    let lon0 = f64::from(i32::from(zone) * 6 - 183).to_radians();
    let lon = lon0
        + (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1.powi(2) + 8.0 * ep2 + 24.0 * t1.powi(2))
                * d.powi(5)
                / 120.0)
            / cos_phi1;

    Coord {
        x: lon.to_degrees(),
        y: lat.to_degrees(),
    }
}
