//! Raster bands rendered to PNG for use as web-map image overlays.
//!
//! One pixel per cell; the map page scales overlays up with
//! `image-rendering: pixelated` so cells stay crisp. Absent (NaN)
//! cells come out fully transparent.

use crate::{color, RenderError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageBuffer, Rgba, RgbaImage};
use layers::Raster;
use log::debug;

/// Renders one band through the viridis ramp, normalized to the band's
/// finite min/max.
pub fn band_png(raster: &Raster, band: &str) -> Result<Vec<u8>, RenderError> {
    let band_data = raster
        .band(band)
        .ok_or_else(|| RenderError::UnknownBand(band.to_owned()))?;
    let (lo, hi) = band_data
        .min_max()
        .ok_or_else(|| RenderError::EmptyBand(band.to_owned()))?;

    let img = pixels(raster, |idx| {
        let v = band_data.samples()[idx];
        if v.is_finite() {
            let (r, g, b) = color::viridis(color::normalize(v, lo, hi));
            Rgba([r, g, b, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    });
    debug!("rendered band overlay; band: {band}, range: {lo}..{hi}");
    encode_png(&img)
}

/// Renders three bands as an RGB composite, each channel stretched to
/// its own finite min/max. Cells absent in any channel are transparent.
pub fn composite_png(
    raster: &Raster,
    red: &str,
    green: &str,
    blue: &str,
) -> Result<Vec<u8>, RenderError> {
    let mut channels = Vec::with_capacity(3);
    for name in [red, green, blue] {
        let band = raster
            .band(name)
            .ok_or_else(|| RenderError::UnknownBand(name.to_owned()))?;
        let range = band
            .min_max()
            .ok_or_else(|| RenderError::EmptyBand(name.to_owned()))?;
        channels.push((band, range));
    }

    let img = pixels(raster, |idx| {
        let mut rgb = [0u8; 3];
        for (slot, (band, (lo, hi))) in rgb.iter_mut().zip(&channels) {
            let v = band.samples()[idx];
            if !v.is_finite() {
                return Rgba([0, 0, 0, 0]);
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            {
                *slot = (color::normalize(v, *lo, *hi) * 255.0).round() as u8;
            }
        }
        Rgba([rgb[0], rgb[1], rgb[2], 255])
    });
    debug!("rendered composite overlay; bands: {red}/{green}/{blue}");
    encode_png(&img)
}

/// Wraps PNG bytes as a `data:` URI for direct embedding in HTML.
pub fn data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Builds the overlay image, flipping rows: PNG row 0 is the
/// northernmost raster row.
#[allow(clippy::cast_possible_truncation)]
fn pixels(raster: &Raster, sample: impl Fn(usize) -> Rgba<u8>) -> RgbaImage {
    let (width, height) = raster.dimensions();
    ImageBuffer::from_fn(width as u32, height as u32, |px, py| {
        let row = height - 1 - py as usize;
        sample(raster.xy_to_linear_index((px as usize, row)))
    })
}

fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageOutputFormat::Png,
    )?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::{band_png, composite_png, data_uri};
    use image::GenericImageView;
    use layers::Raster;
    use survey::Survey;

    fn raster() -> Raster {
        let survey = Survey::load().unwrap();
        Raster::from_table(&survey.grid, &["x", "y", "dem", "twi", "eca_sh", "eca_dp"]).unwrap()
    }

    #[test]
    fn test_band_png_has_raster_dimensions() {
        let raster = raster();
        let png = band_png(&raster, "dem").unwrap();
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!(
            (img.dimensions().0 as usize, img.dimensions().1 as usize),
            raster.dimensions()
        );
    }

    #[test]
    fn test_absent_cells_are_transparent() {
        let raster = raster();
        let png = band_png(&raster, "dem").unwrap();
        let img = image::load_from_memory(&png).unwrap().to_rgba8();
        // The clipped corner is the SW of the field: bottom-left pixels.
        let (_, height) = img.dimensions();
        assert_eq!(img.get_pixel(0, height - 1)[3], 0);
        // An interior cell is opaque.
        assert_eq!(img.get_pixel(18, 10)[3], 255);
    }

    #[test]
    fn test_composite_channels() {
        let raster = raster();
        let png = composite_png(&raster, "dem", "eca_dp", "eca_sh").unwrap();
        let img = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(
            (img.dimensions().0 as usize, img.dimensions().1 as usize),
            raster.dimensions()
        );
        let (_, height) = img.dimensions();
        assert_eq!(img.get_pixel(0, height - 1)[3], 0);
    }

    #[test]
    fn test_unknown_band() {
        assert!(matches!(
            band_png(&raster(), "ndvi").unwrap_err(),
            crate::RenderError::UnknownBand(_)
        ));
    }

    #[test]
    fn test_data_uri_shape() {
        let uri = data_uri(&[0x89, b'P', b'N', b'G']);
        assert!(uri.starts_with("data:image/png;base64,"));
        assert!(!uri.contains('\n'));
    }
}
