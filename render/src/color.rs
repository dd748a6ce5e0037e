//! Color ramps for continuous layers.

/// Viridis anchor colors, dark-to-bright.
const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

/// Viridis ramp lookup for `t` in `[0, 1]` (clamped).
pub fn viridis(t: f64) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    #[allow(clippy::cast_precision_loss)]
    let x = t * (VIRIDIS.len() - 1) as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let i = x.floor() as usize;
    if i >= VIRIDIS.len() - 1 {
        return VIRIDIS[VIRIDIS.len() - 1];
    }
    #[allow(clippy::cast_precision_loss)]
    let f = x - i as f64;
    let (r0, g0, b0) = VIRIDIS[i];
    let (r1, g1, b1) = VIRIDIS[i + 1];
    (lerp(r0, r1, f), lerp(g0, g1, f), lerp(b0, b1, f))
}

/// Maps `value` into `[0, 1]` over `[lo, hi]`; 0 when the range is
/// degenerate.
pub fn normalize(value: f64, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Evenly spaced CSS hex stops along the ramp, for legend gradients.
#[allow(clippy::cast_precision_loss)]
pub fn ramp_stops(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
            let (r, g, b) = viridis(t);
            format!("#{r:02x}{g:02x}{b:02x}")
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp(a: u8, b: u8, f: f64) -> u8 {
    (f64::from(a) + f * (f64::from(b) - f64::from(a))).round() as u8
}

#[cfg(test)]
mod tests {
    use super::{normalize, ramp_stops, viridis};

    #[test]
    fn test_ramp_endpoints() {
        assert_eq!(viridis(0.0), (68, 1, 84));
        assert_eq!(viridis(1.0), (253, 231, 37));
        // Out-of-range input clamps.
        assert_eq!(viridis(-3.0), viridis(0.0));
        assert_eq!(viridis(7.0), viridis(1.0));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(5.0, 0.0, 10.0), 0.5);
        assert_eq!(normalize(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(normalize(11.0, 0.0, 10.0), 1.0);
        // Degenerate range.
        assert_eq!(normalize(5.0, 5.0, 5.0), 0.0);
    }

    #[test]
    fn test_ramp_stops() {
        let stops = ramp_stops(5);
        assert_eq!(stops.len(), 5);
        assert_eq!(stops[0], "#440154");
        assert_eq!(stops[4], "#fde725");
        for stop in &stops {
            assert_eq!(stop.len(), 7);
            assert!(stop.starts_with('#'));
        }
    }
}
