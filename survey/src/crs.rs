use crate::SurveyError;
use std::{fmt, str::FromStr};

/// Coordinate-reference-system descriptor, e.g. `EPSG:26911`.
///
/// Only the EPSG authority is understood. Whether a given code can
/// actually be transformed is decided by [`Crs::utm_zone`]; the bundled
/// dataset is always a UTM zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crs {
    code: u32,
}

impl Crs {
    pub fn code(&self) -> u32 {
        self.code
    }

    /// Returns `(zone, northern)` if this CRS is a UTM zone.
    ///
    /// Recognized families: NAD83 (`269xx`), WGS84 north (`326xx`) and
    /// WGS84 south (`327xx`).
    #[allow(clippy::cast_possible_truncation)]
    pub fn utm_zone(&self) -> Option<(u8, bool)> {
        match self.code {
            26901..=26923 => Some(((self.code - 26900) as u8, true)),
            32601..=32660 => Some(((self.code - 32600) as u8, true)),
            32701..=32760 => Some(((self.code - 32700) as u8, false)),
            _ => None,
        }
    }
}

impl FromStr for Crs {
    type Err = SurveyError;

    fn from_str(s: &str) -> Result<Self, SurveyError> {
        let mk_err = || SurveyError::Epsg(s.to_owned());
        let (authority, code) = s.split_once(':').ok_or_else(mk_err)?;
        if !authority.eq_ignore_ascii_case("EPSG") {
            return Err(mk_err());
        }
        let code = code.parse::<u32>().map_err(|_| mk_err())?;
        Ok(Self { code })
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::Crs;

    #[test]
    fn test_parse() {
        let crs: Crs = "EPSG:26911".parse().unwrap();
        assert_eq!(crs.code(), 26911);
        assert_eq!(crs.to_string(), "EPSG:26911");
    }

    #[test]
    fn test_parse_rejects_non_epsg() {
        assert!("ESRI:102008".parse::<Crs>().is_err());
        assert!("26911".parse::<Crs>().is_err());
        assert!("EPSG:abc".parse::<Crs>().is_err());
    }

    #[test]
    fn test_utm_zone() {
        let nad83: Crs = "EPSG:26911".parse().unwrap();
        assert_eq!(nad83.utm_zone(), Some((11, true)));

        let wgs84_n: Crs = "EPSG:32617".parse().unwrap();
        assert_eq!(wgs84_n.utm_zone(), Some((17, true)));

        let wgs84_s: Crs = "EPSG:32723".parse().unwrap();
        assert_eq!(wgs84_s.utm_zone(), Some((23, false)));

        let web_mercator: Crs = "EPSG:3857".parse().unwrap();
        assert_eq!(web_mercator.utm_zone(), None);
    }
}
