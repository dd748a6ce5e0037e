use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::{fmt, str::FromStr};

/// One time-stamped sensor record from a survey site.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reading {
    /// Site identifier, shared with the sites table.
    pub site: String,

    /// Capture time, UTC.
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,

    /// Soil temperature at 0.3 m, °C.
    pub temp_c: f64,

    /// Volumetric water content at 0.3 m, m³/m³.
    pub vwc: f64,
}

/// Which measurement of a [`Reading`] to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    TempC,
    Vwc,
}

impl Measure {
    pub fn of(&self, reading: &Reading) -> f64 {
        match self {
            Self::TempC => reading.temp_c,
            Self::Vwc => reading.vwc,
        }
    }

    /// Axis label, with unit.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TempC => "soil temperature (°C)",
            Self::Vwc => "water content (m³/m³)",
        }
    }
}

impl FromStr for Measure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temp" | "temp_c" => Ok(Self::TempC),
            "vwc" => Ok(Self::Vwc),
            other => Err(format!("unknown measure {other:?} (expected temp or vwc)")),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TempC => f.write_str("temp"),
            Self::Vwc => f.write_str("vwc"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Measure, Reading};

    #[test]
    fn test_reading_parse() {
        let json = r#"{"site": "CAF001", "t": "2016-04-04T07:00:00Z",
                       "temp_c": 7.93, "vwc": 0.3112}"#;
        let reading: Reading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.site, "CAF001");
        assert_eq!(reading.timestamp.to_rfc3339(), "2016-04-04T07:00:00+00:00");
        assert_eq!(Measure::TempC.of(&reading), 7.93);
        assert_eq!(Measure::Vwc.of(&reading), 0.3112);
    }

    #[test]
    fn test_measure_from_str() {
        assert_eq!("temp".parse::<Measure>(), Ok(Measure::TempC));
        assert_eq!("vwc".parse::<Measure>(), Ok(Measure::Vwc));
        assert!("humidity".parse::<Measure>().is_err());
    }
}
