use crate::LayerError;
use chrono::{DateTime, Utc};
use log::debug;
use survey::{Measure, Reading};

/// One site's history for a single measurement, in reading order.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSeries {
    pub site: String,
    pub measure: Measure,
    pub samples: Vec<(DateTime<Utc>, f64)>,
}

impl SiteSeries {
    /// Extracts `site`'s `measure` values from the readings table.
    pub fn extract(
        readings: &[Reading],
        site: &str,
        measure: Measure,
    ) -> Result<Self, LayerError> {
        let samples: Vec<(DateTime<Utc>, f64)> = readings
            .iter()
            .filter(|r| r.site == site)
            .map(|r| (r.timestamp, measure.of(r)))
            .collect();
        if samples.is_empty() {
            return Err(LayerError::UnknownSite(site.to_owned()));
        }
        debug!("extracted series; site: {site}, samples: {}", samples.len());
        Ok(Self {
            site: site.to_owned(),
            measure,
            samples,
        })
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Smallest and largest value.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.samples.iter().map(|(_, v)| *v).fold(None, |acc, v| {
            Some(match acc {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            })
        })
    }

    /// First and last timestamp.
    pub fn time_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.samples.first(), self.samples.last()) {
            (Some((start, _)), Some((end, _))) => Some((*start, *end)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SiteSeries;
    use crate::LayerError;
    use survey::{Measure, Survey};

    #[test]
    fn test_extract_preserves_order_and_count() {
        let survey = Survey::load().unwrap();
        let series = SiteSeries::extract(&survey.readings, "CAF001", Measure::Vwc).unwrap();
        assert_eq!(series.len(), 120);

        let expected: Vec<f64> = survey
            .readings
            .iter()
            .filter(|r| r.site == "CAF001")
            .map(|r| r.vwc)
            .collect();
        let got: Vec<f64> = series.samples.iter().map(|(_, v)| *v).collect();
        assert_eq!(got, expected);

        let (start, end) = series.time_range().unwrap();
        assert!(start < end);
    }

    #[test]
    fn test_unknown_site() {
        let survey = Survey::load().unwrap();
        assert!(matches!(
            SiteSeries::extract(&survey.readings, "CAF099", Measure::TempC).unwrap_err(),
            LayerError::UnknownSite(_)
        ));
    }

    #[test]
    fn test_value_range() {
        let survey = Survey::load().unwrap();
        let series = SiteSeries::extract(&survey.readings, "CAF002", Measure::TempC).unwrap();
        let (lo, hi) = series.value_range().unwrap();
        assert!(lo < hi);
        assert!(lo > -10.0 && hi < 40.0);
    }
}
