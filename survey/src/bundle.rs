use crate::{Crs, GridTable, Reading, SiteTable, SurveyError};
use log::debug;

const CRS: &str = "EPSG:26911";
const SITES_JSON: &str = include_str!("../data/sites.json");
const GRID_JSON: &str = include_str!("../data/grid.json");
const READINGS_JSON: &str = include_str!("../data/readings.json");

/// The bundled survey: three sub-tables plus the CRS they share.
///
/// Loaded once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Survey {
    pub crs: Crs,
    pub sites: SiteTable,
    pub grid: GridTable,
    pub readings: Vec<Reading>,
}

impl Survey {
    /// Parses the embedded dataset.
    pub fn load() -> Result<Self, SurveyError> {
        let crs: Crs = CRS.parse()?;
        if crs.utm_zone().is_none() {
            return Err(SurveyError::UnsupportedCrs(crs.to_string()));
        }

        let sites: SiteTable = serde_json::from_str(SITES_JSON)?;
        sites.validate("sites")?;

        let grid: GridTable = serde_json::from_str(GRID_JSON)?;
        grid.validate("grid")?;

        let readings: Vec<Reading> = serde_json::from_str(READINGS_JSON)?;

        debug!(
            "loaded survey; crs: {crs}, sites: {}, grid cells: {}, readings: {}",
            sites.len(),
            grid.len(),
            readings.len(),
        );

        Ok(Self {
            crs,
            sites,
            grid,
            readings,
        })
    }

    /// Site identifiers, in sites-table order.
    pub fn site_ids(&self) -> Vec<&str> {
        let idx = self.sites.column_index("site").unwrap_or(0);
        self.sites
            .rows
            .iter()
            .filter_map(|row| row[idx].as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Survey;

    #[test]
    fn test_load() {
        let survey = Survey::load().unwrap();
        assert_eq!(survey.crs.to_string(), "EPSG:26911");
        assert_eq!(survey.sites.len(), 12);
        assert_eq!(survey.grid.len(), 1065);
        assert_eq!(survey.readings.len(), 1440);
    }

    #[test]
    fn test_site_table_shape() {
        let survey = Survey::load().unwrap();
        assert_eq!(
            survey.sites.columns,
            ["site", "easting", "northing", "zone", "soil", "om_pct", "depth_cm"]
        );
        // Site ids are unique.
        let mut ids = survey.site_ids();
        assert_eq!(ids.len(), 12);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 12);
    }

    #[test]
    fn test_grid_coordinate_columns_come_first() {
        let survey = Survey::load().unwrap();
        assert_eq!(&survey.grid.columns[..2], ["x", "y"]);
        assert_eq!(
            survey.grid.columns,
            ["x", "y", "dem", "twi", "eca_sh", "eca_dp"]
        );
    }

    #[test]
    fn test_readings_are_chronological_per_site() {
        let survey = Survey::load().unwrap();
        for id in survey.site_ids() {
            let mut last = None;
            for reading in survey.readings.iter().filter(|r| r.site == id) {
                if let Some(prev) = last {
                    assert!(reading.timestamp > prev, "out of order at {id}");
                }
                last = Some(reading.timestamp);
            }
        }
    }

    #[test]
    fn test_every_reading_belongs_to_a_site() {
        let survey = Survey::load().unwrap();
        let ids = survey.site_ids();
        for reading in &survey.readings {
            assert!(ids.contains(&reading.site.as_str()));
        }
    }
}
