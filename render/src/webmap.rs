//! Self-contained interactive web maps.
//!
//! A [`WebMap`] is one or two Leaflet panels written into a single
//! HTML file. Library assets come from a CDN; markers, popup
//! fragments, data-URI raster overlays, and legends are embedded as a
//! JSON payload read by a fixed driver script. Two panels mirror each
//! other's view state.

use crate::{overlay, RenderError};
use geo::geometry::Coord;
use log::debug;
use serde::Serialize;
use std::path::Path;

const OVERLAY_OPACITY: f64 = 0.85;
const MIN_ZOOM: u8 = 3;
const MAX_ZOOM: u8 = 18;

/// Continuous-ramp legend shown next to an overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: String,
    /// CSS color stops, low value first.
    pub stops: Vec<String>,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize)]
struct MarkerSpec {
    lat: f64,
    lon: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    popup: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct OverlaySpec {
    url: String,
    /// [[south, west], [north, east]], Leaflet bounds order.
    bounds: [[f64; 2]; 2],
    opacity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    legend: Option<Legend>,
}

/// One map panel under construction.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    label: String,
    markers: Vec<MarkerSpec>,
    overlays: Vec<OverlaySpec>,
}

impl Panel {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            markers: Vec::new(),
            overlays: Vec::new(),
        }
    }

    /// Adds a marker at geographic `(lon, lat)`, with optional popup
    /// HTML.
    pub fn add_marker(&mut self, coord: Coord<f64>, popup: Option<String>) {
        self.markers.push(MarkerSpec {
            lat: coord.y,
            lon: coord.x,
            popup,
        });
    }

    /// Adds an image overlay spanning geographic `(sw, ne)` corners.
    pub fn add_overlay(&mut self, png: &[u8], sw: Coord<f64>, ne: Coord<f64>, legend: Option<Legend>) {
        self.overlays.push(OverlaySpec {
            url: overlay::data_uri(png),
            bounds: [[sw.y, sw.x], [ne.y, ne.x]],
            opacity: OVERLAY_OPACITY,
            legend,
        });
    }
}

#[derive(Debug, Clone, Serialize)]
struct PanelPayload {
    label: String,
    /// (lat, lon), Leaflet order.
    center: [f64; 2],
    zoom: u8,
    markers: Vec<MarkerSpec>,
    overlays: Vec<OverlaySpec>,
}

#[derive(Debug, Clone, Serialize)]
struct Payload {
    title: String,
    sync: bool,
    panels: Vec<PanelPayload>,
}

/// Builder for a one- or two-panel interactive map artifact.
#[derive(Debug, Clone, Default)]
pub struct WebMap {
    title: String,
    panels: Vec<Panel>,
}

impl WebMap {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            panels: Vec::new(),
        }
    }

    pub fn add_panel(&mut self, panel: Panel) -> &mut Self {
        self.panels.push(panel);
        self
    }

    /// Renders the complete HTML document.
    pub fn to_html(&self) -> Result<String, RenderError> {
        if self.panels.is_empty() || self.panels.len() > 2 {
            return Err(RenderError::PanelCount(self.panels.len()));
        }

        let panels: Vec<PanelPayload> = self
            .panels
            .iter()
            .map(|panel| {
                let (center, zoom) = frame(panel);
                PanelPayload {
                    label: panel.label.clone(),
                    center,
                    zoom,
                    markers: panel.markers.clone(),
                    overlays: panel.overlays.clone(),
                }
            })
            .collect();

        let payload = Payload {
            title: self.title.clone(),
            sync: panels.len() == 2,
            panels,
        };

        // Keep the embedded JSON from terminating the script element
        // early via a literal "</script>".
        let json = serde_json::to_string(&payload)?.replace("</", "<\\/");

        Ok(TEMPLATE
            .replace("__TITLE__", &crate::popup::escape(&self.title))
            .replace("__PAYLOAD__", &json))
    }

    /// Writes the HTML artifact to `path`.
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        let html = self.to_html()?;
        std::fs::write(path, html)?;
        debug!("wrote web map; panels: {}, out: {path:?}", self.panels.len());
        Ok(())
    }
}

/// Picks a center and zoom framing everything the panel shows.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn frame(panel: &Panel) -> ([f64; 2], u8) {
    let mut lats: Vec<f64> = panel.markers.iter().map(|m| m.lat).collect();
    let mut lons: Vec<f64> = panel.markers.iter().map(|m| m.lon).collect();
    for overlay in &panel.overlays {
        for corner in overlay.bounds {
            lats.push(corner[0]);
            lons.push(corner[1]);
        }
    }

    let (Some(lat_lo), Some(lat_hi), Some(lon_lo), Some(lon_hi)) = (
        fold_min(&lats),
        fold_max(&lats),
        fold_min(&lons),
        fold_max(&lons),
    ) else {
        return ([0.0, 0.0], MIN_ZOOM);
    };

    let center = [(lat_lo + lat_hi) / 2.0, (lon_lo + lon_hi) / 2.0];
    let span = (lat_hi - lat_lo).max(lon_hi - lon_lo);
    let zoom = if span <= 0.0 {
        MAX_ZOOM - 2
    } else {
        ((360.0 / span).log2().floor() as i64).clamp(i64::from(MIN_ZOOM), i64::from(MAX_ZOOM))
            as u8
    };
    (center, zoom)
}

fn fold_min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

fn fold_max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

const TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <meta name="viewport" content="width=device-width, initial-scale=1.0"/>
  <title>__TITLE__</title>
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.css"/>
  <script src="https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.9.4/leaflet.js"></script>
  <style>
    html, body { height: 100%; margin: 0; font-family: system-ui, sans-serif; }
    #panels { display: flex; height: 100%; }
    .panel { position: relative; flex: 1; }
    .panel + .panel { border-left: 2px solid #fff; }
    .panel .map { position: absolute; inset: 0; }
    .panel-label {
      position: absolute; top: 8px; left: 50%; transform: translateX(-50%);
      z-index: 1000; background: rgba(255,255,255,.88);
      padding: 2px 10px; border-radius: 4px; font-size: 13px;
    }
    .cell-overlay { image-rendering: pixelated; }
    .legend {
      background: rgba(255,255,255,.92); padding: 6px 8px;
      border-radius: 4px; font-size: 12px; line-height: 1.25; text-align: center;
    }
    .legend .bar { width: 16px; height: 110px; margin: 4px auto; }
    .popup-attrs th { text-align: left; padding-right: 10px; }
    .popup-graph svg { display: block; margin-top: 4px; }
  </style>
</head>
<body>
  <div id="panels"></div>
  <script>
    const PAYLOAD = __PAYLOAD__;

    const maps = [];
    const container = document.getElementById('panels');

    PAYLOAD.panels.forEach((panel, i) => {
      const slot = document.createElement('div');
      slot.className = 'panel';
      const mapDiv = document.createElement('div');
      mapDiv.className = 'map';
      mapDiv.id = 'map' + i;
      slot.appendChild(mapDiv);
      if (panel.label) {
        const label = document.createElement('div');
        label.className = 'panel-label';
        label.textContent = panel.label;
        slot.appendChild(label);
      }
      container.appendChild(slot);

      const map = L.map(mapDiv.id).setView(panel.center, panel.zoom);
      L.tileLayer('https://tile.openstreetmap.org/{z}/{x}/{y}.png', {
        maxZoom: 19,
        attribution: '&copy; OpenStreetMap contributors'
      }).addTo(map);

      panel.overlays.forEach((spec) => {
        L.imageOverlay(spec.url, spec.bounds, {
          opacity: spec.opacity,
          className: 'cell-overlay'
        }).addTo(map);
        if (spec.legend) {
          const control = L.control({position: 'bottomright'});
          control.onAdd = () => {
            const div = L.DomUtil.create('div', 'legend');
            const gradient = spec.legend.stops.join(', ');
            div.innerHTML =
              '<div>' + spec.legend.title + '</div>' +
              '<div>' + spec.legend.max.toPrecision(4) + '</div>' +
              '<div class="bar" style="background: linear-gradient(to top, ' + gradient + ')"></div>' +
              '<div>' + spec.legend.min.toPrecision(4) + '</div>';
            return div;
          };
          control.addTo(map);
        }
      });

      panel.markers.forEach((spec) => {
        const marker = L.marker([spec.lat, spec.lon]).addTo(map);
        if (spec.popup) {
          marker.bindPopup(spec.popup, {maxWidth: 470});
        }
      });

      maps.push(map);
    });

    if (PAYLOAD.sync && maps.length === 2) {
      let mirroring = false;
      const follow = (from, to) => {
        from.on('move zoomend', () => {
          if (mirroring) return;
          mirroring = true;
          to.setView(from.getCenter(), from.getZoom(), {animate: false});
          mirroring = false;
        });
      };
      follow(maps[0], maps[1]);
      follow(maps[1], maps[0]);
    }
  </script>
</body>
</html>
"#;
