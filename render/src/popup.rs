//! Popup HTML fragments for web-map markers.

use layers::{PointCollection, SitePoint};

/// Renders a record's attributes as a small two-column table.
pub fn attribute_table(points: &PointCollection, point: &SitePoint) -> String {
    let mut html = String::from("<table class=\"popup-attrs\">");
    for (name, value) in points.attr_names().iter().zip(&point.attrs) {
        html.push_str("<tr><th>");
        html.push_str(&escape(name));
        html.push_str("</th><td>");
        html.push_str(&escape(&value.to_string()));
        html.push_str("</td></tr>");
    }
    html.push_str("</table>");
    html
}

/// Wraps an inline SVG chart for display inside a popup.
pub fn graph_popup(title: &str, svg: &str) -> String {
    format!(
        "<div class=\"popup-graph\"><strong>{}</strong>{svg}</div>",
        escape(title)
    )
}

/// Minimal HTML escaping for text dropped into generated markup.
pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{attribute_table, escape, graph_popup};
    use layers::PointCollection;
    use survey::Survey;

    #[test]
    fn test_attribute_table_lists_all_attrs() {
        let survey = Survey::load().unwrap();
        let pc =
            PointCollection::from_table(&survey.sites, survey.crs, "easting", "northing").unwrap();
        let html = attribute_table(&pc, &pc.points()[0]);
        assert!(html.starts_with("<table"));
        for name in pc.attr_names() {
            assert!(html.contains(&format!("<th>{name}</th>")));
        }
        assert!(html.contains("CAF001"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_graph_popup_keeps_svg_verbatim() {
        let html = graph_popup("CAF001 <vwc>", "<svg>x</svg>");
        assert!(html.contains("CAF001 &lt;vwc&gt;"));
        assert!(html.contains("<svg>x</svg>"));
    }
}
