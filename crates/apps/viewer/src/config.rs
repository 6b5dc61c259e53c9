use geocore::{LonLat, lon_lat_to_mercator, transform_extent};
use interact::{Session, SessionLayers};
use layers::annotations::AnnotationLayer;
use layers::raster::{RasterLayer, TileUrlTemplate};
use layers::wms::{WmsLayer, WmsSource};
use serde::{Deserialize, Serialize};
use viewport::View;

const HELP_TEXT: &str = "The red polygons on the map are areas of higher nature value \
where you can expect higher biodiversity and more rare species. The polygons are \
inventoried by the Swedish Board of Agriculture and the Swedish Forest Agency. Click \
a polygon to display its attribute table; the nature type name can be searched online \
for more information.";

fn default_help_text() -> String {
    HELP_TEXT.to_string()
}

/// Complete map setup: view constraint, start view, and the four-layer stack.
///
/// Loadable from JSON; the built-in default is the Lund municipality viewer
/// this application ships for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Geographic bbox `[lon_min, lat_min, lon_max, lat_max]` constraining
    /// pan/zoom; reprojected once at startup.
    pub geographic_extent: [f64; 4],
    /// Start center as `[lon, lat]` degrees.
    pub center: [f64; 2],
    pub zoom: f64,
    pub aerial_url: String,
    pub base_url: String,
    pub wms: WmsSource,
    #[serde(default = "default_help_text")]
    pub help_text: String,
}

impl MapConfig {
    /// The deployed configuration: Lund municipality, centered over Dalby.
    pub fn lund() -> Self {
        let mut wms = WmsSource::new(
            "https://geoserver.gis.lu.se/geoserver/wms?",
            "KeyBiotopes",
            "Loa_Yuzhu_TUVA",
        );
        wms.extra_params.insert("TILED".into(), "true".into());

        Self {
            // Slightly more than the municipality itself.
            geographic_extent: [13.051695, 55.5, 13.95379, 55.803461],
            center: [13.356374, 55.680635],
            zoom: 12.0,
            aerial_url:
                "https://services.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
                    .into(),
            base_url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
            wms,
            help_text: default_help_text(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Builds the session: reprojects the extent, composes the layer stack in
    /// paint order (aerial, base, annotations, thematic), and wires the
    /// coordinators.
    pub fn into_session(self) -> Session {
        let extent = transform_extent(self.geographic_extent);
        let center = lon_lat_to_mercator(LonLat::new(self.center[0], self.center[1]));
        let view = View::new(center, self.zoom, Some(extent));

        let layers = SessionLayers {
            aerial: RasterLayer::new(1, TileUrlTemplate::new(self.aerial_url)),
            base: RasterLayer::new(2, TileUrlTemplate::new(self.base_url)),
            annotations: AnnotationLayer::new(3),
            thematic: WmsLayer::new(4, self.wms),
        };

        Session::new(view, layers, self.help_text)
    }
}

#[cfg(test)]
mod tests {
    use super::MapConfig;
    use pretty_assertions::assert_eq;

    #[test]
    fn lund_config_round_trips_through_json() {
        let config = MapConfig::lund();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = MapConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn help_text_defaults_when_omitted() {
        let json = r#"{
            "geographic_extent": [13.0, 55.5, 14.0, 55.8],
            "center": [13.5, 55.65],
            "zoom": 11.0,
            "aerial_url": "https://a.example/{z}/{y}/{x}",
            "base_url": "https://b.example/{z}/{x}/{y}.png",
            "wms": {
                "url": "https://wms.example/?",
                "layers": "KeyBiotopes",
                "styles": ""
            }
        }"#;
        let config = MapConfig::from_json(json).unwrap();
        assert!(config.help_text.contains("nature value"));
        assert!(config.wms.extra_params.is_empty());
    }

    #[test]
    fn session_composes_four_layers_with_constrained_view() {
        let session = MapConfig::lund().into_session();
        assert_eq!(session.layer_order().len(), 4);
        let extent = session.map().view().extent().expect("extent set");
        assert!(extent.contains(session.map().view().center()));
    }
}
