use geocore::Vec2;
use layers::wms::{WmsLayer, WmsSource};
use viewport::{Cursor, MapViewport, PointerEvent, View};

/// Projection the viewport works in; every query URL is built against it.
pub const VIEW_CRS: &str = "EPSG:3857";
/// Response format requested for feature info; injected verbatim into the panel.
pub const INFO_FORMAT_HTML: &str = "text/html";

/// The result panel feature-info markup is written into.
///
/// A write-only, last-write-wins sink: responses from racing fetches may
/// overwrite each other and the later one stands.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InfoPanel {
    html: String,
}

impl InfoPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn clear(&mut self) {
        self.html.clear();
    }

    pub fn set_html(&mut self, html: &str) {
        self.html = html.to_string();
    }
}

/// Click half of the feature-query contract.
///
/// Clears the panel, then builds the GetFeatureInfo URL for the clicked
/// coordinate at the view's current resolution. `None` means the layer is not
/// queryable here: nothing further happens, the cleared panel stands.
pub fn click_query(
    source: &WmsSource,
    view: &View,
    coordinate: Vec2,
    panel: &mut InfoPanel,
) -> Option<String> {
    panel.clear();
    source.feature_info_url(coordinate, view.resolution(), VIEW_CRS, INFO_FORMAT_HTML)
}

/// Applies a completed fetch to the panel, markup verbatim.
pub fn apply_query_response(panel: &mut InfoPanel, html: &str) {
    panel.set_html(html);
}

/// Hover half of the feature-query contract: a pure, per-event cursor
/// decision with no network access.
///
/// During a pan-drag the probe is suppressed and the cursor left untouched.
/// Otherwise the thematic layer's rendered pixel decides: alpha above zero is
/// a hit and gets the pointer affordance.
pub fn update_hover_cursor(map: &mut MapViewport, layer: &WmsLayer, event: &PointerEvent) {
    if event.dragging {
        return;
    }
    let hit = layer
        .data_at_pixel(event.pixel)
        .is_some_and(|rgba| rgba[3] > 0);
    map.set_cursor(if hit { Cursor::Pointer } else { Cursor::Default });
}

#[cfg(test)]
mod tests {
    use super::{InfoPanel, apply_query_response, click_query, update_hover_cursor};
    use geocore::Vec2;
    use layers::wms::{PixelBuffer, WmsLayer, WmsSource};
    use pretty_assertions::assert_eq;
    use viewport::{Cursor, MapViewport, PointerEvent, View};

    fn source() -> WmsSource {
        WmsSource::new("https://example.com/wms?", "KeyBiotopes", "")
    }

    fn layer_with_alpha(alpha: u8) -> WmsLayer {
        let mut layer = WmsLayer::new(4, source());
        let mut rgba = vec![0u8; 2 * 2 * 4];
        rgba[3] = alpha; // pixel (0, 0)
        layer.set_rendered(PixelBuffer::new([2, 2], rgba).unwrap());
        layer
    }

    #[test]
    fn click_clears_panel_before_building_url() {
        let view = View::new(Vec2::new(0.0, 0.0), 12.0, None);
        let mut panel = InfoPanel::new();
        panel.set_html("<p>old</p>");
        let url = click_query(&source(), &view, Vec2::new(100.0, 200.0), &mut panel);
        assert_eq!(panel.html(), "");
        let url = url.expect("queryable");
        assert!(url.contains("REQUEST=GetFeatureInfo"));
        assert!(url.contains("CRS=EPSG:3857"));
    }

    #[test]
    fn unqueryable_layer_clears_panel_and_yields_no_url() {
        let mut src = source();
        src.max_resolution = Some(1.0); // zoom 12 resolution is well above this
        let view = View::new(Vec2::new(0.0, 0.0), 12.0, None);
        let mut panel = InfoPanel::new();
        panel.set_html("stale");
        assert_eq!(click_query(&src, &view, Vec2::new(0.0, 0.0), &mut panel), None);
        assert_eq!(panel.html(), "");
    }

    #[test]
    fn url_resolution_tracks_view_zoom() {
        let near = View::new(Vec2::new(0.0, 0.0), 14.0, None);
        let far = View::new(Vec2::new(0.0, 0.0), 8.0, None);
        let mut panel = InfoPanel::new();
        let u_near = click_query(&source(), &near, Vec2::new(0.0, 0.0), &mut panel).unwrap();
        let u_far = click_query(&source(), &far, Vec2::new(0.0, 0.0), &mut panel).unwrap();
        // Lower zoom means coarser resolution and a wider bbox.
        assert_ne!(u_near, u_far);
    }

    #[test]
    fn responses_land_verbatim_last_write_wins() {
        let mut panel = InfoPanel::new();
        apply_query_response(&mut panel, "<table>first</table>");
        apply_query_response(&mut panel, "<table>second</table>");
        assert_eq!(panel.html(), "<table>second</table>");
    }

    #[test]
    fn opaque_pixel_sets_pointer_cursor() {
        let mut map = MapViewport::new(View::new(Vec2::new(0.0, 0.0), 12.0, None));
        let layer = layer_with_alpha(255);
        update_hover_cursor(&mut map, &layer, &PointerEvent::new([0.0, 0.0], Vec2::new(0.0, 0.0)));
        assert_eq!(map.cursor(), Cursor::Pointer);
    }

    #[test]
    fn transparent_pixel_clears_cursor() {
        let mut map = MapViewport::new(View::new(Vec2::new(0.0, 0.0), 12.0, None));
        map.set_cursor(Cursor::Pointer);
        let layer = layer_with_alpha(0);
        update_hover_cursor(&mut map, &layer, &PointerEvent::new([0.0, 0.0], Vec2::new(0.0, 0.0)));
        assert_eq!(map.cursor(), Cursor::Default);
    }

    #[test]
    fn dragging_suppresses_the_probe() {
        let mut map = MapViewport::new(View::new(Vec2::new(0.0, 0.0), 12.0, None));
        map.set_cursor(Cursor::Pointer);
        let layer = layer_with_alpha(0);
        let event = PointerEvent::new([0.0, 0.0], Vec2::new(0.0, 0.0)).dragging();
        update_hover_cursor(&mut map, &layer, &event);
        assert_eq!(map.cursor(), Cursor::Pointer);
    }

    #[test]
    fn pixel_outside_rendered_frame_is_a_miss() {
        let mut map = MapViewport::new(View::new(Vec2::new(0.0, 0.0), 12.0, None));
        map.set_cursor(Cursor::Pointer);
        let layer = layer_with_alpha(255);
        update_hover_cursor(&mut map, &layer, &PointerEvent::new([50.0, 50.0], Vec2::new(0.0, 0.0)));
        assert_eq!(map.cursor(), Cursor::Default);
    }
}
