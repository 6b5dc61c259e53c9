use geocore::Vec2;

use crate::view::View;

/// Cursor affordance on the map's target surface.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

/// Viewport state shared by every coordinator: view, pixel size, device pixel
/// ratio, cursor style, and a render-request flag.
///
/// The size is `None` until the host surface reports one; consumers that
/// depend on it (the swipe clip) must skip their work for that cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct MapViewport {
    view: View,
    size: Option<[u32; 2]>,
    pixel_ratio: f64,
    cursor: Cursor,
    render_requested: bool,
}

impl MapViewport {
    pub fn new(view: View) -> Self {
        Self {
            view,
            size: None,
            pixel_ratio: 1.0,
            cursor: Cursor::Default,
            render_requested: false,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    /// Viewport size in css pixels, if the host surface has reported one.
    pub fn size(&self) -> Option<[u32; 2]> {
        self.size
    }

    pub fn set_size(&mut self, size: [u32; 2]) {
        self.size = Some(size);
        self.render_requested = true;
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn set_pixel_ratio(&mut self, ratio: f64) {
        if ratio > 0.0 {
            self.pixel_ratio = ratio;
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// Marks the viewport as needing a repaint.
    pub fn request_render(&mut self) {
        self.render_requested = true;
    }

    /// Consumes the pending repaint request, if any.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    /// Map coordinate under a css-pixel position. `None` until a size is known.
    pub fn coordinate_at_pixel(&self, pixel: [f64; 2]) -> Option<Vec2> {
        let size = self.size?;
        let res = self.view.resolution();
        let half_w = size[0] as f64 / 2.0;
        let half_h = size[1] as f64 / 2.0;
        let center = self.view.center();
        // Screen y grows downward, map y grows upward.
        Some(Vec2::new(
            center.x + (pixel[0] - half_w) * res,
            center.y - (pixel[1] - half_h) * res,
        ))
    }

    /// Css-pixel position of a map coordinate. `None` until a size is known.
    pub fn pixel_for_coordinate(&self, coordinate: Vec2) -> Option<[f64; 2]> {
        let size = self.size?;
        let res = self.view.resolution();
        let half_w = size[0] as f64 / 2.0;
        let half_h = size[1] as f64 / 2.0;
        let center = self.view.center();
        Some([
            half_w + (coordinate.x - center.x) / res,
            half_h - (coordinate.y - center.y) / res,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::{Cursor, MapViewport};
    use crate::view::View;
    use geocore::Vec2;

    fn viewport() -> MapViewport {
        let mut map = MapViewport::new(View::new(Vec2::new(0.0, 0.0), 12.0, None));
        map.set_size([800, 600]);
        let _ = map.take_render_request();
        map
    }

    #[test]
    fn pixel_transforms_are_unavailable_without_size() {
        let map = MapViewport::new(View::new(Vec2::new(0.0, 0.0), 12.0, None));
        assert!(map.coordinate_at_pixel([10.0, 10.0]).is_none());
        assert!(map.pixel_for_coordinate(Vec2::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn viewport_center_pixel_maps_to_view_center() {
        let map = viewport();
        let c = map.coordinate_at_pixel([400.0, 300.0]).unwrap();
        assert_eq!(c, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn pixel_round_trip() {
        let map = viewport();
        let coord = map.coordinate_at_pixel([123.0, 456.0]).unwrap();
        let px = map.pixel_for_coordinate(coord).unwrap();
        assert!((px[0] - 123.0).abs() < 1e-9);
        assert!((px[1] - 456.0).abs() < 1e-9);
    }

    #[test]
    fn screen_y_down_is_map_y_down() {
        let map = viewport();
        let top = map.coordinate_at_pixel([400.0, 0.0]).unwrap();
        let bottom = map.coordinate_at_pixel([400.0, 600.0]).unwrap();
        assert!(top.y > bottom.y);
    }

    #[test]
    fn render_request_is_consumed_once() {
        let mut map = viewport();
        map.request_render();
        assert!(map.take_render_request());
        assert!(!map.take_render_request());
    }

    #[test]
    fn cursor_defaults_to_plain() {
        assert_eq!(viewport().cursor(), Cursor::Default);
    }
}
