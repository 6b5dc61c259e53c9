use geocore::{Extent, MERCATOR_HALF_WORLD, Vec2};

/// Resolution (meters per css pixel) at zoom 0 for a 256px Web Mercator pyramid.
pub const BASE_RESOLUTION: f64 = 2.0 * MERCATOR_HALF_WORLD / 256.0;

/// Map view state: center, zoom, and an optional pan/zoom constraint extent.
///
/// The extent is derived once at startup and is immutable afterwards; the
/// center is clamped into it on every mutation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct View {
    center: Vec2,
    zoom: f64,
    extent: Option<Extent>,
}

impl View {
    pub fn new(center: Vec2, zoom: f64, extent: Option<Extent>) -> Self {
        let mut view = Self {
            center,
            zoom,
            extent,
        };
        view.set_center(center);
        view
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn extent(&self) -> Option<Extent> {
        self.extent
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.center = match self.extent {
            Some(e) => e.clamp_point(center),
            None => center,
        };
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.max(0.0);
    }

    /// Meters per css pixel at the current zoom.
    pub fn resolution(&self) -> f64 {
        BASE_RESOLUTION / self.zoom.exp2()
    }
}
