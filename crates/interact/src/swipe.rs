use layers::LayerId;
use viewport::{MapViewport, RenderPass};

/// Restricts the paint of one designated base layer to the part of the
/// viewport right of a user-controlled vertical divider, producing a
/// side-by-side comparison against the layers beneath it.
///
/// `on_prerender`/`on_postrender` must bracket the swiped layer's paint; the
/// clip is expressed in render pixels and is only valid inside that pair.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeClip {
    layer: LayerId,
    fraction_pct: f64,
}

impl SwipeClip {
    pub fn new(layer: LayerId) -> Self {
        Self {
            layer,
            fraction_pct: 50.0,
        }
    }

    /// The layer whose paint gets clipped.
    pub fn layer(&self) -> LayerId {
        self.layer
    }

    /// Divider position as percent of viewport width.
    pub fn fraction(&self) -> f64 {
        self.fraction_pct
    }

    /// Stores a new divider position and requests a repaint, so the visible
    /// divider never goes stale waiting for an unrelated render.
    pub fn set_fraction(&mut self, pct: f64, map: &mut MapViewport) {
        self.fraction_pct = pct.clamp(0.0, 100.0);
        map.request_render();
    }

    /// Saves drawing state and installs the clip region for the swiped layer.
    ///
    /// Skipped entirely while the viewport size is unknown; the layer then
    /// paints unclipped rather than failing the render.
    pub fn on_prerender(&self, map: &MapViewport, pass: &mut RenderPass) {
        let Some(size) = map.size() else {
            return;
        };
        let w = size[0] as f64;
        let h = size[1] as f64;
        let x = w * (self.fraction_pct / 100.0);

        let tl = pass.render_pixel([x, 0.0]);
        let bl = pass.render_pixel([x, h]);
        let br = pass.render_pixel([w, h]);
        let tr = pass.render_pixel([w, 0.0]);

        let ctx = pass.ctx();
        ctx.save();
        ctx.clip_quad([tl, bl, br, tr]);
    }

    /// Restores the drawing state saved in `on_prerender` so later layers
    /// paint unclipped.
    pub fn on_postrender(&self, map: &MapViewport, pass: &mut RenderPass) {
        if map.size().is_none() {
            return;
        }
        pass.ctx().restore();
    }
}
