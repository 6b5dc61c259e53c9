/// Drawing-state surface a layer paint runs against.
///
/// Only the operations the paint hooks need: save/restore of drawing state and
/// installing a clip region. The concrete backend (canvas, GPU scissor, test
/// recorder) is the host's concern.
pub trait RenderContext {
    fn save(&mut self);
    /// Restricts subsequent drawing to the given quadrilateral, expressed in
    /// render pixels. Valid only until the matching `restore`.
    fn clip_quad(&mut self, corners: [[f64; 2]; 4]);
    fn restore(&mut self);
}

/// One paint cycle of one layer.
///
/// Wraps the drawing context together with the device pixel ratio so hooks can
/// map css pixels into the rendering surface's own pixel space.
pub struct RenderPass<'a> {
    ctx: &'a mut dyn RenderContext,
    pixel_ratio: f64,
}

impl<'a> RenderPass<'a> {
    pub fn new(ctx: &'a mut dyn RenderContext, pixel_ratio: f64) -> Self {
        Self { ctx, pixel_ratio }
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Maps a css-pixel position into render pixels for this pass.
    pub fn render_pixel(&self, css_pixel: [f64; 2]) -> [f64; 2] {
        [
            css_pixel[0] * self.pixel_ratio,
            css_pixel[1] * self.pixel_ratio,
        ]
    }

    pub fn ctx(&mut self) -> &mut dyn RenderContext {
        self.ctx
    }
}
