use geocore::Vec2;

/// Anchor placement of an overlay relative to its map position.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Positioning {
    /// The overlay's bottom-center sits on the anchored coordinate.
    #[default]
    BottomCenter,
}

/// A floating label anchored to a map coordinate, outside the tile/vector
/// paint pipeline. Empty text is a bare position marker.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelOverlay {
    pub position: Vec2,
    pub text: String,
    pub positioning: Positioning,
    /// Pan animation used when the overlay would land outside the viewport.
    pub auto_pan_duration_ms: u32,
}

impl LabelOverlay {
    pub fn new(position: Vec2, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
            positioning: Positioning::BottomCenter,
            auto_pan_duration_ms: 250,
        }
    }
}

/// Overlays created during the session, in creation order.
///
/// There is deliberately no removal path: overlays are session-scoped and live
/// until teardown.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct OverlayStack {
    overlays: Vec<LabelOverlay>,
}

impl OverlayStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, overlay: LabelOverlay) {
        self.overlays.push(overlay);
    }

    pub fn overlays(&self) -> &[LabelOverlay] {
        &self.overlays
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}
