use geocore::Vec2;
use layers::overlay::{LabelOverlay, OverlayStack};

/// Modal text input shown when the user right-clicks the map.
///
/// `Some` is a confirmed answer (possibly empty), `None` is a cancel. The
/// caller blocks on the answer, matching the synchronous prompt contract.
pub trait LabelPrompt {
    fn request_text(&mut self) -> Option<String>;
}

/// Prompt with a preset answer, for scripted sessions and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct CannedPrompt {
    pub answer: Option<String>,
}

impl CannedPrompt {
    pub fn confirmed(text: impl Into<String>) -> Self {
        Self {
            answer: Some(text.into()),
        }
    }

    pub fn cancelled() -> Self {
        Self { answer: None }
    }
}

impl LabelPrompt for CannedPrompt {
    fn request_text(&mut self) -> Option<String> {
        self.answer.clone()
    }
}

/// Creates a label overlay at the right-clicked coordinate.
///
/// A cancelled prompt creates nothing; an empty confirmed answer still creates
/// a bare position marker. Returns whether an overlay was added.
pub fn create_label_at(
    prompt: &mut dyn LabelPrompt,
    coordinate: Vec2,
    overlays: &mut OverlayStack,
) -> bool {
    let Some(text) = prompt.request_text() else {
        return false;
    };
    overlays.add(LabelOverlay::new(coordinate, text));
    true
}
