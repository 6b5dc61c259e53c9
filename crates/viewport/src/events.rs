use geocore::Vec2;

/// Pointer state captured at dispatch time: css-pixel position, the map
/// coordinate under it, and whether a pan-drag is in progress.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    pub pixel: [f64; 2],
    pub coordinate: Vec2,
    pub dragging: bool,
}

impl PointerEvent {
    pub fn new(pixel: [f64; 2], coordinate: Vec2) -> Self {
        Self {
            pixel,
            coordinate,
            dragging: false,
        }
    }

    pub fn dragging(mut self) -> Self {
        self.dragging = true;
        self
    }
}

/// A discrete input event, recorded as data and routed by the session pump.
///
/// Keeping events as plain values (rather than registered closures) preserves
/// single-threaded ordering and keeps every handler testable in isolation.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A single discrete click, not a drag-release.
    SingleClick(PointerEvent),
    PointerMove(PointerEvent),
    /// Secondary-action click; the platform's default menu is already suppressed.
    ContextMenu(PointerEvent),
    /// `input` event from the swipe range control, percent of viewport width.
    SwipeInput(f64),
    /// `change` event from the geometry-type selector; carries the raw control value.
    DrawTypeSelect(String),
    /// Click on the vertex-undo control.
    UndoVertex,
    /// Click on the help control.
    ShowHelp,
}

/// FIFO queue of pending input events, drained once per pump.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }
}
