use std::cell::RefCell;
use std::rc::Rc;

use geocore::Vec2;
use layers::annotations::{AnnotationGeometry, AnnotationSource, GeometryKind};

/// Value of the geometry-type selector control. `Feat` (and any unknown
/// value) is the disabling sentinel: no interaction is active.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrawSelection {
    Inactive,
    Draw(GeometryKind),
}

impl DrawSelection {
    pub fn from_control_value(value: &str) -> Self {
        match value {
            "Point" => DrawSelection::Draw(GeometryKind::Point),
            "LineString" => DrawSelection::Draw(GeometryKind::LineString),
            "Polygon" => DrawSelection::Draw(GeometryKind::Polygon),
            "Circle" => DrawSelection::Draw(GeometryKind::Circle),
            _ => DrawSelection::Inactive,
        }
    }
}

/// One in-progress drawing interaction bound to a geometry type.
///
/// Points complete on the first placed vertex and circles on the second
/// (center, then an edge point); lines and polygons collect vertices until an
/// explicit finish.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawInteraction {
    kind: GeometryKind,
    sketch: Vec<Vec2>,
}

impl DrawInteraction {
    fn new(kind: GeometryKind) -> Self {
        Self {
            kind,
            sketch: Vec::new(),
        }
    }

    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    pub fn sketch(&self) -> &[Vec2] {
        &self.sketch
    }

    /// Adds a vertex; returns the finished geometry when the kind completes.
    pub fn place_vertex(&mut self, coordinate: Vec2) -> Option<AnnotationGeometry> {
        match self.kind {
            GeometryKind::Point => Some(AnnotationGeometry::Point(coordinate)),
            GeometryKind::Circle => {
                self.sketch.push(coordinate);
                if self.sketch.len() < 2 {
                    return None;
                }
                let center = self.sketch[0];
                let edge = self.sketch[1];
                let d = edge - center;
                self.sketch.clear();
                Some(AnnotationGeometry::Circle {
                    center,
                    radius: (d.x * d.x + d.y * d.y).sqrt(),
                })
            }
            GeometryKind::LineString | GeometryKind::Polygon => {
                self.sketch.push(coordinate);
                None
            }
        }
    }

    /// Removes the most recently placed vertex of the in-progress sketch.
    pub fn remove_last_vertex(&mut self) {
        self.sketch.pop();
    }

    /// Completes a line or polygon sketch. Sketches with too few vertices are
    /// discarded (lines need 2, polygons 3).
    pub fn finish(&mut self) -> Option<AnnotationGeometry> {
        let vertices = std::mem::take(&mut self.sketch);
        match self.kind {
            GeometryKind::LineString if vertices.len() >= 2 => {
                Some(AnnotationGeometry::LineString(vertices))
            }
            GeometryKind::Polygon if vertices.len() >= 3 => {
                Some(AnnotationGeometry::Polygon(vertices))
            }
            _ => None,
        }
    }
}

/// Owns the single active drawing interaction and the shared annotation
/// feature collection.
///
/// The raw interaction handle is never handed out; every mutation goes through
/// `set_active_type`, which tears down the previous interaction before any
/// replacement exists. At most one interaction is ever active.
pub struct DrawCoordinator {
    source: Rc<RefCell<AnnotationSource>>,
    active: Option<DrawInteraction>,
}

impl DrawCoordinator {
    pub fn new(source: Rc<RefCell<AnnotationSource>>) -> Self {
        Self {
            source,
            active: None,
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_kind(&self) -> Option<GeometryKind> {
        self.active.as_ref().map(|i| i.kind())
    }

    pub fn sketch_len(&self) -> usize {
        self.active.as_ref().map_or(0, |i| i.sketch().len())
    }

    /// Replaces the active interaction according to the selector value.
    ///
    /// The current interaction is removed first; selecting the sentinel leaves
    /// none, selecting a kind creates a fresh interaction for it. Re-selecting
    /// the current kind rebuilds an equivalent interaction.
    pub fn set_active_type(&mut self, selection: DrawSelection) {
        self.active = None;
        if let DrawSelection::Draw(kind) = selection {
            self.active = Some(DrawInteraction::new(kind));
        }
    }

    /// Routes a map click into the active interaction, committing any
    /// geometry it completes. No-op while idle.
    pub fn place_vertex(&mut self, coordinate: Vec2) {
        let Some(interaction) = &mut self.active else {
            return;
        };
        if let Some(geometry) = interaction.place_vertex(coordinate) {
            self.source.borrow_mut().push(geometry);
        }
    }

    /// Undoes the most recent vertex of the in-progress draw. Guarded no-op
    /// while idle; calling undo with no interaction is a usage error, not a
    /// crash.
    pub fn undo_vertex(&mut self) {
        let Some(interaction) = &mut self.active else {
            return;
        };
        interaction.remove_last_vertex();
    }

    /// Completes the in-progress line or polygon, committing it to the source.
    pub fn finish_sketch(&mut self) {
        let Some(interaction) = &mut self.active else {
            return;
        };
        if let Some(geometry) = interaction.finish() {
            self.source.borrow_mut().push(geometry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DrawCoordinator, DrawSelection};
    use geocore::Vec2;
    use layers::annotations::{AnnotationGeometry, AnnotationSource, GeometryKind};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn coordinator() -> (DrawCoordinator, Rc<RefCell<AnnotationSource>>) {
        let source = Rc::new(RefCell::new(AnnotationSource::new()));
        (DrawCoordinator::new(Rc::clone(&source)), source)
    }

    #[test]
    fn sentinel_value_maps_to_inactive() {
        assert_eq!(
            DrawSelection::from_control_value("Feat"),
            DrawSelection::Inactive
        );
        assert_eq!(
            DrawSelection::from_control_value("Polygon"),
            DrawSelection::Draw(GeometryKind::Polygon)
        );
        assert_eq!(
            DrawSelection::from_control_value("garbage"),
            DrawSelection::Inactive
        );
    }

    #[test]
    fn selecting_a_type_activates_exactly_one_interaction() {
        let (mut draw, _) = coordinator();
        draw.set_active_type(DrawSelection::Draw(GeometryKind::LineString));
        assert_eq!(draw.active_kind(), Some(GeometryKind::LineString));
        draw.set_active_type(DrawSelection::Draw(GeometryKind::Circle));
        assert_eq!(draw.active_kind(), Some(GeometryKind::Circle));
    }

    #[test]
    fn sentinel_deactivates_from_any_state() {
        let (mut draw, _) = coordinator();
        draw.set_active_type(DrawSelection::Draw(GeometryKind::Point));
        draw.set_active_type(DrawSelection::Inactive);
        assert!(!draw.is_drawing());
        draw.set_active_type(DrawSelection::Inactive);
        assert!(!draw.is_drawing());
    }

    #[test]
    fn reselecting_same_type_rebuilds_a_fresh_interaction() {
        let (mut draw, _) = coordinator();
        draw.set_active_type(DrawSelection::Draw(GeometryKind::Polygon));
        draw.place_vertex(Vec2::new(1.0, 1.0));
        draw.set_active_type(DrawSelection::Draw(GeometryKind::Polygon));
        assert_eq!(draw.active_kind(), Some(GeometryKind::Polygon));
        assert_eq!(draw.sketch_len(), 0);
    }

    #[test]
    fn point_completes_on_first_vertex() {
        let (mut draw, source) = coordinator();
        draw.set_active_type(DrawSelection::Draw(GeometryKind::Point));
        draw.place_vertex(Vec2::new(3.0, 4.0));
        assert_eq!(
            source.borrow().features(),
            &[AnnotationGeometry::Point(Vec2::new(3.0, 4.0))]
        );
    }

    #[test]
    fn circle_completes_on_center_plus_edge() {
        let (mut draw, source) = coordinator();
        draw.set_active_type(DrawSelection::Draw(GeometryKind::Circle));
        draw.place_vertex(Vec2::new(0.0, 0.0));
        assert!(source.borrow().is_empty());
        draw.place_vertex(Vec2::new(3.0, 4.0));
        assert_eq!(
            source.borrow().features(),
            &[AnnotationGeometry::Circle {
                center: Vec2::new(0.0, 0.0),
                radius: 5.0,
            }]
        );
    }

    #[test]
    fn undo_removes_one_vertex_per_call() {
        let (mut draw, _) = coordinator();
        draw.set_active_type(DrawSelection::Draw(GeometryKind::LineString));
        draw.place_vertex(Vec2::new(0.0, 0.0));
        draw.place_vertex(Vec2::new(1.0, 0.0));
        draw.place_vertex(Vec2::new(2.0, 0.0));
        draw.undo_vertex();
        assert_eq!(draw.sketch_len(), 2);
        draw.undo_vertex();
        draw.undo_vertex();
        assert_eq!(draw.sketch_len(), 0);
        // Further undos on an empty sketch stay harmless.
        draw.undo_vertex();
        assert_eq!(draw.sketch_len(), 0);
    }

    #[test]
    fn undo_while_idle_is_a_guarded_no_op() {
        let (mut draw, _) = coordinator();
        draw.undo_vertex();
        assert!(!draw.is_drawing());
    }

    #[test]
    fn short_sketches_are_discarded_on_finish() {
        let (mut draw, source) = coordinator();
        draw.set_active_type(DrawSelection::Draw(GeometryKind::Polygon));
        draw.place_vertex(Vec2::new(0.0, 0.0));
        draw.place_vertex(Vec2::new(1.0, 0.0));
        draw.finish_sketch();
        assert!(source.borrow().is_empty());

        draw.place_vertex(Vec2::new(0.0, 0.0));
        draw.place_vertex(Vec2::new(1.0, 0.0));
        draw.place_vertex(Vec2::new(1.0, 1.0));
        draw.finish_sketch();
        assert_eq!(source.borrow().len(), 1);
    }

    #[test]
    fn clicks_while_idle_create_nothing() {
        let (mut draw, source) = coordinator();
        draw.place_vertex(Vec2::new(0.0, 0.0));
        draw.finish_sketch();
        assert!(source.borrow().is_empty());
    }
}
