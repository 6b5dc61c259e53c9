use geocore::Vec2;
use serde::{Deserialize, Serialize};

use crate::layer::{Layer, LayerId};

/// Geometry families a draw interaction can produce.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
    Circle,
}

/// A finished user-drawn annotation, in projected coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationGeometry {
    Point(Vec2),
    LineString(Vec<Vec2>),
    Polygon(Vec<Vec2>),
    Circle { center: Vec2, radius: f64 },
}

impl AnnotationGeometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            AnnotationGeometry::Point(_) => GeometryKind::Point,
            AnnotationGeometry::LineString(_) => GeometryKind::LineString,
            AnnotationGeometry::Polygon(_) => GeometryKind::Polygon,
            AnnotationGeometry::Circle { .. } => GeometryKind::Circle,
        }
    }
}

/// Feature collection backing the annotation layer.
///
/// Features accumulate for the session lifetime; there is no removal path
/// short of session teardown.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AnnotationSource {
    features: Vec<AnnotationGeometry>,
}

impl AnnotationSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, geometry: AnnotationGeometry) {
        self.features.push(geometry);
    }

    pub fn features(&self) -> &[AnnotationGeometry] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// The user-drawn vector layer. The backing source is shared with the draw
/// coordinator; the layer itself only fixes identity and paint order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationLayer {
    id: LayerId,
}

impl AnnotationLayer {
    pub fn new(id: u64) -> Self {
        Self { id: LayerId(id) }
    }
}

impl Layer for AnnotationLayer {
    fn id(&self) -> LayerId {
        self.id
    }
}
