use serde::{Deserialize, Serialize};

use crate::layer::{Layer, LayerId};

/// Source descriptor for a tiled base-map layer.
///
/// The template carries `{z}`/`{x}`/`{y}` placeholders; tile fetching itself is
/// owned by the render backend, this is configuration only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileUrlTemplate {
    pub template: String,
}

impl TileUrlTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Expands the template for one tile coordinate.
    pub fn tile_url(&self, z: u8, x: u32, y: u32) -> String {
        self.template
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

/// A base raster layer: immutable source descriptor plus a visibility flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterLayer {
    id: LayerId,
    pub source: TileUrlTemplate,
    pub visible: bool,
}

impl RasterLayer {
    pub fn new(id: u64, source: TileUrlTemplate) -> Self {
        Self {
            id: LayerId(id),
            source,
            visible: true,
        }
    }
}

impl Layer for RasterLayer {
    fn id(&self) -> LayerId {
        self.id
    }
}
