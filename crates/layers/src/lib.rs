pub mod annotations;
pub mod layer;
pub mod overlay;
pub mod raster;
pub mod wms;

pub use layer::*;
