pub mod extent;
pub mod mercator;
pub mod vec;

pub use extent::*;
pub use mercator::*;
pub use vec::*;
