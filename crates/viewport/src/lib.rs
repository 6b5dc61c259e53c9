pub mod events;
pub mod map;
pub mod render;
pub mod view;

pub use events::*;
pub use map::*;
pub use render::*;
pub use view::*;
