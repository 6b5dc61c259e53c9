pub mod draw;
pub mod label;
pub mod query;
pub mod session;
pub mod swipe;

pub use draw::*;
pub use label::*;
pub use query::*;
pub use session::*;
pub use swipe::*;
