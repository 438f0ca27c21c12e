pub mod format;
pub mod wrappers;

pub use format::*;
pub use wrappers::*;
