//! Error types

mod collection;
mod registry;
mod width;

pub use collection::*;
pub use registry::*;
pub use width::*;
