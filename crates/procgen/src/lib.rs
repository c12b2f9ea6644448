//! Procedural generation for the journey route and its scenery.

pub mod path;
pub mod scenery;

pub use path::*;
pub use scenery::*;
