mod atlas;
mod atlases;
mod definition;
mod error;
mod pattern;
mod shape;

pub use self::atlas::*;
pub use self::atlases::*;
pub use self::definition::*;
pub use self::error::*;
pub use self::pattern::*;
pub use self::shape::*;
