mod coloring;
mod error;
mod rules;

pub use self::coloring::*;
pub use self::error::*;
pub use self::rules::*;
