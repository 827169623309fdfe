mod builder;
mod color;
mod edge;
mod error;
mod grid;
mod ids;
mod tile;
mod vertex;

pub use self::builder::*;
pub use self::color::*;
pub use self::edge::*;
pub use self::error::*;
pub use self::grid::*;
pub use self::ids::*;
pub use self::tile::*;
pub use self::vertex::*;
