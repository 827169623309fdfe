mod bbox;
mod edge;
mod point;
mod polygon;

pub use self::bbox::*;
pub use self::edge::*;
pub use self::point::*;
pub use self::polygon::*;
