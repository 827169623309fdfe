mod connected;
mod full_tile;
mod full_vertex;
mod region;
mod scorer;

pub use self::connected::*;
pub use self::full_tile::*;
pub use self::full_vertex::*;
pub use self::region::*;
pub use self::scorer::*;
