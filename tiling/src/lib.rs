mod demo;
mod error;
mod game;
mod settings;

pub use self::demo::*;
pub use self::error::*;
pub use self::game::*;
pub use self::settings::*;

pub use atlas;
pub use coloring;
pub use geometry;
pub use grid;
pub use random;
pub use scorer;
