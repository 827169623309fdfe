use crate::ids::{SegmentId, TileId};
use geometry::Point;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum GridError {
    #[error("edge {0} - {1} is already used by a tile on that side")]
    EdgeInUse(Point, Point),
    #[error("shape {shape} has {expected} corners but the polygon has {actual}")]
    ShapeMismatch { shape: String, expected: usize, actual: usize },
    #[error("grid has no atlas")]
    MissingAtlas,
    #[error("atlas has no shapes")]
    EmptyAtlas,
    #[error("unknown tile {0}")]
    UnknownTile(TileId),
    #[error("unknown segment {0}")]
    UnknownSegment(SegmentId),
    #[error("expected {expected} segment colors, got {actual}")]
    ColorCount { expected: usize, actual: usize },
}
