use grid::SegmentId;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ColoringError {
    #[error("no color pattern defined for shape {0}")]
    MissingColorPattern(String),
    #[error("color pattern for shape {shape} colors {actual} segments, the tile has {expected}")]
    PatternSize { shape: String, expected: usize, actual: usize },
    #[error("segment {0} has no color group")]
    UnknownSegment(SegmentId),
}
