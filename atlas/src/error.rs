// ShapeDefinitionError describes why a list of corner angles does not form a valid shape
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ShapeDefinitionError {
    #[error("invalid shape {0:?}: need at least three angles, found {1}")]
    TooFewAngles(String, usize),
    #[error("invalid shape {0:?}: all angles should be positive")]
    NonPositiveAngle(String),
    #[error("invalid shape {name:?}: angles should sum to {expected}°, found {actual}°")]
    AngleSum { name: String, expected: f64, actual: f64 },
    #[error("invalid shape {0:?}: expecting an equilateral polygon")]
    NotEquilateral(String),
}

// DefinitionError is returned when an atlas definition cannot be turned into an Atlas
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error(transparent)]
    Shape(#[from] ShapeDefinitionError),
    #[error("duplicate shape {0:?} in atlas pattern")]
    DuplicateShape(String),
    #[error("invalid component {0:?} in atlas pattern")]
    InvalidComponent(String),
    #[error("undefined shape {0:?} in atlas pattern")]
    UndefinedShape(String),
    #[error("vertex pattern {pattern:?} sums to {actual}°, expected 360°")]
    VertexAngleSum { pattern: String, actual: f64 },
    #[error("empty atlas pattern")]
    EmptyAtlas,
    #[error("invalid color pattern: {0}")]
    InvalidColorPattern(String),
    #[error("invalid atlas definition: {0}")]
    Json(#[from] serde_json::Error),
}
