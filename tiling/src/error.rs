use atlas::DefinitionError;
use coloring::ColoringError;
use grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Coloring(#[from] ColoringError),
    #[error("invalid game settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("palette is empty")]
    EmptyPalette,
    #[error("no coloring found after {0} attempts")]
    ColoringInfeasible(usize),
    #[error("shape {0} does not fit there")]
    DoesNotFit(String),
    #[error("colors of shape {0} do not match its neighbors")]
    ColorMismatch(String),
    #[error("nothing to undo")]
    NothingToUndo,
}
