use std::io;

use thiserror::Error;

/// Failure to find a free cell for a new entity.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum PlacementError {
    #[error("no free cell available on the {width}x{height} grid")]
    NoSpaceAvailable { width: u16, height: u16 },
}

/// Failure reading or writing the persisted high score.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("high score storage unavailable: {0}")]
    Io(#[from] io::Error),
    #[error("high score file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}
