use scavenger_core::GenerationError;
use thiserror::Error;

/// Failures surfaced by session transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The board could not be laid out; the world is left without a board.
    #[error("board generation failed")]
    Generation(#[from] GenerationError),
}
