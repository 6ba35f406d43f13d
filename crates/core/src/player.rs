use crate::state::GameState;
use crate::types::Move;
use crate::Result;

/// Anything that can choose a move: a search engine, a random bot or a human.
///
/// Implementations may mutate `state` while deciding but must hand it back
/// exactly as they received it.
pub trait Player {
    /// Short label used in logs and game output.
    fn name(&self) -> &str;

    /// Choose a legal move for the side to move.
    ///
    /// # Errors
    /// `MnkError::NoLegalMoves` when the game is already over.
    fn get_move(&mut self, state: &mut GameState) -> Result<Move>;
}

impl<P: Player + ?Sized> Player for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn get_move(&mut self, state: &mut GameState) -> Result<Move> {
        (**self).get_move(state)
    }
}
