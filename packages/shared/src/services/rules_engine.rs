use std::str::FromStr;

use chess::{Board, BoardStatus, ChessMove, MoveGen, Piece, Square};

use crate::services::errors::rules_engine_errors::RulesEngineError;

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalPosition {
    Checkmate,
    Stalemate,
}

/// Legality and position evaluation, delegated behind a trait so the
/// session services never depend on a chess library directly. The resulting
/// position is always derived here from the stored position and the move;
/// client-supplied positions are never part of the contract.
#[cfg_attr(test, automock)]
pub trait RulesEngine: Send + Sync {
    /// Apply `notation` to the position in `fen`, returning the resulting
    /// position. Fails if the notation does not parse or the move is not
    /// legal.
    fn apply_move(&self, fen: &str, notation: &str) -> Result<String, RulesEngineError>;

    /// Whether `fen` is a terminal position under the rules.
    fn terminal_state(&self, fen: &str) -> Result<Option<TerminalPosition>, RulesEngineError>;
}

#[derive(Clone, Default)]
pub struct ChessRulesEngine;

impl ChessRulesEngine {
    pub fn new() -> Self {
        ChessRulesEngine
    }

    /// Coordinate notation: four squares characters plus an optional
    /// promotion piece, e.g. "e2e4" or "a7a8q".
    fn parse_notation(notation: &str) -> Result<ChessMove, RulesEngineError> {
        if notation.len() != 4 && notation.len() != 5 {
            return Err(RulesEngineError::InvalidNotation(format!(
                "expected coordinate notation like e2e4 or a7a8q, got '{}'",
                notation
            )));
        }

        let from_sq = notation
            .get(0..2)
            .and_then(|s| Square::from_str(s).ok())
            .ok_or_else(|| {
                RulesEngineError::InvalidNotation(format!(
                    "invalid source square in '{}'",
                    notation
                ))
            })?;
        let to_sq = notation
            .get(2..4)
            .and_then(|s| Square::from_str(s).ok())
            .ok_or_else(|| {
                RulesEngineError::InvalidNotation(format!(
                    "invalid destination square in '{}'",
                    notation
                ))
            })?;

        let promotion = match notation.get(4..5) {
            Some("q") => Some(Piece::Queen),
            Some("r") => Some(Piece::Rook),
            Some("b") => Some(Piece::Bishop),
            Some("n") => Some(Piece::Knight),
            Some(other) => {
                return Err(RulesEngineError::InvalidNotation(format!(
                    "invalid promotion piece '{}'",
                    other
                )))
            }
            None => None,
        };

        Ok(ChessMove::new(from_sq, to_sq, promotion))
    }

    fn parse_board(fen: &str) -> Result<Board, RulesEngineError> {
        Board::from_str(fen)
            .map_err(|e| RulesEngineError::InvalidPosition(format!("invalid FEN: {}", e)))
    }
}

impl RulesEngine for ChessRulesEngine {
    fn apply_move(&self, fen: &str, notation: &str) -> Result<String, RulesEngineError> {
        let board = Self::parse_board(fen)?;
        let chess_move = Self::parse_notation(notation)?;

        let mut legal_moves = MoveGen::new_legal(&board);
        if !legal_moves.any(|m| m == chess_move) {
            return Err(RulesEngineError::IllegalMove(format!(
                "'{}' is not legal in this position",
                notation
            )));
        }

        let new_board = board.make_move_new(chess_move);
        Ok(format!("{}", new_board))
    }

    fn terminal_state(&self, fen: &str) -> Result<Option<TerminalPosition>, RulesEngineError> {
        let board = Self::parse_board(fen)?;
        Ok(match board.status() {
            BoardStatus::Ongoing => None,
            BoardStatus::Checkmate => Some(TerminalPosition::Checkmate),
            BoardStatus::Stalemate => Some(TerminalPosition::Stalemate),
        })
    }
}
