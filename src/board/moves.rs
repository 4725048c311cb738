// Copyright 2023 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::castling::CastlingSide;
use super::grid::{between, Board};
use super::material::{Material, Piece, Player};
use super::square::{Rank, Square};

use Piece::*;

/// Pawns reaching the far rank always become this piece.
pub const PROMOTION: Piece = Queen;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("Invalid move! No figure at {0}.")]
    EmptySource(Square),
    #[error("Invalid move! The figure at {0} is not yours.")]
    NotYourPiece(Square),
    #[error("Invalid move! {0} is occupied by one of your own figures.")]
    FriendlyFireCapture(Square),
    #[error("Invalid move! A {0} cannot move from {1} to {2}.")]
    IllegalShape(Piece, Square, Square),
    #[error("Invalid move! The path from {0} to {1} is blocked.")]
    BlockedPath(Square, Square),
    #[error("Invalid move! A pawn cannot capture straight ahead onto {0}.")]
    PawnForwardCapture(Square),
    #[error("Invalid move! A pawn only moves diagonally to capture, and {0} is empty.")]
    NothingToCapture(Square),
    #[error("Invalid move! That would leave your king in check.")]
    ExposesKing,
}
use MoveError::*;

/// What a validated move does to the board.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveOutcome {
    pub player: Player,
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Material>,
    pub promotion: Option<Piece>,
}

impl MoveOutcome {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// The piece standing on `to` once the move is applied.
    #[inline]
    pub fn landed(&self) -> Material {
        Material::new(self.player, self.promotion.unwrap_or(self.piece))
    }

    pub(crate) fn apply_to(&self, board: &mut Board) {
        board.remove(self.from);
        board.place(self.to, self.landed());
    }
}

/// A move the side to move may legally play.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegalMove {
    Standard(Square, Square),
    Castle(CastlingSide),
}

/// Checks that `mover` may move the piece on `from` to `to` according to
/// that piece's movement rules, without touching the board. Whether the
/// move exposes the mover's king is not considered here.
pub fn validate(board: &Board, mover: Player, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
    let material = board.get(from).ok_or(EmptySource(from))?;
    if !material.is_owned_by(mover) {
        return Err(NotYourPiece(from));
    }
    let target = board.get(to);
    if target.is_some_and(|other| other.is_owned_by(mover)) {
        return Err(FriendlyFireCapture(to));
    }
    let piece = material.piece();
    match piece {
        Rook => validate_line(board, piece, from, to, true, false)?,
        Bishop => validate_line(board, piece, from, to, false, true)?,
        Queen => validate_line(board, piece, from, to, true, true)?,
        Knight => validate_knight(from, to)?,
        King => validate_king(from, to)?,
        Pawn => validate_pawn(board, mover, from, to)?,
    }
    let promotion = (piece == Pawn && to.rank() == Rank::promotion_rank(mover)).then_some(PROMOTION);
    Ok(MoveOutcome {
        player: mover,
        piece,
        from,
        to,
        captured: target,
        promotion,
    })
}

/// Validates the move and, if it is legal for the piece, applies it. The
/// board is left untouched on failure.
pub fn validate_and_apply(
    board: &mut Board,
    mover: Player,
    from: Square,
    to: Square,
) -> Result<MoveOutcome, MoveError> {
    let outcome = validate(board, mover, from, to)?;
    outcome.apply_to(board);
    Ok(outcome)
}

fn validate_line(
    board: &Board,
    piece: Piece,
    from: Square,
    to: Square,
    straight: bool,
    diagonal: bool,
) -> Result<(), MoveError> {
    let offset = to - from;
    let shaped = (straight && offset.is_straight()) || (diagonal && offset.is_diagonal());
    if !shaped {
        return Err(IllegalShape(piece, from, to));
    }
    if board.is_lane_blocked(between(from, to)) {
        return Err(BlockedPath(from, to));
    }
    Ok(())
}

fn validate_knight(from: Square, to: Square) -> Result<(), MoveError> {
    let offset = to - from;
    match (offset.x.abs(), offset.y.abs()) {
        (1, 2) | (2, 1) => Ok(()),
        _ => Err(IllegalShape(Knight, from, to)),
    }
}

fn validate_king(from: Square, to: Square) -> Result<(), MoveError> {
    let offset = to - from;
    if offset.x.abs().max(offset.y.abs()) == 1 {
        Ok(())
    } else {
        Err(IllegalShape(King, from, to))
    }
}

fn validate_pawn(board: &Board, mover: Player, from: Square, to: Square) -> Result<(), MoveError> {
    let forward = mover.forward();
    let offset = to - from;
    match (offset.x, offset.y) {
        (0, y) if y == forward => {
            if !board.is_vacant(to) {
                return Err(PawnForwardCapture(to));
            }
            Ok(())
        }
        (0, y) if y == 2 * forward && from.rank() == Rank::pawn_rank(mover) => {
            if board.is_lane_blocked(between(from, to)) {
                return Err(BlockedPath(from, to));
            }
            if !board.is_vacant(to) {
                return Err(PawnForwardCapture(to));
            }
            Ok(())
        }
        (-1 | 1, y) if y == forward => {
            // the friendly case was already rejected, so any piece here is theirs
            if board.is_vacant(to) {
                return Err(NothingToCapture(to));
            }
            Ok(())
        }
        _ => Err(IllegalShape(Pawn, from, to)),
    }
}
