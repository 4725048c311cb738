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
use std::ops::Index;
use strum::IntoEnumIterator;

use super::attacks::{in_check, is_attacked};
use super::castling::{CastleError, CastleOutcome, CastlingRights, CastlingSide};
use super::grid::Board;
use super::material::{Cell, Material, Pair, Piece, Player};
use super::moves::{validate, LegalMove, MoveError, MoveOutcome};
use super::square::{Mask, Square};
use super::Turn;

/// The board together with whose turn it is and what castling is still
/// available to each player.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    board: Board,
    castling: Pair<CastlingRights>,
    turn: Player,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    pub fn new() -> Self {
        Self {
            board: Board::initial(),
            castling: Pair::default(),
            turn: Player::Player1,
        }
    }

    /// Builds a position from an arbitrary board. A castling side starts out
    /// available only when the king and that rook stand on their home
    /// squares.
    pub fn from_board(board: Board, turn: Player) -> Self {
        let mut castling: Pair<CastlingRights> = Pair::default();
        for player in Player::iter() {
            let rights = &mut castling[player];
            let home = |square: Square, piece: Piece| {
                board.get(square) == Some(Material::new(player, piece))
            };
            let king_home = home(rights.king_src(), Piece::King);
            let king_side = king_home && home(rights.rook_src(CastlingSide::King), Piece::Rook);
            let queen_side = king_home && home(rights.rook_src(CastlingSide::Queen), Piece::Rook);
            *rights = CastlingRights::new(player, king_side, queen_side);
        }
        Self {
            board,
            castling,
            turn,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn castling(&self, player: Player) -> &CastlingRights {
        &self.castling[player]
    }

    /// Builder used to tweak a position, e.g. to clear a square.
    pub fn with(mut self, square: Square, cell: Cell) -> Self {
        self.board.set(square, cell);
        self
    }

    pub fn with_turn(mut self, turn: Player) -> Self {
        self.turn = turn;
        self
    }

    /// True if the side to move is in check.
    pub fn is_check(&self) -> bool {
        in_check(&self.board, self.turn)
    }

    /// Checks a move for the side to move, including that it does not leave
    /// the mover's own king attacked. Nothing is modified.
    pub fn try_move(&self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        let outcome = validate(&self.board, self.turn, from, to)?;
        let mut trial = self.board;
        outcome.apply_to(&mut trial);
        if in_check(&trial, self.turn) {
            return Err(MoveError::ExposesKing);
        }
        Ok(outcome)
    }

    /// Plays a move for the side to move and passes the turn.
    pub fn play_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        let outcome = self.try_move(from, to)?;
        outcome.apply_to(&mut self.board);
        for player in Player::iter() {
            self.castling[player].update(from);
            self.castling[player].update(to);
        }
        self.turn = !self.turn;
        Ok(outcome)
    }

    /// Checks that the side to move may castle on `side`. Nothing is
    /// modified.
    pub fn try_castle(&self, side: CastlingSide) -> Result<CastleOutcome, CastleError> {
        let player = self.turn;
        let rights = &self.castling[player];
        if !rights.allows(side) {
            return Err(CastleError::RightsLost(side));
        }
        let king_from = rights.king_src();
        let rook_from = rights.rook_src(side);
        if self.board.get(king_from) != Some(Material::new(player, Piece::King))
            || self.board.get(rook_from) != Some(Material::new(player, Piece::Rook))
        {
            return Err(CastleError::PiecesMissing(side));
        }
        if let Some(square) = self.first_occupied(rights.blocking_lane(side)) {
            return Err(CastleError::PathBlocked(side, square));
        }
        if self.is_check() {
            return Err(CastleError::KingInCheck);
        }
        if let Some(square) = rights
            .king_path(side)
            .iter()
            .find(|&square| is_attacked(&self.board, square, !player))
        {
            return Err(CastleError::PathAttacked(side, square));
        }
        Ok(CastleOutcome {
            player,
            side,
            king_from,
            king_to: rights.king_dest(side),
            rook_from,
            rook_to: rights.rook_dest(side),
        })
    }

    /// Castles for the side to move, relocating king and rook together, and
    /// passes the turn.
    pub fn castle(&mut self, side: CastlingSide) -> Result<CastleOutcome, CastleError> {
        let outcome = self.try_castle(side)?;
        let king = self.board.remove(outcome.king_from);
        let rook = self.board.remove(outcome.rook_from);
        self.board.set(outcome.king_to, king);
        self.board.set(outcome.rook_to, rook);
        self.castling[outcome.player].clear();
        self.turn = !self.turn;
        Ok(outcome)
    }

    /// Squares the piece on `from` may legally move to. Empty unless the
    /// piece belongs to the side to move.
    pub fn destinations(&self, from: Square) -> Mask {
        Mask::from_squares(Square::iter().filter(|&to| self.try_move(from, to).is_ok()))
    }

    pub fn legal_moves(&self) -> Vec<LegalMove> {
        let mut moves: Vec<LegalMove> = self
            .board
            .pieces(self.turn)
            .flat_map(|(from, _)| {
                self.destinations(from)
                    .iter()
                    .map(move |to| LegalMove::Standard(from, to))
            })
            .collect();
        moves.extend(
            CastlingSide::iter()
                .filter(|&side| self.try_castle(side).is_ok())
                .map(LegalMove::Castle),
        );
        moves
    }

    /// Cheaper than `legal_moves` when only existence matters. Castling is
    /// never the only legal move (the king can always step to the square
    /// next to it instead), so standard moves suffice.
    pub fn has_legal_move(&self) -> bool {
        self.board
            .pieces(self.turn)
            .any(|(from, _)| Square::iter().any(|to| self.try_move(from, to).is_ok()))
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_legal_move()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_legal_move()
    }

    fn first_occupied(&self, lane: Mask) -> Option<Square> {
        lane.iter().find(|&square| !self.board.is_vacant(square))
    }
}

impl Turn for Position {
    #[inline]
    fn turn(&self) -> Player {
        self.turn
    }
}

impl Index<Square> for Position {
    type Output = Cell;
    #[inline]
    fn index(&self, index: Square) -> &Self::Output {
        &self.board[index]
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use Player::*;
    use Square::*;

    fn kings() -> Board {
        Board::empty()
            .with(E1, Some(Material::player1(Piece::King)))
            .with(E8, Some(Material::player2(Piece::King)))
    }

    #[test]
    fn test_player1_moves_first() {
        let position = Position::new();
        assert_eq!(position.turn(), Player1);
        assert!(!position.destinations(E2).is_empty());
        assert!(position.destinations(E7).is_empty());
    }
    #[test]
    fn test_twenty_opening_moves() {
        let position = Position::new();
        assert_eq!(position.legal_moves().len(), 20);
    }
    #[test]
    fn test_play_move_passes_turn() {
        let mut position = Position::new();
        position.play_move(E2, E4).unwrap();
        assert_eq!(position.turn(), Player2);
        assert_eq!(position[E4], Some(Material::player1(Piece::Pawn)));
        assert_eq!(
            position.play_move(D2, D4),
            Err(MoveError::NotYourPiece(D2))
        );
    }
    #[test]
    fn test_pinned_piece_cannot_expose_king() {
        let board = kings()
            .with(E2, Some(Material::player1(Piece::Bishop)))
            .with(E7, Some(Material::player2(Piece::Rook)));
        let position = Position::from_board(board, Player1);
        assert_eq!(position.try_move(E2, D3), Err(MoveError::ExposesKing));
        assert!(position.try_move(E1, D1).is_ok());
    }
    #[test]
    fn test_king_cannot_step_into_attack() {
        let board = kings().with(D8, Some(Material::player2(Piece::Rook)));
        let position = Position::from_board(board, Player1);
        assert_eq!(position.try_move(E1, D1), Err(MoveError::ExposesKing));
        assert_eq!(position.try_move(E1, D2), Err(MoveError::ExposesKing));
        assert!(position.try_move(E1, F2).is_ok());
    }
    #[test]
    fn test_check_must_be_answered() {
        let board = kings()
            .with(E5, Some(Material::player2(Piece::Rook)))
            .with(A2, Some(Material::player1(Piece::Pawn)))
            .with(B2, Some(Material::player1(Piece::Rook)));
        let position = Position::from_board(board, Player1);
        assert!(position.is_check());
        assert_eq!(position.try_move(A2, A3), Err(MoveError::ExposesKing));
        // block or step aside
        assert!(position.try_move(B2, E2).is_ok());
        assert!(position.try_move(E1, D1).is_ok());
    }
    #[test]
    fn test_from_board_infers_castling() {
        let board = kings()
            .with(H1, Some(Material::player1(Piece::Rook)))
            .with(B8, Some(Material::player2(Piece::Rook)));
        let position = Position::from_board(board, Player1);
        assert!(position.castling(Player1).allows(CastlingSide::King));
        assert!(!position.castling(Player1).allows(CastlingSide::Queen));
        assert!(!position.castling(Player2).any());
    }
    #[test]
    fn test_short_castle() {
        let mut position = Position::new().with(F1, None).with(G1, None);
        assert!(position.legal_moves().contains(&LegalMove::Castle(CastlingSide::King)));
        let outcome = position.castle(CastlingSide::King).unwrap();
        assert_eq!(outcome.king_to, G1);
        assert_eq!(outcome.rook_to, F1);
        assert_eq!(position[G1], Some(Material::player1(Piece::King)));
        assert_eq!(position[F1], Some(Material::player1(Piece::Rook)));
        assert_eq!(position[E1], None);
        assert_eq!(position[H1], None);
        assert!(!position.castling(Player1).any());
        assert_eq!(position.turn(), Player2);
    }
    #[test]
    fn test_long_castle_for_player2() {
        let mut position = Position::new()
            .with_turn(Player2)
            .with(B8, None)
            .with(C8, None)
            .with(D8, None);
        position.castle(CastlingSide::Queen).unwrap();
        assert_eq!(position[C8], Some(Material::player2(Piece::King)));
        assert_eq!(position[D8], Some(Material::player2(Piece::Rook)));
        assert_eq!(position[A8], None);
        assert_eq!(position[E8], None);
    }
    #[test]
    fn test_castle_lane_blocked() {
        let position = Position::new().with(G1, None);
        assert_eq!(
            position.try_castle(CastlingSide::King),
            Err(CastleError::PathBlocked(CastlingSide::King, F1))
        );
    }
    #[test]
    fn test_castle_after_rook_moved_and_returned() {
        let mut position = Position::new().with(F1, None).with(G1, None);
        position.play_move(H1, G1).unwrap();
        position.play_move(A7, A6).unwrap();
        position.play_move(G1, H1).unwrap();
        position.play_move(A6, A5).unwrap();
        assert_eq!(
            position.try_castle(CastlingSide::King),
            Err(CastleError::RightsLost(CastlingSide::King))
        );
    }
    #[test]
    fn test_castle_after_king_moved() {
        let mut position = Position::new().with(F1, None);
        position.play_move(E1, F1).unwrap();
        position.play_move(A7, A6).unwrap();
        position.play_move(F1, E1).unwrap();
        position.play_move(A6, A5).unwrap();
        assert!(!position.castling(Player1).any());
    }
    #[test]
    fn test_castle_through_attacked_square() {
        let position = Position::new()
            .with(F1, None)
            .with(G1, None)
            .with(F2, None)
            .with(F5, Some(Material::player2(Piece::Rook)));
        assert_eq!(
            position.try_castle(CastlingSide::King),
            Err(CastleError::PathAttacked(CastlingSide::King, F1))
        );
    }
    #[test]
    fn test_castle_out_of_check() {
        let position = Position::new()
            .with(F1, None)
            .with(G1, None)
            .with(E2, None)
            .with(E5, Some(Material::player2(Piece::Rook)));
        assert_eq!(position.try_castle(CastlingSide::King), Err(CastleError::KingInCheck));
    }
    #[test]
    fn test_castle_into_attacked_square() {
        let position = Position::new()
            .with(F1, None)
            .with(G1, None)
            .with(G2, None)
            .with(G5, Some(Material::player2(Piece::Rook)));
        assert_eq!(
            position.try_castle(CastlingSide::King),
            Err(CastleError::PathAttacked(CastlingSide::King, G1))
        );
        let position = Position::new()
            .with(B1, None)
            .with(C1, None)
            .with(D1, None)
            .with(C2, None)
            .with(C5, Some(Material::player2(Piece::Rook)));
        assert_eq!(
            position.try_castle(CastlingSide::Queen),
            Err(CastleError::PathAttacked(CastlingSide::Queen, C1))
        );
    }
    #[test]
    fn test_castle_rook_missing() {
        let position = Position::new().with(F1, None).with(G1, None).with(H1, None);
        assert!(position.castling(Player1).allows(CastlingSide::King));
        assert_eq!(
            position.try_castle(CastlingSide::King),
            Err(CastleError::PiecesMissing(CastlingSide::King))
        );
        let position = position.with(H1, Some(Material::player2(Piece::Rook)));
        assert_eq!(
            position.try_castle(CastlingSide::King),
            Err(CastleError::PiecesMissing(CastlingSide::King))
        );
    }
    #[test]
    fn test_long_castle_allowed_when_b1_attacked() {
        let mut position = Position::new()
            .with(B1, None)
            .with(C1, None)
            .with(D1, None)
            .with(B2, Some(Material::player2(Piece::Rook)));
        assert!(position.castle(CastlingSide::Queen).is_ok());
    }
    #[test]
    fn test_captured_rook_loses_castling() {
        let board = kings()
            .with(A1, Some(Material::player1(Piece::Rook)))
            .with(A8, Some(Material::player2(Piece::Rook)));
        let mut position = Position::from_board(board, Player2);
        assert!(position.castling(Player1).allows(CastlingSide::Queen));
        position.play_move(A8, A1).unwrap();
        assert!(!position.castling(Player1).allows(CastlingSide::Queen));
        assert!(!position.castling(Player2).allows(CastlingSide::Queen));
    }
    #[test]
    fn test_checkmate_and_stalemate() {
        let board = Board::empty()
            .with(A8, Some(Material::player2(Piece::King)))
            .with(B6, Some(Material::player1(Piece::King)))
            .with(C7, Some(Material::player1(Piece::Queen)));
        let stalemate = Position::from_board(board, Player2);
        assert!(stalemate.is_stalemate());
        assert!(!stalemate.is_checkmate());

        let board = board.with(C7, None).with(B7, Some(Material::player1(Piece::Queen)));
        let mate = Position::from_board(board, Player2);
        assert!(mate.is_checkmate());
        assert!(!mate.is_stalemate());
    }
}
