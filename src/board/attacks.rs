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

use once_cell::sync::Lazy;
use strum::IntoEnumIterator;

use super::grid::Board;
use super::material::{Piece, Player};
use super::square::{Direction, Mask, Offset, Square};

use Piece::*;

/// Squares attacked by whatever stands on `from`. Sliding pieces stop at
/// the first occupied square, which is included. Pawns attack only their
/// two forward diagonals.
pub fn attacks(board: &Board, from: Square) -> Mask {
    let Some(material) = board.get(from) else {
        return Mask::empty();
    };
    match material.piece() {
        King => KING_STEPS[from.to_index()],
        Knight => KNIGHT_JUMPS[from.to_index()],
        Rook => rays(board, from, Direction::straights()),
        Bishop => rays(board, from, Direction::diagonals()),
        Queen => rays(board, from, Direction::iter()),
        Pawn => pawn_attacks(from, material.owner()),
    }
}

pub fn is_attacked(board: &Board, square: Square, by: Player) -> bool {
    board
        .pieces(by)
        .any(|(from, _)| attacks(board, from).contains(square))
}

/// A player without a king on the board is never in check.
pub fn in_check(board: &Board, player: Player) -> bool {
    board
        .king(player)
        .is_some_and(|king| is_attacked(board, king, !player))
}

pub fn pawn_attacks(from: Square, owner: Player) -> Mask {
    let forward = owner.forward();
    Mask::from_squares(
        [Offset::new(-1, forward), Offset::new(1, forward)]
            .into_iter()
            .filter_map(|offset| from + offset),
    )
}

fn rays<I>(board: &Board, from: Square, directions: I) -> Mask
where
    I: Iterator<Item = Direction>,
{
    let mut mask = Mask::empty();
    for dir in directions {
        let mut next = from + dir;
        while let Some(square) = next {
            mask |= square;
            if !board.is_vacant(square) {
                break;
            }
            next = square + dir;
        }
    }
    mask
}

static KING_STEPS: Lazy<[Mask; 64]> = Lazy::new(|| {
    let mut array = [Mask::empty(); 64];
    for square in Square::iter() {
        array[square.to_index()] =
            Mask::from_squares(Direction::iter().filter_map(|dir| square + dir));
    }
    array
});

static KNIGHT_JUMPS: Lazy<[Mask; 64]> = Lazy::new(|| {
    const OFFSETS: [Offset; 8] = [
        Offset::new(-2, -1),
        Offset::new(-2, 1),
        Offset::new(2, -1),
        Offset::new(2, 1),
        Offset::new(-1, -2),
        Offset::new(-1, 2),
        Offset::new(1, -2),
        Offset::new(1, 2),
    ];
    let mut array = [Mask::empty(); 64];
    for square in Square::iter() {
        array[square.to_index()] =
            Mask::from_squares(OFFSETS.into_iter().filter_map(|offset| square + offset));
    }
    array
});
