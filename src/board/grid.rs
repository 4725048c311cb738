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
use serde::{Deserialize, Serialize};
use std::ops::Index;
use strum::IntoEnumIterator;
use thiserror::Error;

use super::material::{Cell, Material, Piece, Player};
use super::square::{File, Mask, Rank, Square};

use Piece::*;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("Square ({row}, {col}) is off the board (expecting rows and columns 0..8)")]
    OutOfRange { row: usize, col: usize },
}

const BACK_RANK: [Piece; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

/// The 8x8 grid of cells, indexed by (row, column) with row 0 being rank 1.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            cells: [[None; 8]; 8],
        }
    }

    /// The standard starting position. Both players use the same back rank
    /// order, so the queens face each other on the D file and the kings on
    /// the E file.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for player in Player::iter() {
            for file in File::iter() {
                let back = Square::new(file, Rank::back_rank(player));
                let pawn = Square::new(file, Rank::pawn_rank(player));
                board.set(back, Some(Material::new(player, BACK_RANK[file.to_index()])));
                board.set(pawn, Some(Material::new(player, Pawn)));
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, square: Square) -> Cell {
        self.cells[square.row()][square.col()]
    }

    #[inline]
    pub fn set(&mut self, square: Square, cell: Cell) {
        self.cells[square.row()][square.col()] = cell;
    }

    pub fn try_get(&self, row: usize, col: usize) -> Result<Cell, BoardError> {
        let square = Square::try_from_coords(row, col)?;
        Ok(self.get(square))
    }

    pub fn try_set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), BoardError> {
        let square = Square::try_from_coords(row, col)?;
        self.set(square, cell);
        Ok(())
    }

    /// Builder form of `set`, handy for laying out positions.
    pub fn with(mut self, square: Square, cell: Cell) -> Self {
        self.set(square, cell);
        self
    }

    /// Puts `material` on `square`, returning whatever was there before.
    pub fn place(&mut self, square: Square, material: Material) -> Cell {
        std::mem::replace(&mut self.cells[square.row()][square.col()], Some(material))
    }

    /// Empties `square`, returning whatever was there before.
    pub fn remove(&mut self, square: Square) -> Cell {
        self.cells[square.row()][square.col()].take()
    }

    #[inline]
    pub fn is_vacant(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    pub fn occupied(&self) -> Mask {
        Mask::from_squares(Square::iter().filter(|&square| !self.is_vacant(square)))
    }

    pub fn occupied_by(&self, player: Player) -> Mask {
        Mask::from_squares(self.pieces(player).map(|(square, _)| square))
    }

    /// Every square holding one of `player`'s pieces, with its contents.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = (Square, Material)> + '_ {
        Square::iter().filter_map(move |square| match self.get(square) {
            Some(material) if material.is_owned_by(player) => Some((square, material)),
            _ => None,
        })
    }

    pub fn king(&self, player: Player) -> Option<Square> {
        self.pieces(player)
            .find(|(_, material)| material.piece().is_king())
            .map(|(square, _)| square)
    }

    /// Returns true if any square in `lane` is occupied.
    pub fn is_lane_blocked(&self, lane: Mask) -> bool {
        lane.iter().any(|square| !self.is_vacant(square))
    }
}

impl Index<Square> for Board {
    type Output = Cell;
    #[inline]
    fn index(&self, index: Square) -> &Self::Output {
        &self.cells[index.row()][index.col()]
    }
}

/// Squares strictly between `from` and `to` when the two share a file, rank
/// or diagonal. Empty otherwise.
#[inline]
pub fn between(from: Square, to: Square) -> Mask {
    SQUARES_BETWEEN[from.to_index() * 64 + to.to_index()]
}

static SQUARES_BETWEEN: Lazy<Vec<Mask>> = Lazy::new(|| {
    fn squares_between(start: Square, end: Square) -> Mask {
        let mut mask = Mask::empty();
        if let Some(step) = (end - start).to_unit() {
            let mut next = start + step;
            while let Some(square) = next {
                if square == end {
                    break;
                }
                mask |= square;
                next = square + step;
            }
        }
        mask
    }

    let mut table = vec![Mask::empty(); 64 * 64];
    for start in Square::iter() {
        for end in Square::iter() {
            table[start.to_index() * 64 + end.to_index()] = squares_between(start, end);
        }
    }
    table
});
