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
use std::ops::{Index, IndexMut, Not};
use strum_macros::Display;
use strum_macros::EnumIter;

/// The content of one board square.
pub type Cell = Option<Material>;

/// A piece together with the player who owns it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Material {
    owner: Player,
    piece: Piece,
}

impl Material {
    #[inline]
    pub const fn new(owner: Player, piece: Piece) -> Self {
        Self { owner, piece }
    }

    #[inline]
    pub const fn player1(piece: Piece) -> Self {
        Self::new(Player1, piece)
    }

    #[inline]
    pub const fn player2(piece: Piece) -> Self {
        Self::new(Player2, piece)
    }

    #[inline]
    pub fn owner(&self) -> Player {
        self.owner
    }

    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    #[inline]
    pub fn is_owned_by(&self, player: Player) -> bool {
        self.owner == player
    }
}

use Player::{Player1, Player2};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Player {
    Player1,
    Player2,
}

impl Player {
    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            Player1 => Player2,
            Player2 => Player1,
        }
    }

    /// Rank step a pawn of this player takes when advancing.
    #[inline]
    pub const fn forward(self) -> isize {
        match self {
            Player1 => 1,
            Player2 => -1,
        }
    }
}

impl Not for Player {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        self.opponent()
    }
}

/// One value per player.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair<T>((T, T));

impl<T> Pair<T> {
    pub const fn new(player1: T, player2: T) -> Self {
        Self((player1, player2))
    }
}

impl<T> Index<Player> for Pair<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: Player) -> &Self::Output {
        match index {
            Player1 => &self.0 .0,
            Player2 => &self.0 .1,
        }
    }
}

impl<T> IndexMut<Player> for Pair<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: Player) -> &mut Self::Output {
        match index {
            Player1 => &mut self.0 .0,
            Player2 => &mut self.0 .1,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
use Piece::{Bishop, King, Knight, Pawn, Queen, Rook};

impl Piece {
    /// Single-letter glyph used when drawing the board. The knight is `N`
    /// because `K` belongs to the king.
    pub const fn glyph(&self) -> char {
        match self {
            Pawn => 'P',
            Knight => 'N',
            Bishop => 'B',
            Rook => 'R',
            Queen => 'Q',
            King => 'K',
        }
    }
    pub fn is_king(&self) -> bool {
        matches!(*self, King)
    }
}
