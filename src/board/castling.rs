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
use strum_macros::{Display, EnumIter};
use thiserror::Error;

use super::grid::between;
use super::material::{Pair, Player};
use super::square::{File, Mask, Rank, Square};

use File::*;

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum CastlingSide {
    #[strum(serialize = "king-side")]
    King,
    #[strum(serialize = "queen-side")]
    Queen,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleError {
    #[error("Cannot castle {0}: the king or that rook has already moved")]
    RightsLost(CastlingSide),
    #[error("Cannot castle {0}: the king and rook are not on their starting squares")]
    PiecesMissing(CastlingSide),
    #[error("Cannot castle {0}: {1} is occupied")]
    PathBlocked(CastlingSide, Square),
    #[error("Cannot castle while in check")]
    KingInCheck,
    #[error("Cannot castle {0}: the king would cross or land on attacked square {1}")]
    PathAttacked(CastlingSide, Square),
}

/// The king and rook relocation performed by a castle.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleOutcome {
    pub player: Player,
    pub side: CastlingSide,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
}

/// Per-player castling eligibility. A side stays available only while
/// neither the king nor that side's rook has left its starting square.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    player: Player,
    king_side: bool,
    queen_side: bool,
}

impl CastlingRights {
    pub fn new(player: Player, king_side: bool, queen_side: bool) -> Self {
        Self {
            player,
            king_side,
            queen_side,
        }
    }
    #[inline]
    pub fn allows(&self, side: CastlingSide) -> bool {
        match side {
            CastlingSide::King => self.king_side,
            CastlingSide::Queen => self.queen_side,
        }
    }
    #[inline]
    pub fn any(&self) -> bool {
        self.king_side || self.queen_side
    }
    #[inline]
    pub fn rank(&self) -> Rank {
        Rank::back_rank(self.player)
    }
    #[inline]
    pub fn king_src(&self) -> Square {
        Square::new(FileE, self.rank())
    }
    #[inline]
    pub fn rook_src(&self, side: CastlingSide) -> Square {
        match side {
            CastlingSide::King => Square::new(FileH, self.rank()),
            CastlingSide::Queen => Square::new(FileA, self.rank()),
        }
    }
    #[inline]
    pub fn king_dest(&self, side: CastlingSide) -> Square {
        match side {
            CastlingSide::King => Square::new(FileG, self.rank()),
            CastlingSide::Queen => Square::new(FileC, self.rank()),
        }
    }
    #[inline]
    pub fn rook_dest(&self, side: CastlingSide) -> Square {
        match side {
            CastlingSide::King => Square::new(FileF, self.rank()),
            CastlingSide::Queen => Square::new(FileD, self.rank()),
        }
    }
    /// Squares that must be empty for the castle.
    pub fn blocking_lane(&self, side: CastlingSide) -> Mask {
        between(self.king_src(), self.rook_src(side))
    }
    /// Squares the king crosses or lands on; none may be attacked.
    pub fn king_path(&self, side: CastlingSide) -> Mask {
        let dest = self.king_dest(side);
        between(self.king_src(), dest) | dest
    }

    /// Clears whichever sides depend on `square`. Called with both ends of
    /// every applied move, so a rook that is captured on its home square
    /// also loses its side.
    pub fn update(&mut self, square: Square) {
        if square == self.king_src() {
            self.clear();
        }
        if square == self.rook_src(CastlingSide::King) {
            self.king_side = false;
        }
        if square == self.rook_src(CastlingSide::Queen) {
            self.queen_side = false;
        }
    }
    pub fn clear(&mut self) {
        self.king_side = false;
        self.queen_side = false;
    }
}

impl Default for Pair<CastlingRights> {
    fn default() -> Self {
        Pair::new(
            CastlingRights::new(Player::Player1, true, true),
            CastlingRights::new(Player::Player2, true, true),
        )
    }
}
