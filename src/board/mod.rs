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

//! Chess board and move legality for a two-player game
//!
//! A _board_ holds the contents of the 64 squares and the rules that
//! decide which moves are legal. The following features are supported:
//!
//! [x] Per-piece movement rules with path blocking
//! [x] Captures, check and king safety
//! [x] Castling on either side, with eligibility tracking
//! [x] Checkmate and stalemate detection
//! [x] Pawn promotion (always to a queen)
//! [ ] En passant
//! [ ] Draws by repetition, the fifty-move rule or insufficient material
//!
//! Some of the key abstractions include:
//!
//! * A `Square` represents the coordinates for a single square
//!   on an 8-by-8 board. The 8 rows and 8 columns on a board
//!   are represented by `Rank` (`Rank1` .. `Rank8`) and `File`
//!   (`FileA` .. `FileH`) respectively. Each square is named using
//!   the letter of the file followed by the number of the rank
//!   (e.g. `A1` .. `H8`). Row 0 is rank 1, nearest `Player1`.
//!
//! * A `Mask` is a 64-bit (u64) value in which each bit maps to a
//!   square on the board. Masks are used for attacked squares, legal
//!   destinations and the lanes a castle must cross, and can be
//!   built up with the `|` and `|=` operators.
//!
//! * `Material` is a `Piece` owned by a `Player`. A `Cell` is an
//!   optional `Material`, and a `Board` is an 8x8 grid of cells
//!   with no knowledge of turns or rules.
//!
//! * `validate` and `validate_and_apply` implement the per-piece
//!   movement contract for a single move on a bare board. They do not
//!   look at check; that is layered on top by `Position`.
//!
//! * A `Position` holds the board, whose turn it is and each player's
//!   `CastlingRights`. It rejects moves that would leave the mover's
//!   king attacked, executes castling, enumerates legal moves and
//!   recognizes checkmate and stalemate. Positions are `Copy`, so
//!   taking a move back is a matter of keeping the previous one.
//!

mod attacks;
mod castling;
mod grid;
mod material;
mod moves;
mod position;
mod square;

pub use attacks::*;
pub use castling::*;
pub use grid::*;
pub use material::*;
pub use moves::*;
pub use position::*;
pub use square::*;

pub trait Turn {
    fn turn(&self) -> Player;
}
