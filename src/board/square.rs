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
use std::fmt;
use std::ops::{Add, BitOr, BitOrAssign, Sub};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use super::grid::BoardError;
use super::material::Player;

use Player::*;

/// One of the 64 squares. Squares are ordered rank by rank starting at
/// rank 1, so `to_index() == row * 8 + col` with row 0 being rank 1.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

use Square::{
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
};

impl Square {
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self::from_index(rank.to_index() * 8 + file.to_index())
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [Square; 64] = [
            A1, B1, C1, D1, E1, F1, G1, H1,
            A2, B2, C2, D2, E2, F2, G2, H2,
            A3, B3, C3, D3, E3, F3, G3, H3,
            A4, B4, C4, D4, E4, F4, G4, H4,
            A5, B5, C5, D5, E5, F5, G5, H5,
            A6, B6, C6, D6, E6, F6, G6, H6,
            A7, B7, C7, D7, E7, F7, G7, H7,
            A8, B8, C8, D8, E8, F8, G8, H8,
        ];
        debug_assert!(index < 64);
        VALUES[index]
    }

    /// Converts raw (row, column) board indices into a square, where row 0
    /// is rank 1 and column 0 is file A.
    pub fn try_from_coords(row: usize, col: usize) -> Result<Self, BoardError> {
        if row >= 8 || col >= 8 {
            return Err(BoardError::OutOfRange { row, col });
        }
        Ok(Self::from_index(row * 8 + col))
    }

    #[inline]
    pub fn try_from_string(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let f = chars.next()?;
        let r = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::try_from_chars(f, r)
    }

    #[inline]
    pub fn try_from_chars(f: char, r: char) -> Option<Self> {
        let file = File::try_from_char(f)?;
        let rank = Rank::try_from_char(r)?;
        Some(Self::new(file, rank))
    }

    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub const fn to_mask(&self) -> Mask {
        Mask::new(0x1 << self.to_index())
    }
    /// Board row, 0 for rank 1.
    #[inline]
    pub const fn row(&self) -> usize {
        self.to_index() / 8
    }
    /// Board column, 0 for file A.
    #[inline]
    pub const fn col(&self) -> usize {
        self.to_index() % 8
    }
    #[inline]
    pub const fn file(&self) -> File {
        File::from_index(self.col())
    }
    #[inline]
    pub const fn rank(&self) -> Rank {
        Rank::from_index(self.row())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value.to_index()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum File {
    FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH,
}

use File::{FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH};

impl File {
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [File; 8] = [FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH];
        debug_assert!(index < 8);
        VALUES[index]
    }
    #[inline]
    pub const fn try_from_char(c: char) -> Option<Self> {
        match c {
            'a' | 'A' => Some(FileA),
            'b' | 'B' => Some(FileB),
            'c' | 'C' => Some(FileC),
            'd' | 'D' => Some(FileD),
            'e' | 'E' => Some(FileE),
            'f' | 'F' => Some(FileF),
            'g' | 'G' => Some(FileG),
            'h' | 'H' => Some(FileH),
            _ => None,
        }
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub const fn to_char(&self) -> char {
        const VALUES: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];
        VALUES[self.to_index()]
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Add<isize> for File {
    type Output = Option<Self>;
    fn add(self, rhs: isize) -> Self::Output {
        match self.to_index().checked_add_signed(rhs) {
            Some(i) if i < 8 => Some(Self::from_index(i)),
            _ => None,
        }
    }
}

impl Sub for File {
    type Output = isize;
    fn sub(self, rhs: Self) -> Self::Output {
        self.to_index() as isize - rhs.to_index() as isize
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Rank {
    Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Rank7, Rank8,
}

use Rank::{Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Rank7, Rank8};

impl Rank {
    /// The rank holding the player's pieces at the start of a game.
    #[inline]
    pub const fn back_rank(player: Player) -> Self {
        match player {
            Player1 => Rank1,
            Player2 => Rank8,
        }
    }
    /// The rank holding the player's pawns at the start of a game.
    #[inline]
    pub const fn pawn_rank(player: Player) -> Self {
        match player {
            Player1 => Rank2,
            Player2 => Rank7,
        }
    }
    /// The rank on which the player's pawns promote.
    #[inline]
    pub const fn promotion_rank(player: Player) -> Self {
        Self::back_rank(player.opponent())
    }
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        const VALUES: [Rank; 8] = [Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Rank7, Rank8];
        debug_assert!(index < 8);
        VALUES[index]
    }
    #[inline]
    pub const fn try_from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Rank1),
            '2' => Some(Rank2),
            '3' => Some(Rank3),
            '4' => Some(Rank4),
            '5' => Some(Rank5),
            '6' => Some(Rank6),
            '7' => Some(Rank7),
            '8' => Some(Rank8),
            _ => None,
        }
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    /// The printed rank number, 1 through 8.
    #[inline]
    pub const fn number(&self) -> usize {
        self.to_index() + 1
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl Add<isize> for Rank {
    type Output = Option<Self>;
    fn add(self, rhs: isize) -> Self::Output {
        match self.to_index().checked_add_signed(rhs) {
            Some(i) if i < 8 => Some(Self::from_index(i)),
            _ => None,
        }
    }
}

impl Sub for Rank {
    type Output = isize;
    fn sub(self, rhs: Self) -> Self::Output {
        self.to_index() as isize - rhs.to_index() as isize
    }
}

/// Displacement between two squares: `x` counts files to the right,
/// `y` counts ranks towards rank 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: isize,
    pub y: isize,
}

impl Offset {
    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_straight(&self) -> bool {
        (self.x == 0) != (self.y == 0)
    }

    #[inline]
    pub fn is_diagonal(&self) -> bool {
        self.x != 0 && self.x.abs() == self.y.abs()
    }

    pub fn to_unit(self) -> Option<Self> {
        if self.is_straight() || self.is_diagonal() {
            Some(Self::new(self.x.signum(), self.y.signum()))
        } else {
            None
        }
    }
}

impl Add<Offset> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Offset) -> Self::Output {
        let file = (self.file() + rhs.x)?;
        let rank = (self.rank() + rhs.y)?;
        Some(Square::new(file, rank))
    }
}

impl Sub for Square {
    type Output = Offset;
    fn sub(self, rhs: Self) -> Self::Output {
        Offset::new(self.file() - rhs.file(), self.rank() - rhs.rank())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

use Direction::*;

impl Direction {
    #[inline]
    pub fn is_straight(&self) -> bool {
        matches!(*self, North | East | South | West)
    }
    #[inline]
    pub fn is_diagonal(&self) -> bool {
        !self.is_straight()
    }
    pub fn straights() -> impl Iterator<Item = Self> {
        Self::iter().filter(Self::is_straight)
    }
    pub fn diagonals() -> impl Iterator<Item = Self> {
        Self::iter().filter(Self::is_diagonal)
    }
}

impl From<Direction> for Offset {
    fn from(value: Direction) -> Self {
        match value {
            North => Self::new(0, 1),
            NorthEast => Self::new(1, 1),
            East => Self::new(1, 0),
            SouthEast => Self::new(1, -1),
            South => Self::new(0, -1),
            SouthWest => Self::new(-1, -1),
            West => Self::new(-1, 0),
            NorthWest => Self::new(-1, 1),
        }
    }
}

impl Add<Direction> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Direction) -> Self::Output {
        let offset: Offset = rhs.into();
        self + offset
    }
}

/// A set of squares, one bit per square.
#[derive(Clone, Serialize, Deserialize, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mask(u64);

impl Mask {
    #[inline]
    pub const fn new(val: u64) -> Self {
        Self(val)
    }

    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn from_squares<I>(squares: I) -> Self
    where
        I: IntoIterator<Item = Square>,
    {
        squares
            .into_iter()
            .fold(Self::empty(), |mask, square| mask | square)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn contains(&self, square: Square) -> bool {
        (self.0 & square.to_mask().0) != 0
    }

    pub fn iter(&self) -> MaskIter {
        MaskIter(self.0)
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                let square = Square::new(file, rank);
                write!(f, "{}", if self.contains(square) { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl BitOr for Mask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Mask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitOr<Square> for Mask {
    type Output = Self;
    fn bitor(self, rhs: Square) -> Self {
        Self(self.0 | rhs.to_mask().0)
    }
}

impl BitOrAssign<Square> for Mask {
    fn bitor_assign(&mut self, rhs: Square) {
        self.0 |= rhs.to_mask().0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaskIter(u64);

impl Iterator for MaskIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 != 0 {
            let square = Square::from_index(self.0.trailing_zeros() as usize);
            self.0 &= self.0 - 1;
            return Some(square);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use Square::*;

    #[test]
    fn test_square_coordinates() {
        assert_eq!(A1.row(), 0);
        assert_eq!(A1.col(), 0);
        assert_eq!(H8.row(), 7);
        assert_eq!(H8.col(), 7);
        assert_eq!(D2.rank(), Rank::Rank2);
        assert_eq!(D2.file(), File::FileD);
        assert_eq!(Square::new(File::FileE, Rank::Rank4), E4);
    }
    #[test]
    fn test_square_from_string() {
        assert_eq!(Square::try_from_string("d2"), Some(D2));
        assert_eq!(Square::try_from_string("D2"), Some(D2));
        assert_eq!(Square::try_from_string("h8"), Some(H8));
        assert_eq!(Square::try_from_string("i1"), None);
        assert_eq!(Square::try_from_string("a9"), None);
        assert_eq!(Square::try_from_string("a0"), None);
        assert_eq!(Square::try_from_string("a"), None);
        assert_eq!(Square::try_from_string("a12"), None);
    }
    #[test]
    fn test_square_display() {
        assert_eq!(D2.to_string(), "D2");
        assert_eq!(H8.to_string(), "H8");
    }
    #[test]
    fn test_square_from_coords() {
        assert_eq!(Square::try_from_coords(0, 0).unwrap(), A1);
        assert_eq!(Square::try_from_coords(7, 3).unwrap(), D8);
        assert!(matches!(
            Square::try_from_coords(8, 0),
            Err(BoardError::OutOfRange { row: 8, col: 0 })
        ));
        assert!(Square::try_from_coords(0, 8).is_err());
    }
    #[test]
    fn test_offsets() {
        assert_eq!(E4 - E2, Offset::new(0, 2));
        assert_eq!(B1 - C3, Offset::new(-1, -2));
        assert_eq!(A1 + Offset::new(1, 2), Some(B3));
        assert_eq!(A1 + Offset::new(-1, 0), None);
        assert_eq!(H8 + Direction::North, None);
        assert_eq!(D4 + Direction::SouthWest, Some(C3));
    }
    #[test]
    fn test_offset_to_unit() {
        assert_eq!(Offset::new(0, 5).to_unit(), Some(Offset::new(0, 1)));
        assert_eq!(Offset::new(-3, 3).to_unit(), Some(Offset::new(-1, 1)));
        assert_eq!(Offset::new(1, 2).to_unit(), None);
        assert_eq!(Offset::new(0, 0).to_unit(), None);
    }
    #[test]
    fn test_mask_iter() {
        let mask = Mask::from_squares([H8, A1, C3]);
        assert_eq!(mask.len(), 3);
        assert!(mask.contains(C3));
        assert!(!mask.contains(C4));
        let squares: Vec<Square> = mask.iter().collect();
        assert_eq!(squares, vec![A1, C3, H8]);
    }
}
