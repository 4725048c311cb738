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

//! Text commands typed at the prompt
//!
//! A line of input is one of:
//!
//! * `m <from> <to>` moves a piece, e.g. `m a2 a3`
//! * `u` takes back the last move
//! * `c k` / `c q` castles king-side or queen-side
//! * `q` quits
//!
//! Input is case-insensitive and surrounding whitespace is ignored.
//! Parsing is purely syntactic; whether the command is legal on the
//! current board is decided by the game.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::board::{CastlingSide, File, Player, Rank, Square};

pub const GENERAL_USAGE: &str =
    "Expects [M]ove, [U]ndo, [C]astling [K]ing, [C]astling [Q]ueen or [Q]uit";
pub const MOVE_USAGE: &str = "Expects M XY XY (ex. M A2 A3)";
pub const CASTLE_USAGE: &str = "Expects [C]astling [K]ing or [C]astling [Q]ueen";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Move { from: Square, to: Square },
    Undo,
    Castle(CastlingSide),
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty command")]
    Empty,
    #[error("Unrecognized command!")]
    Unrecognized,
    #[error("Unrecognized command! A move takes two squares, found {0}")]
    MoveArity(usize),
    #[error("Unrecognized command! '{0}' is not a square")]
    AddressLength(String),
    #[error("Unrecognized command! '{0}' should be a letter followed by a digit")]
    AddressClass(String),
    #[error("Unrecognized command! Column '{0}' is off the board")]
    FileOutOfRange(char),
    #[error("Unrecognized command! Row '{0}' is off the board")]
    RankOutOfRange(char),
    #[error("Unrecognized command!")]
    CastleSyntax,
}

impl ParseError {
    /// Usage line to show after the error.
    pub fn hint(&self) -> &'static str {
        match self {
            ParseError::Empty | ParseError::Unrecognized => GENERAL_USAGE,
            ParseError::MoveArity(_)
            | ParseError::AddressLength(_)
            | ParseError::AddressClass(_)
            | ParseError::FileOutOfRange(_)
            | ParseError::RankOutOfRange(_) => MOVE_USAGE,
            ParseError::CastleSyntax => CASTLE_USAGE,
        }
    }
}

/// Parses one line of input. The current player does not change how a line
/// is read; it is accepted so callers can pass the prompt context through.
pub fn parse(line: &str, _current_player: Player) -> Result<Command, ParseError> {
    line.parse()
}

impl FromStr for Command {
    type Err = ParseError;

    /// Dispatches on the first character, so `ma2 a3` reads the same as
    /// `m a2 a3`. Quit and undo must be that single character alone.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim().to_lowercase();
        let mut chars = line.chars();
        let Some(head) = chars.next() else {
            return Err(ParseError::Empty);
        };
        let rest = chars.as_str();
        match head {
            'q' if rest.is_empty() => Ok(Command::Quit),
            'u' if rest.is_empty() => Ok(Command::Undo),
            'm' => parse_move(&rest.split_whitespace().collect::<Vec<_>>()),
            'c' => parse_castle(&line.split_whitespace().collect::<Vec<_>>()),
            _ => Err(ParseError::Unrecognized),
        }
    }
}

fn parse_move(args: &[&str]) -> Result<Command, ParseError> {
    let &[from, to] = args else {
        return Err(ParseError::MoveArity(args.len()));
    };
    let pairs = [to_pair(from), to_pair(to)];

    for (token, pair) in [from, to].iter().zip(&pairs) {
        if pair.is_none() {
            return Err(ParseError::AddressLength(token.to_uppercase()));
        }
    }
    let pairs: Vec<(char, char)> = pairs.into_iter().flatten().collect();

    for (token, &(f, r)) in [from, to].iter().zip(&pairs) {
        if !f.is_alphabetic() || !r.is_ascii_digit() {
            return Err(ParseError::AddressClass(token.to_uppercase()));
        }
    }
    for &(f, _) in &pairs {
        if File::try_from_char(f).is_none() {
            return Err(ParseError::FileOutOfRange(f.to_ascii_uppercase()));
        }
    }
    for &(_, r) in &pairs {
        if Rank::try_from_char(r).is_none() {
            return Err(ParseError::RankOutOfRange(r));
        }
    }

    let mut squares = pairs
        .iter()
        .filter_map(|&(f, r)| Square::try_from_chars(f, r));
    match (squares.next(), squares.next()) {
        (Some(from), Some(to)) => Ok(Command::Move { from, to }),
        _ => Err(ParseError::Unrecognized),
    }
}

/// `tokens` is the whole line, command letter included.
fn parse_castle(tokens: &[&str]) -> Result<Command, ParseError> {
    match tokens {
        ["c", "k"] => Ok(Command::Castle(CastlingSide::King)),
        ["c", "q"] => Ok(Command::Castle(CastlingSide::Queen)),
        _ => Err(ParseError::CastleSyntax),
    }
}

/// Splits a token into its two characters, or None if it is not exactly two
/// characters long.
fn to_pair(token: &str) -> Option<(char, char)> {
    let mut chars = token.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(f), Some(r), None) => Some((f, r)),
        _ => None,
    }
}
