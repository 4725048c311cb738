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

use crate::board::{CastleOutcome, MoveOutcome, Player, Position};

/// Something that was played and can be taken back.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Played {
    Move(MoveOutcome),
    Castle(CastleOutcome),
}

impl Played {
    pub fn player(&self) -> Player {
        match self {
            Played::Move(outcome) => outcome.player,
            Played::Castle(outcome) => outcome.player,
        }
    }
}

impl fmt::Display for Played {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Played::Move(mv) => {
                write!(f, "{} {} {}", mv.piece, mv.from, mv.to)?;
                if let Some(captured) = mv.captured {
                    write!(f, " takes {}", captured.piece())?;
                }
                if let Some(promotion) = mv.promotion {
                    write!(f, " and promotes to {}", promotion)?;
                }
                Ok(())
            }
            Played::Castle(castle) => write!(f, "castles {}", castle.side),
        }
    }
}

/// One applied turn together with the position it was played from.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HistoryEntry {
    pub before: Position,
    pub played: Played,
}

/// Applied turns, most recent last. Only ever grows by `push` and shrinks by
/// `pop`, so undo can walk back to the starting position.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn push(&mut self, before: Position, played: Played) {
        self.entries.push(HistoryEntry { before, played });
    }
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.iter()
    }
}
