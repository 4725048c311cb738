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
use thiserror::Error;
use tracing::{debug, info};

use crate::board::{
    Board, CastleError, CastleOutcome, CastlingSide, LegalMove, MoveError, MoveOutcome, Player,
    Position, Square, Turn,
};
use crate::command::Command;

mod history;
pub mod session;

pub use history::*;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    AwaitingCommand(Player),
    Finished(GameResult),
    Quit,
}

impl GameState {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameState::AwaitingCommand(_))
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    Checkmate { winner: Player },
    Stalemate,
}

impl GameResult {
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::Checkmate { winner } => Some(*winner),
            GameResult::Stalemate => None,
        }
    }
}

/// What an accepted command did.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    Moved(MoveOutcome),
    Castled(CastleOutcome),
    Undone { restored: Player, undone: Played },
    Quit,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Moved(outcome) => {
                write!(f, "{} played {}", outcome.player, Played::Move(*outcome))
            }
            Event::Castled(outcome) => {
                write!(f, "{} {}", outcome.player, Played::Castle(*outcome))
            }
            Event::Undone { restored, undone } => {
                write!(f, "Took back {}; {} to play", undone, restored)
            }
            Event::Quit => write!(f, "Game abandoned"),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error(transparent)]
    Castle(#[from] CastleError),
    #[error("Nothing to undo!")]
    NothingToUndo,
    #[error("The game is over.")]
    GameOver,
}

/// A game between two players at one console: the current position, every
/// position it came from, and whether the game is still going.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    history: History,
    state: GameState,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Position::new())
    }

    /// Starts a game from an arbitrary position. The position may already
    /// be checkmate or stalemate, in which case the game is over at once.
    pub fn from_position(position: Position) -> Self {
        let mut game = Self {
            position,
            history: History::new(),
            state: GameState::AwaitingCommand(position.turn()),
        };
        game.state = game.evaluate();
        game
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }
    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }
    #[inline]
    pub fn board(&self) -> &Board {
        self.position.board()
    }
    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }
    #[inline]
    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        if self.is_over() {
            return Vec::new();
        }
        self.position.legal_moves()
    }

    /// Applies a parsed command. A rejected command leaves the game exactly
    /// as it was.
    pub fn submit(&mut self, command: Command) -> Result<Event, GameError> {
        let result = match command {
            Command::Move { from, to } => self.play_move(from, to),
            Command::Castle(side) => self.castle(side),
            Command::Undo => self.undo(),
            Command::Quit => self.quit(),
        };
        match &result {
            Ok(event) => debug!(?command, %event, "command applied"),
            Err(err) => debug!(?command, %err, "command rejected"),
        }
        result
    }

    pub fn play_move(&mut self, from: Square, to: Square) -> Result<Event, GameError> {
        self.ensure_running()?;
        let before = self.position;
        let outcome = self.position.play_move(from, to)?;
        self.history.push(before, Played::Move(outcome));
        self.advance();
        Ok(Event::Moved(outcome))
    }

    pub fn castle(&mut self, side: CastlingSide) -> Result<Event, GameError> {
        self.ensure_running()?;
        let before = self.position;
        let outcome = self.position.castle(side)?;
        self.history.push(before, Played::Castle(outcome));
        self.advance();
        Ok(Event::Castled(outcome))
    }

    /// Restores the position before the last applied move, including whose
    /// turn it was and both players' castling rights.
    pub fn undo(&mut self) -> Result<Event, GameError> {
        self.ensure_running()?;
        let entry = self.history.pop().ok_or(GameError::NothingToUndo)?;
        self.position = entry.before;
        self.state = GameState::AwaitingCommand(self.position.turn());
        Ok(Event::Undone {
            restored: self.position.turn(),
            undone: entry.played,
        })
    }

    pub fn quit(&mut self) -> Result<Event, GameError> {
        self.ensure_running()?;
        self.state = GameState::Quit;
        info!(player = %self.position.turn(), "game quit");
        Ok(Event::Quit)
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        match self.state {
            GameState::AwaitingCommand(_) => Ok(()),
            _ => Err(GameError::GameOver),
        }
    }

    fn advance(&mut self) {
        self.state = self.evaluate();
        if let GameState::Finished(result) = self.state {
            info!(?result, moves = self.history.len(), "game finished");
        }
    }

    /// Checkmate is won by the player who just moved, i.e. the one not on
    /// turn.
    fn evaluate(&self) -> GameState {
        let turn = self.position.turn();
        if self.position.is_checkmate() {
            GameState::Finished(GameResult::Checkmate { winner: !turn })
        } else if self.position.is_stalemate() {
            GameState::Finished(GameResult::Stalemate)
        } else {
            GameState::AwaitingCommand(turn)
        }
    }
}

impl Turn for Game {
    #[inline]
    fn turn(&self) -> Player {
        self.position.turn()
    }
}
