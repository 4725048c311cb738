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

use anyhow::Result;
use tracing::{debug, info};

use super::{Event, Game, GameResult, GameState};
use crate::board::{Player, Turn};
use crate::command::{parse, Command};
use crate::render::{render, DrawInstruction};

/// Everything the game needs from the outside world: a way to read what a
/// player types and a way to show the board and messages.
pub trait Presenter {
    /// Reads one line for `player`. `None` means there is no more input.
    fn read_command_line(&mut self, player: Player) -> Result<Option<String>>;
    fn render(&mut self, frame: &[DrawInstruction]) -> Result<()>;
    /// `hint` is a usage line that may follow the message.
    fn report_error(&mut self, message: &str, hint: Option<&str>) -> Result<()>;
    fn report_event(&mut self, event: &Event) -> Result<()>;
    fn report_winner(&mut self, player: Player) -> Result<()>;
    fn report_stalemate(&mut self) -> Result<()>;
}

/// Drives a game turn by turn until it finishes, a player quits or input
/// runs out.
pub struct Session<P> {
    game: Game,
    presenter: P,
}

impl<P: Presenter> Session<P> {
    pub fn new(presenter: P) -> Self {
        Self::with_game(Game::new(), presenter)
    }

    pub fn with_game(game: Game, presenter: P) -> Self {
        Self { game, presenter }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Runs to the end and returns the final state. Only presenter failures
    /// are errors; bad input is reported and the same player asked again.
    pub fn run(&mut self) -> Result<GameState> {
        while !self.game.is_over() {
            self.step()?;
        }
        if let GameState::Finished(result) = self.game.state() {
            let frame = render(self.game.board(), self.game.turn());
            self.presenter.render(&frame)?;
            match result {
                GameResult::Checkmate { winner } => self.presenter.report_winner(winner)?,
                GameResult::Stalemate => self.presenter.report_stalemate()?,
            }
        }
        Ok(self.game.state())
    }

    /// One prompt: draw, read, parse and apply.
    pub fn step(&mut self) -> Result<()> {
        let player = self.game.turn();
        let frame = render(self.game.board(), player);
        self.presenter.render(&frame)?;

        let command = match self.presenter.read_command_line(player)? {
            Some(line) => match parse(&line, player) {
                Ok(command) => command,
                Err(err) => {
                    debug!(%player, line = line.trim(), %err, "unparsed input");
                    return self.presenter.report_error(&err.to_string(), Some(err.hint()));
                }
            },
            None => {
                info!(%player, "end of input");
                Command::Quit
            }
        };

        match self.game.submit(command) {
            Ok(event) => self.presenter.report_event(&event),
            Err(err) => self.presenter.report_error(&err.to_string(), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::*;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Script {
        input: VecDeque<&'static str>,
        prompts: Vec<Player>,
        errors: Vec<String>,
        events: Vec<Event>,
        frames: usize,
        winner: Option<Player>,
        stalemate: bool,
    }

    impl Script {
        fn new(lines: &[&'static str]) -> Self {
            Self {
                input: lines.iter().copied().collect(),
                ..Default::default()
            }
        }
    }

    impl Presenter for Script {
        fn read_command_line(&mut self, player: Player) -> anyhow::Result<Option<String>> {
            self.prompts.push(player);
            Ok(self.input.pop_front().map(str::to_string))
        }
        fn render(&mut self, _frame: &[DrawInstruction]) -> anyhow::Result<()> {
            self.frames += 1;
            Ok(())
        }
        fn report_error(&mut self, message: &str, _hint: Option<&str>) -> anyhow::Result<()> {
            self.errors.push(message.to_string());
            Ok(())
        }
        fn report_event(&mut self, event: &Event) -> anyhow::Result<()> {
            self.events.push(*event);
            Ok(())
        }
        fn report_winner(&mut self, player: Player) -> anyhow::Result<()> {
            self.winner = Some(player);
            Ok(())
        }
        fn report_stalemate(&mut self) -> anyhow::Result<()> {
            self.stalemate = true;
            Ok(())
        }
    }

    #[test]
    fn test_fools_mate_session() {
        let script = Script::new(&["m f2 f3", "m e7 e5", "m g2 g4", "m d8 h4"]);
        let mut session = Session::new(script);
        let state = session.run().unwrap();
        assert_eq!(
            state,
            GameState::Finished(GameResult::Checkmate { winner: Player::Player2 })
        );
        let script = session.into_presenter();
        assert_eq!(script.winner, Some(Player::Player2));
        assert_eq!(script.events.len(), 4);
        assert_eq!(script.frames, 5);
        assert!(script.errors.is_empty());
    }
    #[test]
    fn test_bad_input_reprompts_same_player() {
        let script = Script::new(&["hello", "m e2", "m e7 e5", "m e2 e4", "q"]);
        let mut session = Session::new(script);
        assert_eq!(session.run().unwrap(), GameState::Quit);
        let script = session.presenter();
        assert_eq!(
            script.prompts,
            vec![
                Player::Player1,
                Player::Player1,
                Player::Player1,
                Player::Player1,
                Player::Player2
            ]
        );
        assert_eq!(script.errors.len(), 3);
        assert_eq!(script.errors[2], MoveError::NotYourPiece(Square::E7).to_string());
        assert_eq!(script.events.last(), Some(&Event::Quit));
    }
    #[test]
    fn test_end_of_input_quits() {
        let mut session = Session::new(Script::new(&["m e2 e4"]));
        assert_eq!(session.run().unwrap(), GameState::Quit);
        assert_eq!(session.game().history().len(), 1);
        assert_eq!(session.presenter().winner, None);
    }
    #[test]
    fn test_stalemate_session() {
        let board = Board::empty()
            .with(Square::A8, Some(Material::player2(Piece::King)))
            .with(Square::B6, Some(Material::player1(Piece::King)))
            .with(Square::D7, Some(Material::player1(Piece::Queen)));
        let game = Game::from_position(Position::from_board(board, Player::Player1));
        let mut session = Session::with_game(game, Script::new(&["m d7 c7"]));
        assert_eq!(
            session.run().unwrap(),
            GameState::Finished(GameResult::Stalemate)
        );
        assert!(session.presenter().stalemate);
    }
}
