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

use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use std::io::{self, BufRead, Write};

use crate::board::Player;
use crate::command::GENERAL_USAGE;
use crate::game::session::Presenter;
use crate::game::Event;
use crate::render::DrawInstruction;

/// A `Presenter` over any line-based reader and writer. Player1 is drawn in
/// red and Player2 in blue unless colour is turned off.
pub struct Console<R, W> {
    input: R,
    output: W,
    color: bool,
    show_help: bool,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            color: true,
            show_help: true,
        }
    }

    /// No colour and no usage line before each prompt.
    pub fn plain(input: R, output: W) -> Self {
        Self::new(input, output).with_color(false).with_help(false)
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_help(mut self, show_help: bool) -> Self {
        self.show_help = show_help;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn paint(&self, text: &str, player: Player) -> String {
        if !self.color {
            return text.to_string();
        }
        let painted: ColoredString = match player {
            Player::Player1 => text.red(),
            Player::Player2 => text.blue(),
        };
        painted.to_string()
    }

    /// Errors and usage lines are red whenever colour is on.
    fn alert(&self, text: &str) -> String {
        if self.color {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }
}

impl<R: BufRead, W: Write> Presenter for Console<R, W> {
    fn read_command_line(&mut self, player: Player) -> Result<Option<String>> {
        if self.show_help {
            let help = self.alert(GENERAL_USAGE);
            writeln!(self.output, "{}", help)?;
        }
        let prompt = self.paint(&format!("{}:", player), player);
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read a command")?;
        Ok((read > 0).then_some(line))
    }

    fn render(&mut self, frame: &[DrawInstruction]) -> Result<()> {
        let mut text = String::new();
        for instruction in frame {
            match instruction {
                DrawInstruction::Text(s) => text.push_str(s),
                DrawInstruction::Piece { glyph, owner } => {
                    text.push(' ');
                    text.push_str(&self.paint(&glyph.to_string(), *owner));
                    text.push(' ');
                }
                DrawInstruction::Empty => text.push_str("   "),
                DrawInstruction::LineBreak => text.push('\n'),
            }
        }
        self.output
            .write_all(text.as_bytes())
            .context("Failed to draw the board")?;
        Ok(())
    }

    fn report_error(&mut self, message: &str, hint: Option<&str>) -> Result<()> {
        let message = self.alert(message);
        writeln!(self.output, "{}", message)?;
        if let Some(hint) = hint {
            let hint = self.alert(hint);
            writeln!(self.output, "{}", hint)?;
        }
        Ok(())
    }

    fn report_event(&mut self, event: &Event) -> Result<()> {
        writeln!(self.output, "{}", event)?;
        Ok(())
    }

    fn report_winner(&mut self, player: Player) -> Result<()> {
        let message = self.paint(&format!("{} won!", player), player);
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    fn report_stalemate(&mut self) -> Result<()> {
        writeln!(self.output, "Stalemate! Nobody won.")?;
        Ok(())
    }
}
