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

//! Drawing the board as a list of instructions
//!
//! `render` never writes anywhere. It describes a frame as text runs,
//! pieces and line breaks, and a presenter decides how to show them
//! (colours, escape codes, or nothing at all).

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::board::{in_check, Board, File, Player, Rank, Square};

const HEADER: &str = "    A   B   C   D   E   F   G   H";
const BORDER: &str = "  #################################";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub enum DrawInstruction {
    Text(String),
    Piece { glyph: char, owner: Player },
    Empty,
    LineBreak,
}

/// Describes the board with rank 8 at the top, as Player1 sees it.
pub fn render(board: &Board, current_player: Player) -> Vec<DrawInstruction> {
    use DrawInstruction::*;

    let mut frame = vec![Text(HEADER.to_string()), LineBreak];
    for rank in Rank::iter().rev() {
        frame.push(Text(BORDER.to_string()));
        frame.push(LineBreak);
        frame.push(Text(format!("{} ", rank)));
        for file in File::iter() {
            frame.push(Text("#".to_string()));
            frame.push(match board.get(Square::new(file, rank)) {
                Some(material) => Piece {
                    glyph: material.piece().glyph(),
                    owner: material.owner(),
                },
                None => Empty,
            });
        }
        frame.push(Text(format!("# {}", rank)));
        frame.push(LineBreak);
    }
    frame.extend([Text(BORDER.to_string()), LineBreak, Text(HEADER.to_string()), LineBreak]);

    if in_check(board, current_player) {
        frame.extend([Text(format!("{} is in check!", current_player)), LineBreak]);
    }
    frame
}

/// Flattens a frame into uncoloured text.
pub fn to_plain_text(frame: &[DrawInstruction]) -> String {
    let mut text = String::new();
    for instruction in frame {
        match instruction {
            DrawInstruction::Text(s) => text.push_str(s),
            DrawInstruction::Piece { glyph, .. } => {
                text.push(' ');
                text.push(*glyph);
                text.push(' ');
            }
            DrawInstruction::Empty => text.push_str("   "),
            DrawInstruction::LineBreak => text.push('\n'),
        }
    }
    text
}
