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

use std::io::Cursor;

use console_chess::*;

fn play(script: &str) -> (GameState, String) {
    let console = Console::plain(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    let mut session = Session::new(console);
    let state = session.run().unwrap();
    let output = String::from_utf8(session.into_presenter().into_output()).unwrap();
    (state, output)
}

#[test]
fn test_fools_mate() {
    let (state, output) = play("m f2 f3\nm e7 e5\nM G2 G4\nm d8 h4\n");
    assert_eq!(
        state,
        GameState::Finished(GameResult::Checkmate {
            winner: Player::Player2
        })
    );
    assert!(output.ends_with("Player2 won!\n"));
    assert!(output.contains("Player1 is in check!"));
}

#[test]
fn test_quit() {
    let (state, output) = play("q\nm e2 e4\n");
    assert_eq!(state, GameState::Quit);
    assert_eq!(output.matches("Player1:").count(), 1);
    assert!(!output.contains("Player2:"));
}

#[test]
fn test_invalid_input_keeps_turn() {
    let (state, output) = play("m e2 e5\nm a9 a1\nc k\nu\nm e2 e4\n");
    assert_eq!(state, GameState::Quit);
    assert!(output.contains(&MoveError::IllegalShape(Piece::Pawn, Square::E2, Square::E5).to_string()));
    assert!(output.contains("Unrecognized command!"));
    assert!(output.contains(MOVE_USAGE));
    assert!(output.contains(&CastleError::PathBlocked(CastlingSide::King, Square::F1).to_string()));
    assert!(output.contains("Nothing to undo!"));
    assert_eq!(output.matches("Player1:").count(), 5);
    assert_eq!(output.matches("Player2:").count(), 1);
}

#[test]
fn test_undo_round_trip() {
    let (_, output) = play("m e2 e4\nu\nm d2 d4\n");
    assert!(output.contains("Took back Pawn E2 E4; Player1 to play"));
    assert!(output.contains("Player1 played Pawn D2 D4"));
}
