//! Bot-vs-bot game driver.

use serde::Serialize;

use crate::board::piece::{GameStatus, Player, EMPTY};
use crate::board::Board;
use crate::search::alphabeta::Searcher;

/// One finished game, in a shape that serializes cleanly to JSON lines.
#[derive(Debug, Serialize)]
pub struct GameRecord {
    /// Coordinate notation, e.g. "e2e4", in play order.
    pub moves: Vec<String>,
    pub result: String,
    pub plies: u32,
    /// Total search nodes across both sides.
    pub nodes: u64,
}

/// Plays two searchers against each other from the starting position
/// until a terminal status or the ply cap. Each move is committed the
/// same way the interactive game commits one: apply, finalize, update.
pub fn play_game(white: &mut Searcher, black: &mut Searcher, max_plies: u32) -> GameRecord {
    let mut board = Board::new();
    let mut record = GameRecord {
        moves: Vec::new(),
        result: String::new(),
        plies: 0,
        nodes: 0,
    };

    loop {
        match board.status() {
            GameStatus::Checkmate => {
                record.result = format!("checkmate, {} wins", board.turn().opponent());
                break;
            }
            GameStatus::Stalemate => {
                record.result = "stalemate".to_string();
                break;
            }
            GameStatus::Normal | GameStatus::Check => {}
        }

        if record.plies >= max_plies {
            record.result = "ply cap reached".to_string();
            break;
        }

        let searcher = match board.turn() {
            Player::White => &mut *white,
            Player::Black => &mut *black,
        };

        let m = searcher.run(&mut board);
        record.nodes += searcher.nodes;
        if m.piece == EMPTY {
            // The search found nothing to play; treat as a dead position.
            record.result = "no move available".to_string();
            break;
        }

        board.apply_move(&m);
        board.finalize_move(&m);
        board.update();

        record.moves.push(m.to_string());
        record.plies += 1;
    }

    record
}
