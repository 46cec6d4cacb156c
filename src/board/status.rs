//! Derived game state: check, checkmate, and stalemate detection.

use super::piece::{
    GameStatus, Player, BISHOP_BLACK, BISHOP_WHITE, KNIGHT_BLACK, KNIGHT_WHITE, PAWN_BLACK,
    PAWN_WHITE, QUEEN_BLACK, QUEEN_WHITE, ROOK_BLACK, ROOK_WHITE,
};
use super::{Board, HISTORY_LEN};

impl Board {
    /// True if any pseudo-legal opponent reply captures `player`'s king.
    /// Check is defined through the reply simulation rather than an attack
    /// map, matching how the search punishes self-check one ply up.
    pub fn in_check(&self, player: Player) -> bool {
        let king = player.king();
        self.generate_moves(player.opponent())
            .iter()
            .any(|m| m.captured == king)
    }

    /// True if every pseudo-legal move for `player` still leaves the king
    /// capturable. A player with no moves at all is also mated.
    pub fn in_checkmate(&mut self, player: Player) -> bool {
        let moves = self.generate_moves(player);

        for m in &moves {
            self.apply_move(m);
            let escaped = !self.in_check(player);
            self.undo_move(m);
            if escaped {
                return false;
            }
        }

        true
    }

    /// Draw detection, two independent conditions:
    ///  1. the last 12 committed moves form three identical 4-move cycles
    ///     (a cheap proxy for threefold repetition);
    ///  2. no pawns, rooks, or queens remain and neither side has more
    ///     than one minor piece.
    pub fn is_stalemate(&self) -> bool {
        // The cycle test needs a fully populated history; before 12
        // committed moves the untouched slots would all compare equal.
        if self.moves_recorded >= HISTORY_LEN as u32 {
            let h = &self.history;
            if h[0] == h[4]
                && h[0] == h[8]
                && h[1] == h[5]
                && h[1] == h[9]
                && h[2] == h[6]
                && h[2] == h[10]
                && h[3] == h[7]
                && h[3] == h[11]
            {
                return true;
            }
        }

        let mut white_minors = 0;
        let mut black_minors = 0;

        for x in 0..8 {
            for y in 0..8 {
                match self.cells[x][y] {
                    PAWN_WHITE | PAWN_BLACK | ROOK_WHITE | ROOK_BLACK | QUEEN_WHITE
                    | QUEEN_BLACK => return false,
                    KNIGHT_WHITE | BISHOP_WHITE => white_minors += 1,
                    KNIGHT_BLACK | BISHOP_BLACK => black_minors += 1,
                    _ => {}
                }

                if white_minors > 1 || black_minors > 1 {
                    return false;
                }
            }
        }

        true
    }

    /// Re-derives the game status after a committed move: toggles the turn
    /// and classifies the position for the new side to move.
    pub fn update(&mut self) {
        self.turn = self.turn.opponent();

        self.status = if self.in_checkmate(self.turn) {
            GameStatus::Checkmate
        } else if self.in_check(self.turn) {
            GameStatus::Check
        } else if self.is_stalemate() {
            GameStatus::Stalemate
        } else {
            GameStatus::Normal
        };
    }
}
