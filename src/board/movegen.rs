//! Pseudo-legal move generation.
//!
//! `is_legal` checks piece geometry and occupancy only. It deliberately
//! does not test whether a move leaves the mover's own king capturable,
//! and castling is not tested against moving through check. Self-check is
//! caught one ply up in the search, where the opponent's king-capture
//! reply scores as an overwhelming refutation; the interactive layer and
//! the search root enforce the rest. Keeping generation free of recursive
//! lookahead is what bounds it at a flat scan of the grid.

use super::piece::{
    is_black, is_white, Move, Player, BISHOP_BLACK, BISHOP_WHITE, EMPTY, KING_BLACK, KING_WHITE,
    KNIGHT_BLACK, KNIGHT_WHITE, PAWN_BLACK, PAWN_WHITE, QUEEN_BLACK, QUEEN_WHITE, ROOK_BLACK,
    ROOK_WHITE,
};
use super::Board;

/// Sizing assumption carried over from the fixed move buffers this design
/// grew up with. The list is growable; exceeding the hint is only logged.
pub const MOVE_LIST_HINT: usize = 75;

impl Board {
    /// Enumerates every pseudo-legal move for `player` by trial-filling a
    /// move to each other square and keeping the ones `is_legal` accepts.
    pub fn generate_moves(&self, player: Player) -> Vec<Move> {
        let mut moves = Vec::with_capacity(MOVE_LIST_HINT);

        for from_x in 0..8 {
            for from_y in 0..8 {
                let piece = self.piece_at(from_x, from_y);
                if piece == EMPTY || !player.owns(piece) {
                    continue;
                }

                for to_x in 0..8 {
                    for to_y in 0..8 {
                        if from_x == to_x && from_y == to_y {
                            continue;
                        }

                        let mut m = Move {
                            from_x,
                            from_y,
                            to_x,
                            to_y,
                            piece,
                            captured: self.piece_at(to_x, to_y),
                            ..Move::default()
                        };

                        if self.is_legal(&mut m) {
                            moves.push(m);
                        }
                    }
                }
            }
        }

        if moves.len() > MOVE_LIST_HINT {
            log::warn!(
                "move list outgrew its {MOVE_LIST_HINT}-entry sizing assumption: {}",
                moves.len()
            );
        }

        moves
    }

    /// Geometric/occupancy legality for a candidate move. Sets the castle,
    /// promotion, and en passant flags as a side effect, and rewrites
    /// `captured` for en passant (the victim is not on the destination
    /// square). Callers fill `captured` from the destination beforehand.
    pub fn is_legal(&self, m: &mut Move) -> bool {
        // Can't land on a piece of your own color.
        let target = self.piece_at(m.to_x, m.to_y);
        if target != EMPTY {
            if is_white(m.piece) && is_white(target) {
                return false;
            }
            if is_black(m.piece) && is_black(target) {
                return false;
            }
        }

        m.castle = false;
        m.promotion = false;
        m.en_passant = false;

        match m.piece {
            PAWN_BLACK => self.legal_black_pawn(m),
            PAWN_WHITE => self.legal_white_pawn(m),
            ROOK_BLACK | ROOK_WHITE => self.straight_path_clear(m),
            KNIGHT_BLACK | KNIGHT_WHITE => knight_shape(m),
            BISHOP_BLACK | BISHOP_WHITE => self.diagonal_path_clear(m),
            QUEEN_BLACK | QUEEN_WHITE => {
                // Union of rook and bishop movement.
                if m.from_x != m.to_x && m.from_y != m.to_y {
                    self.diagonal_path_clear(m)
                } else {
                    self.straight_path_clear(m)
                }
            }
            KING_BLACK | KING_WHITE => self.legal_king(m),
            _ => false,
        }
    }

    // Black pawns advance toward y = 7.
    fn legal_black_pawn(&self, m: &mut Move) -> bool {
        let (ox, oy) = (m.from_x as i32, m.from_y as i32);
        let (nx, ny) = (m.to_x as i32, m.to_y as i32);

        // En passant: permitted only when the immediately preceding
        // committed move was an enemy pawn double step landing alongside.
        if ny == 5 && oy == 4 && (nx == ox - 1 || nx == ox + 1) && self.piece_at(m.to_x, m.to_y) == EMPTY {
            let last = self.recent_move(0);
            if last.piece == PAWN_WHITE && last.from_y == 6 && last.to_y == 4 && last.to_x == m.to_x
            {
                m.en_passant = true;
                m.captured = self.piece_at(m.to_x, m.from_y);
                return true;
            }
        }

        // Anything other than a single step forward must be the double
        // step from the home rank, over an empty intermediate square.
        if oy != ny - 1 {
            if oy == 1 && ny == 3 && ox == nx {
                if self.piece_at(m.to_x, m.to_y - 1) != EMPTY {
                    return false;
                }
            } else {
                return false;
            }
        }

        // Straight ahead only onto an empty square.
        if ox == nx && self.piece_at(m.to_x, m.to_y) != EMPTY {
            return false;
        }

        // Sideways at most one file.
        if ox > nx + 1 || ox < nx - 1 {
            return false;
        }

        // Diagonal only to capture.
        if (ox == nx + 1 || ox == nx - 1) && self.piece_at(m.to_x, m.to_y) == EMPTY {
            return false;
        }

        if ny == 7 {
            m.promotion = true;
        }
        true
    }

    // White pawns advance toward y = 0.
    fn legal_white_pawn(&self, m: &mut Move) -> bool {
        let (ox, oy) = (m.from_x as i32, m.from_y as i32);
        let (nx, ny) = (m.to_x as i32, m.to_y as i32);

        if ny == 2 && oy == 3 && (nx == ox - 1 || nx == ox + 1) && self.piece_at(m.to_x, m.to_y) == EMPTY {
            let last = self.recent_move(0);
            if last.piece == PAWN_BLACK && last.from_y == 1 && last.to_y == 3 && last.to_x == m.to_x
            {
                m.en_passant = true;
                m.captured = self.piece_at(m.to_x, m.from_y);
                return true;
            }
        }

        if oy != ny + 1 {
            if oy == 6 && ny == 4 && ox == nx {
                if self.piece_at(m.to_x, m.to_y + 1) != EMPTY {
                    return false;
                }
            } else {
                return false;
            }
        }

        if ox == nx && self.piece_at(m.to_x, m.to_y) != EMPTY {
            return false;
        }

        if ox > nx + 1 || ox < nx - 1 {
            return false;
        }

        if (ox == nx + 1 || ox == nx - 1) && self.piece_at(m.to_x, m.to_y) == EMPTY {
            return false;
        }

        if ny == 0 {
            m.promotion = true;
        }
        true
    }

    // Rank or file move with nothing on the squares strictly between.
    fn straight_path_clear(&self, m: &Move) -> bool {
        if m.from_x != m.to_x && m.from_y != m.to_y {
            return false;
        }

        if m.from_x == m.to_x {
            let (lo, hi) = ordered(m.from_y, m.to_y);
            for y in lo + 1..hi {
                if self.piece_at(m.to_x, y) != EMPTY {
                    return false;
                }
            }
        } else {
            let (lo, hi) = ordered(m.from_x, m.to_x);
            for x in lo + 1..hi {
                if self.piece_at(x, m.to_y) != EMPTY {
                    return false;
                }
            }
        }

        true
    }

    // Diagonal move with nothing on the squares strictly between.
    fn diagonal_path_clear(&self, m: &Move) -> bool {
        let dx = m.to_x as i32 - m.from_x as i32;
        let dy = m.to_y as i32 - m.from_y as i32;
        if dx.abs() != dy.abs() {
            return false;
        }

        let (sx, sy) = (dx.signum(), dy.signum());
        let (mut x, mut y) = (m.from_x as i32 + sx, m.from_y as i32 + sy);
        while x != m.to_x as i32 {
            if self.piece_at(x as usize, y as usize) != EMPTY {
                return false;
            }
            x += sx;
            y += sy;
        }

        true
    }

    fn legal_king(&self, m: &mut Move) -> bool {
        let rights = self.castling_rights();
        let (home_y, rook, queenside, kingside) = if m.piece == KING_BLACK {
            (0, ROOK_BLACK, rights.black_queenside, rights.black_kingside)
        } else {
            (7, ROOK_WHITE, rights.white_queenside, rights.white_kingside)
        };

        // Castling: the right must still be held, the squares between must
        // be empty, and the rook must still sit on its home square. There
        // is no moved-through-check test here; the search root and the
        // interactive layer own that restriction.
        if m.from_x == 4 && m.from_y == home_y && m.to_y == home_y {
            if m.to_x == 2
                && queenside
                && self.piece_at(1, home_y) == EMPTY
                && self.piece_at(2, home_y) == EMPTY
                && self.piece_at(3, home_y) == EMPTY
                && self.piece_at(0, home_y) == rook
            {
                m.castle = true;
                return true;
            }

            if m.to_x == 6
                && kingside
                && self.piece_at(5, home_y) == EMPTY
                && self.piece_at(6, home_y) == EMPTY
                && self.piece_at(7, home_y) == rook
            {
                m.castle = true;
                return true;
            }
        }

        let dx = (m.to_x as i32 - m.from_x as i32).abs();
        let dy = (m.to_y as i32 - m.from_y as i32).abs();
        dx <= 1 && dy <= 1 && (dx | dy) != 0
    }
}

fn knight_shape(m: &Move) -> bool {
    let dx = (m.to_x as i32 - m.from_x as i32).abs();
    let dy = (m.to_y as i32 - m.from_y as i32).abs();
    (dx == 1 && dy == 2) || (dx == 2 && dy == 1)
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
