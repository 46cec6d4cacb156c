use rand::rngs::SmallRng;
use rand::Rng;

use crate::board::piece::{
    is_white, Player, BISHOP_BLACK, BISHOP_WHITE, EMPTY, KING_BLACK, KING_WHITE, KNIGHT_BLACK,
    KNIGHT_WHITE, PAWN_BLACK, PAWN_WHITE, QUEEN_BLACK, QUEEN_WHITE, ROOK_BLACK, ROOK_WHITE,
};
use crate::board::Board;
use crate::search::profile::Profile;

/// Score attached to king capture lines; far above any material sum a
/// profile can produce.
pub const MATE_SCORE: i32 = 65_535;

/// Scores the position for `player` from the profile's weights and
/// positional tables.
///
/// The sum is built once from white's perspective (white pieces add,
/// black pieces subtract) and negated at the end for black; the zero-sum
/// property makes both perspectives one computation. Black pieces read
/// each positional table mirrored across both axes, so a single table
/// encodes "forward is good" for either color.
pub fn evaluate(board: &Board, profile: &Profile, player: Player, rng: &mut SmallRng) -> i32 {
    let mut value = 0;

    for x in 0..8 {
        for y in 0..8 {
            let piece = board.piece_at(x, y);
            if piece == EMPTY {
                continue;
            }

            let values = match piece {
                PAWN_WHITE | PAWN_BLACK => &profile.pawn,
                ROOK_WHITE | ROOK_BLACK => &profile.rook,
                KNIGHT_WHITE | KNIGHT_BLACK => &profile.knight,
                BISHOP_WHITE | BISHOP_BLACK => &profile.bishop,
                QUEEN_WHITE | QUEEN_BLACK => &profile.queen,
                KING_WHITE | KING_BLACK => &profile.king,
                _ => continue,
            };

            if is_white(piece) {
                value += values.weight + values.table[x][y];
            } else {
                value -= values.weight + values.table[7 - x][7 - y];
            }
        }
    }

    if profile.randomness > 0 {
        value += rng.gen_range(0..profile.randomness);
    }

    // Mild bias against keeping material on the board, normalized by the
    // pawn weight so cheaply-scaled profiles are not skewed. A zero pawn
    // weight is treated as 1 to keep the division defined.
    if !profile.prefers_more_pieces {
        value -= board.num_pieces() as i32 / profile.pawn.weight.max(1);
    }

    if player == Player::Black {
        -value
    } else {
        value
    }
}
