//! Negamax search with alpha-beta pruning over the pseudo-legal move
//! generator.
//!
//! Move generation never filters self-check, so the search does: a reply
//! that captures the king scores as an overwhelming refutation of the
//! move one ply up, and the root ply re-checks `in_check` outright before
//! accepting a best move. The root also skips castling while in check and
//! penalizes shuffling toward a repetition draw.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::piece::{GameStatus, Move, Player, KING_BLACK, KING_WHITE};
use crate::board::Board;
use crate::search::eval::{evaluate, MATE_SCORE};
use crate::search::profile::Profile;

pub struct Searcher {
    pub profile: Profile,
    rng: SmallRng,
    /// Root-ply sentinel for the search in flight; the root-only rules in
    /// `negamax` key off depth reaching this value.
    search_depth: u32,
    /// Nodes visited by the last search.
    pub nodes: u64,
}

impl Searcher {
    pub fn new(profile: Profile) -> Self {
        Searcher {
            profile,
            rng: SmallRng::from_entropy(),
            search_depth: 0,
            nodes: 0,
        }
    }

    /// Deterministic searcher for tests and reproducible games.
    pub fn with_seed(profile: Profile, seed: u64) -> Self {
        Searcher {
            profile,
            rng: SmallRng::seed_from_u64(seed),
            search_depth: 0,
            nodes: 0,
        }
    }

    /// Search depth for a position: the profile's schedule indexed by
    /// total pieces remaining minus one, clamped to at least one ply.
    pub fn scheduled_depth(&self, board: &Board) -> u32 {
        let idx = (board.num_pieces() as usize).saturating_sub(1).min(31);
        self.profile.depth_by_material[idx].max(1)
    }

    /// Picks a move for the side to move at the scheduled depth. The
    /// board comes back bit-for-bit unchanged; committing the returned
    /// move is the caller's business.
    pub fn run(&mut self, board: &mut Board) -> Move {
        let depth = self.scheduled_depth(board);
        self.search_at(board, depth, board.turn())
    }

    /// Full-window search entry point. `depth` doubles as the root-ply
    /// sentinel used by the root-only rules.
    pub fn search_at(&mut self, board: &mut Board, depth: u32, player: Player) -> Move {
        let depth = depth.max(1);
        self.search_depth = depth;
        self.nodes = 0;
        // No finite stand-in for infinity exists in this score domain;
        // ten times the mate score exceeds anything a profile can reach.
        self.negamax(board, depth, player, -10 * MATE_SCORE, 10 * MATE_SCORE)
    }

    fn negamax(
        &mut self,
        board: &mut Board,
        depth: u32,
        player: Player,
        mut alpha: i32,
        beta: i32,
    ) -> Move {
        self.nodes += 1;

        // Leaf: no move selection, only the score matters.
        if depth == 0 {
            return Move {
                score: evaluate(board, &self.profile, player, &mut self.rng),
                ..Move::default()
            };
        }

        let mut moves = board.generate_moves(player);
        order_captures_first(&mut moves);

        let mut best = moves.first().copied().unwrap_or_default();
        best.score = -(depth as i32) * MATE_SCORE;

        for mut m in moves {
            // Castling out of check is illegal; the filter lives here at
            // the root, not in move generation.
            if m.castle && board.status() == GameStatus::Check && depth == self.search_depth {
                continue;
            }

            board.apply_move(&m);

            if m.captured == KING_WHITE || m.captured == KING_BLACK {
                // Capturing the king refutes the previous move outright;
                // nothing below this node can matter.
                m.score = depth as i32 * self.profile.king.weight;
            } else {
                let reply = self.negamax(board, depth - 1, player.opponent(), -beta, -alpha);
                // Negamax identity: our score is the opponent's, negated.
                m.score = -reply.score;
            }

            if m.score > alpha {
                alpha = m.score;
            }

            // Root-only adjustments before this move can become the new
            // best: never move into check, and lean away from repeating
            // ourselves into a stalemate.
            if m.score > best.score && depth == self.search_depth {
                if board.in_check(player) {
                    m.score = -(depth as i32) * MATE_SCORE;
                }

                let third = board.recent_move(3);
                let seventh = board.recent_move(7);
                if m == third && m == seventh {
                    m.score -= self.profile.rook.weight;
                } else if m == third || m == seventh {
                    m.score -= self.profile.pawn.weight;
                }
            }

            board.undo_move(&m);

            if m.score > best.score {
                best = m;
            }

            if best.score >= beta {
                return best;
            }
        }

        best
    }
}

/// Reorders a move list so captures come before quiet moves: a single
/// stable partition rather than a sort. Order within each class only
/// affects pruning effectiveness, never the result.
pub fn order_captures_first(moves: &mut Vec<Move>) {
    let mut ordered = Vec::with_capacity(moves.len());
    ordered.extend(moves.iter().copied().filter(|m| m.is_capture()));
    ordered.extend(moves.iter().copied().filter(|m| !m.is_capture()));
    *moves = ordered;
}
