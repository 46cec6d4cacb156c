//! Bot profiles: per-piece weights and positional tables, the
//! depth-by-material schedule, evaluation randomness, and the material
//! preference switch, loadable from a terse line-oriented text format.
//!
//! The format is a sequence of `BEGIN_*` section markers, each followed
//! by data lines until the next marker. `#` lines and blank lines are
//! ignored. Inside a piece section the first data line is the weight and
//! every later line fills one row of the positional table; the weight
//! read is one-shot, gated on the weight still holding its built-in
//! default. Malformed input never fails a load: whatever does not parse
//! leaves the built-in default in place.

use std::fs;
use std::path::Path;

use log::{info, warn};
use rand::Rng;
use thiserror::Error;

const DEFAULT_KING_WEIGHT: i32 = 100;
const DEFAULT_QUEEN_WEIGHT: i32 = 9;
const DEFAULT_ROOK_WEIGHT: i32 = 5;
const DEFAULT_BISHOP_WEIGHT: i32 = 3;
const DEFAULT_KNIGHT_WEIGHT: i32 = 3;
const DEFAULT_PAWN_WEIGHT: i32 = 1;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read bot profile: {0}")]
    Io(#[from] std::io::Error),
}

/// Weight and positional table for one piece type. The table is indexed
/// `[file][rank]` in white's orientation; the evaluator reads it mirrored
/// for black.
#[derive(Clone, Debug)]
pub struct PieceValues {
    pub weight: i32,
    pub table: [[i32; 8]; 8],
    /// Next table row the loader will fill.
    fill: usize,
}

impl PieceValues {
    fn new(weight: i32) -> Self {
        // Default tables give a small bonus for forward progress, so a
        // bot with no profile at least walks toward the opponent.
        let mut table = [[0; 8]; 8];
        for column in &mut table {
            for (y, cell) in column.iter_mut().enumerate() {
                *cell = 7 - y as i32;
            }
        }
        PieceValues {
            weight,
            table,
            fill: 0,
        }
    }

    /// One data line inside this piece's section: the weight if it has
    /// not been overridden yet, otherwise the next row of the table.
    fn absorb_line(&mut self, line: &str, default_weight: i32) {
        if self.weight == default_weight {
            if let Some(w) = numbers(line).next() {
                self.weight = w;
            }
            return;
        }

        if self.fill >= 8 {
            warn!("ignoring extra positional table row: {line:?}");
            return;
        }

        let mut nums = numbers(line);
        for cell in &mut self.table[self.fill] {
            if let Some(v) = nums.next() {
                *cell = v;
            }
        }
        self.fill += 1;
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Start,
    PiecesSwitch,
    Threshold,
    Random,
    BoardEmphasis,
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

#[derive(Clone, Debug)]
pub struct Profile {
    pub king: PieceValues,
    pub queen: PieceValues,
    pub rook: PieceValues,
    pub bishop: PieceValues,
    pub knight: PieceValues,
    pub pawn: PieceValues,
    /// Search depth in plies, indexed by total pieces on the board minus
    /// one. The searcher clamps entries to at least 1.
    pub depth_by_material: [u32; 32],
    /// Upper bound for the evaluator's uniform noise term.
    pub randomness: i32,
    /// When false, evaluation is penalized in proportion to the total
    /// material left on the board.
    pub prefers_more_pieces: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            king: PieceValues::new(DEFAULT_KING_WEIGHT),
            queen: PieceValues::new(DEFAULT_QUEEN_WEIGHT),
            rook: PieceValues::new(DEFAULT_ROOK_WEIGHT),
            bishop: PieceValues::new(DEFAULT_BISHOP_WEIGHT),
            knight: PieceValues::new(DEFAULT_KNIGHT_WEIGHT),
            pawn: PieceValues::new(DEFAULT_PAWN_WEIGHT),
            depth_by_material: [1; 32],
            randomness: 5,
            prefers_more_pieces: false,
        }
    }
}

impl Profile {
    /// Loads a profile file, resetting to the built-in defaults first so
    /// a profile is never partially stale. A file that cannot be read
    /// leaves the defaults in effect and reports why.
    pub fn load(&mut self, path: &Path, rng: &mut impl Rng) -> Result<(), ProfileError> {
        *self = Profile::default();
        let text = fs::read_to_string(path)?;
        self.parse(&text, rng);
        info!("loaded bot profile {}", path.display());
        Ok(())
    }

    /// Applies profile text on top of the current values. The RNG serves
    /// the negative-depth convention in threshold entries.
    pub fn parse(&mut self, text: &str, rng: &mut impl Rng) {
        let mut section = Section::Start;

        for line in text.lines() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let first = line.split_whitespace().next().unwrap_or("");
            section = match first {
                "BEGIN_NUM_PIECES_SWITCH" => Section::PiecesSwitch,
                "BEGIN_THRESHOLD" => Section::Threshold,
                "BEGIN_RANDOM" => Section::Random,
                "BEGIN_BOARD_EMPHASIS" => Section::BoardEmphasis,
                "BEGIN_KING" => Section::King,
                "BEGIN_QUEEN" => Section::Queen,
                "BEGIN_ROOK" => Section::Rook,
                "BEGIN_BISHOP" => Section::Bishop,
                "BEGIN_KNIGHT" => Section::Knight,
                "BEGIN_PAWN" => Section::Pawn,
                _ => {
                    self.absorb_line(section, line, rng);
                    section
                }
            };
        }
    }

    fn absorb_line(&mut self, section: Section, line: &str, rng: &mut impl Rng) {
        match section {
            Section::Start => {}
            Section::PiecesSwitch => {
                if let Some(v) = numbers(line).next() {
                    self.prefers_more_pieces = v != 0;
                }
            }
            Section::Threshold => {
                let mut nums = numbers(line);
                let (Some(total_pieces), Some(mut ply)) = (nums.next(), nums.next()) else {
                    return;
                };
                // A negative depth means "pick one at random in [1, |n|]".
                if ply < 0 {
                    ply = rng.gen_range(1..=-ply);
                }
                let slot = usize::try_from(total_pieces)
                    .ok()
                    .and_then(|i| self.depth_by_material.get_mut(i));
                match slot {
                    Some(slot) => *slot = ply.max(0) as u32,
                    None => warn!("threshold entry out of range: {line:?}"),
                }
            }
            Section::Random => {
                if let Some(v) = numbers(line).next() {
                    self.randomness = v;
                }
            }
            // Recognized for compatibility; carries no data we use.
            Section::BoardEmphasis => {}
            Section::King => self.king.absorb_line(line, DEFAULT_KING_WEIGHT),
            Section::Queen => self.queen.absorb_line(line, DEFAULT_QUEEN_WEIGHT),
            Section::Rook => self.rook.absorb_line(line, DEFAULT_ROOK_WEIGHT),
            Section::Bishop => self.bishop.absorb_line(line, DEFAULT_BISHOP_WEIGHT),
            Section::Knight => self.knight.absorb_line(line, DEFAULT_KNIGHT_WEIGHT),
            Section::Pawn => self.pawn.absorb_line(line, DEFAULT_PAWN_WEIGHT),
        }
    }
}

fn numbers(line: &str) -> impl Iterator<Item = i32> + '_ {
    line.split_whitespace().filter_map(|t| t.parse().ok())
}
