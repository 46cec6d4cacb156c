use anyhow::Result;
use clap::Parser;
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use woodpusher::board::piece::{
    GameStatus, Move, Player, BISHOP_BLACK, BISHOP_WHITE, EMPTY, KNIGHT_BLACK, KNIGHT_WHITE,
    ROOK_BLACK, ROOK_WHITE,
};
use woodpusher::board::Board;
use woodpusher::search::alphabeta::Searcher;
use woodpusher::search::profile::Profile;
use woodpusher::selfplay;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess against a profile-driven bot", long_about = None)]
struct Args {
    /// Operation mode: 'h' for human vs bot, 's' for bot self-play
    #[arg(long, default_value = "h")]
    mode: String,

    /// Your color in human mode: 'w' for white, 'b' for black
    #[arg(long, default_value = "w")]
    color: String,

    /// Bot profile file for the white side (built-in defaults if omitted)
    #[arg(long)]
    white_profile: Option<PathBuf>,

    /// Bot profile file for the black side (built-in defaults if omitted)
    #[arg(long)]
    black_profile: Option<PathBuf>,

    /// Number of self-play games
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Stop a self-play game after this many plies
    #[arg(long, default_value_t = 300)]
    max_plies: u32,

    /// RNG seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Append self-play game records to this file as JSON lines
    #[arg(long)]
    out: Option<PathBuf>,
}

fn parse_color(color_str: &str) -> Result<Player> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" => Ok(Player::White),
        "b" | "black" => Ok(Player::Black),
        _ => anyhow::bail!("Invalid color: use 'w' or 'b'"),
    }
}

fn load_profile(path: Option<&PathBuf>, rng: &mut SmallRng) -> Profile {
    let mut profile = Profile::default();
    if let Some(p) = path {
        if let Err(e) = profile.load(p, rng) {
            warn!("could not load profile {}: {e}; using defaults", p.display());
        }
    }
    debug!(
        "profile weights k={} q={} r={} b={} n={} p={}, randomness={}, prefers more pieces: {}",
        profile.king.weight,
        profile.queen.weight,
        profile.rook.weight,
        profile.bishop.weight,
        profile.knight.weight,
        profile.pawn.weight,
        profile.randomness,
        profile.prefers_more_pieces,
    );
    profile
}

/// Parses coordinate input like "e2e4", with an optional trailing piece
/// letter ("e7e8n") selecting the promotion piece.
fn parse_move(board: &Board, input: &str) -> Option<(Move, Option<char>)> {
    let bytes = input.as_bytes();
    if bytes.len() != 4 && bytes.len() != 5 {
        return None;
    }

    let square = |file: u8, rank: u8| -> Option<(usize, usize)> {
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Some(((file - b'a') as usize, (b'8' - rank) as usize))
    };

    let (from_x, from_y) = square(bytes[0], bytes[1])?;
    let (to_x, to_y) = square(bytes[2], bytes[3])?;
    let promo = if bytes.len() == 5 {
        Some(bytes[4] as char)
    } else {
        None
    };

    let m = Move {
        from_x,
        from_y,
        to_x,
        to_y,
        piece: board.piece_at(from_x, from_y),
        captured: board.piece_at(to_x, to_y),
        ..Move::default()
    };
    Some((m, promo))
}

fn promotion_piece(choice: char, player: Player) -> Option<u8> {
    match (choice, player) {
        ('q', _) => Some(player.queen()),
        ('r', Player::White) => Some(ROOK_WHITE),
        ('r', Player::Black) => Some(ROOK_BLACK),
        ('b', Player::White) => Some(BISHOP_WHITE),
        ('b', Player::Black) => Some(BISHOP_BLACK),
        ('n', Player::White) => Some(KNIGHT_WHITE),
        ('n', Player::Black) => Some(KNIGHT_BLACK),
        _ => None,
    }
}

/// Reads, validates, and commits one human move. Returns false on quit.
///
/// The rules engine's `is_legal` is geometric only, so the two check
/// restrictions are enforced here: no castling out of check, and no move
/// that leaves the mover's own king capturable.
fn human_turn(board: &mut Board, player: Player) -> Result<bool> {
    loop {
        print!("Enter your move (e.g. e2e4, e7e8n to underpromote, 'quit'): ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Ok(false);
        }
        let input = input.trim();
        if input == "quit" {
            return Ok(false);
        }

        let Some((mut m, promo)) = parse_move(board, input) else {
            println!("Invalid move format! Use coordinates like 'e2e4'.");
            continue;
        };

        if !player.owns(m.piece) {
            println!("That is not your piece.");
            continue;
        }

        if !board.is_legal(&mut m) {
            println!("Illegal move!");
            continue;
        }

        if m.castle && board.status() == GameStatus::Check {
            println!("You can't castle out of check.");
            continue;
        }

        board.apply_move(&m);
        if board.in_check(player) {
            board.undo_move(&m);
            println!("You can't leave your king in check.");
            continue;
        }

        board.finalize_move(&m);

        // apply_move auto-queens; substitute the requested piece.
        if m.promotion {
            if let Some(choice) = promo {
                match promotion_piece(choice, player) {
                    Some(piece) => board.place_piece(piece, m.to_x, m.to_y),
                    None => println!("Unknown promotion piece '{choice}', keeping the queen."),
                }
            }
        }

        board.update();
        return Ok(true);
    }
}

fn bot_turn(board: &mut Board, bot: &mut Searcher) {
    let started = Instant::now();
    let m = bot.run(board);
    if m.piece == EMPTY {
        println!("The bot has no move available.");
        return;
    }

    board.apply_move(&m);
    board.finalize_move(&m);
    board.update();

    info!("searched {} nodes in {:.2?}", bot.nodes, started.elapsed());
    println!("Bot plays: {m}");
}

fn play_interactive(human: Player, mut bot: Searcher) -> Result<()> {
    let mut board = Board::new();

    loop {
        println!("\n{board}");
        match board.status() {
            GameStatus::Checkmate => {
                println!("Checkmate! {} wins!", board.turn().opponent());
                break;
            }
            GameStatus::Stalemate => {
                println!("Stalemate!");
                break;
            }
            GameStatus::Check => println!("{} is in check.", board.turn()),
            GameStatus::Normal => {}
        }

        println!("{}'s turn", board.turn());
        if board.turn() == human {
            if !human_turn(&mut board, human)? {
                break;
            }
        } else {
            bot_turn(&mut board, &mut bot);
        }
    }

    Ok(())
}

fn run_selfplay(args: &Args, white_profile: Profile, black_profile: Profile) -> Result<()> {
    let mut out = match &args.out {
        Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
        None => None,
    };

    for game in 0..args.games {
        let (mut white, mut black) = match args.seed {
            Some(seed) => (
                Searcher::with_seed(white_profile.clone(), seed + 2 * game as u64),
                Searcher::with_seed(black_profile.clone(), seed + 2 * game as u64 + 1),
            ),
            None => (
                Searcher::new(white_profile.clone()),
                Searcher::new(black_profile.clone()),
            ),
        };

        let record = selfplay::play_game(&mut white, &mut black, args.max_plies);
        println!(
            "game {}: {} in {} plies ({} nodes)",
            game + 1,
            record.result,
            record.plies,
            record.nodes
        );

        if let Some(f) = out.as_mut() {
            serde_json::to_writer(&mut *f, &record)?;
            writeln!(f)?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let white_profile = load_profile(args.white_profile.as_ref(), &mut rng);
    let black_profile = load_profile(args.black_profile.as_ref(), &mut rng);

    match args.mode.chars().next().unwrap_or('h') {
        's' => run_selfplay(&args, white_profile, black_profile)?,
        'h' => {
            let human = parse_color(&args.color)?;
            let bot_profile = match human {
                Player::White => black_profile,
                Player::Black => white_profile,
            };
            let bot = match args.seed {
                Some(seed) => Searcher::with_seed(bot_profile, seed),
                None => Searcher::new(bot_profile),
            };
            play_interactive(human, bot)?;
        }
        other => anyhow::bail!("Unknown mode '{other}': use 'h' or 's'"),
    }

    Ok(())
}
