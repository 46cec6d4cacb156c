use woodpusher::board::piece::{
    GameStatus, Move, Player, BISHOP_BLACK, EMPTY, KING_BLACK, KING_WHITE, KNIGHT_BLACK,
    KNIGHT_WHITE,
};
use woodpusher::board::Board;

fn candidate(board: &Board, from: (usize, usize), to: (usize, usize)) -> Move {
    Move {
        from_x: from.0,
        from_y: from.1,
        to_x: to.0,
        to_y: to.1,
        piece: board.piece_at(from.0, from.1),
        captured: board.piece_at(to.0, to.1),
        ..Move::default()
    }
}

fn commit(board: &mut Board, from: (usize, usize), to: (usize, usize)) {
    let mut m = candidate(board, from, to);
    assert!(board.is_legal(&mut m), "setup move should be legal: {m}");
    board.apply_move(&m);
    board.finalize_move(&m);
    board.update();
}

fn clear(board: &mut Board) {
    for x in 0..8 {
        for y in 0..8 {
            board.place_piece(EMPTY, x, y);
        }
    }
}

#[test]
fn fools_mate_is_checkmate() {
    let mut board = Board::new();
    commit(&mut board, (5, 6), (5, 5)); // f3
    commit(&mut board, (4, 1), (4, 3)); // e5
    commit(&mut board, (6, 6), (6, 4)); // g4
    commit(&mut board, (3, 0), (7, 4)); // Qh4, mate

    assert_eq!(board.status(), GameStatus::Checkmate);
    assert_eq!(board.turn(), Player::White, "white is the side that is mated");
    assert!(board.in_checkmate(Player::White));

    // Every white reply still leaves the king capturable.
    let replies = board.generate_moves(Player::White);
    assert!(!replies.is_empty());
    for m in &replies {
        board.apply_move(m);
        assert!(board.in_check(Player::White), "no escape via {m}");
        board.undo_move(m);
    }
}

#[test]
fn early_queen_raid_is_check_not_mate() {
    let mut board = Board::new();
    commit(&mut board, (5, 6), (5, 5)); // f3
    commit(&mut board, (4, 1), (4, 3)); // e5
    commit(&mut board, (0, 6), (0, 5)); // a3, wasting time
    commit(&mut board, (3, 0), (7, 4)); // Qh4+

    assert_eq!(board.status(), GameStatus::Check);
    assert!(board.in_check(Player::White));
    assert!(!board.in_checkmate(Player::White), "g3 still blocks");
}

#[test]
fn three_knight_cycles_read_as_stalemate() {
    let mut board = Board::new();

    for _ in 0..3 {
        commit(&mut board, (6, 7), (5, 5)); // Ng1f3
        commit(&mut board, (6, 0), (5, 2)); // Ng8f6
        commit(&mut board, (5, 5), (6, 7)); // Nf3g1
        commit(&mut board, (5, 2), (6, 0)); // Nf6g8
    }

    assert!(board.is_stalemate(), "three identical 4-move cycles");
    assert_eq!(
        board.status(),
        GameStatus::Stalemate,
        "full material does not matter for the repetition arm"
    );
}

#[test]
fn fresh_board_is_not_stalemate() {
    let board = Board::new();
    assert!(!board.is_stalemate());
    assert_eq!(board.status(), GameStatus::Normal);
}

#[test]
fn eleven_moves_are_not_enough_history() {
    let mut board = Board::new();

    for _ in 0..2 {
        commit(&mut board, (6, 7), (5, 5));
        commit(&mut board, (6, 0), (5, 2));
        commit(&mut board, (5, 5), (6, 7));
        commit(&mut board, (5, 2), (6, 0));
    }
    commit(&mut board, (6, 7), (5, 5));
    commit(&mut board, (6, 0), (5, 2));
    commit(&mut board, (5, 5), (6, 7));

    assert!(!board.is_stalemate(), "cycle not complete yet");
}

#[test]
fn bare_minors_are_insufficient_material() {
    let mut board = Board::new();
    clear(&mut board);
    board.place_piece(KING_WHITE, 4, 7);
    board.place_piece(KING_BLACK, 4, 0);
    board.place_piece(KNIGHT_WHITE, 1, 7);
    board.place_piece(BISHOP_BLACK, 2, 0);

    assert!(board.is_stalemate(), "king and one minor each is dead");
}

#[test]
fn two_minors_on_one_side_keep_the_game_alive() {
    let mut board = Board::new();
    clear(&mut board);
    board.place_piece(KING_WHITE, 4, 7);
    board.place_piece(KING_BLACK, 4, 0);
    board.place_piece(KNIGHT_BLACK, 1, 0);
    board.place_piece(BISHOP_BLACK, 2, 0);

    assert!(!board.is_stalemate(), "a minor pair can still mate");
}

#[test]
fn any_pawn_keeps_the_game_alive() {
    let mut board = Board::new();
    clear(&mut board);
    board.place_piece(KING_WHITE, 4, 7);
    board.place_piece(KING_BLACK, 4, 0);
    board.place_piece(woodpusher::board::piece::PAWN_WHITE, 0, 6);

    assert!(!board.is_stalemate());
}
