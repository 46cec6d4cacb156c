use woodpusher::board::piece::{Move, Player, PAWN_BLACK, PAWN_WHITE};
use woodpusher::board::Board;
use woodpusher::search::alphabeta::order_captures_first;

fn stub(id: usize, captured: u8) -> Move {
    Move {
        from_x: id % 8,
        from_y: id / 8,
        piece: PAWN_WHITE,
        captured,
        ..Move::default()
    }
}

#[test]
fn captures_come_first_and_order_is_stable() {
    let mut moves = vec![
        stub(0, 0),
        stub(1, PAWN_BLACK),
        stub(2, 0),
        stub(3, PAWN_BLACK),
        stub(4, 0),
    ];
    order_captures_first(&mut moves);

    assert!(moves[0].is_capture() && moves[1].is_capture());
    assert!(!moves[2].is_capture() && !moves[3].is_capture() && !moves[4].is_capture());

    // Stable partition: relative order preserved inside each class.
    assert_eq!((moves[0].from_x, moves[1].from_x), (1, 3));
    assert_eq!(
        (moves[2].from_x, moves[3].from_x, moves[4].from_x),
        (0, 2, 4)
    );
}

#[test]
fn generated_captures_lead_after_ordering() {
    let mut board = Board::new();
    // 1. e4 d5 leaves exactly one white capture available.
    for (from, to) in [((4, 6), (4, 4)), ((3, 1), (3, 3))] {
        let mut m = Move {
            from_x: from.0,
            from_y: from.1,
            to_x: to.0,
            to_y: to.1,
            piece: board.piece_at(from.0, from.1),
            captured: board.piece_at(to.0, to.1),
            ..Move::default()
        };
        assert!(board.is_legal(&mut m));
        board.apply_move(&m);
        board.finalize_move(&m);
        board.update();
    }

    let mut moves = board.generate_moves(Player::White);
    order_captures_first(&mut moves);

    let first_quiet = moves.iter().position(|m| !m.is_capture()).unwrap();
    assert!(
        moves[..first_quiet].iter().all(Move::is_capture),
        "captures lead"
    );
    assert!(
        moves[first_quiet..].iter().all(|m| !m.is_capture()),
        "quiets trail"
    );
    assert!(first_quiet >= 1, "exd5 should be in the list");
}
