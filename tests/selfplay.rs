use woodpusher::search::alphabeta::Searcher;
use woodpusher::search::profile::Profile;
use woodpusher::selfplay::play_game;

#[test]
fn capped_game_terminates_and_records_every_ply() {
    let mut white = Searcher::with_seed(Profile::default(), 11);
    let mut black = Searcher::with_seed(Profile::default(), 12);

    let record = play_game(&mut white, &mut black, 6);

    assert!(record.plies <= 6);
    assert_eq!(record.moves.len(), record.plies as usize);
    assert!(!record.result.is_empty());
    assert!(record.nodes > 0);
}

#[test]
fn record_serializes_to_json_lines() {
    let mut white = Searcher::with_seed(Profile::default(), 21);
    let mut black = Searcher::with_seed(Profile::default(), 22);

    let record = play_game(&mut white, &mut black, 4);
    let line = serde_json::to_string(&record).expect("record should serialize");

    assert!(line.contains("\"moves\""));
    assert!(line.contains("\"result\""));
}
