use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::path::Path;

use woodpusher::search::profile::Profile;

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(1)
}

#[test]
fn builtin_defaults() {
    let p = Profile::default();

    assert_eq!(p.king.weight, 100);
    assert_eq!(p.queen.weight, 9);
    assert_eq!(p.rook.weight, 5);
    assert_eq!(p.bishop.weight, 3);
    assert_eq!(p.knight.weight, 3);
    assert_eq!(p.pawn.weight, 1);

    assert!(p.depth_by_material.iter().all(|&d| d == 1));
    assert_eq!(p.randomness, 5);
    assert!(!p.prefers_more_pieces);

    // Default tables reward forward progress.
    for x in 0..8 {
        for y in 0..8 {
            assert_eq!(p.pawn.table[x][y], 7 - y as i32);
            assert_eq!(p.king.table[x][y], 7 - y as i32);
        }
    }
}

#[test]
fn full_profile_parses() {
    let text = "\
# hand-written test profile
BEGIN_NUM_PIECES_SWITCH
1

BEGIN_RANDOM
0

BEGIN_THRESHOLD
31 4
15 2

BEGIN_PAWN
10
0 1 2 3 4 5 6 7
8 9 10 11 12 13 14 15
";

    let mut p = Profile::default();
    p.parse(text, &mut rng());

    assert!(p.prefers_more_pieces);
    assert_eq!(p.randomness, 0);
    assert_eq!(p.depth_by_material[31], 4);
    assert_eq!(p.depth_by_material[15], 2);
    assert_eq!(p.depth_by_material[0], 1, "untouched entries keep defaults");

    assert_eq!(p.pawn.weight, 10);
    assert_eq!(p.pawn.table[0], [0, 1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(p.pawn.table[1], [8, 9, 10, 11, 12, 13, 14, 15]);
    // Rows never supplied keep the default forward bonus.
    assert_eq!(p.pawn.table[2][3], 4);
}

#[test]
fn negative_threshold_becomes_random_depth() {
    for seed in 0..32 {
        let mut r = SmallRng::seed_from_u64(seed);
        let mut p = Profile::default();
        p.parse("BEGIN_THRESHOLD\n10 -6\n", &mut r);
        let d = p.depth_by_material[10];
        assert!((1..=6).contains(&d), "depth {d} outside [1, 6]");
    }
}

#[test]
fn weight_line_is_one_shot() {
    let text = "\
BEGIN_KNIGHT
42
9 9 9 9 9 9 9 9
";
    let mut p = Profile::default();
    p.parse(text, &mut rng());

    assert_eq!(p.knight.weight, 42);
    assert_eq!(p.knight.table[0], [9; 8]);
}

#[test]
fn junk_and_unknown_markers_leave_defaults() {
    let text = "\
# nothing but noise
BEGIN_MYSTERY_SECTION
totally not numbers

BEGIN_BOARD_EMPHASIS
3

BEGIN_THRESHOLD
not a pair
99 5
";
    let mut p = Profile::default();
    p.parse(text, &mut rng());

    let d = Profile::default();
    assert_eq!(p.king.weight, d.king.weight);
    assert_eq!(p.randomness, d.randomness);
    assert_eq!(p.prefers_more_pieces, d.prefers_more_pieces);
    assert_eq!(p.depth_by_material, d.depth_by_material, "index 99 discarded");
}

#[test]
fn missing_file_keeps_defaults_and_reports() {
    let mut p = Profile::default();
    p.randomness = 77; // will be reset by the load attempt

    let err = p.load(Path::new("no/such/profile.bot"), &mut rng());
    assert!(err.is_err());
    assert_eq!(p.randomness, Profile::default().randomness);
    assert_eq!(p.king.weight, 100);
}
