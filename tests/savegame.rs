use std::{env, fs, path::PathBuf};

use pretty_assertions::assert_eq;
use skram::{Difficulty, Generator, Grid, Pos, SaveError, Savegame, SlotStore};

fn temp_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join("skram-tests").join(name);
    // start from a clean directory so slots do not leak between runs
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn encode_matches_the_slot_grammar() {
    let mut rows = [[0u8; 9]; 9];
    rows[0][0] = 7;
    let game = Savegame {
        solved: Grid::from_rows(rows),
        working: Grid::empty(),
        elapsed: 125.9,
    };

    let text = game.encode();
    assert_eq!(text, format!("7100{}\n125", "0".repeat(320)));

    let decoded = Savegame::decode(&text).unwrap();
    assert_eq!(decoded.solved, game.solved);
    assert_eq!(decoded.working, game.working);
    assert_eq!(decoded.elapsed, 125.0, "fractional seconds are truncated on save");
}

#[test]
fn decode_inverts_encode() {
    let mut generator = Generator::new(Some(21));
    let mut game = Savegame::new_game(&mut generator, Difficulty::Hard);
    let empty = (0..9)
        .flat_map(|r| (0..9).map(move |c| Pos::new(r, c)))
        .find(|&p| game.working.value(p) == 0)
        .unwrap();
    game.working.set(empty, 4).unwrap();
    game.elapsed = 3605.0;

    assert_eq!(Savegame::decode(&game.encode()).unwrap(), game);
}

#[test]
fn an_empty_time_field_decodes_to_zero_seconds() {
    let text = format!("{}\n", "0".repeat(324));
    assert_eq!(Savegame::decode(&text).unwrap().elapsed, 0.0);
}

#[test]
fn decode_rejects_corrupt_records() {
    let valid = Savegame {
        solved: Grid::empty(),
        working: Grid::empty(),
        elapsed: 42.0,
    }
    .encode();

    // newline never found
    let no_newline = valid.replace('\n', "");
    assert!(matches!(Savegame::decode(&no_newline), Err(SaveError::Corrupt(_))));

    // record cut short
    assert!(matches!(Savegame::decode(&valid[..100]), Err(SaveError::Corrupt(_))));
    assert!(matches!(Savegame::decode(""), Err(SaveError::Corrupt(_))));

    // a lock flag other than 0 or 1
    let mut bad_lock = valid.clone();
    bad_lock.replace_range(2..3, "5");
    assert!(matches!(Savegame::decode(&bad_lock), Err(SaveError::Corrupt(_))));

    // letters in the grid data
    let mut bad_grid = valid.clone();
    bad_grid.replace_range(10..11, "x");
    assert!(matches!(Savegame::decode(&bad_grid), Err(SaveError::Corrupt(_))));

    // letters in the time field
    let bad_time = format!("{}abc", valid);
    assert!(matches!(Savegame::decode(&bad_time), Err(SaveError::Corrupt(_))));
}

#[test]
fn slots_round_trip_through_the_filesystem() {
    let store = SlotStore::new(temp_dir("round-trip")).unwrap();
    let mut generator = Generator::new(Some(5));
    let game = Savegame::new_game(&mut generator, Difficulty::Medium);

    assert!(!store.exists(3));
    assert!(matches!(store.load(3), Err(SaveError::SlotEmpty)));

    store.save(3, &game).unwrap();
    assert!(store.exists(3));
    assert_eq!(store.load(3).unwrap(), game);

    store.delete(3).unwrap();
    assert!(!store.exists(3));
    assert!(matches!(store.delete(3), Err(SaveError::SlotEmpty)));
}

#[test]
fn a_corrupt_slot_file_is_distinct_from_an_empty_slot() {
    let dir = temp_dir("corrupt");
    let store = SlotStore::new(dir.clone()).unwrap();
    fs::write(dir.join("slot0.skram"), "not a savegame").unwrap();
    assert!(matches!(store.load(1), Err(SaveError::Corrupt(_))));
    assert!(matches!(store.load(2), Err(SaveError::SlotEmpty)));
}
