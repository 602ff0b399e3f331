//! Integration tests for the Indigo self-play drivers
//!
//! Runs complete random games through the same code paths the CLI uses.

use indigo_cli::{play_random_game, run_batch, summarize};
use indigo_core::{Game, GameConfig, GateMode, SavedGame};
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn test_random_game_is_reproducible() {
    let config = GameConfig::default().with_player_count(3);
    let (first, a) = play_random_game(&config, 1, 77, true).unwrap();
    let (second, b) = play_random_game(&config, 1, 77, true).unwrap();

    assert_eq!(a.moves, b.moves);
    assert_eq!(a.scores, b.scores);
    assert_eq!(first.state(), second.state());
    assert!(first.is_over());
    assert_eq!(first.history().len(), a.moves + 1);
}

#[test]
fn test_batch_runs_every_game() {
    let config = GameConfig::default().with_player_count(4).with_gate_mode(GateMode::Shared);
    let finished = AtomicUsize::new(0);
    let records = run_batch(&config, 8, 1000, |_| {
        finished.fetch_add(1, Ordering::Relaxed);
    })
    .unwrap();

    assert_eq!(records.len(), 8);
    assert_eq!(finished.load(Ordering::Relaxed), 8);
    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.seed, 1000 + i as u64);
        assert!(!record.winners.is_empty());
        assert!(record.gems_scored + record.gems_lost <= 12);
    }

    let summary = summarize(&records, 4);
    assert_eq!(summary.games, 8);
    assert_eq!(summary.wins.iter().sum::<usize>() + summary.ties, 8);
}

#[test]
fn test_batch_rejects_bad_config() {
    let config = GameConfig::default().with_gate_mode(GateMode::Shared);
    assert!(run_batch(&config, 2, 0, |_| {}).is_err());
}

#[test]
fn test_saved_game_replays() {
    let (game, record) = play_random_game(&GameConfig::default(), 1, 5, false).unwrap();
    let path = std::env::temp_dir().join(format!("indigo-cli-replay-{}.json", std::process::id()));
    game.save(&path).unwrap();

    let mut loaded = Game::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(SavedGame::from_game(&loaded).snapshots.len(), record.moves + 1);

    let mut undone = 0;
    while loaded.undo() {
        undone += 1;
    }
    assert_eq!(undone, record.moves);
    while loaded.redo() {
        loaded.state().check_integrity().unwrap();
    }
    assert_eq!(loaded.state(), game.state());
}
