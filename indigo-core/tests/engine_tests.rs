//! Integration tests for the Indigo rules engine
//!
//! Plays whole games through the public API and checks the properties that must
//! hold after every move.

use indigo_core::{
    all_cells, Coordinate, Game, GameConfig, GameError, GameState, GemEvent, GateMode, Move,
    SavedGame,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn config(players: usize, seed: u64) -> GameConfig {
    GameConfig::default().with_player_count(players).with_seed(seed)
}

/// Pick a random legal move, or `None` when the game is over
fn random_move(state: &GameState, rng: &mut ChaCha8Rng) -> Option<Move> {
    state.legal_moves().choose(rng).copied()
}

/// Play a full random game, checking integrity after every move
fn play_out(game: &mut Game, rng: &mut ChaCha8Rng) -> usize {
    let mut moves = 0;
    while let Some(mv) = random_move(game.state(), rng) {
        game.apply_move(mv).unwrap();
        game.state().check_integrity().unwrap();
        moves += 1;
    }
    moves
}

// ============================================================================
// WHOLE GAMES
// ============================================================================

#[test]
fn test_random_games_conserve_gems() {
    for players in 2..=4 {
        let mut rng = ChaCha8Rng::seed_from_u64(players as u64);
        let mut game = Game::start(&config(players, 100 + players as u64)).unwrap();
        let moves = play_out(&mut game, &mut rng);

        let state = game.state();
        assert!(state.is_over());
        assert!(moves > 0);
        let census = state.gem_census();
        assert!(census.is_conserved());
        assert_eq!(census.total, 12);
        let scored: u32 = state.players().iter().map(|p| p.score).sum();
        let collected_points: u32 = state
            .players()
            .iter()
            .flat_map(|p| p.collected.iter())
            .map(|g| g.color.points())
            .sum();
        assert_eq!(scored, collected_points);
    }
}

#[test]
fn test_shared_gates_game() {
    let cfg = config(4, 7).with_gate_mode(GateMode::Shared);
    let mut game = Game::start(&cfg).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    play_out(&mut game, &mut rng);
    game.state().check_integrity().unwrap();
}

#[test]
fn test_game_over_rejects_moves() {
    let mut game = Game::start(&config(2, 3)).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    play_out(&mut game, &mut rng);

    assert!(game.state().legal_moves().is_empty());
    let result = game.apply_move(Move { coord: Coordinate::new(1, 1), rotation: 0 });
    assert!(matches!(result, Err(GameError::GameOver)));
}

#[test]
fn test_can_place_implies_place() {
    let mut game = Game::start(&config(3, 8)).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    for _ in 0..10 {
        if game.is_over() {
            break;
        }
        let state = game.state().clone();
        let hand = state.current_hand().unwrap().clone();
        for coord in all_cells() {
            if state.can_place(coord, &hand) {
                let mut probe = state.clone();
                assert!(probe.place(coord).is_ok(), "placing at {coord} failed");
            }
        }
        let mv = random_move(game.state(), &mut rng).unwrap();
        game.apply_move(mv).unwrap();
    }
}

// ============================================================================
// HISTORY
// ============================================================================

#[test]
fn test_undo_all_then_redo_all() {
    let mut game = Game::start(&config(2, 12)).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let mut seen = vec![game.state().clone()];
    for _ in 0..8 {
        let mv = random_move(game.state(), &mut rng).unwrap();
        game.apply_move(mv).unwrap();
        seen.push(game.state().clone());
    }

    for expected in seen.iter().rev().skip(1) {
        assert!(game.undo());
        assert_eq!(game.state(), expected);
    }
    assert!(!game.undo());
    for expected in seen.iter().skip(1) {
        assert!(game.redo());
        assert_eq!(game.state(), expected);
    }
    assert!(!game.redo());
}

#[test]
fn test_snapshots_are_independent() {
    let mut game = Game::start(&config(2, 13)).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(13);
    let mv = random_move(game.state(), &mut rng).unwrap();
    game.apply_move(mv).unwrap();
    let first = game.history().snapshots()[1].clone();

    for _ in 0..5 {
        let mv = random_move(game.state(), &mut rng).unwrap();
        game.apply_move(mv).unwrap();
    }
    assert_eq!(game.history().snapshots()[1], first);
}

// ============================================================================
// PERSISTENCE AND REPLAY
// ============================================================================

#[test]
fn test_save_and_load_file() {
    let mut game = Game::start(&config(3, 14)).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(14);
    for _ in 0..6 {
        let mv = random_move(game.state(), &mut rng).unwrap();
        game.apply_move(mv).unwrap();
    }
    game.undo();

    let path = std::env::temp_dir().join(format!("indigo-save-{}.json", std::process::id()));
    game.save(&path).unwrap();
    let loaded = Game::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.state(), game.state());
    assert_eq!(loaded.history().len(), 7);
    assert_eq!(loaded.history().cursor(), 5);
    assert_eq!(
        SavedGame::from_game(&loaded).snapshots,
        SavedGame::from_game(&game).snapshots
    );
}

#[test]
fn test_remote_replay_is_deterministic() {
    let cfg = config(2, 15);
    let mut local = Game::start(&cfg).unwrap();
    let mut remote = Game::start(&cfg).unwrap();
    assert_eq!(local.state(), remote.state());

    let mut rng = ChaCha8Rng::seed_from_u64(15);
    while let Some(mv) = random_move(local.state(), &mut rng) {
        let local_events: Vec<GemEvent> = local.apply_move(mv).unwrap();
        let remote_events = remote.apply_move(mv).unwrap();
        assert_eq!(local_events, remote_events);
        assert_eq!(local.state(), remote.state());
    }
}
