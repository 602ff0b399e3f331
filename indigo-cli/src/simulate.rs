//! Random self-play
//!
//! Level 2 - Phase-level implementation

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use indigo_core::{Game, GameConfig};

/// Outcome of one self-play game
#[derive(Clone, Debug, Serialize)]
pub struct GameRecord {
    pub game_number: usize,
    pub seed: u64,
    pub moves: usize,
    pub scores: Vec<u32>,
    /// Seats sharing first place
    pub winners: Vec<usize>,
    pub collisions: usize,
    pub gems_scored: usize,
    pub gems_lost: usize,
}

/// Aggregate over a batch of games
#[derive(Clone, Debug, Default, Serialize)]
pub struct BatchSummary {
    pub games: usize,
    /// Outright wins per seat
    pub wins: Vec<usize>,
    pub ties: usize,
    pub avg_scores: Vec<f32>,
    pub avg_moves: f32,
    pub avg_collisions: f32,
    pub avg_gems_lost: f32,
}

/// Play one game to the end with uniformly random legal moves.
///
/// `seed` drives both the setup and the move choices, so a game is fully reproducible.
/// With `check_integrity` every position is verified after each move.
pub fn play_random_game(
    config: &GameConfig,
    game_number: usize,
    seed: u64,
    check_integrity: bool,
) -> Result<(Game, GameRecord)> {
    let mut game = Game::start(&config.clone().with_seed(seed))?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut moves = 0;
    let mut collisions = 0;

    while let Some(mv) = game.state().legal_moves().choose(&mut rng).copied() {
        let events = game
            .apply_move(mv)
            .with_context(|| format!("game {game_number}: move {moves} ({mv}) failed"))?;
        collisions += events.iter().filter(|e| e.is_collision()).count();
        moves += 1;
        if check_integrity {
            game.state()
                .check_integrity()
                .with_context(|| format!("game {game_number}: integrity after move {moves}"))?;
        }
    }

    let state = game.state();
    let ranking = state.ranking();
    let best = ranking.first().and_then(|&i| state.player(i));
    let winners = ranking
        .iter()
        .copied()
        .filter(|&i| {
            let (Some(p), Some(b)) = (state.player(i), best) else {
                return false;
            };
            p.score == b.score && p.collected.len() == b.collected.len()
        })
        .collect();
    let census = state.gem_census();

    let record = GameRecord {
        game_number,
        seed,
        moves,
        scores: state.players().iter().map(|p| p.score).collect(),
        winners,
        collisions,
        gems_scored: census.collected,
        gems_lost: census.lost,
    };
    Ok((game, record))
}

/// Play `games` games in parallel. Game `i` uses seed `base_seed + i`.
/// `on_finished` runs once per completed game (progress reporting).
pub fn run_batch<F>(config: &GameConfig, games: usize, base_seed: u64, on_finished: F) -> Result<Vec<GameRecord>>
where
    F: Fn(&GameRecord) + Sync,
{
    config.validate()?;
    (0..games)
        .into_par_iter()
        .map(|i| -> Result<GameRecord> {
            let seed = base_seed.wrapping_add(i as u64);
            let (_, record) = play_random_game(config, i + 1, seed, true)?;
            on_finished(&record);
            Ok(record)
        })
        .collect()
}

pub fn summarize(records: &[GameRecord], players: usize) -> BatchSummary {
    let games = records.len();
    if games == 0 {
        return BatchSummary {
            wins: vec![0; players],
            avg_scores: vec![0.0; players],
            ..BatchSummary::default()
        };
    }

    let mut wins = vec![0; players];
    let mut ties = 0;
    let mut total_scores = vec![0u64; players];
    for record in records {
        match record.winners.as_slice() {
            [winner] => wins[*winner] += 1,
            _ => ties += 1,
        }
        for (total, &score) in total_scores.iter_mut().zip(&record.scores) {
            *total += score as u64;
        }
    }

    let mean = |sum: usize| sum as f32 / games as f32;
    BatchSummary {
        games,
        wins,
        ties,
        avg_scores: total_scores.iter().map(|&s| s as f32 / games as f32).collect(),
        avg_moves: mean(records.iter().map(|r| r.moves).sum()),
        avg_collisions: mean(records.iter().map(|r| r.collisions).sum()),
        avg_gems_lost: mean(records.iter().map(|r| r.gems_lost).sum()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_ties() {
        let record = |winners: Vec<usize>, scores: Vec<u32>| GameRecord {
            game_number: 1,
            seed: 0,
            moves: 20,
            scores,
            winners,
            collisions: 2,
            gems_scored: 4,
            gems_lost: 4,
        };
        let records = vec![
            record(vec![0], vec![6, 2]),
            record(vec![1], vec![1, 5]),
            record(vec![0, 1], vec![3, 3]),
        ];
        let summary = summarize(&records, 2);
        assert_eq!(summary.wins, vec![1, 1]);
        assert_eq!(summary.ties, 1);
        assert_eq!(summary.avg_scores, vec![10.0 / 3.0, 10.0 / 3.0]);
        assert_eq!(summary.avg_moves, 20.0);
    }

    #[test]
    fn test_empty_batch() {
        let summary = summarize(&[], 3);
        assert_eq!(summary.games, 0);
        assert_eq!(summary.wins, vec![0, 0, 0]);
    }
}
