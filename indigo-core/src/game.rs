//! Game state, turn flow and move generation

use crate::board::{all_cells, Coordinate, TREASURE_CELLS};
use crate::center::CenterPiece;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::pieces::{gate_tokens, Gem, GemColor, GemId, GateToken, TokenColor};
use crate::placement;
use crate::propagation::{self, GemEvent};
use crate::tile::{Tile, ROUTE_SUPPLY, ROUTE_TYPES};
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

// ============================================================================
// BOARD
// ============================================================================

/// Sparse board: only occupied cells are stored
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "tile_entries")]
    tiles: FxHashMap<Coordinate, Tile>,
    gate_tokens: Vec<GateToken>,
}

impl Board {
    pub fn with_gate_tokens(gate_tokens: Vec<GateToken>) -> Self {
        Self {
            tiles: FxHashMap::default(),
            gate_tokens,
        }
    }

    pub fn tile(&self, coord: Coordinate) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    pub fn tile_mut(&mut self, coord: Coordinate) -> Option<&mut Tile> {
        self.tiles.get_mut(&coord)
    }

    /// Put a tile on the board, returning whatever was there before.
    /// No rule checks: see [`placement::check_placement`].
    pub fn insert(&mut self, coord: Coordinate, tile: Tile) -> Option<Tile> {
        self.tiles.insert(coord, tile)
    }

    pub fn remove(&mut self, coord: Coordinate) -> Option<Tile> {
        self.tiles.remove(&coord)
    }

    /// Occupied cells in coordinate order
    pub fn tiles(&self) -> Vec<(Coordinate, &Tile)> {
        let mut tiles: Vec<_> = self.tiles.iter().map(|(&c, t)| (c, t)).collect();
        tiles.sort_by_key(|(c, _)| *c);
        tiles
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Token in gate slot `slot` (0-11)
    pub fn gate_token(&self, slot: usize) -> Option<GateToken> {
        self.gate_tokens.get(slot).copied()
    }

    pub fn gate_tokens(&self) -> &[GateToken] {
        &self.gate_tokens
    }
}

/// Serialize the tile map as a list of `(coordinate, tile)` pairs sorted by coordinate,
/// so saves are stable and JSON keys stay plain strings.
mod tile_entries {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        tiles: &FxHashMap<Coordinate, Tile>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<(&Coordinate, &Tile)> = tiles.iter().collect();
        entries.sort_by_key(|(c, _)| **c);
        serializer.collect_seq(entries)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<FxHashMap<Coordinate, Tile>, D::Error> {
        let entries: Vec<(Coordinate, Tile)> = Vec::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

// ============================================================================
// PLAYERS AND MOVES
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub color: TokenColor,
    pub score: u32,
    pub collected: Vec<Gem>,
    pub hand: Option<Tile>,
}

impl Player {
    pub fn new(name: impl Into<String>, color: TokenColor) -> Self {
        Self {
            name: name.into(),
            color,
            score: 0,
            collected: Vec::new(),
            hand: None,
        }
    }

    /// Credit a gem that reached one of this player's gates
    pub fn collect(&mut self, gem: Gem) -> u32 {
        let points = gem.color.points();
        self.score += points;
        self.collected.push(gem);
        points
    }
}

/// A placement: the current hand tile turned `rotation` times to the right, put at `coord`.
///
/// This is all a remote peer needs to replay a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub coord: Coordinate,
    pub rotation: u8,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} r{}", self.coord, self.rotation)
    }
}

/// Result of applying a move to a copy of a state
#[derive(Clone, Debug)]
pub struct MoveOutcome {
    pub state: GameState,
    pub events: Vec<GemEvent>,
}

/// Where every gem currently is
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GemCensus {
    pub center: usize,
    pub on_tiles: usize,
    pub collected: usize,
    pub lost: usize,
    pub in_play: usize,
    pub total: usize,
}

impl GemCensus {
    pub fn is_conserved(&self) -> bool {
        self.in_play == self.center + self.on_tiles
            && self.in_play + self.collected + self.lost == self.total
    }
}

// ============================================================================
// GAME STATE
// ============================================================================

/// One complete game position. Cloning yields a fully independent copy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub center: CenterPiece,
    /// Registry of gems still in play (center or tiles)
    pub(crate) pool: Vec<Gem>,
    /// Gems removed by collisions
    pub(crate) lost: Vec<Gem>,
    draw_pile: Vec<Tile>,
    pub(crate) players: Vec<Player>,
    current_player: usize,
    total_gems: usize,
}

impl GameState {
    /// Set up a fresh game: treasure tiles on the corners, a full center, a shuffled draw
    /// pile and one tile dealt to every player.
    pub fn new<R: Rng>(config: &GameConfig, rng: &mut R) -> Result<Self, GameError> {
        config.validate()?;

        let mut seats = config.players.clone();
        if config.shuffle_players {
            seats.shuffle(rng);
        }
        let colors: Vec<TokenColor> = seats.iter().map(|p| p.color).collect();
        let tokens = gate_tokens(&colors, config.gate_mode)
            .ok_or(GameError::SharedGatesUnsupported(colors.len()))?;

        let mut next_id = 0u32;
        let mut mint = |color: GemColor| {
            let gem = Gem::new(next_id, color);
            next_id += 1;
            gem
        };

        let mut board = Board::with_gate_tokens(tokens);
        let mut pool = Vec::new();
        for (index, &cell) in TREASURE_CELLS.iter().enumerate() {
            let gem = mint(GemColor::Amber);
            pool.push(gem);
            board.insert(cell, Tile::treasure(index, gem));
        }
        let ring: [Gem; 5] = std::array::from_fn(|_| mint(GemColor::Emerald));
        let middle = mint(GemColor::Sapphire);
        pool.extend(ring);
        pool.push(middle);
        let center = CenterPiece::new(middle, ring);

        let mut draw_pile: Vec<Tile> = ROUTE_TYPES
            .iter()
            .zip(ROUTE_SUPPLY)
            .filter_map(|(&kind, count)| Tile::route(kind).map(|tile| std::iter::repeat(tile).take(count)))
            .flatten()
            .collect();
        draw_pile.shuffle(rng);

        let mut players: Vec<Player> = seats
            .into_iter()
            .map(|seat| Player::new(seat.name, seat.color))
            .collect();
        for player in &mut players {
            player.hand = draw_pile.pop();
        }

        let current_player = if config.random_start_player {
            rng.gen_range(0..players.len())
        } else {
            0
        };

        let total_gems = pool.len();
        tracing::info!(
            players = players.len(),
            gate_mode = ?config.gate_mode,
            start = current_player,
            gems = total_gems,
            "new game"
        );

        Ok(Self {
            board,
            center,
            pool,
            lost: Vec::new(),
            draw_pile,
            players,
            current_player,
            total_gems,
        })
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    /// The tile the current player will place next
    pub fn current_hand(&self) -> Option<&Tile> {
        self.players.get(self.current_player)?.hand.as_ref()
    }

    /// Gems still in play, in registry order
    pub fn pool(&self) -> &[Gem] {
        &self.pool
    }

    pub fn lost(&self) -> &[Gem] {
        &self.lost
    }

    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn total_gems(&self) -> usize {
        self.total_gems
    }

    pub fn is_over(&self) -> bool {
        self.pool.is_empty() || self.current_hand().is_none()
    }

    /// Player indices, best first: score, then number of gems collected
    pub fn ranking(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.players.len()).collect();
        order.sort_by(|&a, &b| {
            let (pa, pb) = (&self.players[a], &self.players[b]);
            pb.score
                .cmp(&pa.score)
                .then(pb.collected.len().cmp(&pa.collected.len()))
        });
        order
    }

    // ------------------------------------------------------------------------
    // Hand rotation
    // ------------------------------------------------------------------------

    pub fn rotate_hand_left(&mut self) -> Result<(), GameError> {
        self.hand_mut()?.rotate_left();
        Ok(())
    }

    pub fn rotate_hand_right(&mut self) -> Result<(), GameError> {
        self.hand_mut()?.rotate_right();
        Ok(())
    }

    fn hand_mut(&mut self) -> Result<&mut Tile, GameError> {
        let index = self.current_player;
        self.players
            .get_mut(index)
            .and_then(|p| p.hand.as_mut())
            .ok_or(GameError::NoHandTile(index))
    }

    // ------------------------------------------------------------------------
    // Placement
    // ------------------------------------------------------------------------

    /// Why the current hand tile, as rotated now, may not go to `coord`
    pub fn check_placement(&self, coord: Coordinate) -> Result<(), GameError> {
        let tile = self
            .current_hand()
            .ok_or(GameError::NoHandTile(self.current_player))?;
        placement::check_placement(&self.board, coord, tile)?;
        Ok(())
    }

    /// Whether `tile` could go to `coord` on this board
    pub fn can_place(&self, coord: Coordinate, tile: &Tile) -> bool {
        placement::can_place(&self.board, coord, tile)
    }

    /// Every legal placement of the current hand tile, in board order then rotation order
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.pool.is_empty() {
            return Vec::new();
        }
        let Some(hand) = self.current_hand() else {
            return Vec::new();
        };
        let mut tile = hand.clone();
        let mut moves = Vec::new();
        for coord in all_cells() {
            if self.board.tile(coord).is_some() {
                continue;
            }
            for rotation in 0..6 {
                tile.set_rotation(rotation);
                if placement::can_place(&self.board, coord, &tile) {
                    moves.push(Move { coord, rotation });
                }
            }
        }
        moves
    }

    /// Place the current hand tile as it is rotated now, run propagation and pass the turn.
    ///
    /// On an illegal placement nothing changes.
    pub fn place(&mut self, coord: Coordinate) -> Result<Vec<GemEvent>, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        self.check_placement(coord)?;

        let mover = self.current_player;
        let tile = self.players[mover]
            .hand
            .take()
            .ok_or(GameError::NoHandTile(mover))?;
        tracing::debug!(player = mover, %coord, tile = %tile, "placing tile");
        self.board.insert(coord, tile);

        let events = propagation::propagate_from(self, coord)?;

        if !self.pool.is_empty() {
            self.players[mover].hand = self.draw_pile.pop();
            self.current_player = (mover + 1) % self.players.len();
        }
        Ok(events)
    }

    /// Turn the hand tile to `mv.rotation` and place it, in place
    pub fn play(&mut self, mv: Move) -> Result<Vec<GemEvent>, GameError> {
        if mv.rotation > 5 {
            return Err(GameError::InvalidRotation(mv.rotation));
        }
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        self.hand_mut()?.set_rotation(mv.rotation);
        self.place(mv.coord)
    }

    /// Apply a move to a copy of this state. `self` is left untouched.
    pub fn apply_move(&self, mv: Move) -> Result<MoveOutcome, GameError> {
        let mut state = self.clone();
        let events = state.play(mv)?;
        Ok(MoveOutcome { state, events })
    }

    // ------------------------------------------------------------------------
    // Gem bookkeeping
    // ------------------------------------------------------------------------

    /// Remove a gem from the in-play registry
    pub(crate) fn retire(&mut self, gem: Gem) -> Result<(), GameError> {
        let index = self
            .pool
            .iter()
            .position(|g| g.id == gem.id)
            .ok_or_else(|| GameError::Integrity(format!("gem {:?} is not in play", gem.id)))?;
        self.pool.remove(index);
        Ok(())
    }

    /// A collision destroys the gem: out of play, into the lost pile
    pub(crate) fn lose(&mut self, gem: Gem) -> Result<(), GameError> {
        self.retire(gem)?;
        self.lost.push(gem);
        Ok(())
    }

    /// Bring an extra gem into play, for hand-built positions
    #[cfg(test)]
    pub(crate) fn register(&mut self, gem: Gem) {
        self.pool.push(gem);
        self.total_gems += 1;
    }

    pub fn gem_census(&self) -> GemCensus {
        GemCensus {
            center: self.center.gem_count(),
            on_tiles: self.board.tiles.values().map(Tile::gem_count).sum(),
            collected: self.players.iter().map(|p| p.collected.len()).sum(),
            lost: self.lost.len(),
            in_play: self.pool.len(),
            total: self.total_gems,
        }
    }

    /// Verify conservation, registry consistency, tile rotation state and turn index
    pub fn check_integrity(&self) -> Result<(), GameError> {
        if self.current_player >= self.players.len() {
            return Err(GameError::Integrity(format!(
                "current player {} out of range for {} players",
                self.current_player,
                self.players.len()
            )));
        }

        let census = self.gem_census();
        if !census.is_conserved() {
            return Err(GameError::Integrity(format!("gems not conserved: {census:?}")));
        }

        let registry: FxHashSet<GemId> = self.pool.iter().map(|g| g.id).collect();
        if registry.len() != self.pool.len() {
            return Err(GameError::Integrity("duplicate gem in play".to_string()));
        }
        let placed = self
            .center
            .gems()
            .chain(self.board.tiles.values().flat_map(|t| t.gems().map(|(_, g)| g)));
        let mut seen = FxHashSet::default();
        for gem in placed {
            if !registry.contains(&gem.id) || !seen.insert(gem.id) {
                return Err(GameError::Integrity(format!(
                    "gem {:?} on the board does not match the registry",
                    gem.id
                )));
            }
        }

        for (coord, tile) in &self.board.tiles {
            if !tile.is_well_formed() {
                return Err(GameError::Integrity(format!("tile at {coord} has bad edge labels")));
            }
        }
        for player in &self.players {
            if let Some(hand) = &player.hand {
                if !hand.is_well_formed() {
                    return Err(GameError::Integrity(format!(
                        "{}'s hand tile has bad edge labels",
                        player.name
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CENTER;
    use crate::error::PlacementError;
    use crate::pieces::GateMode;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn new_game(players: usize, seed: u64) -> GameState {
        let config = GameConfig::default().with_player_count(players);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        GameState::new(&config, &mut rng).unwrap()
    }

    #[test]
    fn test_setup() {
        let state = new_game(4, 1);
        assert_eq!(state.total_gems(), 12);
        assert_eq!(state.pool().len(), 12);
        assert_eq!(state.center.gem_count(), 6);
        assert_eq!(state.board.tile_count(), 6);
        assert_eq!(state.draw_pile_len(), 54 - 4);
        assert!(state.players().iter().all(|p| p.hand.is_some()));
        assert_eq!(state.board.gate_tokens().len(), 12);
        state.check_integrity().unwrap();
    }

    #[test]
    fn test_setup_is_deterministic() {
        assert_eq!(new_game(3, 9), new_game(3, 9));
    }

    #[test]
    fn test_invalid_configs() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let one = GameConfig::default().with_player_count(1);
        assert!(matches!(
            GameState::new(&one, &mut rng),
            Err(GameError::InvalidPlayerCount(1))
        ));
        let shared = GameConfig::default().with_gate_mode(GateMode::Shared);
        assert!(matches!(
            GameState::new(&shared, &mut rng),
            Err(GameError::SharedGatesUnsupported(2))
        ));
    }

    #[test]
    fn test_first_placement_pulls_from_center() {
        let mut state = new_game(2, 3);
        state.players[0].hand = Some(Tile::route(crate::tile::TileType::Route0).unwrap());
        let events = state.place(Coordinate::new(-1, 0)).unwrap();

        assert_eq!(state.center.gem_count(), 5);
        let tile = state.board.tile(Coordinate::new(-1, 0)).unwrap();
        assert_eq!(tile.gem_count(), 1);
        assert!(tile.gem_at(5).is_some());
        assert_eq!(events.len(), 1);
        assert_eq!(state.current_player(), 1);
        assert!(state.players()[0].hand.is_some());
        state.check_integrity().unwrap();
    }

    #[test]
    fn test_illegal_placement_changes_nothing() {
        let mut state = new_game(2, 4);
        let before = state.clone();
        assert!(matches!(
            state.place(CENTER),
            Err(GameError::Placement(PlacementError::CenterReserved(_)))
        ));
        assert!(matches!(
            state.place(TREASURE_CELLS[0]),
            Err(GameError::Placement(PlacementError::Occupied(_)))
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_legal_moves_are_placeable() {
        let state = new_game(2, 5);
        let moves = state.legal_moves();
        // 61 cells minus center and six treasures, each with at least one rotation
        let cells: FxHashSet<Coordinate> = moves.iter().map(|m| m.coord).collect();
        assert_eq!(cells.len(), 54);
        for mv in moves.iter().step_by(7) {
            let outcome = state.apply_move(*mv).unwrap();
            assert!(outcome.state.board.tile(mv.coord).is_some());
            outcome.state.check_integrity().unwrap();
        }
        // apply_move leaves the original alone
        assert_eq!(state.board.tile_count(), 6);
    }

    #[test]
    fn test_bad_rotation() {
        let state = new_game(2, 6);
        let mv = Move { coord: Coordinate::new(1, 1), rotation: 6 };
        assert!(matches!(state.apply_move(mv), Err(GameError::InvalidRotation(6))));
    }

    #[test]
    fn test_ranking() {
        let mut state = new_game(3, 7);
        state.players[1].collect(Gem::new(100, GemColor::Sapphire));
        state.players[2].collect(Gem::new(101, GemColor::Amber));
        state.players[2].collect(Gem::new(102, GemColor::Amber));
        state.players[2].collect(Gem::new(103, GemColor::Amber));
        // Three points each: more gems breaks the tie
        assert_eq!(state.ranking(), vec![2, 1, 0]);
    }

    #[test]
    fn test_hand_rotation() {
        let mut state = new_game(2, 8);
        state.rotate_hand_right().unwrap();
        state.rotate_hand_right().unwrap();
        state.rotate_hand_left().unwrap();
        assert_eq!(state.current_hand().unwrap().rotation(), 1);
    }
}
