//! Turn and phase state machine.
//!
//! A game runs `Setup -> Select -> Move -> Wall -> Select -> ... -> GameOver`.
//! Every input is a discrete event (a cell click or a wall placement) that is
//! processed to completion. Illegal inputs are rejected with a status message
//! and leave the phase untouched.
//!
//! Time never comes from a global clock. Callers pass a monotonic [`Instant`]
//! into [`Game::click`] and [`Game::update`], which keeps the stay-in-place
//! delay deterministic under test.

use std::time::{Duration, Instant};

use log::{debug, info};
use thiserror::Error;

use crate::board::{Board, BoardError, Cell, Orientation, Player, WallPos};
use crate::connectivity::is_game_over;
use crate::constants::{
    BOARD_SIZE, MIN_BOARD_SIZE, PIECES_PER_PLAYER, PLAYERS, STAY_DELAY_MS, TOTAL_PIECES,
};
use crate::movegen::{MoveSet, generate_moves};
use crate::scoring::{Areas, Winner, score};

/// Runtime settings for a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Board size (NxN)
    pub size: usize,
    /// Time after selection before staying in place is allowed
    pub stay_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: BOARD_SIZE,
            stay_delay: Duration::from_millis(STAY_DELAY_MS),
        }
    }
}

impl GameConfig {
    /// Check that the settings describe a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < MIN_BOARD_SIZE {
            return Err(ConfigError::BoardTooSmall(self.size));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board size {0} is too small, need at least {MIN_BOARD_SIZE}")]
    BoardTooSmall(usize),
}

/// A rejected input. The `Display` text is shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("Click is outside the board")]
    OutOfBounds,
    #[error("This cell is already occupied. Choose another.")]
    OccupiedCell,
    #[error("{0}: Select your piece")]
    NotYourPiece(Player),
    #[error("This piece is isolated and cannot be moved.")]
    IsolatedPiece,
    #[error("Invalid move. Try again.")]
    InvalidMove,
    #[error("A wall already exists here")]
    WallAlreadyPresent,
    #[error("Wall must be adjacent to the moved piece")]
    WallNotAdjacent,
    #[error("{0}: Place a wall next to your piece")]
    WallExpected(Player),
    #[error("Walls can only be placed after moving")]
    WallNotExpected,
    #[error("Pieces can only be randomized during setup")]
    NotInSetup,
    #[error("The game is over. Reset to play again")]
    GameOver,
}

impl From<BoardError> for RuleViolation {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::OutOfBounds => RuleViolation::OutOfBounds,
            BoardError::OccupiedCell => RuleViolation::OccupiedCell,
            BoardError::WallAlreadyPresent => RuleViolation::WallAlreadyPresent,
        }
    }
}

/// Current phase, carrying the data that only exists within it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// `placed` pieces are on the board so far
    Setup { placed: usize },
    Select,
    /// `piece` of the current player was selected on `from` at `started`
    Move {
        piece: usize,
        from: Cell,
        started: Instant,
    },
    /// `piece` of the current player has moved to `at`
    Wall { piece: usize, at: Cell },
    GameOver { areas: Areas, winner: Winner },
}

/// Phase tag without payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PhaseKind {
    Setup,
    Select,
    Move,
    Wall,
    GameOver,
}

impl PhaseKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Select => "select",
            Self::Move => "move",
            Self::Wall => "wall",
            Self::GameOver => "game_over",
        }
    }
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Setup { .. } => PhaseKind::Setup,
            Phase::Select => PhaseKind::Select,
            Phase::Move { .. } => PhaseKind::Move,
            Phase::Wall { .. } => PhaseKind::Wall,
            Phase::GameOver { .. } => PhaseKind::GameOver,
        }
    }
}

/// Read-only view of everything a renderer needs.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub size: usize,
    pub phase: PhaseKind,
    pub current_player: Player,
    pub selected_piece: Option<usize>,
    pub pieces: [[Option<Cell>; PIECES_PER_PLAYER]; PLAYERS],
    pub horizontal_walls: Vec<Vec<bool>>,
    pub vertical_walls: Vec<Vec<bool>>,
    pub isolated: [[bool; PIECES_PER_PLAYER]; PLAYERS],
    pub valid_moves: Vec<Cell>,
    pub stay_progress: f32,
    pub stay_available: bool,
    pub message: String,
    pub winner: Option<Winner>,
    pub scores: Option<[usize; PLAYERS]>,
}

/// The rule engine: owns the board and drives the turn cycle.
pub struct Game {
    config: GameConfig,
    board: Board,
    phase: Phase,
    current: Player,
    valid_moves: MoveSet,
    stay_available: bool,
    stay_progress: f32,
    isolated: [[bool; PIECES_PER_PLAYER]; PLAYERS],
    message: String,
    rng: fastrand::Rng,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    /// Create a game with an entropy-seeded random source.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, fastrand::Rng::new())
    }

    /// Create a game whose random choices are reproducible.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`GameConfig::validate`].
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(config: GameConfig, rng: fastrand::Rng) -> Self {
        if let Err(err) = config.validate() {
            panic!("invalid game config: {err}");
        }
        let mut game = Self {
            board: Board::new(config.size),
            config,
            phase: Phase::Setup { placed: 0 },
            current: Player::Red,
            valid_moves: MoveSet::new(),
            stay_available: false,
            stay_progress: 0.0,
            isolated: [[false; PIECES_PER_PLAYER]; PLAYERS],
            message: String::new(),
            rng,
        };
        game.reset();
        game
    }

    /// Return to an empty board in the setup phase.
    pub fn reset(&mut self) {
        self.board = Board::new(self.config.size);
        self.phase = Phase::Setup { placed: 0 };
        self.current = Player::Red;
        self.valid_moves.clear();
        self.stay_available = false;
        self.stay_progress = 0.0;
        self.isolated = [[false; PIECES_PER_PLAYER]; PLAYERS];
        self.message = format!("{}'s turn: Place your first piece", self.current);
        info!("new game on a {0}x{0} board", self.config.size);
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn selected_piece(&self) -> Option<usize> {
        match self.phase {
            Phase::Move { piece, .. } | Phase::Wall { piece, .. } => Some(piece),
            _ => None,
        }
    }

    pub fn valid_moves(&self) -> &MoveSet {
        &self.valid_moves
    }

    pub fn stay_available(&self) -> bool {
        self.stay_available
    }

    /// Progress towards the stay option, from 0.0 to 1.0.
    pub fn stay_progress(&self) -> f32 {
        self.stay_progress
    }

    pub fn isolated(&self) -> [[bool; PIECES_PER_PLAYER]; PLAYERS] {
        self.isolated
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    pub fn winner(&self) -> Option<Winner> {
        match self.phase {
            Phase::GameOver { winner, .. } => Some(winner),
            _ => None,
        }
    }

    pub fn areas(&self) -> Option<Areas> {
        match self.phase {
            Phase::GameOver { areas, .. } => Some(areas),
            _ => None,
        }
    }

    /// Per-player totals once the game is decided.
    pub fn scores(&self) -> Option<[usize; PLAYERS]> {
        self.areas().map(|a| a.totals())
    }

    pub fn snapshot(&self) -> Snapshot {
        let walls = self.board.walls();
        Snapshot {
            size: self.board.size(),
            phase: self.phase.kind(),
            current_player: self.current,
            selected_piece: self.selected_piece(),
            pieces: self.board.pieces(),
            horizontal_walls: walls.grid(Orientation::Horizontal),
            vertical_walls: walls.grid(Orientation::Vertical),
            isolated: self.isolated,
            valid_moves: self.valid_moves.iter().copied().collect(),
            stay_progress: self.stay_progress,
            stay_available: self.stay_available,
            message: self.message.clone(),
            winner: self.winner(),
            scores: self.scores(),
        }
    }

    /// Advance the stay timer to `now` and refresh isolation flags.
    pub fn update(&mut self, now: Instant) {
        if let Phase::Move { from, started, .. } = self.phase {
            let elapsed = now.saturating_duration_since(started);
            if elapsed >= self.config.stay_delay {
                self.stay_progress = 1.0;
                if !self.stay_available {
                    self.stay_available = true;
                    self.valid_moves = generate_moves(&self.board, from, true);
                    debug!("stay option available at {from:?}");
                }
            } else {
                self.stay_progress =
                    elapsed.as_secs_f32() / self.config.stay_delay.as_secs_f32();
            }
        } else {
            self.stay_available = false;
            self.stay_progress = 0.0;
        }
        self.isolated = self.board.isolation();
    }

    /// Handle a click on a board cell, routed by phase.
    pub fn click(&mut self, cell: Cell, now: Instant) -> Result<(), RuleViolation> {
        self.update(now);
        let result = if !self.board.in_bounds(cell) {
            Err(RuleViolation::OutOfBounds)
        } else {
            match self.phase {
                Phase::Setup { placed } => self.place_next(placed, cell),
                Phase::Select => self.select_at(cell, now),
                Phase::Move {
                    piece,
                    from,
                    started,
                } => self.move_or_reselect(piece, from, started, cell),
                Phase::Wall { .. } => Err(RuleViolation::WallExpected(self.current)),
                Phase::GameOver { .. } => Err(RuleViolation::GameOver),
            }
        };
        self.report(result)
    }

    /// Place a wall segment next to the piece that just moved.
    pub fn place_wall(&mut self, pos: WallPos) -> Result<(), RuleViolation> {
        let result = match self.phase {
            Phase::Wall { at, .. } => self.build_wall(at, pos),
            Phase::GameOver { .. } => Err(RuleViolation::GameOver),
            _ => Err(RuleViolation::WallNotExpected),
        };
        self.report(result)
    }

    /// Put all four pieces on distinct random cells and start play.
    pub fn randomize_setup(&mut self) -> Result<(), RuleViolation> {
        let result = match self.phase {
            Phase::Setup { .. } => self.scatter_pieces(),
            _ => Err(RuleViolation::NotInSetup),
        };
        self.report(result)
    }

    /// Wall segments the current mover may still place.
    pub fn legal_walls(&self) -> Vec<WallPos> {
        match self.phase {
            Phase::Wall { at, .. } => WallPos::around(at)
                .into_iter()
                .filter(|&w| !self.board.wall_exists(w))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Pieces of `player` that may be selected.
    pub fn movable_pieces(&self, player: Player) -> Vec<usize> {
        (0..PIECES_PER_PLAYER)
            .filter(|&i| {
                self.board.piece(player, i).is_some() && !self.board.is_isolated(player, i)
            })
            .collect()
    }

    fn report(&mut self, result: Result<(), RuleViolation>) -> Result<(), RuleViolation> {
        if let Err(err) = &result {
            debug!("rejected in {} phase: {err}", self.phase.kind().name());
            self.message = err.to_string();
        }
        result
    }

    fn place_next(&mut self, placed: usize, cell: Cell) -> Result<(), RuleViolation> {
        let player = Player::from_index(placed);
        let index = placed / PLAYERS;
        self.board.place_piece(player, index, cell)?;
        debug!("{player} piece {index} placed at {cell:?}");

        let placed = placed + 1;
        if placed < TOTAL_PIECES {
            self.phase = Phase::Setup { placed };
            self.current = Player::from_index(placed);
            let ordinal = if placed / PLAYERS == 0 { "first" } else { "second" };
            self.message = format!("{}'s turn: Place your {ordinal} piece", self.current);
        } else {
            self.start_play();
        }
        Ok(())
    }

    fn scatter_pieces(&mut self) -> Result<(), RuleViolation> {
        self.board.clear_pieces();
        let size = self.board.size();
        let mut cells: Vec<Cell> = (0..size * size).map(|i| (i / size, i % size)).collect();
        self.rng.shuffle(&mut cells);
        for (n, &cell) in cells.iter().take(TOTAL_PIECES).enumerate() {
            let player = Player::from_index(n / PIECES_PER_PLAYER);
            self.board.place_piece(player, n % PIECES_PER_PLAYER, cell)?;
        }
        self.start_play();
        Ok(())
    }

    fn start_play(&mut self) {
        let first = if self.rng.bool() {
            Player::Red
        } else {
            Player::Blue
        };
        info!("setup complete, {first} moves first");
        self.isolated = self.board.isolation();
        self.begin_turn(first);
    }

    fn begin_turn(&mut self, player: Player) {
        self.current = player;
        self.phase = Phase::Select;
        self.valid_moves.clear();
        self.stay_available = false;
        self.stay_progress = 0.0;
        self.message = format!("{player}'s turn: Select a piece");
    }

    fn own_piece_at(&self, cell: Cell) -> Option<usize> {
        self.board
            .piece_at(cell)
            .filter(|p| p.player == self.current)
            .map(|p| p.index)
    }

    fn check_movable(&self, piece: usize) -> Result<(), RuleViolation> {
        if self.board.is_isolated(self.current, piece) {
            return Err(RuleViolation::IsolatedPiece);
        }
        Ok(())
    }

    fn select_at(&mut self, cell: Cell, now: Instant) -> Result<(), RuleViolation> {
        let piece = self
            .own_piece_at(cell)
            .ok_or(RuleViolation::NotYourPiece(self.current))?;
        self.check_movable(piece)?;
        self.stay_available = false;
        self.stay_progress = 0.0;
        self.enter_move(piece, cell, now);
        Ok(())
    }

    fn enter_move(&mut self, piece: usize, from: Cell, started: Instant) {
        self.valid_moves = generate_moves(&self.board, from, self.stay_available);
        self.phase = Phase::Move {
            piece,
            from,
            started,
        };
        self.message = format!("{}: Move your piece", self.current);
        debug!(
            "{} selected piece {piece} at {from:?}, {} destinations",
            self.current,
            self.valid_moves.len()
        );
    }

    fn move_or_reselect(
        &mut self,
        piece: usize,
        from: Cell,
        started: Instant,
        cell: Cell,
    ) -> Result<(), RuleViolation> {
        if self.valid_moves.contains(&cell) {
            self.board.move_piece(self.current, piece, cell)?;
            debug!("{} moved piece {piece} {from:?} -> {cell:?}", self.current);
            self.phase = Phase::Wall { piece, at: cell };
            self.valid_moves.clear();
            self.message = format!("{}: Place a wall", self.current);
            return Ok(());
        }
        match self.own_piece_at(cell) {
            Some(other) => {
                self.check_movable(other)?;
                // The stay timer keeps running across reselection
                self.enter_move(other, cell, started);
                Ok(())
            }
            None => Err(RuleViolation::InvalidMove),
        }
    }

    fn build_wall(&mut self, at: Cell, pos: WallPos) -> Result<(), RuleViolation> {
        if !self.board.walls().contains(pos) {
            return Err(RuleViolation::OutOfBounds);
        }
        if self.board.wall_exists(pos) {
            return Err(RuleViolation::WallAlreadyPresent);
        }
        if !WallPos::around(at).contains(&pos) {
            return Err(RuleViolation::WallNotAdjacent);
        }
        self.board.set_wall(pos)?;
        debug!("{} placed wall {pos:?}", self.current);
        self.isolated = self.board.isolation();
        self.end_turn();
        Ok(())
    }

    fn end_turn(&mut self) {
        let finished = self
            .board
            .placed_pieces()
            .filter(|pieces| is_game_over(self.board.walls(), pieces));
        if let Some(pieces) = finished {
            let areas = score(self.board.walls(), &pieces);
            self.finish(areas);
            return;
        }

        let next = self.current.other();
        if self.movable_pieces(next).is_empty() {
            info!("{next} has no movable pieces, {} moves again", self.current);
            self.begin_turn(self.current);
            self.message = format!(
                "{next} has no movable pieces. {}'s turn: Select a piece",
                self.current
            );
        } else {
            self.begin_turn(next);
        }
    }

    fn finish(&mut self, areas: Areas) {
        let winner = areas.winner();
        let [red, blue] = areas.totals();
        debug!("areas: Red = {:?}, Blue = {:?}", areas.0[0], areas.0[1]);
        info!("game over, winner: {winner}");

        self.message = match winner {
            Winner::Player(Player::Red) => {
                format!("Game Over! Red wins with {red} squares vs Blue's {blue} squares")
            }
            Winner::Player(Player::Blue) => {
                format!("Game Over! Blue wins with {blue} squares vs Red's {red} squares")
            }
            Winner::Tie => format!("Game Over! It's a tie with {red} squares each"),
        };
        self.phase = Phase::GameOver { areas, winner };
        self.valid_moves.clear();
        self.stay_available = false;
        self.stay_progress = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(game: &mut Game, cells: [Cell; 4], now: Instant) {
        for cell in cells {
            game.click(cell, now).unwrap();
        }
    }

    #[test]
    fn test_setup_order() {
        let now = Instant::now();
        let mut game = Game::with_seed(GameConfig::default(), 7);
        assert_eq!(game.message(), "Red's turn: Place your first piece");

        game.click((0, 0), now).unwrap();
        assert_eq!(game.current_player(), Player::Blue);
        assert_eq!(game.message(), "Blue's turn: Place your first piece");

        game.click((6, 6), now).unwrap();
        assert_eq!(game.message(), "Red's turn: Place your second piece");
        game.click((0, 1), now).unwrap();
        assert_eq!(*game.phase(), Phase::Setup { placed: 3 });
        game.click((6, 5), now).unwrap();

        assert_eq!(*game.phase(), Phase::Select);
        assert_eq!(game.board().piece(Player::Red, 0), Some((0, 0)));
        assert_eq!(game.board().piece(Player::Blue, 0), Some((6, 6)));
        assert_eq!(game.board().piece(Player::Red, 1), Some((0, 1)));
        assert_eq!(game.board().piece(Player::Blue, 1), Some((6, 5)));
    }

    #[test]
    fn test_setup_rejects_occupied() {
        let now = Instant::now();
        let mut game = Game::with_seed(GameConfig::default(), 1);
        game.click((2, 2), now).unwrap();
        assert_eq!(game.click((2, 2), now), Err(RuleViolation::OccupiedCell));
        assert_eq!(*game.phase(), Phase::Setup { placed: 1 });
        assert_eq!(game.message(), "This cell is already occupied. Choose another.");
    }

    #[test]
    fn test_select_and_stay_timer() {
        let t0 = Instant::now();
        let mut game = Game::with_seed(GameConfig::default(), 3);
        setup(&mut game, [(3, 3), (0, 0), (6, 6), (0, 6)], t0);
        let me = game.current_player();
        let (mine, theirs) = match me {
            Player::Red => ((3, 3), (0, 0)),
            Player::Blue => ((0, 0), (3, 3)),
        };

        assert_eq!(game.click(theirs, t0), Err(RuleViolation::NotYourPiece(me)));
        assert_eq!(*game.phase(), Phase::Select);

        game.click(mine, t0).unwrap();
        assert_eq!(game.phase().kind(), PhaseKind::Move);
        assert!(!game.valid_moves().contains(&mine));
        assert!(!game.stay_available());

        game.update(t0 + Duration::from_millis(500));
        assert!((game.stay_progress() - 0.5).abs() < 1e-3);
        assert!(!game.stay_available());

        game.update(t0 + Duration::from_millis(1000));
        assert!(game.stay_available());
        assert_eq!(game.stay_progress(), 1.0);
        assert!(game.valid_moves().contains(&mine));

        game.click(mine, t0 + Duration::from_millis(1100)).unwrap();
        assert_eq!(game.phase().kind(), PhaseKind::Wall);
        assert_eq!(game.board().piece_at(mine).map(|p| p.player), Some(me));
    }

    #[test]
    fn test_invalid_destination_keeps_phase() {
        let t0 = Instant::now();
        let mut game = Game::with_seed(GameConfig::default(), 11);
        setup(&mut game, [(3, 3), (0, 0), (6, 6), (0, 6)], t0);
        let me = game.current_player();
        let mine = game.board().piece(me, 0).unwrap();
        game.click(mine, t0).unwrap();
        let before = game.phase().clone();

        let far = if mine == (3, 3) { (6, 0) } else { (6, 3) };
        assert_eq!(game.click(far, t0), Err(RuleViolation::InvalidMove));
        assert_eq!(*game.phase(), before);
        assert_eq!(game.message(), "Invalid move. Try again.");
    }

    #[test]
    fn test_wall_must_be_adjacent() {
        let t0 = Instant::now();
        let mut game = Game::with_seed(GameConfig::default(), 5);
        setup(&mut game, [(3, 3), (1, 1), (5, 5), (1, 5)], t0);
        let me = game.current_player();
        let from = game.board().piece(me, 0).unwrap();
        game.click(from, t0).unwrap();
        let to = (from.0 + 1, from.1);
        game.click(to, t0).unwrap();

        assert_eq!(
            game.place_wall(WallPos::horizontal(1, 0)),
            Err(RuleViolation::WallNotAdjacent)
        );
        assert_eq!(
            game.place_wall(WallPos::vertical(0, 0)),
            Err(RuleViolation::WallAlreadyPresent)
        );
        assert_eq!(
            game.click(from, t0),
            Err(RuleViolation::WallExpected(me))
        );
        assert_eq!(game.legal_walls().len(), 4);

        game.place_wall(WallPos::vertical(to.0, to.1 + 1)).unwrap();
        assert_eq!(*game.phase(), Phase::Select);
        assert_eq!(game.current_player(), me.other());
        assert!(game.valid_moves().is_empty());
        assert_eq!(game.selected_piece(), None);
    }

    #[test]
    fn test_isolated_piece_cannot_be_reselected() {
        let t0 = Instant::now();
        let mut game = Game::with_seed(GameConfig::default(), 5);
        setup(&mut game, [(3, 3), (1, 1), (5, 5), (1, 5)], t0);
        for w in WallPos::around((5, 5)) {
            game.board.set_wall(w).unwrap();
        }
        game.begin_turn(Player::Red);

        game.click((3, 3), t0).unwrap();
        let before = game.phase().clone();
        assert_eq!(game.click((5, 5), t0), Err(RuleViolation::IsolatedPiece));
        assert_eq!(*game.phase(), before);
        assert_eq!(game.selected_piece(), Some(0));
        assert_eq!(game.message(), "This piece is isolated and cannot be moved.");
    }

    #[test]
    fn test_turn_skipped_when_all_pieces_isolated() {
        let t0 = Instant::now();
        let mut game = Game::with_seed(GameConfig::default(), 8);
        setup(&mut game, [(3, 0), (6, 6), (3, 2), (0, 6)], t0);
        // Close the open sides of both Blue corner pieces
        for w in [
            WallPos::horizontal(6, 6),
            WallPos::vertical(6, 6),
            WallPos::horizontal(1, 6),
            WallPos::vertical(0, 6),
        ] {
            game.board.set_wall(w).unwrap();
        }
        game.begin_turn(Player::Red);
        assert!(game.movable_pieces(Player::Blue).is_empty());

        game.click((3, 0), t0).unwrap();
        game.click((4, 0), t0).unwrap();
        game.place_wall(WallPos::vertical(4, 1)).unwrap();

        assert_eq!(*game.phase(), Phase::Select);
        assert_eq!(game.current_player(), Player::Red);
        assert_eq!(
            game.message(),
            "Blue has no movable pieces. Red's turn: Select a piece"
        );
        assert_eq!(game.click((6, 6), t0), Err(RuleViolation::NotYourPiece(Player::Red)));
    }

    #[test]
    fn test_config_validation() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
        let tiny = GameConfig {
            size: 1,
            ..GameConfig::default()
        };
        assert_eq!(tiny.validate(), Err(ConfigError::BoardTooSmall(1)));
    }

    #[test]
    #[should_panic(expected = "invalid game config")]
    fn test_invalid_config_panics() {
        let config = GameConfig {
            size: 0,
            ..GameConfig::default()
        };
        let _ = Game::with_seed(config, 1);
    }

    #[test]
    fn test_wall_outside_wall_phase() {
        let mut game = Game::with_seed(GameConfig::default(), 5);
        assert_eq!(
            game.place_wall(WallPos::horizontal(3, 3)),
            Err(RuleViolation::WallNotExpected)
        );
        assert!(!game.board().wall_exists(WallPos::horizontal(3, 3)));
    }

    #[test]
    fn test_randomize_setup() {
        let mut game = Game::with_seed(GameConfig::default(), 42);
        game.randomize_setup().unwrap();
        assert_eq!(*game.phase(), Phase::Select);
        let pieces = game.board().placed_pieces().unwrap();
        let mut cells: Vec<Cell> = pieces.iter().flatten().copied().collect();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 4);
        assert_eq!(game.randomize_setup(), Err(RuleViolation::NotInSetup));
    }

    #[test]
    fn test_reset() {
        let mut game = Game::with_seed(GameConfig::default(), 42);
        game.randomize_setup().unwrap();
        game.reset();
        assert_eq!(*game.phase(), Phase::Setup { placed: 0 });
        assert!(game.board().placed_pieces().is_none());
        assert_eq!(game.board().pieces(), [[None; 2]; 2]);
    }

    #[test]
    fn test_snapshot_shape() {
        let game = Game::default();
        let snap = game.snapshot();
        assert_eq!(snap.size, 7);
        assert_eq!(snap.phase, PhaseKind::Setup);
        assert_eq!(snap.horizontal_walls.len(), 8);
        assert_eq!(snap.vertical_walls[0].len(), 8);
        assert_eq!(snap.winner, None);
        assert_eq!(snap.scores, None);
        assert_eq!(snap.stay_progress, 0.0);
    }
}
