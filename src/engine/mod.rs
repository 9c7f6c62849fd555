//! Board engine: the falling-block rules.
//!
//! [`BoardEngine`] owns the grid and the single active piece. It knows
//! nothing about the browser; the web shell drives it with [`BoardEngine::tick`]
//! once per frame and with [`BoardEngine::apply`] for key presses, then reads
//! back the grid, the piece and the queued [`BoardEvent`]s.
//!
//! No operation can fail. A move or rotation that would collide is undone, and
//! a piece that spawns on top of existing blocks wipes the board and score
//! (the game simply starts over).

pub mod grid;
pub mod piece;
pub mod rng;

use log::{debug, info};

use crate::config::GameConfig;
use crate::input::Command;

pub use grid::{Cell, EMPTY, Grid, Sweep};
pub use piece::{PieceKind, Shape, Spin};
pub use rng::PieceRng;

/// Used when neither the config nor the host supplies a seed.
const FALLBACK_SEED: u64 = 0x5eed;

/// Horizontal move direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shift {
    Left,
    Right,
}

impl Shift {
    fn dx(self) -> i32 {
        match self {
            Shift::Left => -1,
            Shift::Right => 1,
        }
    }
}

/// Notifications for collaborators (audio, score display).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoardEvent {
    /// The active piece was written into the grid.
    PieceLocked,
    /// A sweep removed at least one row.
    RowsCleared { rows: u32, points: u64 },
    /// A new piece spawned into occupied cells; grid and score were reset.
    Overflow,
}

/// The falling piece. `x`/`y` locate the top-left corner of its shape box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivePiece {
    kind: PieceKind,
    x: i32,
    y: i32,
    shape: Shape,
}

impl ActivePiece {
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Grid coordinates and value of every block of the piece.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.shape
            .blocks()
            .map(move |(x, y, v)| (self.x + x as i32, self.y + y as i32, v))
    }
}

pub struct BoardEngine {
    grid: Grid,
    piece: ActivePiece,
    score: u64,
    drop_counter: f64,
    drop_interval: f64,
    rng: PieceRng,
    events: Vec<BoardEvent>,
}

impl BoardEngine {
    /// Empty grid sized from the config, first piece already spawned.
    pub fn new(config: &GameConfig) -> Self {
        let config = config.clone().normalized();
        let grid = Grid::new(config.width, config.height);
        Self::with_grid(&config, grid)
    }

    /// Start on a pre-filled grid. The grid keeps its own dimensions.
    pub fn with_grid(config: &GameConfig, grid: Grid) -> Self {
        let seed = config
            .seed
            .or_else(rng::entropy_seed)
            .unwrap_or(FALLBACK_SEED);
        let drop_interval = config.clone().normalized().drop_interval_ms;
        let kind = PieceKind::O;
        let mut engine = Self {
            piece: ActivePiece {
                kind,
                x: 0,
                y: 0,
                shape: kind.shape(),
            },
            grid,
            score: 0,
            drop_counter: 0.0,
            drop_interval,
            rng: PieceRng::new(seed),
            events: Vec::new(),
        };
        debug!(
            "board {}x{} seed {} drop every {}ms",
            engine.grid.width(),
            engine.grid.height(),
            seed,
            drop_interval
        );
        engine.reset_piece();
        engine
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn piece(&self) -> &ActivePiece {
        &self.piece
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn drop_interval_ms(&self) -> f64 {
        self.drop_interval
    }

    /// Take every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Run one player command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveLeft => self.shift(Shift::Left),
            Command::MoveRight => self.shift(Shift::Right),
            Command::SoftDrop => self.drop_soft(),
            Command::RotateClockwise => self.rotate(Spin::Clockwise),
            Command::RotateCounterClockwise => self.rotate(Spin::CounterClockwise),
        }
    }

    /// Spawn a uniformly random piece.
    pub fn reset_piece(&mut self) {
        let kind = self.rng.next_kind();
        self.spawn(kind);
    }

    /// Spawn `kind` centered at the top. Spawning into occupied cells clears
    /// the board and the score.
    pub fn spawn(&mut self, kind: PieceKind) {
        let shape = kind.shape();
        let x = (self.grid.width() / 2) as i32 - (shape.size() / 2) as i32;
        self.piece = ActivePiece { kind, x, y: 0, shape };
        debug!("spawn {:?} at x={}", kind, x);
        if self.collides() {
            info!("spawn blocked, board reset (score was {})", self.score);
            self.grid.clear();
            self.score = 0;
            self.events.push(BoardEvent::Overflow);
        }
    }

    pub fn shift(&mut self, dir: Shift) {
        self.piece.x += dir.dx();
        if self.collides() {
            self.piece.x -= dir.dx();
        }
    }

    /// Rotate, then nudge sideways by +1, -2, +3, -4, ... (cumulative) until
    /// the piece fits. Gives up once the nudge would exceed the shape width
    /// and restores the original orientation and position.
    pub fn rotate(&mut self, spin: Spin) {
        let origin_x = self.piece.x;
        let width = self.piece.shape.size() as i32;
        let mut offset: i32 = 1;
        self.piece.shape.rotate(spin);
        while self.collides() {
            if offset.abs() > width {
                self.piece.shape.rotate(spin.reverse());
                self.piece.x = origin_x;
                return;
            }
            self.piece.x += offset;
            offset = -(offset + offset.signum());
        }
    }

    /// Move down one row; on contact lock the piece, sweep and spawn the next.
    /// Always restarts the gravity timer.
    pub fn drop_soft(&mut self) {
        self.piece.y += 1;
        if self.collides() {
            self.piece.y -= 1;
            self.merge();
            self.sweep_rows();
            self.reset_piece();
        }
        self.drop_counter = 0.0;
    }

    /// Advance the gravity timer by `delta_ms`; drops once the interval is
    /// exceeded.
    pub fn tick(&mut self, delta_ms: f64) {
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.drop_counter += delta_ms;
        }
        if self.drop_counter > self.drop_interval {
            self.drop_soft();
        }
    }

    /// Clear full rows and credit the score.
    pub fn sweep_rows(&mut self) -> Sweep {
        let sweep = self.grid.sweep();
        if sweep.rows > 0 {
            self.score = self.score.saturating_add(sweep.points);
            debug!("cleared {} rows for {} points", sweep.rows, sweep.points);
            self.events.push(BoardEvent::RowsCleared {
                rows: sweep.rows,
                points: sweep.points,
            });
        }
        sweep
    }

    /// Any block of the active piece outside the left/right/bottom edges or on
    /// an occupied cell. Blocks above the top edge are ignored.
    pub fn collides(&self) -> bool {
        self.piece.cells().any(|(x, y, _)| {
            if y < 0 {
                return false;
            }
            match self.grid.get(x, y) {
                Some(cell) => cell != EMPTY,
                None => true,
            }
        })
    }

    /// Write the active piece into the grid.
    pub fn merge(&mut self) {
        for (x, y, v) in self.piece.cells() {
            self.grid.set(x, y, v);
        }
        debug!(
            "locked {:?} at ({}, {})",
            self.piece.kind, self.piece.x, self.piece.y
        );
        self.events.push(BoardEvent::PieceLocked);
    }
}
