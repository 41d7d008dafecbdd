/// All game entity types — pure data, no logic.

use std::collections::VecDeque;

/// Column drift of a bullet, fixed when it is fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    /// Drifts one column left per tick.
    Left,
    Straight,
    /// Drifts one column right per tick.
    Right,
}

/// A player command polled from the input port once per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveLeftShoot,
    Shoot,
    MoveRightShoot,
    MoveRight,
    /// Any other key — ignored during play, restarts from the summary.
    Any,
}

/// Where the session currently is in its
/// Active → GameOverAnim → Summary → (reset) → Active cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Normal play; the full update pipeline runs.
    Active,
    /// The outward explosion wipe across the bottom rows.
    /// `left` and `right` both start at the losing enemy's column.
    GameOverAnim { left: i32, right: i32, frames: u32 },
    /// Score/level/max-score screen, waiting for a restart key.
    Summary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub row: i32,
    pub col: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bullet {
    pub row: i32,
    pub col: i32,
    pub heading: Heading,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Explosion {
    pub row: i32,
    pub col: i32,
    /// Remaining ticks to display; starts at 3 × EXPL_TIME.
    pub timer: i32,
}

/// Enemy spawn pacing state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spawner {
    /// Ticks between spawns; shrinks as levels pass.
    pub interval: u32,
    /// Ticks since the last spawn.
    pub elapsed: u32,
    /// Spawns since the interval was last reduced.
    pub since_reduction: u32,
    /// Column of the most recent spawn — new columns stay within a
    /// margin of this so enemies remain reachable.
    pub last_col: i32,
}

/// The entire session state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Player's column, clamped to [1, width-2]; its row is implicit
    /// (the bottom two screen rows).
    pub player_col: i32,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    /// Most-recent first; expired explosions are trimmed from the back.
    pub explosions: VecDeque<Explosion>,
    pub spawner: Spawner,
    pub score: u32,
    pub level: u32,
    /// High-water score across resets within this process.
    pub max_score: u32,
    /// Ticks the LEVEL UP banner remains visible.
    pub lu_frames: u32,
    /// Coarse counter; enemies descend when it wraps at ENEMY_FRAMES.
    pub enemy_frames: u32,
    pub phase: Phase,
    pub width: u16,
    pub height: u16,
}
