/// Pure simulation functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG, so tests
/// can drive the whole simulation deterministically with a seeded RNG.

use std::collections::VecDeque;

use rand::Rng;

use crate::entities::{
    Bullet, Command, Enemy, Explosion, GameState, Heading, Phase, Spawner,
};

// ── Tuning constants ─────────────────────────────────────────────────────────

/// Ticks between enemy descent steps — enemies crawl at 1/20th of the
/// bullet rate.
pub const ENEMY_FRAMES: u32 = 20;

/// Initial ticks between enemy spawns.
pub const INITIAL_INTERVAL: u32 = 400;

/// Spawns before the interval shrinks and the level goes up.
pub const REDUCTION_ENEMIES: u32 = 12;

/// New interval = old interval × REDUCTION_PERCENT / 100 (integer floor).
pub const REDUCTION_PERCENT: u32 = 60;

/// Rows a bullet climbs per tick.
pub const BULLET_SPEED: i32 = 1;

/// Columns the player shifts per move step.
pub const PLAYER_SPEED: i32 = 1;

/// Explosion phase length; a fresh explosion lives 3 × this many ticks.
pub const EXPL_TIME: i32 = 5;

/// Ticks between wipe cursor steps during the game-over animation.
pub const GO_TIME: u32 = 1;

/// Ticks the LEVEL UP banner stays on screen.
pub const LU_BLINK_FRAMES: u32 = 200;

/// Loosens the spawn correlation margin.  Larger values allow quirkier
/// spawn columns while still keeping them reachable.
pub const SPAWN_MARGIN_MULTIPLIER: i32 = 3;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial session state for the given grid dimensions.
pub fn init_state(width: u16, height: u16) -> GameState {
    GameState {
        player_col: (width as i32 / 2).clamp(1, width as i32 - 2),
        enemies: Vec::new(),
        bullets: Vec::new(),
        explosions: VecDeque::new(),
        spawner: Spawner {
            interval: INITIAL_INTERVAL,
            elapsed: 0,
            since_reduction: 0,
            last_col: width as i32 / 2,
        },
        score: 0,
        level: 1,
        max_score: 0,
        lu_frames: 0,
        enemy_frames: 0,
        phase: Phase::Active,
        width,
        height,
    }
}

/// Fresh session on the same grid — only `max_score` survives.
pub fn reset(state: &GameState) -> GameState {
    GameState {
        max_score: state.max_score,
        ..init_state(state.width, state.height)
    }
}

// ── Input-driven state transitions (pure) ────────────────────────────────────

/// Apply one polled command.  Move-only keys step twice as far as
/// move-and-shoot keys; fired bullets start just above the player.
/// Ignored outside the Active phase.
pub fn apply_command(state: &GameState, cmd: Command) -> GameState {
    if state.phase != Phase::Active {
        return state.clone();
    }
    let mut s = state.clone();
    match cmd {
        Command::MoveLeft => s.player_col -= PLAYER_SPEED * 2,
        Command::MoveRight => s.player_col += PLAYER_SPEED * 2,
        Command::MoveLeftShoot => {
            s.player_col -= PLAYER_SPEED;
            fire(&mut s, Heading::Left);
        }
        Command::Shoot => fire(&mut s, Heading::Straight),
        Command::MoveRightShoot => {
            s.player_col += PLAYER_SPEED;
            fire(&mut s, Heading::Right);
        }
        Command::Any => {}
    }
    s.player_col = s.player_col.clamp(1, s.width as i32 - 2);
    s
}

fn fire(s: &mut GameState, heading: Heading) {
    let col = s.player_col.clamp(1, s.width as i32 - 2);
    s.bullets.push(Bullet {
        row: s.height as i32 - 3,
        col,
        heading,
    });
}

// ── Per-tick update (nearly pure — RNG is injected) ──────────────────────────

/// Advance the session by one fixed tick.
///
/// In the Active phase the pipeline order is fixed: bullets (with
/// collision resolution), then enemies, then the spawn scheduler, then
/// banner/explosion countdowns.  During the game-over wipe only the
/// animator and explosion decay run; the summary screen only decays
/// leftover explosions.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut s = state.clone();
    match s.phase {
        Phase::Active => {
            advance_bullets(&mut s);
            advance_enemies(&mut s);
            run_spawner(&mut s, rng);
            s.lu_frames = s.lu_frames.saturating_sub(1);
        }
        Phase::GameOverAnim { .. } => advance_wipe(&mut s),
        Phase::Summary => {}
    }
    decay_explosions(&mut s.explosions);
    s
}

// ── Collision detection ──────────────────────────────────────────────────────

/// Index of the first enemy whose 2-cell hitbox covers `(row, col)`.
/// The hitbox spans the enemy's own column and the one to its left,
/// matching the 2-glyph sprite.  The pool is unordered, so the tie-break
/// among simultaneous candidates is arbitrary.
pub fn enemy_hit(enemies: &[Enemy], row: i32, col: i32) -> Option<usize> {
    enemies
        .iter()
        .position(|e| e.row == row && (col == e.col || col == e.col - 1))
}

fn in_grid(row: i32, col: i32, width: u16, height: u16) -> bool {
    row >= 0 && row < height as i32 && col >= 0 && col < width as i32
}

// ── Pipeline stages ──────────────────────────────────────────────────────────

fn drift(heading: Heading) -> i32 {
    match heading {
        Heading::Left => -1,
        Heading::Straight => 0,
        Heading::Right => 1,
    }
}

/// Move every bullet one step and resolve it against the enemy pool.
/// Leaving the grid destroys the bullet with no score and no explosion;
/// a hit destroys exactly one enemy (first match), scores one point and
/// leaves an explosion at the bullet's position.
fn advance_bullets(s: &mut GameState) {
    let mut i = 0;
    while i < s.bullets.len() {
        s.bullets[i].row -= BULLET_SPEED;
        s.bullets[i].col += PLAYER_SPEED * drift(s.bullets[i].heading);
        let Bullet { row, col, .. } = s.bullets[i];

        if !in_grid(row, col, s.width, s.height) {
            s.bullets.swap_remove(i);
            continue;
        }
        if let Some(e) = enemy_hit(&s.enemies, row, col) {
            s.enemies.swap_remove(e);
            s.score += 1;
            push_explosion(&mut s.explosions, row, col);
            s.bullets.swap_remove(i);
            continue;
        }
        i += 1;
    }
}

/// Descend enemies one row every `ENEMY_FRAMES` ticks.  An enemy
/// reaching the bottom border is the loss trigger: its column seeds the
/// wipe and the remaining enemies are left untouched for this tick.
fn advance_enemies(s: &mut GameState) {
    s.enemy_frames += 1;
    if s.enemy_frames < ENEMY_FRAMES {
        return;
    }
    s.enemy_frames = 0;

    let bottom = s.height as i32 - 2;
    let mut i = 0;
    while i < s.enemies.len() {
        s.enemies[i].row += 1;
        let Enemy { row, col } = s.enemies[i];

        if row >= bottom {
            s.max_score = s.max_score.max(s.score);
            s.phase = Phase::GameOverAnim {
                left: col,
                right: col,
                frames: 0,
            };
            return;
        }
        if row < 0 || col < 0 || col >= s.width as i32 {
            s.enemies.swap_remove(i);
            continue;
        }
        i += 1;
    }
}

/// Timed spawn with spatially-correlated column choice and the
/// level-up/interval-reduction bookkeeping.
fn run_spawner(s: &mut GameState, rng: &mut impl Rng) {
    s.spawner.elapsed += 1;
    if s.spawner.elapsed < s.spawner.interval {
        return;
    }
    s.spawner.elapsed = 0;

    let width = s.width as i32;
    // Margin must stay ≥ 1 or the rejection loop below could never accept
    // a column once the interval shrinks toward zero.
    let margin =
        (PLAYER_SPEED * s.spawner.interval as i32 * SPAWN_MARGIN_MULTIPLIER).max(1);
    let mut col = rng.gen_range(0..width);
    while (col - s.spawner.last_col).abs() > margin {
        col = rng.gen_range(0..width);
    }

    s.enemies.push(Enemy { row: 0, col });
    s.spawner.last_col = col;

    s.spawner.since_reduction += 1;
    if s.spawner.since_reduction >= REDUCTION_ENEMIES {
        s.spawner.since_reduction = 0;
        s.level += 1;
        s.lu_frames = LU_BLINK_FRAMES;
        s.spawner.interval = s.spawner.interval * REDUCTION_PERCENT / 100;
    }
}

// ── Game-over wipe ───────────────────────────────────────────────────────────

/// Step the two wipe cursors outward every `GO_TIME` ticks, dropping
/// explosions along the bottom border (and on the player's body where a
/// cursor crosses it).  The phase flips to Summary only once *both*
/// cursors have left the grid — the sides exit at different times unless
/// the losing column was dead centre.
fn advance_wipe(s: &mut GameState) {
    let Phase::GameOverAnim {
        mut left,
        mut right,
        mut frames,
    } = s.phase
    else {
        return;
    };

    frames += 1;
    if frames >= GO_TIME {
        frames = 0;
        let width = s.width as i32;
        let border = s.height as i32 - 2;

        right += 1;
        if right < width {
            push_explosion(&mut s.explosions, border, right);
        }
        if right >= s.player_col - 1 && right <= s.player_col + 1 {
            push_explosion(&mut s.explosions, border + 1, right);
        }

        left -= 1;
        if left >= 0 {
            push_explosion(&mut s.explosions, border, left);
        }
        if left >= s.player_col - 1 && left <= s.player_col + 1 {
            push_explosion(&mut s.explosions, border + 1, left);
        }

        if right >= width && left < 0 {
            s.phase = Phase::Summary;
            return;
        }
    }
    s.phase = Phase::GameOverAnim { left, right, frames };
}

// ── Explosions ───────────────────────────────────────────────────────────────

fn push_explosion(explosions: &mut VecDeque<Explosion>, row: i32, col: i32) {
    explosions.push_front(Explosion {
        row,
        col,
        timer: EXPL_TIME * 3,
    });
}

/// Count every explosion down one tick and drop the expired ones.
/// Newest live at the front, so everything expired sits at the back.
fn decay_explosions(explosions: &mut VecDeque<Explosion>) {
    for e in explosions.iter_mut() {
        e.timer -= 1;
    }
    while explosions.back().is_some_and(|e| e.timer <= 0) {
        explosions.pop_back();
    }
}
