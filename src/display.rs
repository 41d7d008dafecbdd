/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game state.  No game logic is performed; this module only translates
/// state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print, SetAttribute},
    terminal, QueueableCommand,
};

use crate::compute::EXPL_TIME;
use crate::entities::{Explosion, GameState, Heading, Phase};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::Blue;
const C_ENEMY: Color = Color::Red;
const C_BULLET: Color = Color::Green;
const C_EXPLOSION: Color = Color::Yellow;
const C_LINE: Color = Color::Cyan;
const C_HUD: Color = Color::Yellow;

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.  `show_restart_hint` is set by the driver
/// once the summary screen's minimum wait has elapsed.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    show_restart_hint: bool,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(SetAttribute(Attribute::Bold))?;

    draw_border(out, state)?;
    draw_player(out, state)?;

    out.queue(style::SetForegroundColor(C_BULLET))?;
    for bullet in &state.bullets {
        let glyph = match bullet.heading {
            Heading::Left => '\\',
            Heading::Straight => '|',
            Heading::Right => '/',
        };
        put(out, state, bullet.row, bullet.col, glyph)?;
    }

    out.queue(style::SetForegroundColor(C_ENEMY))?;
    for enemy in &state.enemies {
        put(out, state, enemy.row, enemy.col - 1, '\\')?;
        put(out, state, enemy.row, enemy.col, '/')?;
    }

    out.queue(style::SetForegroundColor(C_EXPLOSION))?;
    for explosion in &state.explosions {
        draw_explosion(out, state, explosion)?;
    }

    draw_level_up(out, state)?;
    draw_hud(out, state)?;

    if state.phase == Phase::Summary {
        draw_summary(out, state, show_restart_hint)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(cursor::MoveTo(0, state.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Bounds-checked glyph write ────────────────────────────────────────────────

fn put<W: Write>(
    out: &mut W,
    state: &GameState,
    row: i32,
    col: i32,
    glyph: char,
) -> std::io::Result<()> {
    if row < 0 || col < 0 || row >= state.height as i32 || col >= state.width as i32 {
        return Ok(());
    }
    out.queue(cursor::MoveTo(col as u16, row as u16))?;
    out.queue(Print(glyph))?;
    Ok(())
}

// ── Field furniture ───────────────────────────────────────────────────────────

/// The ground line the enemies must not reach, at row height-2.
fn draw_border<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_LINE))?;
    out.queue(cursor::MoveTo(0, state.height.saturating_sub(2)))?;
    out.queue(Print("─".repeat(state.width as usize)))?;
    Ok(())
}

fn draw_player<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    // Hull on the last row, mast poking through the border line:
    //    |      ← row h-2
    //   /|\     ← row h-1
    let col = state.player_col;
    let h = state.height as i32;
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    put(out, state, h - 1, col - 1, '/')?;
    put(out, state, h - 1, col, '|')?;
    put(out, state, h - 1, col + 1, '\\')?;
    put(out, state, h - 2, col, '|')?;
    Ok(())
}

// ── Explosions ────────────────────────────────────────────────────────────────

/// Narrow explosion: a `*` core for the first phase, then an expanding
/// ring of rays in the surrounding 3×3 cells.
fn draw_explosion<W: Write>(
    out: &mut W,
    state: &GameState,
    explosion: &Explosion,
) -> std::io::Result<()> {
    let Explosion { row, col, timer } = *explosion;
    if timer >= EXPL_TIME {
        put(out, state, row, col, '*')?;
    }
    if timer < 2 * EXPL_TIME {
        for p in (col - 1)..=(col + 1) {
            for q in (row - 1)..=(row + 1) {
                if p == col && q == row {
                    continue;
                }
                let glyph = if p == col {
                    '|'
                } else if q == row {
                    '-'
                } else if p - col == q - row {
                    '\\'
                } else {
                    '/'
                };
                put(out, state, q, p, glyph)?;
            }
        }
    }
    Ok(())
}

// ── HUD & banners ─────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!("SCORE: {} LEVEL: {}", state.score, state.level)))?;
    Ok(())
}

fn draw_level_up<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    if state.lu_frames == 0 {
        return Ok(());
    }
    let msg = "LEVEL UP";
    let cx = (state.width / 2).saturating_sub(msg.len() as u16 / 2);
    out.queue(cursor::MoveTo(cx, state.height / 2))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(msg))?;
    Ok(())
}

// ── Summary screen ────────────────────────────────────────────────────────────

fn draw_summary<W: Write>(
    out: &mut W,
    state: &GameState,
    show_restart_hint: bool,
) -> std::io::Result<()> {
    let score_line = format!("SCORE: {}", state.score);
    let level_line = format!("LEVEL: {}", state.level);
    let max_line = format!("MAX SCORE: {}", state.max_score);
    let mut lines: Vec<(&str, Color)> = vec![
        ("GAME OVER", Color::Red),
        (&score_line, Color::White),
        (&level_line, Color::White),
        (&max_line, C_HUD),
    ];
    if show_restart_hint {
        lines.push(("PRESS ANY KEY TO REPEAT", Color::DarkGrey));
    }

    let cx = state.width / 2;
    let start_row = (state.height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}
