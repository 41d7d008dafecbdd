use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use invader::compute::{apply_command, init_state, reset, tick};
use invader::display;
use invader::entities::{Command, Phase};

/// Fixed frame budget — 10 ms per simulation tick.
const FRAME: Duration = Duration::from_millis(10);

/// Minimum time the summary screen stays up before a key restarts.
const SUMMARY_MIN_WAIT: Duration = Duration::from_secs(2);

// ── Input port ────────────────────────────────────────────────────────────────

enum Input {
    Quit,
    Key(Command),
    None,
}

fn map_key(code: KeyCode) -> Command {
    match code {
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Command::MoveLeft,
        KeyCode::Char('y') | KeyCode::Char('Y') => Command::MoveLeftShoot,
        KeyCode::Char('u') | KeyCode::Char('U') => Command::Shoot,
        KeyCode::Char('i') | KeyCode::Char('I') => Command::MoveRightShoot,
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Command::MoveRight,
        _ => Command::Any,
    }
}

/// Drain all pending key events (non-blocking).  No keypress is a valid
/// no-op; when several arrived within one frame the latest wins.
fn poll_input(rx: &mpsc::Receiver<Event>) -> Input {
    let mut latest = Input::None;
    while let Ok(Event::Key(KeyEvent { code, kind, modifiers, .. })) = rx.try_recv() {
        if kind == KeyEventKind::Release {
            continue;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Input::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Input::Quit;
            }
            _ => latest = Input::Key(map_key(code)),
        }
    }
    latest
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn game_loop<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let (width, height) = terminal::size()?;
    let mut state = init_state(width, height);

    // Set when the summary screen first appears; cleared on reset.
    let mut summary_since: Option<Instant> = None;

    loop {
        let frame_start = Instant::now();

        let input = poll_input(rx);
        match state.phase {
            Phase::Active => {
                if let Input::Key(cmd) = input {
                    state = apply_command(&state, cmd);
                }
            }
            // Input is ignored while the wipe plays out
            Phase::GameOverAnim { .. } => {}
            Phase::Summary => {
                let since = *summary_since.get_or_insert_with(Instant::now);
                if matches!(input, Input::Key(_)) && since.elapsed() >= SUMMARY_MIN_WAIT {
                    state = reset(&state);
                    summary_since = None;
                }
            }
        }
        if matches!(input, Input::Quit) {
            return Ok(());
        }

        state = tick(&state, &mut rng);

        let show_hint = summary_since
            .map_or(false, |since| since.elapsed() >= SUMMARY_MIN_WAIT);
        display::render(out, &state, show_hint)?;

        // Sleep off the rest of the frame budget
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
