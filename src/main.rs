//! Terminal demo runner (default binary).
//!
//! Drives the engine the way an embedding application would: crossterm
//! key events feed the timing controller, a ~60 Hz loop advances frames,
//! and each frame's snapshot is dumped as plain rows. This is a debug
//! surface - the product renderer lives outside this repository and
//! consumes the same snapshots.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tetrion::core::{PlayfieldEngine, Snapshot};
use tetrion::input::{action_for, is_quit, InputTimingController};

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    terminal::enable_raw_mode()?;
    let result = run();
    // Always restore the terminal, even on error.
    let _ = terminal::disable_raw_mode();
    result
}

fn run() -> Result<()> {
    let mut engine = PlayfieldEngine::new(1);
    let mut controller = InputTimingController::new();
    info!("tetrion demo runner started");

    let mut last_frame = Instant::now();
    loop {
        let timeout = FRAME
            .checked_sub(last_frame.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Press => {
                        if is_quit(key) {
                            return Ok(());
                        }
                        if let Some(action) = action_for(key.code) {
                            let was_paused = engine.paused();
                            controller.key_down(&mut engine, action);
                            // Leaving pause re-anchors the clock so the
                            // paused span is not misread as frame time.
                            if was_paused && !engine.paused() {
                                last_frame = Instant::now();
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        // DAS/ARR owns repeats; OS key-repeat is ignored.
                    }
                    KeyEventKind::Release => {
                        if let Some(action) = action_for(key.code) {
                            controller.key_up(action);
                        }
                    }
                }
            }
        }

        if last_frame.elapsed() >= FRAME {
            let dt = last_frame.elapsed();
            last_frame = Instant::now();
            controller.frame(&mut engine, dt.as_secs_f64() * 1000.0);
            draw(&engine.snapshot())?;
        }
    }
}

fn draw(snapshot: &Snapshot) -> Result<()> {
    let mut out = io::stdout().lock();
    write!(out, "\x1b[H\x1b[2J")?;
    write!(
        out,
        "score {:>8}  level {:>2}  lines {:>4}  next {}  hold {}\r\n",
        snapshot.score,
        snapshot.level,
        snapshot.lines,
        snapshot.next.as_char(),
        snapshot.held.map_or('-', |kind| kind.as_char()),
    )?;
    for row in &snapshot.grid {
        write!(out, "|")?;
        for &cell in row {
            let glyph = match cell {
                c if c > 0 => "[]",
                c if c < 0 => "::",
                _ => "  ",
            };
            write!(out, "{glyph}")?;
        }
        write!(out, "|\r\n")?;
    }
    write!(out, "+{}+\r\n", "--".repeat(snapshot.grid[0].len()))?;
    if snapshot.game_over {
        write!(out, "game over - press r to restart, q to quit\r\n")?;
    }
    out.flush()?;
    Ok(())
}
