//! Terminal runner (default binary).
//!
//! This is the primary gameplay entrypoint.
//! It uses crossterm for keyboard and mouse input and the framebuffer-based
//! renderer from the term crate. Moving the mouse over the top view steers
//! the falling piece to that column.
//!
//! Logging goes to the file named by `BEYOND_TETRIS_LOG_PATH` (filter from
//! `RUST_LOG`); without it logging is off, because stderr would tear the
//! alternate screen.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind, MouseEventKind};

use beyond_tetris::core::{GameConfig, GameSnapshot, GameState};
use beyond_tetris::input::{handle_key_event, move_direction, should_quit, InputHandler};
use beyond_tetris::term::{FrameBuffer, GameView, TerminalRenderer, TopDownCamera, Viewport};
use beyond_tetris::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    init_logging()?;

    let config = GameConfig::from_env();
    log::info!(
        "starting {}x{}x{} field, seed {}",
        config.num_levels,
        config.num_rows,
        config.num_cols,
        config.seed
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("BEYOND_TETRIS_LOG_PATH") else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("creating log file {path}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: GameConfig) -> Result<()> {
    let mut game_state = GameState::new(config);

    let view = GameView::default();
    let mut input_handler = InputHandler::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut mouse: Option<(u16, u16)> = None;

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        game_state.snapshot_into(&mut snap);
        view.render_into(&snap, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }

                        if let Some(action) = input_handler.handle_key_press(key.code) {
                            game_state.apply_action(action);
                        }

                        // Moves come from the DAS/ARR handler above.
                        if move_direction(key.code).is_none() {
                            if let Some(action) = handle_key_event(key) {
                                if action == GameAction::Restart {
                                    input_handler.reset();
                                }
                                game_state.apply_action(action);
                            }
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Ignore terminal auto-repeat; DAS/ARR handles repeats internally.
                    }
                    KeyEventKind::Release => {
                        input_handler.handle_key_release(key.code);
                    }
                },
                Event::Mouse(m) => match m.kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
                        mouse = Some((m.column, m.row));
                    }
                    _ => {}
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            for action in input_handler.update(TICK_MS) {
                game_state.apply_action(action);
            }
            game_state.set_drop_multiplier(input_handler.drop_multiplier());

            // Only a fresh mouse event steers; a resting mouse leaves key moves alone.
            let pointer = mouse.take().and_then(|(column, row)| {
                let rect = view.layout(&snap, viewport).top;
                TopDownCamera::new(game_state.config(), rect).pointer(column, row)
            });
            game_state.set_pointer(pointer);

            game_state.tick(TICK_MS);
        }
    }
}
