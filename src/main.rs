//! Maze Snake entry point
//!
//! Loads settings, sets up the terminal and runs the game loop:
//! drain input events, run fixed simulation ticks, draw.

use std::io;
use std::thread::sleep;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use maze_snake::Settings;
use maze_snake::consts::MAX_SUBSTEPS;
use maze_snake::sim::{Direction, GameState, TickInput, tick};
use maze_snake::term::{self, TermRenderer};
use maze_snake::ui::ButtonAction;

/// Longest wall-clock gap fed to the accumulator (after a stall or suspend)
const MAX_FRAME_GAP: Duration = Duration::from_millis(100);

fn main() -> io::Result<()> {
    env_logger::init();
    log::info!("Maze Snake starting...");

    let settings = Settings::load();
    if !std::path::Path::new(Settings::STORAGE_FILE).exists() {
        if let Err(err) = settings.save() {
            log::warn!("Could not write default settings: {}", err);
        }
    }

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Seed: {}", seed);
    let mut state = GameState::new(settings.sim_config(), seed);

    let mut renderer = TermRenderer::new();
    renderer.check_size(state.config.tile_count)?;
    renderer.setup()?;

    // Dropping the renderer restores the terminal on every early return or panic
    let result = run(&mut state, &mut renderer, settings.frame_duration());

    renderer.restore()?;
    log::info!("Final score: {}", state.score);
    result
}

/// Cooperative loop: input, fixed ticks, render, sleep
fn run(state: &mut GameState, renderer: &mut TermRenderer, frame: Duration) -> io::Result<()> {
    let mut input = TickInput::default();
    let mut accumulator = Duration::ZERO;
    let mut last_time = Instant::now();

    loop {
        if read_input(state, &mut input)? {
            return Ok(());
        }

        let now = Instant::now();
        accumulator += (now - last_time).min(MAX_FRAME_GAP);
        last_time = now;

        let mut substeps = 0;
        while accumulator >= frame && substeps < MAX_SUBSTEPS {
            tick(state, &input);
            accumulator -= frame;
            substeps += 1;

            // Intents apply once
            input = TickInput::default();
        }

        renderer.render(&state.snapshot())?;
        sleep(frame.saturating_sub(accumulator));
    }
}

/// Fold pending terminal events into `input`. Returns true on quit.
fn read_input(state: &GameState, input: &mut TickInput) -> io::Result<bool> {
    while event::poll(Duration::ZERO)? {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if is_quit(&key) {
                    return Ok(true);
                }
                match key.code {
                    KeyCode::Up | KeyCode::Char('w') => input.direction = Some(Direction::Up),
                    KeyCode::Down | KeyCode::Char('s') => input.direction = Some(Direction::Down),
                    KeyCode::Left | KeyCode::Char('a') => input.direction = Some(Direction::Left),
                    KeyCode::Right | KeyCode::Char('d') => {
                        input.direction = Some(Direction::Right)
                    }
                    KeyCode::Char(' ') | KeyCode::Esc => input.pause = !input.pause,
                    KeyCode::Char('r') => input.restart = true,
                    _ => {}
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => match term::hit_test(&state.snapshot(), column, row) {
                Some(ButtonAction::Pause) => input.pause = !input.pause,
                Some(ButtonAction::Restart) => input.restart = true,
                None => {}
            },
            _ => {}
        }
    }
    Ok(false)
}

fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
