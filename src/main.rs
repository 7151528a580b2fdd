//! Terminal blockfall runner.
//!
//! Uses crossterm for input and a framebuffer-based renderer. The loop polls
//! for key presses until the next tick deadline, applies them in order, then
//! ticks the engine and re-reads its interval.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::config::AppConfig;
use blockfall::core::{GameEngine, GameSnapshot};
use blockfall::event_log::{EventLog, EventObserver};
use blockfall::input::{handle_key_event, should_quit, ActionQueue};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() {
    if let Err(err) = start() {
        eprintln!("blockfall: {:#}", err);
        std::process::exit(1);
    }
}

fn start() -> Result<()> {
    let config = AppConfig::from_env();
    let engine = GameEngine::new(config.engine, config.seed)?;

    let mut log = match config.log_path.as_deref() {
        Some(path) => EventLog::open(path)?,
        None => EventLog::disabled(),
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, engine, config.seed, &mut log);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(
    term: &mut TerminalRenderer,
    mut engine: GameEngine,
    seed: u32,
    log: &mut EventLog,
) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut queue = ActionQueue::new();

    let (mut observer, start) = EventObserver::start(&engine, seed);
    log.record(&start);

    let mut next_tick = Instant::now() + interval_of(&engine);
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            engine.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw(&fb)?;
            dirty = false;
        }

        // Paused and GameOver wait for input only.
        let timeout = if engine.status().is_running() {
            next_tick.saturating_duration_since(Instant::now())
        } else {
            Duration::from_millis(250)
        };

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        queue.push(action);
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        let was_running = engine.status().is_running();
        for action in queue.drain() {
            dirty |= engine.apply_action(action);
            observer.observe(&mut engine, |e| log.record(&e));
        }

        if !engine.status().is_running() {
            continue;
        }
        if !was_running {
            // Resumed or restarted: a full interval before the first tick.
            next_tick = Instant::now() + interval_of(&engine);
            continue;
        }

        if Instant::now() >= next_tick {
            engine.tick();
            observer.observe(&mut engine, |e| log.record(&e));
            next_tick = Instant::now() + interval_of(&engine);
            dirty = true;
        }
    }
}

fn interval_of(engine: &GameEngine) -> Duration {
    Duration::from_millis(u64::from(engine.tick_interval_ms()))
}
