//! JSON-lines game event log.
//!
//! One `serde_json` record per line. The binary enables it by pointing
//! `BLOCKFALL_LOG_PATH` at a file; records are appended, never truncated.

use std::fs::{File, OpenOptions};
use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::GameEngine;
use crate::types::{CoreLastEvent, Status};

/// A single game event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    Start {
        episode_id: u32,
        seed: u32,
        width: u16,
        height: u16,
    },
    Lock {
        episode_id: u32,
        lines_cleared: u32,
        line_clear_score: u32,
        score: u32,
        tick_interval_ms: u32,
    },
    LineClear {
        episode_id: u32,
        lines_cleared: u32,
        line_clear_score: u32,
        score: u32,
        tick_interval_ms: u32,
    },
    Pause {
        episode_id: u32,
    },
    Resume {
        episode_id: u32,
    },
    GameOver {
        episode_id: u32,
        score: u32,
        top_score: u32,
        lines: u32,
    },
    Restart {
        episode_id: u32,
        top_score: u32,
    },
}

#[derive(Serialize)]
struct Record<'a> {
    seq: u64,
    #[serde(flatten)]
    event: &'a GameEvent,
}

/// Appends [`GameEvent`]s to a writer, one JSON object per line.
///
/// The first write failure disables the log; gameplay never stops for it.
pub struct EventLog<W: Write = File> {
    out: Option<W>,
    seq: u64,
    buf: Vec<u8>,
}

impl EventLog<File> {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &str) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("event log: open {} failed", path))?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> EventLog<W> {
    pub fn from_writer(out: W) -> Self {
        Self {
            out: Some(out),
            seq: 0,
            buf: Vec::with_capacity(256),
        }
    }

    /// A log that drops every record.
    pub fn disabled() -> Self {
        Self {
            out: None,
            seq: 0,
            buf: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Records written so far.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn record(&mut self, event: &GameEvent) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.buf.clear();
        let record = Record {
            seq: self.seq,
            event,
        };
        if serde_json::to_writer(&mut self.buf, &record).is_err() {
            return;
        }
        self.buf.push(b'\n');

        if out.write_all(&self.buf).and_then(|_| out.flush()).is_err() {
            self.out = None;
            return;
        }
        self.seq += 1;
    }

    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}

/// Turns engine state changes into [`GameEvent`]s.
///
/// Call [`EventObserver::observe`] after every command or tick; it drains the
/// engine's last event and compares status and episode against the previous
/// observation.
#[derive(Debug, Clone)]
pub struct EventObserver {
    status: Status,
    episode_id: u32,
}

impl EventObserver {
    /// Start observing `engine` created from `seed`, returning the observer
    /// and its start event.
    pub fn start(engine: &GameEngine, seed: u32) -> (Self, GameEvent) {
        let observer = Self {
            status: engine.status(),
            episode_id: engine.episode_id(),
        };
        let event = GameEvent::Start {
            episode_id: engine.episode_id(),
            seed,
            width: engine.grid().width(),
            height: engine.grid().height(),
        };
        (observer, event)
    }

    pub fn observe(&mut self, engine: &mut GameEngine, mut emit: impl FnMut(GameEvent)) {
        let episode_id = engine.episode_id();
        let status = engine.status();

        if episode_id != self.episode_id {
            emit(GameEvent::Restart {
                episode_id,
                top_score: engine.top_score(),
            });
            self.episode_id = episode_id;
            self.status = status;
            // Anything recorded before the restart belongs to the old episode.
            engine.take_last_event();
            return;
        }

        if let Some(ev) = engine.take_last_event() {
            if let Some(event) = lock_event(episode_id, engine.score(), ev) {
                emit(event);
            }
        }

        if status != self.status {
            match (self.status, status) {
                (_, Status::GameOver) => emit(GameEvent::GameOver {
                    episode_id,
                    score: engine.score(),
                    top_score: engine.top_score(),
                    lines: engine.lines(),
                }),
                (Status::Running, Status::Paused) => emit(GameEvent::Pause { episode_id }),
                (Status::Paused, Status::Running) => emit(GameEvent::Resume { episode_id }),
                _ => {}
            }
            self.status = status;
        }
    }
}

fn lock_event(episode_id: u32, score: u32, ev: CoreLastEvent) -> Option<GameEvent> {
    if ev.locked {
        Some(GameEvent::Lock {
            episode_id,
            lines_cleared: ev.lines_cleared,
            line_clear_score: ev.line_clear_score,
            score,
            tick_interval_ms: ev.tick_interval_ms,
        })
    } else if ev.lines_cleared > 0 {
        Some(GameEvent::LineClear {
            episode_id,
            lines_cleared: ev.lines_cleared,
            line_clear_score: ev.line_clear_score,
            score,
            tick_interval_ms: ev.tick_interval_ms,
        })
    } else {
        None
    }
}
