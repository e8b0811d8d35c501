//! JSON-lines event log.
//!
//! One line per [`GameEvent`], tagged with the session tick and the wall-clock
//! milliseconds since the game started. The record types here mirror the core
//! events but own the serialization format, so the core crates stay free of
//! serde.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::{GameEvent, GridPos, Item};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PosRecord {
    pub row: usize,
    pub col: usize,
}

impl From<GridPos> for PosRecord {
    fn from(p: GridPos) -> Self {
        Self {
            row: p.row,
            col: p.col,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemRecord {
    pub kind: &'static str,
    pub level: u8,
}

impl From<Item> for ItemRecord {
    fn from(item: Item) -> Self {
        Self {
            kind: item.kind().as_str(),
            level: item.level(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventRecord {
    Spawned {
        pos: PosRecord,
        item: ItemRecord,
        source: &'static str,
    },
    Moved {
        from: PosRecord,
        to: PosRecord,
        item: ItemRecord,
    },
    Merged {
        from: PosRecord,
        to: PosRecord,
        result: ItemRecord,
    },
    Submitted {
        from: PosRecord,
        item: ItemRecord,
        points: u64,
        total: u64,
    },
    DropRejected {
        from: PosRecord,
        to: PosRecord,
    },
    GoalReached {
        goal: u64,
        next_goal: u64,
        reward_level: u8,
        placed: Option<PosRecord>,
    },
    Won {
        score: u64,
    },
    Quit,
}

impl From<&GameEvent> for EventRecord {
    fn from(event: &GameEvent) -> Self {
        match *event {
            GameEvent::Spawned { pos, item, source } => EventRecord::Spawned {
                pos: pos.into(),
                item: item.into(),
                source: source.as_str(),
            },
            GameEvent::Moved { from, to, item } => EventRecord::Moved {
                from: from.into(),
                to: to.into(),
                item: item.into(),
            },
            GameEvent::Merged { from, to, result } => EventRecord::Merged {
                from: from.into(),
                to: to.into(),
                result: result.into(),
            },
            GameEvent::Submitted {
                from,
                item,
                points,
                total,
            } => EventRecord::Submitted {
                from: from.into(),
                item: item.into(),
                points,
                total,
            },
            GameEvent::DropRejected { from, to } => EventRecord::DropRejected {
                from: from.into(),
                to: to.into(),
            },
            GameEvent::GoalReached {
                goal,
                next_goal,
                reward_level,
                placed,
            } => EventRecord::GoalReached {
                goal,
                next_goal,
                reward_level,
                placed: placed.map(PosRecord::from),
            },
            GameEvent::Won { score } => EventRecord::Won { score },
            GameEvent::Quit => EventRecord::Quit,
        }
    }
}

/// A single log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub tick: u64,
    pub ts_ms: u64,
    #[serde(flatten)]
    pub event: EventRecord,
}

/// Append-only JSONL sink.
///
/// The first write error disables the log; the error is kept for the caller to
/// report once the terminal has been restored.
pub struct EventLog<W: Write = BufWriter<File>> {
    out: Option<W>,
    buf: Vec<u8>,
    error: Option<io::Error>,
}

impl EventLog<BufWriter<File>> {
    pub fn open(path: &str) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open event log {path}"))?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn from_writer(out: W) -> Self {
        Self {
            out: Some(out),
            buf: Vec::with_capacity(256),
            error: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn record(&mut self, event: &GameEvent, tick: u64, ts_ms: u64) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        let rec = LogRecord {
            tick,
            ts_ms,
            event: event.into(),
        };
        self.buf.clear();
        if let Err(e) = serde_json::to_writer(&mut self.buf, &rec) {
            self.fail(e.into());
            return;
        }
        self.buf.push(b'\n');
        if let Err(e) = out.write_all(&self.buf) {
            self.fail(e);
        }
    }

    pub fn flush(&mut self) {
        if let Some(out) = self.out.as_mut() {
            if let Err(e) = out.flush() {
                self.fail(e);
            }
        }
    }

    /// The error that disabled the log, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> Option<W> {
        self.out
    }

    fn fail(&mut self, e: io::Error) {
        self.out = None;
        self.error.get_or_insert(e);
    }
}
