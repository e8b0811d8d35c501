//! Terminal merge game runner (default binary).
//!
//! It uses crossterm for mouse/key input and the framebuffer-based renderer
//! from `tui_merge::term`.

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{self, Event};

use tui_merge::config::GameConfig;
use tui_merge::core::{FixedTimestep, GameSnapshot, Session};
use tui_merge::event_log::EventLog;
use tui_merge::input::PointerMapper;
use tui_merge::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_merge::types::TICK_MS;

fn main() -> Result<()> {
    let mut config = GameConfig::from_env()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    config.apply_args(&args)?;

    let mut log = match config.log_path.as_deref() {
        Some(path) => Some(EventLog::open(path)?),
        None => None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, log.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(log) = log.as_mut() {
        log.flush();
        if let Some(e) = log.take_error() {
            eprintln!("event log disabled: {e}");
        }
    }

    let score = result?;
    println!("Final score: {score}");
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    config: &GameConfig,
    mut log: Option<&mut EventLog>,
) -> Result<u64> {
    let mut session = Session::new(config.seed);

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let started = Instant::now();
    let mut last_frame = Instant::now();
    let mut timestep = FixedTimestep::from_millis(TICK_MS);

    while session.running() {
        let viewport = term.viewport().unwrap_or(Viewport::new(80, 24));
        let (ox, oy) = view.origin(viewport);
        let mapper = PointerMapper::new(ox, oy);

        // Render.
        session.snapshot_into(&mut snap);
        view.render_into(&snap, viewport, &mut fb);
        term.draw_swap(&mut fb, view.frame_rect(viewport))?;

        // Input with timeout until next tick.
        let timeout = timestep
            .until_next()
            .saturating_sub(last_frame.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Resize(..) => term.invalidate(),
                ev => {
                    if let Some(input) = mapper.map_event(&ev) {
                        session.handle_event(input);
                    }
                }
            }
        }

        // Tick, catching up on any time the frame overran.
        let now = Instant::now();
        for _ in 0..timestep.advance(now - last_frame) {
            session.tick(TICK_MS);
        }
        last_frame = now;

        let tick = session.tick_count();
        let ts_ms = started.elapsed().as_millis() as u64;
        for event in session.drain_events() {
            if let Some(log) = log.as_deref_mut() {
                log.record(&event, tick, ts_ms);
            }
        }
    }

    Ok(session.score())
}
