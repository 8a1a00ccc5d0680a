use crate::core::game::{Context, EngineCommand, Game};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::{debug, info};

const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, PartialEq)]
enum Wake {
    Command(EngineCommand),
    Tick,
    Frame,
}

/// Commands come first, so a pause queued by input wins over a tick that is already due.
async fn wait(
    outbox_rx: &mut UnboundedReceiver<EngineCommand>,
    interval: &mut Interval,
    ticking: bool,
) -> Wake {
    tokio::select! {
        biased;

        Some(cmd) = outbox_rx.recv() => Wake::Command(cmd),
        _ = interval.tick(), if ticking => Wake::Tick,
        _ = tokio::time::sleep(FRAME) => Wake::Frame,
    }
}

pub struct Engine<G: Game> {
    game: G,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G) -> Self {
        Self { game }
    }

    /// Runs until Esc is pressed. Hands the game back.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> Result<G> {
        let (outbox_tx, mut outbox_rx) = tokio::sync::mpsc::unbounded_channel::<EngineCommand>();
        let ctx = Context::new(outbox_tx);

        // Games without a clock still need the loop to wake for input, so the
        // interval exists either way and is simply never polled for them.
        let tick_rate = self.game.tick_rate();
        let period = tick_rate.unwrap_or(FRAME);
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut ticking = tick_rate.is_some();
        let mut last_tick = Instant::now();

        info!(?tick_rate, "engine started");

        loop {
            terminal.draw(|f| self.game.render(f))?;

            // INPUT (non-blocking)
            if event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if key.code == KeyCode::Esc {
                            break;
                        }
                        self.game.handle_input(key, &ctx);
                    }
                }
            }

            match wait(&mut outbox_rx, &mut interval, ticking).await {
                Wake::Command(cmd) => {
                    debug!(?cmd, "engine command");
                    match cmd {
                        EngineCommand::PauseTicks => ticking = false,
                        EngineCommand::ResumeTicks => {
                            ticking = tick_rate.is_some();
                            interval.reset();
                            last_tick = Instant::now();
                        }
                    }
                }
                Wake::Tick => {
                    let dt = last_tick.elapsed().as_millis() as u32;
                    last_tick = Instant::now();
                    self.game.on_tick(dt, &ctx);
                }
                Wake::Frame => {}
            }
        }

        info!("engine stopped");
        Ok(self.game)
    }
}
