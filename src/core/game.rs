/// Core game interface for the flashcard terminal loop
use std::time::Duration;

use crossterm::event::KeyEvent;
use tokio::sync::mpsc::UnboundedSender;

/// Requests a game can make of the engine that drives it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCommand {
    /// Stop firing `on_tick` until resumed
    PauseTicks,
    /// Start firing `on_tick` again, beginning a fresh period
    ResumeTicks,
}

/// Handle passed into every game callback
pub struct Context {
    tx: UnboundedSender<EngineCommand>,
}

impl Context {
    pub fn new(tx: UnboundedSender<EngineCommand>) -> Self {
        Self { tx }
    }

    /// Queue a command for the engine. Dropped silently once the engine is gone.
    pub fn send(&self, cmd: EngineCommand) {
        let _ = self.tx.send(cmd);
    }
}

/// Main game trait driven by `Engine`
pub trait Game {
    /// Period between `on_tick` calls, or `None` for games without a clock
    fn tick_rate(&self) -> Option<Duration>;

    /// Heartbeat; `dt` is the elapsed time since the previous tick in milliseconds
    fn on_tick(&mut self, dt: u32, ctx: &Context);

    fn handle_input(&mut self, event: KeyEvent, ctx: &Context);

    /// Render the current state into the Ratatui frame
    fn render(&self, frame: &mut ratatui::Frame);
}
