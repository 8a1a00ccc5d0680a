/// Flash card arithmetic drill
pub mod combinations;
pub mod config;
pub mod drill;
pub mod error;
pub mod game;
pub mod question;
pub mod renderer;

pub use config::{DrillConfig, HistoryPolicy};
pub use drill::{Answered, AskedCombination, Drawn, Drill, RoundOver, Tick, Verdict};
pub use error::DrillError;
pub use game::{Dialog, FlashCardGame};
pub use question::{Operator, Question};

use crate::core::engine::Engine;
use crate::games::GameInfo;
use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::DefaultTerminal;
use tracing::info;

pub const INFO: GameInfo = GameInfo {
    id: "flashcard",
    name: "Flash Card Game",
    description: "Answer as many arithmetic flash cards as you can in 60 seconds",
};

/// Game runner for the flash card drill. A seed makes the question order reproducible.
pub async fn run_game(terminal: &mut DefaultTerminal, config: DrillConfig, seed: Option<u64>) -> Result<()> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let game = FlashCardGame::new(config, rng);
    let engine = Engine::new(game);
    let finished = engine.run(terminal).await?;
    info!(
        asked = finished.drill().list_asked_combinations().len(),
        score = finished.drill().score(),
        "session finished"
    );
    Ok(())
}
