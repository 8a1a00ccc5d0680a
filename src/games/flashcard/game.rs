use std::collections::VecDeque;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use tracing::warn;

use super::config::DrillConfig;
use super::drill::{AskedCombination, Drill, RoundOver, Tick};
use super::error::DrillError;
use super::renderer;
use crate::core::game::{Context, EngineCommand, Game};

const EXHAUSTED: &str = "All combinations shown. Restarting the game.";

/// A modal message waiting to be acknowledged with Enter
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    Message { title: &'static str, text: String },
    RoundOver { final_score: i32 },
    Combinations { entries: Vec<AskedCombination>, scroll: u16 },
}

/// Terminal front end for a `Drill`: answer field, dialogs and key bindings
pub struct FlashCardGame {
    drill: Drill,
    input: String,
    dialogs: VecDeque<Dialog>,
}

impl FlashCardGame {
    /// Starts the first round straight away.
    pub fn new(config: DrillConfig, rng: StdRng) -> Self {
        let mut drill = Drill::new(config, rng);
        drill.start_round();
        Self {
            drill,
            input: String::new(),
            dialogs: VecDeque::new(),
        }
    }

    pub fn drill(&self) -> &Drill {
        &self.drill
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialogs.front()
    }

    fn message(&mut self, title: &'static str, text: String) {
        self.dialogs.push_back(Dialog::Message { title, text });
    }

    fn round_over(&mut self, over: RoundOver, ctx: &Context) {
        // The clock stays stopped until the player acknowledges the result.
        ctx.send(EngineCommand::PauseTicks);
        self.input.clear();
        self.dialogs.push_back(Dialog::RoundOver {
            final_score: over.final_score,
        });
    }

    fn submit(&mut self, ctx: &Context) {
        match self.drill.submit_answer(&self.input) {
            Ok(answered) => {
                self.input.clear();
                self.message("Answer", answered.verdict.message());
                if answered.next.exhausted {
                    self.message("Flash Card Game", EXHAUSTED.to_string());
                }
            }
            Err(err @ DrillError::InvalidInput { .. }) => {
                self.message("Invalid input", err.to_string());
            }
            Err(DrillError::NoActiveQuestion) => {
                warn!("answer submitted with no active question, starting a round");
                self.drill.start_round();
                ctx.send(EngineCommand::ResumeTicks);
            }
        }
    }

    fn handle_dialog_key(&mut self, code: KeyCode, ctx: &Context) {
        if code == KeyCode::Enter {
            if let Some(Dialog::RoundOver { .. }) = self.dialogs.pop_front() {
                ctx.send(EngineCommand::ResumeTicks);
            }
            return;
        }
        if let Some(Dialog::Combinations { entries, scroll }) = self.dialogs.front_mut() {
            let max = max_scroll(entries);
            *scroll = match code {
                KeyCode::Up => scroll.saturating_sub(1),
                KeyCode::Down => scroll.saturating_add(1).min(max),
                KeyCode::PageUp => scroll.saturating_sub(10),
                KeyCode::PageDown => scroll.saturating_add(10).min(max),
                _ => *scroll,
            };
        }
    }
}

fn max_scroll(entries: &[AskedCombination]) -> u16 {
    entries.len().saturating_sub(1).min(u16::MAX as usize) as u16
}

impl Game for FlashCardGame {
    fn tick_rate(&self) -> Option<Duration> {
        Some(self.drill.config().tick)
    }

    fn on_tick(&mut self, _dt: u32, ctx: &Context) {
        if let Tick::RoundOver(over) = self.drill.advance_time() {
            self.round_over(over, ctx);
        }
    }

    fn handle_input(&mut self, event: KeyEvent, ctx: &Context) {
        if !self.dialogs.is_empty() {
            self.handle_dialog_key(event.code, ctx);
            return;
        }

        if event.modifiers.contains(KeyModifiers::CONTROL) {
            match event.code {
                KeyCode::Char('r') => {
                    let over = self.drill.restart();
                    self.round_over(over, ctx);
                }
                KeyCode::Char('l') => {
                    let entries = self.drill.list_asked_combinations();
                    self.dialogs.push_back(Dialog::Combinations { entries, scroll: 0 });
                }
                _ => {}
            }
            return;
        }

        match event.code {
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => self.submit(ctx),
            _ => {}
        }
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        renderer::render(frame, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::flashcard::question::{Operator, Question};
    use rand::SeedableRng;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    fn setup() -> (FlashCardGame, Context, UnboundedReceiver<EngineCommand>) {
        let game = FlashCardGame::new(DrillConfig::default(), StdRng::seed_from_u64(42));
        let (tx, rx) = unbounded_channel();
        (game, Context::new(tx), rx)
    }

    fn press(game: &mut FlashCardGame, ctx: &Context, code: KeyCode) {
        game.handle_input(KeyEvent::new(code, KeyModifiers::NONE), ctx);
    }

    fn ctrl(game: &mut FlashCardGame, ctx: &Context, c: char) {
        game.handle_input(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL), ctx);
    }

    fn type_text(game: &mut FlashCardGame, ctx: &Context, text: &str) {
        for c in text.chars() {
            press(game, ctx, KeyCode::Char(c));
        }
    }

    fn screen(game: &FlashCardGame) -> String {
        let mut terminal = Terminal::new(TestBackend::new(72, 24)).unwrap();
        terminal.draw(|f| game.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn typing_and_correct_answer() {
        let (mut game, ctx, _rx) = setup();
        game.drill.present(Question::new(3, 4, Operator::Add));
        type_text(&mut game, &ctx, "77");
        press(&mut game, &ctx, KeyCode::Backspace);
        assert_eq!(game.input(), "7");
        press(&mut game, &ctx, KeyCode::Enter);

        assert_eq!(game.drill().score(), 1);
        assert_eq!(game.input(), "");
        assert_eq!(
            game.dialog(),
            Some(&Dialog::Message { title: "Answer", text: "Correct!".to_string() })
        );
        press(&mut game, &ctx, KeyCode::Enter);
        assert_eq!(game.dialog(), None);
    }

    #[test]
    fn exhaustion_notice_queues_after_verdict() {
        let (mut game, ctx, _rx) = setup();
        for _ in 1..676 {
            assert!(!game.drill.next_question().exhausted);
        }
        assert!(game.drill().all_combinations_shown());

        let answer = game.drill().current_question().unwrap().evaluate().to_string();
        type_text(&mut game, &ctx, &answer);
        press(&mut game, &ctx, KeyCode::Enter);
        assert_eq!(
            game.dialog(),
            Some(&Dialog::Message { title: "Answer", text: "Correct!".to_string() })
        );

        press(&mut game, &ctx, KeyCode::Enter);
        assert_eq!(
            game.dialog(),
            Some(&Dialog::Message { title: "Flash Card Game", text: EXHAUSTED.to_string() })
        );
        assert!(screen(&game).contains(EXHAUSTED));

        press(&mut game, &ctx, KeyCode::Enter);
        assert_eq!(game.dialog(), None);
        assert!(!game.drill().all_combinations_shown());
    }

    #[test]
    fn invalid_input_keeps_text_and_score() {
        let (mut game, ctx, _rx) = setup();
        let question = game.drill().current_question();
        type_text(&mut game, &ctx, "abc");
        press(&mut game, &ctx, KeyCode::Enter);
        assert_eq!(game.input(), "abc");
        assert_eq!(game.drill().score(), 0);
        assert_eq!(game.drill().current_question(), question);
        assert!(matches!(game.dialog(), Some(Dialog::Message { title: "Invalid input", .. })));
    }

    #[test]
    fn keys_go_to_dialog_while_open() {
        let (mut game, ctx, _rx) = setup();
        type_text(&mut game, &ctx, "x");
        press(&mut game, &ctx, KeyCode::Enter);
        type_text(&mut game, &ctx, "12");
        assert_eq!(game.input(), "x");
    }

    #[test]
    fn round_over_pauses_clock_until_dismissed() {
        let (mut game, ctx, mut rx) = setup();
        for _ in 0..=60 {
            game.on_tick(1000, &ctx);
        }
        assert_eq!(game.dialog(), Some(&Dialog::RoundOver { final_score: 0 }));
        assert_eq!(rx.try_recv(), Ok(EngineCommand::PauseTicks));
        assert_eq!(game.drill().seconds_remaining(), 60);

        press(&mut game, &ctx, KeyCode::Enter);
        assert_eq!(rx.try_recv(), Ok(EngineCommand::ResumeTicks));
        assert_eq!(game.dialog(), None);
    }

    #[test]
    fn ctrl_r_restarts_with_score_report() {
        let (mut game, ctx, mut rx) = setup();
        game.drill.present(Question::new(2, 5, Operator::Mul));
        type_text(&mut game, &ctx, "10");
        press(&mut game, &ctx, KeyCode::Enter);
        press(&mut game, &ctx, KeyCode::Enter);
        ctrl(&mut game, &ctx, 'r');
        assert_eq!(game.dialog(), Some(&Dialog::RoundOver { final_score: 1 }));
        assert_eq!(rx.try_recv(), Ok(EngineCommand::PauseTicks));
        assert_eq!(game.drill().score(), 0);
    }

    #[test]
    fn ctrl_l_lists_and_scrolls() {
        let (mut game, ctx, _rx) = setup();
        game.drill.present(Question::new(1, 1, Operator::Sub));
        ctrl(&mut game, &ctx, 'l');
        press(&mut game, &ctx, KeyCode::Down);
        press(&mut game, &ctx, KeyCode::Down);
        let Some(Dialog::Combinations { entries, scroll }) = game.dialog() else {
            panic!("expected the combinations dialog");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(*scroll, 1);

        let text = screen(&game);
        assert!(text.contains("All Stored Questions (2 combinations)"));
        assert!(text.contains("Combination 2: 1 - 1"));
    }

    #[test]
    fn screen_shows_clock_score_and_question() {
        let (mut game, ctx, _rx) = setup();
        game.drill.present(Question::new(9, 3, Operator::Div));
        type_text(&mut game, &ctx, "3");
        let text = screen(&game);
        assert!(text.contains("Time Left: 60"));
        assert!(text.contains("Score: 0"));
        assert!(text.contains("9 / 3 ="));
        assert!(text.contains("> 3"));
    }

    #[test]
    fn incorrect_dialog_is_rendered() {
        let (mut game, ctx, _rx) = setup();
        game.drill.present(Question::new(6, 4, Operator::Div));
        type_text(&mut game, &ctx, "2");
        press(&mut game, &ctx, KeyCode::Enter);
        assert!(screen(&game).contains("Incorrect. The correct answer is 1.5"));
    }
}
