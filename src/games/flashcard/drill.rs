use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::combinations::CombinationSet;
use super::config::{DrillConfig, HistoryPolicy};
use super::error::DrillError;
use super::question::{format_answer, Operator, Question};

/// A question freshly put in front of the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawn {
    pub question: Question,
    /// Every combination had been asked, so the set was cleared before drawing
    pub exhausted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Correct,
    Incorrect { expected: f64 },
}

impl Verdict {
    pub fn message(&self) -> String {
        match self {
            Verdict::Correct => "Correct!".to_string(),
            Verdict::Incorrect { expected } => {
                format!("Incorrect. The correct answer is {}", format_answer(*expected))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Answered {
    pub verdict: Verdict,
    pub next: Drawn,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundOver {
    pub final_score: i32,
    /// First question of the round that started right after
    pub next: Drawn,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// No round has been started yet
    Idle,
    Counted { seconds_remaining: u32 },
    RoundOver(RoundOver),
}

/// One entry of the question history, numbered from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AskedCombination {
    pub index: usize,
    pub num1: u8,
    pub operator: char,
    pub num2: u8,
}

impl std::fmt::Display for AskedCombination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Combination {}: {} {} {}", self.index, self.num1, self.operator, self.num2)
    }
}

/// The drill game state: score, clock, asked combinations and history.
pub struct Drill {
    config: DrillConfig,
    rng: StdRng,
    score: i32,
    seconds_remaining: u32,
    running: bool,
    current: Option<Question>,
    combinations: CombinationSet,
    history: Vec<Question>,
}

impl Drill {
    /// A drill that has not started yet. Call `start_round` to begin.
    pub fn new(config: DrillConfig, rng: StdRng) -> Self {
        let combinations = CombinationSet::new(config.operand_max);
        Self {
            seconds_remaining: config.round_secs,
            config,
            rng,
            score: 0,
            running: false,
            current: None,
            combinations,
            history: Vec::new(),
        }
    }

    pub fn with_seed(config: DrillConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    pub fn config(&self) -> &DrillConfig {
        &self.config
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current_question(&self) -> Option<Question> {
        self.current
    }

    pub fn all_combinations_shown(&self) -> bool {
        self.combinations.is_full()
    }

    pub fn start_round(&mut self) -> Drawn {
        self.score = 0;
        self.seconds_remaining = self.config.round_secs;
        self.running = true;
        self.combinations.clear();
        if self.config.history == HistoryPolicy::PerRound {
            self.history.clear();
        }
        info!(round_secs = self.config.round_secs, "round started");
        self.next_question()
    }

    pub fn next_question(&mut self) -> Drawn {
        let exhausted = self.combinations.is_full();
        if exhausted {
            info!(asked = self.combinations.len(), "all combinations shown, starting over");
            self.combinations.clear();
        }

        // Terminates: the set is not full at this point.
        let question = loop {
            let candidate = self.draw();
            if !self.combinations.contains(&candidate) {
                break candidate;
            }
        };
        self.present(question);
        Drawn { question, exhausted }
    }

    fn draw(&mut self) -> Question {
        let max = self.config.operand_max;
        let num1 = self.rng.random_range(0..=max);
        let num2 = self.rng.random_range(0..=max);
        let operator = Operator::ALL[self.rng.random_range(0..Operator::ALL.len())];
        Question::new(num1, num2, operator)
    }

    /// Puts `question` in front of the player: marks it, logs it and makes it current.
    pub(crate) fn present(&mut self, question: Question) {
        self.combinations.insert(&question);
        self.history.push(question);
        self.current = Some(question);
        debug!(%question, asked = self.history.len(), "question asked");
    }

    pub fn advance_time(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }
        if self.seconds_remaining > 0 {
            self.seconds_remaining -= 1;
            Tick::Counted {
                seconds_remaining: self.seconds_remaining,
            }
        } else {
            Tick::RoundOver(self.end_round())
        }
    }

    pub fn submit_answer(&mut self, raw: &str) -> Result<Answered, DrillError> {
        let question = self.current.ok_or(DrillError::NoActiveQuestion)?;
        let invalid = || DrillError::InvalidInput {
            input: raw.to_string(),
        };
        // `inf` and `NaN` parse as f64 but do not count as answers
        let answer: f64 = raw.trim().parse().map_err(|_| invalid())?;
        if !answer.is_finite() {
            return Err(invalid());
        }

        let expected = question.evaluate();
        let verdict = if (answer - expected).abs() <= self.config.answer_tolerance {
            self.score += 1;
            Verdict::Correct
        } else {
            self.score -= 1;
            Verdict::Incorrect { expected }
        };
        debug!(%question, answer, ?verdict, score = self.score, "answer graded");

        let next = self.next_question();
        Ok(Answered { verdict, next })
    }

    pub fn end_round(&mut self) -> RoundOver {
        self.running = false;
        let final_score = self.score;
        info!(final_score, asked = self.history.len(), "round over");
        let next = self.start_round();
        RoundOver { final_score, next }
    }

    /// Player-requested restart; reports the score so far like a timed-out round.
    pub fn restart(&mut self) -> RoundOver {
        self.end_round()
    }

    pub fn list_asked_combinations(&self) -> Vec<AskedCombination> {
        self.history
            .iter()
            .enumerate()
            .map(|(i, q)| AskedCombination {
                index: i + 1,
                num1: q.num1,
                operator: q.operator.symbol(),
                num2: q.num2,
            })
            .collect()
    }
}
