use std::time::Duration;

/// What happens to the question history when a new round starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryPolicy {
    /// Keep every question asked since the program started
    #[default]
    Session,
    /// Forget the history whenever a round (re)starts
    PerRound,
}

#[derive(Debug, Clone)]
pub struct DrillConfig {
    pub round_secs: u32,
    /// Operands are drawn from `0..=operand_max`
    pub operand_max: u8,
    pub tick: Duration,
    /// Largest accepted distance between an answer and the expected value.
    /// Zero means exact equality.
    pub answer_tolerance: f64,
    pub history: HistoryPolicy,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            round_secs: 60,
            operand_max: 12,
            tick: Duration::from_secs(1),
            answer_tolerance: 0.0,
            history: HistoryPolicy::Session,
        }
    }
}
