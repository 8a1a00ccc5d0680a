use std::fmt;

/// The four arithmetic operators, in their stable index order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div];

    pub fn index(self) -> usize {
        match self {
            Operator::Add => 0,
            Operator::Sub => 1,
            Operator::Mul => 2,
            Operator::Div => 3,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Question {
    pub num1: u8,
    pub num2: u8,
    pub operator: Operator,
}

impl Question {
    pub fn new(num1: u8, num2: u8, operator: Operator) -> Self {
        Self { num1, num2, operator }
    }

    /// The expected answer. Division with a zero on either side counts as 0.
    pub fn evaluate(&self) -> f64 {
        let (a, b) = (self.num1 as i32, self.num2 as i32);
        match self.operator {
            Operator::Add => (a + b) as f64,
            Operator::Sub => (a - b) as f64,
            Operator::Mul => (a * b) as f64,
            Operator::Div => {
                if a == 0 || b == 0 {
                    0.0
                } else {
                    a as f64 / b as f64
                }
            }
        }
    }
}

/// Renders as the prompt shown to the player, e.g. `3 + 4 = `
impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} = ", self.num1, self.operator, self.num2)
    }
}

/// Whole numbers print without a fraction; anything else is rounded half-up to one decimal.
pub fn format_answer(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", (value * 10.0).round() / 10.0)
    }
}
