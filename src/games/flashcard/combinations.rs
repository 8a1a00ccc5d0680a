use super::question::{Operator, Question};

/// Which `(num1, num2, operator)` triples have been asked this round.
///
/// A flat flag table indexed by `(num1 * operands + num2) * 4 + operator`,
/// where `operands` is the size of the operand range (13 for 0..=12).
#[derive(Debug, Clone)]
pub struct CombinationSet {
    operands: usize,
    shown: Vec<bool>,
    marked: usize,
}

impl CombinationSet {
    pub fn new(operand_max: u8) -> Self {
        let operands = operand_max as usize + 1;
        Self {
            operands,
            shown: vec![false; operands * operands * Operator::ALL.len()],
            marked: 0,
        }
    }

    /// `None` when an operand falls outside the range this set was built for.
    fn slot(&self, q: &Question) -> Option<usize> {
        let (a, b) = (q.num1 as usize, q.num2 as usize);
        if a >= self.operands || b >= self.operands {
            return None;
        }
        Some((a * self.operands + b) * Operator::ALL.len() + q.operator.index())
    }

    pub fn contains(&self, q: &Question) -> bool {
        self.slot(q).is_some_and(|slot| self.shown[slot])
    }

    /// Marks `q`; returns false if it was already marked or is out of range.
    pub fn insert(&mut self, q: &Question) -> bool {
        let Some(slot) = self.slot(q) else {
            return false;
        };
        if self.shown[slot] {
            return false;
        }
        self.shown[slot] = true;
        self.marked += 1;
        true
    }

    pub fn is_full(&self) -> bool {
        self.marked == self.shown.len()
    }

    pub fn clear(&mut self) {
        self.shown.fill(false);
        self.marked = 0;
    }

    pub fn len(&self) -> usize {
        self.marked
    }
}
