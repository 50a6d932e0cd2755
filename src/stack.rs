/* RPN-keypad (c) 2025 Nathaniel Clark
 *
 * This source code is subject to the terms of the GPL v2. See LICENCE file.
 */

use crate::error::CalcError;
use std::collections::VecDeque;

/// Stack snapshots kept for undo, newest at the front.
///
/// Unbounded unless a limit is given, in which case the oldest snapshot
/// is dropped once the limit is exceeded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UndoHistory {
    snapshots: VecDeque<Vec<f64>>,
    limit: Option<usize>,
}

impl UndoHistory {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            snapshots: VecDeque::new(),
            limit,
        }
    }

    pub fn snapshot(&mut self, values: &[f64]) {
        if self.limit == Some(0) {
            return;
        }
        self.snapshots.push_front(values.to_vec());
        if let Some(limit) = self.limit {
            self.snapshots.truncate(limit);
        }
    }

    pub fn restore_last(&mut self) -> Option<Vec<f64>> {
        self.snapshots.pop_front()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

/// Ordered stack of doubles; the top is the last element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberStack {
    values: Vec<f64>,
    history: UndoHistory,
}

impl NumberStack {
    pub fn new(undo_limit: Option<usize>) -> Self {
        Self {
            values: vec![],
            history: UndoHistory::new(undo_limit),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Fail with `Underflow` unless at least `depth` values are present
    pub fn require(&self, depth: usize) -> Result<(), CalcError> {
        if self.values.len() < depth {
            Err(CalcError::Underflow)
        } else {
            Ok(())
        }
    }

    pub fn push(&mut self, v: f64) {
        self.values.push(v);
    }

    pub fn pop(&mut self) -> Result<f64, CalcError> {
        self.values.pop().ok_or(CalcError::Underflow)
    }

    pub fn peek(&self) -> Result<f64, CalcError> {
        self.values.last().copied().ok_or(CalcError::Underflow)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Move the top value to the bottom of the stack
    pub fn rotate_top_to_bottom(&mut self) -> Result<(), CalcError> {
        let top = self.pop()?;
        self.values.insert(0, top);
        Ok(())
    }

    pub fn store_undo(&mut self) {
        log::trace!("undo snapshot of {} values", self.values.len());
        self.history.snapshot(&self.values);
    }

    /// Restore the most recent snapshot; returns false if there was none
    pub fn undo(&mut self) -> bool {
        match self.history.restore_last() {
            Some(values) => {
                self.values = values;
                true
            }
            None => false,
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Swap in a whole new set of values, forgetting the undo history
    pub fn replace(&mut self, values: Vec<f64>) {
        self.values = values;
        self.history.clear();
    }
}

/// Operator application on top of the stack.
///
/// `pending` is a value still waiting in the input buffer; it takes part
/// as the new top of stack. Depth is checked and the result computed
/// before the undo snapshot is taken, so a failed operation leaves the
/// stack untouched and a successful one is a single undo step.
pub trait StackOps {
    fn try_apply<F: FnOnce(&[f64]) -> Result<f64, CalcError>>(
        &mut self,
        arity: usize,
        pending: Option<f64>,
        f: F,
    ) -> Result<(), CalcError>;

    fn unary<F: FnOnce(f64) -> f64>(
        &mut self,
        pending: Option<f64>,
        f: F,
    ) -> Result<(), CalcError> {
        self.try_apply(1, pending, |v| Ok(f(v[0])))
    }

    // b was pushed last
    fn try_binary<F: FnOnce(f64, f64) -> Result<f64, CalcError>>(
        &mut self,
        pending: Option<f64>,
        f: F,
    ) -> Result<(), CalcError> {
        self.try_apply(2, pending, |v| f(v[0], v[1]))
    }
}

impl StackOps for NumberStack {
    fn try_apply<F: FnOnce(&[f64]) -> Result<f64, CalcError>>(
        &mut self,
        arity: usize,
        pending: Option<f64>,
        f: F,
    ) -> Result<(), CalcError> {
        let from_stack = arity.saturating_sub(usize::from(pending.is_some()));
        self.require(from_stack)?;
        let keep = self.values.len() - from_stack;
        let mut operands = self.values[keep..].to_vec();
        operands.extend(pending);
        let c = f(&operands)?;
        self.store_undo();
        self.values.truncate(keep);
        self.values.push(c);
        Ok(())
    }
}
