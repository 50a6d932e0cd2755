/* RPN-keypad (c) 2025 Nathaniel Clark
 *
 * This source code is subject to the terms of the GPL v2. See LICENCE file.
 */

use crate::{
    error::CalcError,
    input::InputBuffer,
    layout::{CalculatorButton, Key},
    numbers::{convert_angle, AngleUnit, NumberFormat},
    ops::StackOp,
    record::Record,
    stack::{NumberStack, StackOps},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum number of undo snapshots, `None` for no limit
    pub undo_limit: Option<usize>,
    /// Enter performs Undo while inverse mode is on
    pub inverse_enter_undoes: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            undo_limit: None,
            inverse_enter_undoes: true,
        }
    }
}

/// The calculator state machine.
///
/// All mutation goes through [`CalculatorEngine::dispatch`]; a display
/// reads the getters after each event.
#[derive(Debug, Clone)]
pub struct CalculatorEngine {
    config: EngineConfig,
    stack: NumberStack,
    input: InputBuffer,
    inverse_mode: bool,
    angle_unit: AngleUnit,
    stored_value: f64,
    error_message: String,
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl CalculatorEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            stack: NumberStack::new(config.undo_limit),
            input: InputBuffer::default(),
            inverse_mode: false,
            angle_unit: AngleUnit::default(),
            stored_value: 0.0,
            error_message: String::new(),
        }
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn stack(&self) -> &[f64] {
        self.stack.values()
    }

    pub fn input(&self) -> &str {
        self.input.as_str()
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn inverse_mode(&self) -> bool {
        self.inverse_mode
    }

    pub fn angle_unit(&self) -> AngleUnit {
        self.angle_unit
    }

    pub fn stored_value(&self) -> f64 {
        self.stored_value
    }

    pub fn can_undo(&self) -> bool {
        self.stack.undo_depth() > 0
    }

    /// Handle one button press
    pub fn dispatch(&mut self, button: &CalculatorButton) {
        self.press(button.key)
    }

    pub fn press(&mut self, key: Key) {
        self.error_message.clear();
        log::debug!("key {key:?} input={:?} depth={}", self.input.as_str(), self.stack.len());
        if let Err(e) = self.apply(key) {
            log::debug!("{key:?} failed: {e}");
            self.error_message = e.to_string();
        }
    }

    fn apply(&mut self, key: Key) -> Result<(), CalcError> {
        match key {
            Key::Digit(c) => self.input.append_digit(c),
            Key::ToggleSign => {
                if !self.input.toggle_sign() {
                    self.stack.unary(None, |a| -a)?;
                }
            }
            Key::Constant(c) => self.input.append_str(c.text()),
            Key::Backspace => self.input.backspace(),
            Key::Enter => {
                if self.inverse_mode && self.config.inverse_enter_undoes {
                    self.stack.undo();
                } else {
                    self.commit()?;
                }
            }
            Key::Binary(op) => {
                let pending = self.input.value()?;
                self.stack.try_binary(pending, |a, b| op.apply(a, b))?;
                self.input.clear();
            }
            Key::Unary(op) => {
                let pending = self.input.value()?;
                let unit = self.angle_unit;
                self.stack.unary(pending, |a| op.apply(a, unit))?;
                self.input.clear();
            }
            Key::Stack(op) => self.stack_op(op)?,
            Key::Inverse => self.inverse_mode = !self.inverse_mode,
            Key::AngleUnit(unit) if !self.inverse_mode => self.angle_unit = unit,
            Key::AngleUnit(unit) => {
                let pending = self.input.value()?;
                let from = self.angle_unit;
                self.stack.unary(pending, |a| convert_angle(a, from, unit))?;
                self.input.clear();
            }
        }
        Ok(())
    }

    /// Push the input buffer onto the stack.
    ///
    /// An empty buffer is not an error. On a parse failure the buffer is
    /// kept so it can be corrected.
    fn commit(&mut self) -> Result<(), CalcError> {
        if let Some(v) = self.input.value()? {
            self.stack.store_undo();
            self.stack.push(v);
            self.input.clear();
        }
        Ok(())
    }

    fn stack_op(&mut self, op: StackOp) -> Result<(), CalcError> {
        let stack = &mut self.stack;
        match op {
            StackOp::Swap => {
                stack.require(2)?;
                stack.store_undo();
                let b = stack.pop()?;
                let a = stack.pop()?;
                stack.push(b);
                stack.push(a);
            }
            StackOp::Dup => {
                let a = stack.peek()?;
                stack.store_undo();
                stack.push(a);
            }
            StackOp::Drop => {
                stack.require(1)?;
                stack.store_undo();
                stack.pop()?;
            }
            StackOp::Clear => {
                stack.store_undo();
                stack.clear();
            }
            StackOp::Sto => {
                self.stored_value = match self.input.value()? {
                    Some(v) => {
                        stack.store_undo();
                        self.input.clear();
                        v
                    }
                    None => {
                        let v = stack.peek()?;
                        stack.store_undo();
                        v
                    }
                };
            }
            StackOp::Recall => {
                stack.store_undo();
                stack.push(self.stored_value);
            }
            StackOp::Roll => {
                stack.require(1)?;
                stack.store_undo();
                stack.rotate_top_to_bottom()?;
            }
            StackOp::Undo => {
                if !stack.undo() {
                    log::debug!("nothing to undo");
                }
            }
        }
        Ok(())
    }

    /// Top `rows` stack levels, highest level first, as `(level, text)`
    pub fn display_lines(&self, rows: usize, format: &NumberFormat) -> Vec<(usize, String)> {
        let values = self.stack.values();
        let start = values.len().saturating_sub(rows);
        values[start..]
            .iter()
            .enumerate()
            .map(|(i, v)| (values.len() - start - i, format.format(*v)))
            .collect()
    }

    pub fn serialize(&self) -> Record {
        Record {
            stack: self.stack.values().to_vec(),
            input: self.input.as_str().to_string(),
            error_message: self.error_message.clone(),
            inverse_mode: self.inverse_mode,
            angle_unit: self.angle_unit,
        }
    }

    /// Overwrite the persisted fields; undo history and memory start afresh
    pub fn restore(&mut self, record: Record) {
        self.stack.replace(record.stack);
        self.input = InputBuffer::new(record.input);
        self.error_message = record.error_message;
        self.inverse_mode = record.inverse_mode;
        self.angle_unit = record.angle_unit;
        self.stored_value = 0.0;
    }

    pub fn to_json(&self) -> Result<String, CalcError> {
        self.serialize().to_json()
    }

    /// Restore from JSON; on error the engine is left as it was
    pub fn from_json(&mut self, text: &str) -> Result<(), CalcError> {
        let record = Record::from_json(text).map_err(|e| {
            log::warn!("could not load calculator state: {e}");
            e
        })?;
        self.restore(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        layout::button_for_char,
        ops::{BinaryOp, Constant, UnaryOp},
    };

    fn engine_with(values: &[f64]) -> CalculatorEngine {
        let mut e = CalculatorEngine::default();
        e.stack.replace(values.to_vec());
        e
    }

    fn type_str(e: &mut CalculatorEngine, keys: &str) {
        for c in keys.chars() {
            e.dispatch(button_for_char(c).unwrap());
        }
    }

    const UNDERFLOW: &str = "Not enough values on the stack";

    #[test]
    fn fresh_engine() {
        let e = CalculatorEngine::default();
        assert!(e.stack().is_empty());
        assert_eq!(e.input(), "");
        assert_eq!(e.angle_unit(), AngleUnit::Degree);
        assert!(!e.inverse_mode());
        assert_eq!(e.stored_value(), 0.0);
        assert!(!e.can_undo());
    }

    #[test]
    fn enter_commits_input() {
        let mut e = CalculatorEngine::default();
        type_str(&mut e, "5.2\n");
        assert_eq!(e.stack(), &[5.2]);
        assert_eq!(e.input(), "");

        // nothing pending: no-op, no error
        e.press(Key::Enter);
        assert_eq!(e.stack(), &[5.2]);
        assert_eq!(e.error_message(), "");
    }

    #[test]
    fn bad_input_is_kept() {
        let mut e = CalculatorEngine::default();
        e.input = InputBuffer::new("1.2.3");
        e.press(Key::Enter);
        assert_eq!(e.error_message(), "Invalid number");
        assert_eq!(e.input(), "1.2.3");
        assert!(e.stack().is_empty());

        e.input = InputBuffer::new("1E999");
        e.press(Key::Binary(BinaryOp::Add));
        assert_eq!(e.error_message(), "Out of range");
        assert_eq!(e.input(), "1E999");
    }

    #[test]
    fn error_cleared_on_next_event() {
        let mut e = CalculatorEngine::default();
        e.press(Key::Stack(StackOp::Drop));
        assert_eq!(e.error_message(), UNDERFLOW);
        e.press(Key::Digit('1'));
        assert_eq!(e.error_message(), "");
    }

    #[test]
    fn binary_with_pending_input() {
        let mut e = engine_with(&[3.0]);
        type_str(&mut e, "4+");
        assert_eq!(e.stack(), &[7.0]);
        assert_eq!(e.input(), "");

        // one keypress, one undo step
        e.press(Key::Stack(StackOp::Undo));
        assert_eq!(e.stack(), &[3.0]);
    }

    #[test]
    fn binary_underflow_keeps_input() {
        let mut e = CalculatorEngine::default();
        type_str(&mut e, "4*");
        assert_eq!(e.error_message(), UNDERFLOW);
        assert_eq!(e.input(), "4");
        assert!(e.stack().is_empty());
    }

    #[test]
    fn division_by_zero_keeps_operands() {
        let mut e = engine_with(&[5.0, 0.0]);
        e.press(Key::Binary(BinaryOp::Div));
        assert_eq!(e.error_message(), "Division by zero");
        assert_eq!(e.stack(), &[5.0, 0.0]);
        assert!(!e.can_undo());
    }

    #[test]
    fn power() {
        let mut e = engine_with(&[2.0, 8.0]);
        e.press(Key::Binary(BinaryOp::Pow));
        assert_eq!(e.stack(), &[256.0]);
    }

    #[test]
    fn unary_in_units() {
        let mut e = engine_with(&[90.0]);
        e.press(Key::Unary(UnaryOp::Sin));
        assert!((e.stack()[0] - 1.0).abs() < 1e-12);

        let mut e = engine_with(&[0.0]);
        e.press(Key::AngleUnit(AngleUnit::Gradian));
        e.press(Key::Unary(UnaryOp::Acos));
        assert!((e.stack()[0] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn sqrt_of_negative_is_nan() {
        let mut e = engine_with(&[-4.0]);
        e.press(Key::Unary(UnaryOp::Sqrt));
        assert_eq!(e.error_message(), "");
        assert!(e.stack()[0].is_nan());
    }

    #[test]
    fn toggle_sign() {
        let mut e = CalculatorEngine::default();
        e.press(Key::ToggleSign);
        assert_eq!(e.error_message(), UNDERFLOW);

        type_str(&mut e, "12");
        e.press(Key::ToggleSign);
        assert_eq!(e.input(), "-12");
        e.press(Key::Enter);
        assert_eq!(e.stack(), &[-12.0]);

        e.press(Key::ToggleSign);
        assert_eq!(e.stack(), &[12.0]);
        e.press(Key::Stack(StackOp::Undo));
        assert_eq!(e.stack(), &[-12.0]);
    }

    #[test]
    fn constants_append() {
        let mut e = CalculatorEngine::default();
        e.press(Key::Constant(Constant::Pi));
        e.press(Key::Enter);
        assert_eq!(e.stack(), &[std::f64::consts::PI]);
        e.press(Key::Constant(Constant::E));
        e.press(Key::Unary(UnaryOp::Ln));
        assert!((e.stack()[1] - 1.0).abs() < 1e-15);
    }

    #[test]
    fn backspace() {
        let mut e = CalculatorEngine::default();
        type_str(&mut e, "123\x08");
        assert_eq!(e.input(), "12");
        e.press(Key::Backspace);
        e.press(Key::Backspace);
        e.press(Key::Backspace);
        assert_eq!(e.input(), "");
        assert_eq!(e.error_message(), "");
    }

    #[test]
    fn stack_operators() {
        let mut e = engine_with(&[1.0, 2.0, 3.0]);
        e.press(Key::Stack(StackOp::Swap));
        assert_eq!(e.stack(), &[1.0, 3.0, 2.0]);
        e.press(Key::Stack(StackOp::Dup));
        assert_eq!(e.stack(), &[1.0, 3.0, 2.0, 2.0]);
        e.press(Key::Stack(StackOp::Drop));
        assert_eq!(e.stack(), &[1.0, 3.0, 2.0]);
        e.press(Key::Stack(StackOp::Roll));
        assert_eq!(e.stack(), &[2.0, 1.0, 3.0]);
        e.press(Key::Stack(StackOp::Clear));
        assert!(e.stack().is_empty());
        assert_eq!(e.stack.undo_depth(), 5);
    }

    #[test]
    fn stack_operator_underflow() {
        let mut e = engine_with(&[1.0]);
        e.press(Key::Stack(StackOp::Swap));
        assert_eq!(e.error_message(), UNDERFLOW);
        assert_eq!(e.stack(), &[1.0]);

        let mut e = CalculatorEngine::default();
        for op in [StackOp::Dup, StackOp::Drop, StackOp::Roll, StackOp::Sto] {
            e.press(Key::Stack(op));
            assert_eq!(e.error_message(), UNDERFLOW, "{op}");
        }
        assert!(!e.can_undo());

        e.press(Key::Stack(StackOp::Clear));
        assert_eq!(e.error_message(), "");
    }

    #[test]
    fn store_and_recall() {
        let mut e = engine_with(&[7.0]);
        e.press(Key::Stack(StackOp::Sto));
        assert_eq!(e.stored_value(), 7.0);
        assert_eq!(e.stack(), &[7.0]);

        type_str(&mut e, "42");
        e.press(Key::Stack(StackOp::Sto));
        assert_eq!(e.stored_value(), 42.0);
        assert_eq!(e.stack(), &[7.0]);
        assert_eq!(e.input(), "");

        e.press(Key::Stack(StackOp::Recall));
        assert_eq!(e.stack(), &[7.0, 42.0]);

        let mut empty = CalculatorEngine::default();
        empty.press(Key::Stack(StackOp::Recall));
        assert_eq!(empty.stack(), &[0.0]);
    }

    #[test]
    fn store_with_bad_input_fails() {
        let mut e = engine_with(&[7.0]);
        e.input = InputBuffer::new("-");
        e.press(Key::Stack(StackOp::Sto));
        assert_eq!(e.error_message(), "Invalid number");
        assert_eq!(e.stored_value(), 0.0);
        assert_eq!(e.input(), "-");
    }

    #[test]
    fn undo_without_history() {
        let mut e = engine_with(&[1.0, 2.0, 3.0]);
        e.press(Key::Stack(StackOp::Undo));
        assert_eq!(e.stack(), &[1.0, 2.0, 3.0]);
        assert_eq!(e.error_message(), "");
    }

    #[test]
    fn inverse_selects_faces() {
        let mut e = CalculatorEngine::default();
        e.press(Key::Inverse);
        assert!(e.inverse_mode());
        e.press(Key::Inverse);
        assert!(!e.inverse_mode());
    }

    #[test]
    fn angle_unit_select_and_convert() {
        let mut e = engine_with(&[180.0]);
        e.press(Key::AngleUnit(AngleUnit::Radian));
        assert_eq!(e.angle_unit(), AngleUnit::Radian);
        assert_eq!(e.stack(), &[180.0]);

        e.press(Key::AngleUnit(AngleUnit::Degree));
        e.press(Key::Inverse);
        e.press(Key::AngleUnit(AngleUnit::Radian));
        assert!((e.stack()[0] - std::f64::consts::PI).abs() < 1e-12);
        assert_eq!(e.angle_unit(), AngleUnit::Degree);

        type_str(&mut e, "100");
        e.press(Key::AngleUnit(AngleUnit::Gradian));
        assert_eq!(e.stack().len(), 2);
        assert!((e.stack()[1] - 100.0 / 0.9).abs() < 1e-9);

        let mut empty = CalculatorEngine::default();
        empty.press(Key::Inverse);
        empty.press(Key::AngleUnit(AngleUnit::Radian));
        assert_eq!(empty.error_message(), UNDERFLOW);
    }

    #[test]
    fn inverse_enter_undoes() {
        let mut e = engine_with(&[1.0]);
        type_str(&mut e, "2\n");
        e.press(Key::Inverse);
        type_str(&mut e, "3");
        e.press(Key::Enter);
        assert_eq!(e.stack(), &[1.0]);
        assert_eq!(e.input(), "3");
    }

    #[test]
    fn inverse_enter_commits_when_disabled() {
        let mut e = CalculatorEngine::new(EngineConfig {
            inverse_enter_undoes: false,
            ..EngineConfig::default()
        });
        e.press(Key::Inverse);
        type_str(&mut e, "3\n");
        assert_eq!(e.stack(), &[3.0]);
    }

    #[test]
    fn display_lines() {
        let e = engine_with(&[1.0, 2.5, 1.0 / 3.0]);
        let f = NumberFormat::default();
        assert_eq!(
            e.display_lines(2, &f),
            vec![(2, "2.5".to_string()), (1, "0.333333333333".to_string())]
        );
        assert_eq!(e.display_lines(10, &f).len(), 3);
        assert_eq!(e.display_lines(10, &f)[0], (3, "1".to_string()));
    }

    #[test]
    fn restore_resets_history_and_memory() {
        let mut e = engine_with(&[4.0]);
        e.press(Key::Stack(StackOp::Sto));
        e.press(Key::Stack(StackOp::Dup));

        let record = Record {
            stack: vec![9.0],
            input: "12".to_string(),
            error_message: "Division by zero".to_string(),
            inverse_mode: true,
            angle_unit: AngleUnit::Radian,
        };
        e.restore(record.clone());
        assert_eq!(e.serialize(), record);
        assert_eq!(e.stored_value(), 0.0);
        assert!(!e.can_undo());
    }

    #[test]
    fn from_json_failure_keeps_state() {
        let mut e = engine_with(&[1.0]);
        let rv = e.from_json(r#"{"Stack":[2]}"#);
        assert!(matches!(rv, Err(CalcError::MalformedRecord(_))));
        assert_eq!(e.stack(), &[1.0]);
    }
}
