/* RPN-keypad (c) 2025 Nathaniel Clark
 *
 * This source code is subject to the terms of the GPL v2. See LICENCE file.
 */
/*
 * The calculator keypad.
 *
 *   [Inv]   [Deg]   [Rad]   [Grad]
 *   [Pi]    [sin]   [cos]   [tan]
 *   [1/x]   [log]   [ln]    [e^x]
 *   [sqrt]  [x^2]   [floor] [y^x]
 *   [Sto]   [Recall][Roll]  [Undo]
 *   [Swap]  [Dup]   [Drop]  [Clear]
 *   [   Enter    ]  [E]     [<=]
 *   [7]     [8]     [9]     [/]
 *   [4]     [5]     [6]     [*]
 *   [1]     [2]     [3]     [-]
 *   [0]     [.]     [+/-]   [+]
 */

use crate::{
    numbers::AngleUnit,
    ops::{BinaryOp, Constant, StackOp, UnaryOp},
};
use itertools::Itertools;

/// Stack levels shown by a display
pub const DISPLAYED_STACK_SIZE: usize = 4;
pub const BUTTONS_PER_ROW: usize = 4;
/// Significant digits shown by default
pub const DISPLAY_DECIMALS: usize = 12;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum ButtonType {
    Digit,
    DirectNumber,
    Backspace,
    BinaryOperator,
    UnaryOperator,
    StackOperator,
    Inverse,
    AngleUnitSelect,
    Enter,
}

/// What a button does, resolved when the layout is built
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// `0`-`9`, `.` or the exponent marker
    Digit(char),
    ToggleSign,
    Constant(Constant),
    Backspace,
    Binary(BinaryOp),
    Unary(UnaryOp),
    Stack(StackOp),
    Inverse,
    /// Select the unit, or convert the top of stack to it in inverse mode
    AngleUnit(AngleUnit),
    Enter,
}

impl Key {
    pub const fn button_type(self) -> ButtonType {
        match self {
            Key::Digit(_) | Key::ToggleSign => ButtonType::Digit,
            Key::Constant(_) => ButtonType::DirectNumber,
            Key::Backspace => ButtonType::Backspace,
            Key::Binary(_) => ButtonType::BinaryOperator,
            Key::Unary(_) => ButtonType::UnaryOperator,
            Key::Stack(_) => ButtonType::StackOperator,
            Key::Inverse => ButtonType::Inverse,
            Key::AngleUnit(_) => ButtonType::AngleUnitSelect,
            Key::Enter => ButtonType::Enter,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CalculatorButton {
    pub label: &'static str,
    pub key: Key,
    pub double_width: bool,
}

impl CalculatorButton {
    pub const fn new(label: &'static str, key: Key) -> Self {
        Self {
            label,
            key,
            double_width: matches!(key, Key::Enter),
        }
    }

    pub const fn button_type(&self) -> ButtonType {
        self.key.button_type()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ButtonWithInverse {
    pub button: CalculatorButton,
    pub inverse: Option<CalculatorButton>,
}

impl ButtonWithInverse {
    const fn plain(label: &'static str, key: Key) -> Self {
        Self {
            button: CalculatorButton::new(label, key),
            inverse: None,
        }
    }

    const fn with_inverse(
        label: &'static str,
        key: Key,
        inv_label: &'static str,
        inv_key: Key,
    ) -> Self {
        let button = CalculatorButton::new(label, key);
        Self {
            button,
            inverse: Some(CalculatorButton {
                label: inv_label,
                key: inv_key,
                double_width: button.double_width,
            }),
        }
    }

    /// The button face shown for the given inverse state
    pub fn current(&self, inverse_mode: bool) -> &CalculatorButton {
        match (&self.inverse, inverse_mode) {
            (Some(inv), true) => inv,
            _ => &self.button,
        }
    }
}

use ButtonWithInverse as B;

const fn digit(label: &'static str, ch: char) -> B {
    B::plain(label, Key::Digit(ch))
}

const fn unit(label: &'static str, inv_label: &'static str, u: AngleUnit) -> B {
    B::with_inverse(label, Key::AngleUnit(u), inv_label, Key::AngleUnit(u))
}

pub static LAYOUT: &[&[ButtonWithInverse]] = &[
    &[
        B::plain("Inv", Key::Inverse),
        unit("Deg", "To Deg", AngleUnit::Degree),
        unit("Rad", "To Rad", AngleUnit::Radian),
        unit("Grad", "To Grad", AngleUnit::Gradian),
    ],
    &[
        B::plain("Pi", Key::Constant(Constant::Pi)),
        B::with_inverse("sin", Key::Unary(UnaryOp::Sin), "sin^-1", Key::Unary(UnaryOp::Asin)),
        B::with_inverse("cos", Key::Unary(UnaryOp::Cos), "cos^-1", Key::Unary(UnaryOp::Acos)),
        B::with_inverse("tan", Key::Unary(UnaryOp::Tan), "tan^-1", Key::Unary(UnaryOp::Atan)),
    ],
    &[
        B::plain("1/x", Key::Unary(UnaryOp::Reciprocal)),
        B::with_inverse("log", Key::Unary(UnaryOp::Log10), "10^x", Key::Unary(UnaryOp::Exp10)),
        B::plain("ln", Key::Unary(UnaryOp::Ln)),
        B::plain("e^x", Key::Unary(UnaryOp::Exp)),
    ],
    &[
        B::plain("sqrt", Key::Unary(UnaryOp::Sqrt)),
        B::plain("x^2", Key::Unary(UnaryOp::Square)),
        B::plain("floor", Key::Unary(UnaryOp::Floor)),
        B::plain("y^x", Key::Binary(BinaryOp::Pow)),
    ],
    &[
        B::plain("Sto", Key::Stack(StackOp::Sto)),
        B::plain("Recall", Key::Stack(StackOp::Recall)),
        B::plain("Roll", Key::Stack(StackOp::Roll)),
        B::plain("Undo", Key::Stack(StackOp::Undo)),
    ],
    &[
        B::plain("Swap", Key::Stack(StackOp::Swap)),
        B::plain("Dup", Key::Stack(StackOp::Dup)),
        B::plain("Drop", Key::Stack(StackOp::Drop)),
        B::plain("Clear", Key::Stack(StackOp::Clear)),
    ],
    &[
        B::plain("Enter", Key::Enter),
        digit("E", 'E'),
        B::plain("<=", Key::Backspace),
    ],
    &[digit("7", '7'), digit("8", '8'), digit("9", '9'), B::plain("/", Key::Binary(BinaryOp::Div))],
    &[digit("4", '4'), digit("5", '5'), digit("6", '6'), B::plain("*", Key::Binary(BinaryOp::Mul))],
    &[digit("1", '1'), digit("2", '2'), digit("3", '3'), B::plain("-", Key::Binary(BinaryOp::Sub))],
    &[
        digit("0", '0'),
        digit(".", '.'),
        B::plain("+/-", Key::ToggleSign),
        B::plain("+", Key::Binary(BinaryOp::Add)),
    ],
];

/// Buttons not on the keypad but reachable from a keyboard
static EXTRA: &[CalculatorButton] = &[CalculatorButton::new("e", Key::Constant(Constant::E))];

/// Every button face, primary ones first
pub fn all_buttons() -> impl Iterator<Item = &'static CalculatorButton> {
    let primary = LAYOUT.iter().flat_map(|row| row.iter()).map(|b| &b.button);
    let inverse = LAYOUT
        .iter()
        .flat_map(|row| row.iter())
        .filter_map(|b| b.inverse.as_ref());
    primary.chain(inverse).chain(EXTRA.iter())
}

/// Button performing `key`
pub fn button(key: Key) -> Option<&'static CalculatorButton> {
    all_buttons().find(|b| b.key == key)
}

/// Face shown on the keypad slot of `button` in the given mode.
///
/// Buttons that are not a primary face are returned unchanged.
pub fn current_face(
    button: &'static CalculatorButton,
    inverse_mode: bool,
) -> &'static CalculatorButton {
    LAYOUT
        .iter()
        .flat_map(|row| row.iter())
        .find(|b| b.button == *button)
        .map_or(button, |b| b.current(inverse_mode))
}

/// Button whose label is `label` (exact match)
pub fn button_by_label(label: &str) -> Option<&'static CalculatorButton> {
    all_buttons().find(|b| b.label == label)
}

/// Map a keyboard character to a button
pub fn button_for_char(c: char) -> Option<&'static CalculatorButton> {
    let key = match c {
        '0'..='9' | '.' => Key::Digit(c),
        'E' | 'e' => Key::Digit('E'),
        '+' => Key::Binary(BinaryOp::Add),
        '-' => Key::Binary(BinaryOp::Sub),
        '*' => Key::Binary(BinaryOp::Mul),
        '/' => Key::Binary(BinaryOp::Div),
        '^' => Key::Binary(BinaryOp::Pow),
        '\n' | '\r' => Key::Enter,
        '\x08' | '\x7f' => Key::Backspace,
        _ => return None,
    };
    button(key)
}

/// Map a typed word to a button.
///
/// Layout labels match case-insensitively; a few spelled out aliases are
/// accepted as well.
pub fn button_for_token(token: &str) -> Option<&'static CalculatorButton> {
    let lower = token.to_lowercase();
    let alias = match lower.as_str() {
        "enter" | "ent" => Some(Key::Enter),
        "bs" | "back" | "backspace" => Some(Key::Backspace),
        "neg" | "chs" => Some(Key::ToggleSign),
        "pow" => Some(Key::Binary(BinaryOp::Pow)),
        "inverse" => Some(Key::Inverse),
        "rcl" => Some(Key::Stack(StackOp::Recall)),
        "sto" => Some(Key::Stack(StackOp::Sto)),
        "asin" => Some(Key::Unary(UnaryOp::Asin)),
        "acos" => Some(Key::Unary(UnaryOp::Acos)),
        "atan" => Some(Key::Unary(UnaryOp::Atan)),
        _ => None,
    };
    if let Some(key) = alias {
        return button(key);
    }
    // "e" is the constant, "E" the exponent key
    if token == "e" {
        return button(Key::Constant(Constant::E));
    }
    button_by_label(token).or_else(|| all_buttons().find(|b| b.label.to_lowercase() == lower))
}

/// Rows of labels as shown for the given inverse state
pub fn labels(inverse_mode: bool) -> Vec<Vec<&'static str>> {
    LAYOUT
        .iter()
        .map(|row| row.iter().map(|b| b.current(inverse_mode).label).collect_vec())
        .collect_vec()
}
