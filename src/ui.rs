/* RPN-keypad (c) 2025 Nathaniel Clark
 *
 * This source code is subject to the terms of the GPL v2. See LICENCE file.
 */

use crate::{
    engine::CalculatorEngine,
    layout::{self, CalculatorButton, Key},
    numbers::NumberFormat,
};
use std::error::Error;

pub mod readline;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A line of whitespace separated key names and numbers
    Input(String),
    Help,
    Quit,
}

/// What a display needs to know to draw the engine
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Info {
    pub format: NumberFormat,
    pub rows: usize,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            format: NumberFormat::default(),
            rows: layout::DISPLAYED_STACK_SIZE,
        }
    }
}

pub trait CalcDisplay {
    /// Initialize Display driver
    fn init(info: Info) -> Result<Self, Box<dyn Error + Send + Sync>>
    where
        Self: Sized;

    /// Wait on next Message for event loop
    fn next(&mut self) -> Option<Message>;

    /// Redraw from the engine's public state
    fn render(&mut self, engine: &CalculatorEngine);

    /// Show Help Text
    fn help(&mut self);

    /// Cleanup and quit
    fn quit(&mut self);
}

/// Buttons pressed for one typed word.
///
/// Key labels and aliases map to their button; anything else is typed
/// character by character, with a leading `-` becoming a sign change.
pub fn buttons_for_token(token: &str) -> Option<Vec<&'static CalculatorButton>> {
    if let Some(b) = layout::button_for_token(token) {
        return Some(vec![b]);
    }
    let (negative, digits) = match token.strip_prefix('-') {
        Some(rest) if !rest.is_empty() => (true, rest),
        _ => (false, token),
    };
    let mut buttons = digits
        .chars()
        .map(|c| match layout::button_for_char(c) {
            Some(b) if matches!(b.key, Key::Digit(_)) => Some(b),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    if negative {
        buttons.push(layout::button(Key::ToggleSign)?);
    }
    Some(buttons)
}

pub fn help_text() -> String {
    let mut text = String::from(
        "Type numbers and key names separated by spaces. Return, and a space\n\
         between two numbers, act as Enter.\n\
         Keys (inverse face in brackets):\n",
    );
    for row in layout::LAYOUT {
        let faces = row
            .iter()
            .map(|b| match &b.inverse {
                Some(inv) => format!("{} [{}]", b.button.label, inv.label),
                None => b.button.label.to_string(),
            })
            .collect::<Vec<_>>();
        text.push_str("  ");
        text.push_str(&faces.join("  "));
        text.push('\n');
    }
    text.push_str("Also: neg, pow, rcl, e, help, quit\n");
    text
}
