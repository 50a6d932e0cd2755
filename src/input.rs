/* RPN-keypad (c) 2025 Nathaniel Clark
 *
 * This source code is subject to the terms of the GPL v2. See LICENCE file.
 */

use crate::{error::CalcError, numbers::parse_number};

/// Exponent marker accepted in the buffer
pub const EXPONENT: char = 'E';

/// Text of the number currently being typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn has_exponent(&self) -> bool {
        self.text.contains(['e', 'E'])
    }

    /// Append a digit, decimal point or exponent marker.
    ///
    /// Keys that would make the text unparsable regardless of what follows
    /// (a second point, a point inside the exponent, a second exponent or
    /// an exponent with no mantissa) are ignored.
    pub fn append_digit(&mut self, ch: char) {
        match ch {
            '0'..='9' => self.text.push(ch),
            '.' if !self.text.contains('.') && !self.has_exponent() => self.text.push(ch),
            'e' | 'E'
                if !self.has_exponent() && self.text.contains(|c: char| c.is_ascii_digit()) =>
            {
                self.text.push(EXPONENT)
            }
            _ => log::debug!("ignoring {ch:?} in input {:?}", self.text),
        }
    }

    pub fn append_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    /// Flip the leading minus sign; returns false if the buffer is empty
    pub fn toggle_sign(&mut self) -> bool {
        if self.text.is_empty() {
            false
        } else {
            if let Some(rest) = self.text.strip_prefix('-') {
                self.text = rest.to_string();
            } else {
                self.text.insert(0, '-');
            }
            true
        }
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Parse the buffer without consuming it.
    ///
    /// `Ok(None)` means there was nothing to commit. The buffer is only
    /// cleared by the caller once the value has been pushed.
    pub fn value(&self) -> Result<Option<f64>, CalcError> {
        if self.text.is_empty() {
            Ok(None)
        } else {
            parse_number(&self.text).map(Some)
        }
    }
}
