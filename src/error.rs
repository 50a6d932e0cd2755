/* RPN-keypad (c) 2025 Nathaniel Clark
 *
 * This source code is subject to the terms of the GPL v2. See LICENCE file.
 */

use thiserror::Error;

/// Everything an engine operation can fail with.
///
/// The `Display` text is what ends up in the engine's error message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Not enough values on the stack")]
    Underflow,
    #[error("Invalid number")]
    InvalidNumber,
    #[error("Out of range")]
    NumberOutOfRange,
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::MalformedRecord(e.to_string())
    }
}
