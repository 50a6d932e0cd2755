/* RPN-keypad (c) 2025 Nathaniel Clark
 *
 * This source code is subject to the terms of the GPL v2. See LICENCE file.
 */
//! Keypad driven RPN calculator engine.
//!
//! A front end turns clicks or key strokes into [`CalculatorButton`]s from
//! the static [`layout`], hands them to [`CalculatorEngine::dispatch`] and
//! draws the engine's public state afterwards.

pub mod engine;
pub mod error;
pub mod input;
pub mod layout;
pub mod numbers;
pub mod ops;
pub mod record;
pub mod stack;
pub mod ui;

pub use engine::{CalculatorEngine, EngineConfig};
pub use error::CalcError;
pub use layout::{ButtonType, ButtonWithInverse, CalculatorButton, Key};
pub use numbers::{AngleUnit, Notation, NumberFormat};
pub use record::Record;
