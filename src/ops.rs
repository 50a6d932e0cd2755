/* RPN-keypad (c) 2025 Nathaniel Clark
 *
 * This source code is subject to the terms of the GPL v2. See LICENCE file.
 */

use crate::{
    error::CalcError,
    numbers::{from_radians, to_radians, AngleUnit, E_TEXT, PI_TEXT},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    /// Digits appended to the input buffer
    pub fn text(self) -> &'static str {
        match self {
            Constant::Pi => PI_TEXT,
            Constant::E => E_TEXT,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum BinaryOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "y^x")]
    Pow,
}

impl BinaryOp {
    /// `a op b` where `b` is the value that was on top of the stack
    pub fn apply(self, a: f64, b: f64) -> Result<f64, CalcError> {
        Ok(match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => {
                if b == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                a / b
            }
            BinaryOp::Pow => a.powf(b),
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum UnaryOp {
    #[strum(serialize = "sin")]
    Sin,
    #[strum(serialize = "cos")]
    Cos,
    #[strum(serialize = "tan")]
    Tan,
    #[strum(serialize = "sin^-1")]
    Asin,
    #[strum(serialize = "cos^-1")]
    Acos,
    #[strum(serialize = "tan^-1")]
    Atan,
    #[strum(serialize = "1/x")]
    Reciprocal,
    #[strum(serialize = "log")]
    Log10,
    #[strum(serialize = "ln")]
    Ln,
    #[strum(serialize = "10^x")]
    Exp10,
    #[strum(serialize = "e^x")]
    Exp,
    #[strum(serialize = "sqrt")]
    Sqrt,
    #[strum(serialize = "x^2")]
    Square,
    #[strum(serialize = "floor")]
    Floor,
}

impl UnaryOp {
    /// Plain IEEE evaluation; out of domain arguments give NaN or infinity.
    pub fn apply(self, a: f64, unit: AngleUnit) -> f64 {
        match self {
            UnaryOp::Sin => to_radians(a, unit).sin(),
            UnaryOp::Cos => to_radians(a, unit).cos(),
            UnaryOp::Tan => to_radians(a, unit).tan(),
            UnaryOp::Asin => from_radians(a.asin(), unit),
            UnaryOp::Acos => from_radians(a.acos(), unit),
            UnaryOp::Atan => from_radians(a.atan(), unit),
            UnaryOp::Reciprocal => 1.0 / a,
            UnaryOp::Log10 => a.log10(),
            UnaryOp::Ln => a.ln(),
            UnaryOp::Exp10 => 10f64.powf(a),
            UnaryOp::Exp => a.exp(),
            UnaryOp::Sqrt => a.sqrt(),
            UnaryOp::Square => a * a,
            UnaryOp::Floor => a.floor(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum StackOp {
    Swap,
    Dup,
    Drop,
    Clear,
    Sto,
    Recall,
    Roll,
    Undo,
}
