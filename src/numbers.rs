/* RPN-keypad (c) 2025 Nathaniel Clark
 *
 * This source code is subject to the terms of the GPL v2. See LICENCE file.
 */

use crate::error::CalcError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{f64::consts::PI, sync::LazyLock};

/// Decimal rendering of pi pushed into the input buffer by the `Pi` key
pub const PI_TEXT: &str = "3.1415926535897932384626433832795";
/// Decimal rendering of e
pub const E_TEXT: &str = "2.7182818284590452353602874713527";

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][-+]?[0-9]+)?$")
        .expect("number pattern is valid")
});

#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display,
)]
pub enum AngleUnit {
    #[default]
    #[serde(rename = "Deg")]
    #[strum(serialize = "Deg")]
    Degree,
    #[serde(rename = "Rad")]
    #[strum(serialize = "Rad")]
    Radian,
    #[serde(rename = "Grad")]
    #[strum(serialize = "Grad")]
    Gradian,
}

impl AngleUnit {
    pub const ALL: [AngleUnit; 3] = [AngleUnit::Degree, AngleUnit::Radian, AngleUnit::Gradian];

    /// Size of a half turn in this unit
    fn half_turn(self) -> f64 {
        match self {
            AngleUnit::Degree => 180.0,
            AngleUnit::Radian => PI,
            AngleUnit::Gradian => 200.0,
        }
    }
}

pub fn to_radians(v: f64, unit: AngleUnit) -> f64 {
    match unit {
        AngleUnit::Radian => v,
        _ => v * PI / unit.half_turn(),
    }
}

pub fn from_radians(v: f64, unit: AngleUnit) -> f64 {
    match unit {
        AngleUnit::Radian => v,
        _ => v * unit.half_turn() / PI,
    }
}

/// Re-express an angle given in `from` units in `to` units
pub fn convert_angle(v: f64, from: AngleUnit, to: AngleUnit) -> f64 {
    if from == to {
        v
    } else {
        from_radians(to_radians(v, from), to)
    }
}

/// Parse the text of the input buffer.
///
/// Only plain decimal syntax is accepted (optional sign, digits, one
/// decimal point, optional exponent). Text that is well formed but does
/// not fit in an `f64` is reported as out of range.
pub fn parse_number(value: &str) -> Result<f64, CalcError> {
    if !NUMBER_RE.is_match(value) {
        return Err(CalcError::InvalidNumber);
    }
    let v: f64 = value.parse().map_err(|_| CalcError::InvalidNumber)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CalcError::NumberOutOfRange)
    }
}

#[derive(clap::ValueEnum, Default, Debug, Copy, Clone, PartialEq, Eq, strum_macros::Display)]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "lowercase")]
pub enum Notation {
    /// Fixed or exponent form, whichever is shorter (printf `%G`)
    #[default]
    General,
    /// Always mantissa and exponent
    Scientific,
}

/// How stack entries are rendered for display
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    pub precision: usize,
    pub notation: Notation,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            precision: 12,
            notation: Notation::General,
        }
    }
}

impl NumberFormat {
    pub fn format(&self, v: f64) -> String {
        if v.is_nan() {
            return "NAN".to_string();
        }
        if v.is_infinite() {
            return if v.is_sign_negative() { "-INF" } else { "INF" }.to_string();
        }
        match self.notation {
            Notation::General => format_general(v, self.precision.max(1)),
            Notation::Scientific => {
                let (mantissa, exp) = split_exponent(v, self.precision);
                format_exponent(trim_fraction(&mantissa), exp)
            }
        }
    }
}

/// `{:.*e}` rendering split into mantissa text and decimal exponent
fn split_exponent(v: f64, decimals: usize) -> (String, i32) {
    let s = format!("{:.*e}", decimals, v);
    match s.split_once('e') {
        Some((m, e)) => (m.to_string(), e.parse().unwrap_or(0)),
        None => (s, 0),
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

fn format_exponent(mantissa: &str, exp: i32) -> String {
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}E{sign}{:02}", exp.abs())
}

// Mirrors printf("%.*G"): the exponent after rounding to `precision`
// significant digits picks between fixed and exponent form.
fn format_general(v: f64, precision: usize) -> String {
    let (mantissa, exp) = split_exponent(v, precision - 1);
    if exp < -4 || exp >= precision as i32 {
        format_exponent(trim_fraction(&mantissa), exp)
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        let fixed = format!("{:.*}", decimals, v);
        trim_fraction(&fixed).to_string()
    }
}
