/* RPN-keypad (c) 2025 Nathaniel Clark
 *
 * This source code is subject to the terms of the GPL v2. See LICENCE file.
 */

use crate::{error::CalcError, numbers::AngleUnit};
use serde::{Deserialize, Serialize};

/// Persisted calculator state.
///
/// Undo history and the memory register are not part of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    #[serde(with = "stack_values")]
    pub stack: Vec<f64>,
    pub input: String,
    pub error_message: String,
    pub inverse_mode: bool,
    pub angle_unit: AngleUnit,
}

impl Record {
    pub fn to_json(&self) -> Result<String, CalcError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, CalcError> {
        Ok(serde_json::from_str(text)?)
    }
}

// JSON has no NaN or infinity, so those go out as strings.
mod stack_values {
    use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Entry {
        Number(f64),
        Special(String),
    }

    fn special_tag(v: f64) -> &'static str {
        if v.is_nan() {
            "NaN"
        } else if v.is_sign_negative() {
            "-inf"
        } else {
            "inf"
        }
    }

    pub fn serialize<S: Serializer>(values: &[f64], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(values.iter().map(|v| {
            if v.is_finite() {
                Entry::Number(*v)
            } else {
                Entry::Special(special_tag(*v).to_string())
            }
        }))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<f64>, D::Error> {
        Vec::<Entry>::deserialize(d)?
            .into_iter()
            .map(|e| match e {
                Entry::Number(v) => Ok(v),
                Entry::Special(tag) => match tag.as_str() {
                    "NaN" => Ok(f64::NAN),
                    "inf" => Ok(f64::INFINITY),
                    "-inf" => Ok(f64::NEG_INFINITY),
                    _ => Err(D::Error::custom(format!("invalid stack value {tag:?}"))),
                },
            })
            .collect()
    }
}
