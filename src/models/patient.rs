//! Patient measurements as submitted by the prediction form.
//!
//! The form posts every field as a string (`"45"`, `"1"`), while API
//! clients tend to send JSON numbers. Both are accepted; anything else
//! fails the whole request.

use serde_json::{Map, Value};

use super::enums::{Flag, Gender, SmokingHistory};

/// Accepted measurement ranges, mirroring the form's client-side checks.
/// Only enforced when range checking is enabled in the server config.
pub const AGE_RANGE: (f64, f64) = (18.0, 120.0);
pub const BMI_RANGE: (f64, f64) = (10.0, 50.0);
pub const HBA1C_RANGE: (f64, f64) = (3.0, 15.0);
pub const GLUCOSE_RANGE: (f64, f64) = (50.0, 400.0);

/// Plain decimal notation is used for magnitudes in `[EXP_LOWER, EXP_UPPER)`.
const EXP_LOWER: f64 = 1e-4;
const EXP_UPPER: f64 = 1e16;

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum InputError {
    #[error("invalid JSON body: {0}")]
    InvalidJson(String),
    #[error("request body must be a JSON object")]
    NotAnObject,
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("could not convert {field} to a number: {value}")]
    NotNumeric { field: &'static str, value: String },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: String },
    #[error("invalid code for {field}: {value}")]
    InvalidCode { field: &'static str, value: String },
    #[error("{field} must be between {min} and {max}{unit}")]
    OutOfRange {
        field: &'static str,
        min: String,
        max: String,
        unit: &'static str,
    },
}

/// One patient's eight model inputs, validated.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientRecord {
    pub gender: Gender,
    /// Years.
    pub age: f64,
    pub hypertension: Flag,
    pub heart_disease: Flag,
    pub smoking_history: SmokingHistory,
    /// kg/m².
    pub bmi: f64,
    /// Percent.
    pub hba1c: f64,
    /// mg/dL.
    pub glucose: f64,
}

impl PatientRecord {
    /// Parse a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, InputError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| InputError::InvalidJson(e.to_string()))?;
        Self::from_json(&value)
    }

    /// Parse an already-decoded JSON value. Fields are read in classifier
    /// feature order so the first problem reported is deterministic.
    pub fn from_json(value: &Value) -> Result<Self, InputError> {
        let obj = value.as_object().ok_or(InputError::NotAnObject)?;

        let gender = Gender::from_code(number_field(obj, "gender")?)?;
        let age = measurement_field(obj, "age")?;
        let hypertension = Flag::from_code("hypertension", number_field(obj, "hypertension")?)?;
        let heart_disease = Flag::from_code("heart_disease", number_field(obj, "heart_disease")?)?;
        let smoking_history = SmokingHistory::from_code(number_field(obj, "smoking_history")?)?;
        let bmi = measurement_field(obj, "bmi")?;
        let hba1c = measurement_field(obj, "hba1c")?;
        let glucose = measurement_field(obj, "glucose")?;

        Ok(Self {
            gender,
            age,
            hypertension,
            heart_disease,
            smoking_history,
            bmi,
            hba1c,
            glucose,
        })
    }

    /// Model input vector in the fixed feature order:
    /// `[gender, age, hypertension, heart_disease, smoking_history, bmi, hba1c, glucose]`.
    pub fn features(&self) -> [f64; 8] {
        [
            f64::from(self.gender.code()),
            self.age,
            f64::from(self.hypertension.code()),
            f64::from(self.heart_disease.code()),
            f64::from(self.smoking_history.code()),
            self.bmi,
            self.hba1c,
            self.glucose,
        ]
    }

    /// Reject measurements outside the form's accepted ranges.
    pub fn check_ranges(&self) -> Result<(), InputError> {
        check_range("age", self.age, AGE_RANGE, " years")?;
        check_range("bmi", self.bmi, BMI_RANGE, " kg/m²")?;
        check_range("hba1c", self.hba1c, HBA1C_RANGE, "%")?;
        check_range("glucose", self.glucose, GLUCOSE_RANGE, " mg/dL")?;
        Ok(())
    }
}

fn check_range(
    field: &'static str,
    value: f64,
    (min, max): (f64, f64),
    unit: &'static str,
) -> Result<(), InputError> {
    if value < min || value > max {
        return Err(InputError::OutOfRange {
            field,
            min: format_measurement(min),
            max: format_measurement(max),
            unit,
        });
    }
    Ok(())
}

/// Read a field as a finite number. Accepts JSON numbers and numeric strings.
fn number_field(obj: &Map<String, Value>, field: &'static str) -> Result<f64, InputError> {
    let raw = obj.get(field).ok_or(InputError::MissingField(field))?;

    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(InputError::NotNumeric {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Like `number_field`, but also rejects negative values.
fn measurement_field(obj: &Map<String, Value>, field: &'static str) -> Result<f64, InputError> {
    let value = number_field(obj, field)?;
    if value < 0.0 {
        return Err(InputError::Negative {
            field,
            value: format_measurement(value),
        });
    }
    Ok(value)
}

/// Render a measurement the way it is echoed back to users: shortest
/// round-trip form, always with a fractional part (`60` -> `"60.0"`).
/// Magnitudes outside `[1e-4, 1e16)` switch to exponent form with a signed,
/// two-digit exponent (`1e16` -> `"1e+16"`, `0.000015` -> `"1.5e-05"`).
pub fn format_measurement(value: f64) -> String {
    let magnitude = value.abs();
    if value.is_finite() && value != 0.0 && !(EXP_LOWER..EXP_UPPER).contains(&magnitude) {
        let sci = format!("{value:e}");
        if let Some((mantissa, exponent)) = sci.split_once('e') {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            return format!("{mantissa}e{sign}{digits:0>2}");
        }
    }

    let text = value.to_string();
    if value.is_finite() && !text.contains(['.', 'e', 'E']) {
        format!("{text}.0")
    } else {
        text
    }
}
