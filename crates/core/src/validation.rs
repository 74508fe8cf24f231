//! Input checks applied before a request reaches the estimator, the FAQ
//! service or the lead intake. Messages are user-facing.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::estimate::{EstimationRequest, PaintCondition};
use crate::domain::faq::FaqRequest;
use crate::domain::lead::{Lead, LeadRequest};

/// Smallest lot the estimator accepts, 0.1 acres.
pub fn min_lot_size_acres() -> Decimal {
    Decimal::new(1, 1)
}

/// Largest lot the estimator accepts, 10,000 acres.
pub fn max_lot_size_acres() -> Decimal {
    Decimal::from(10_000)
}

const LOT_TOO_SMALL: &str = "Lot size must be at least 0.1 acres.";
const LOT_TOO_LARGE: &str = "Lot size must be at most 10,000 acres.";

pub trait Validate {
    type Output;

    fn validate(&self) -> Result<Self::Output, ValidationErrors>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|error| error.message.as_str()).collect()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join(" "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw ROI form values. Numbers may arrive as JSON numbers or numeric text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiForm {
    #[serde(default)]
    pub lot_size_acres: Value,
    #[serde(default)]
    pub current_paint_condition: String,
    #[serde(default)]
    pub number_of_spaces: Value,
    #[serde(default)]
    pub repaint_frequency_years: Value,
}

impl Validate for RoiForm {
    type Output = EstimationRequest;

    fn validate(&self) -> Result<EstimationRequest, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let lot_size_acres = match coerce_decimal(&self.lot_size_acres) {
            Some(value) if value > max_lot_size_acres() => {
                errors.push("lotSizeAcres", LOT_TOO_LARGE);
                Decimal::ZERO
            }
            Some(value) if value >= min_lot_size_acres() => value,
            _ => {
                errors.push("lotSizeAcres", LOT_TOO_SMALL);
                Decimal::ZERO
            }
        };

        let condition = if self.current_paint_condition.trim().is_empty() {
            errors.push("currentPaintCondition", "Please select paint condition.");
            None
        } else {
            match PaintCondition::from_str(&self.current_paint_condition) {
                Ok(condition) => Some(condition),
                Err(_) => {
                    errors.push(
                        "currentPaintCondition",
                        "Paint condition must be good, fair, or poor.",
                    );
                    None
                }
            }
        };

        let number_of_spaces = coerce_count(
            &self.number_of_spaces,
            "numberOfSpaces",
            CountMessages {
                minimum: "Must have at least 1 space.",
                whole: "Number of spaces must be a whole number.",
                too_large: "Number of spaces is too large.",
            },
            &mut errors,
        );
        let repaint_frequency_years = coerce_count(
            &self.repaint_frequency_years,
            "repaintFrequencyYears",
            CountMessages {
                minimum: "Repaint frequency must be at least 1 year.",
                whole: "Repaint frequency must be a whole number of years.",
                too_large: "Repaint frequency is too large.",
            },
            &mut errors,
        );

        match condition {
            Some(current_paint_condition) => errors.into_result(|| EstimationRequest {
                lot_size_acres,
                current_paint_condition,
                number_of_spaces,
                repaint_frequency_years,
            }),
            None => Err(errors),
        }
    }
}

impl Validate for EstimationRequest {
    type Output = EstimationRequest;

    fn validate(&self) -> Result<EstimationRequest, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.lot_size_acres < min_lot_size_acres() {
            errors.push("lotSizeAcres", LOT_TOO_SMALL);
        } else if self.lot_size_acres > max_lot_size_acres() {
            errors.push("lotSizeAcres", LOT_TOO_LARGE);
        }
        if self.number_of_spaces == 0 {
            errors.push("numberOfSpaces", "Must have at least 1 space.");
        }
        if self.repaint_frequency_years == 0 {
            errors.push("repaintFrequencyYears", "Repaint frequency must be at least 1 year.");
        }
        errors.into_result(|| self.clone())
    }
}

impl Validate for FaqRequest {
    type Output = FaqRequest;

    fn validate(&self) -> Result<FaqRequest, ValidationErrors> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(vec![FieldError::new("query", "Please enter a question.")].into());
        }
        Ok(FaqRequest { query: query.to_string() })
    }
}

impl Validate for LeadRequest {
    type Output = Lead;

    fn validate(&self) -> Result<Lead, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let name = self.name.trim();
        let email = self.email.trim();
        let lot_size = self.lot_size.trim();

        if name.chars().count() < 2 {
            errors.push("name", "Name must be at least 2 characters.");
        }
        if !is_valid_email(email) {
            errors.push("email", "Please enter a valid email.");
        }
        if lot_size.is_empty() {
            errors.push("lotSize", "Please enter your lot size.");
        }

        errors.into_result(|| Lead {
            name: name.to_string(),
            email: email.to_string(),
            lot_size: lot_size.to_string(),
        })
    }
}

pub fn is_valid_email(candidate: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").ok())
        .as_ref()
        .map(|pattern| pattern.is_match(candidate))
        .unwrap_or(false)
}

fn coerce_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_string(),
        _ => return None,
    };
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(&text).or_else(|_| Decimal::from_scientific(&text)).ok()
}

struct CountMessages {
    minimum: &'static str,
    whole: &'static str,
    too_large: &'static str,
}

fn coerce_count(
    value: &Value,
    field: &'static str,
    messages: CountMessages,
    errors: &mut ValidationErrors,
) -> u32 {
    let Some(decimal) = coerce_decimal(value) else {
        errors.push(field, messages.minimum);
        return 0;
    };
    if decimal < Decimal::ONE {
        errors.push(field, messages.minimum);
        return 0;
    }
    if !decimal.fract().is_zero() {
        errors.push(field, messages.whole);
        return 0;
    }
    match decimal.to_u32() {
        Some(count) => count,
        None => {
            errors.push(field, messages.too_large);
            0
        }
    }
}
