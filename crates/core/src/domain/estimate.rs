use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Number of yearly points in every cost-comparison series.
pub const COMPARISON_YEARS: u32 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintCondition {
    Good,
    Fair,
    Poor,
}

impl PaintCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }

    /// Scalar applied to the three-year savings figure.
    pub fn multiplier(&self) -> Decimal {
        match self {
            Self::Good => Decimal::ONE,
            Self::Fair => Decimal::new(11, 1),
            Self::Poor => Decimal::new(12, 1),
        }
    }
}

impl fmt::Display for PaintCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaintCondition {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "good" => Ok(Self::Good),
            "fair" => Ok(Self::Fair),
            "poor" => Ok(Self::Poor),
            other => Err(DomainError::UnknownPaintCondition(other.to_string())),
        }
    }
}

/// Lot parameters for a single ROI estimate.
///
/// Callers are expected to have validated the values (see
/// [`crate::validation::RoiForm`]); the fallback model assumes a positive lot
/// size and a repaint frequency of at least one year.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationRequest {
    pub lot_size_acres: Decimal,
    pub current_paint_condition: PaintCondition,
    pub number_of_spaces: u32,
    pub repaint_frequency_years: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostPoint {
    pub year: u32,
    pub standard_paint_cost: f64,
    pub tbl_paint_cost: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    pub estimated_savings: f64,
    pub roi_explanation: String,
    pub chart_data: Vec<CostPoint>,
}

impl EstimationResult {
    /// Checks the shape every caller relies on: six yearly points in order,
    /// finite non-decreasing cumulative costs and a non-negative savings figure.
    pub fn conforms(&self) -> Result<(), DomainError> {
        if !self.estimated_savings.is_finite() || self.estimated_savings < 0.0 {
            return Err(DomainError::InvariantViolation(format!(
                "estimatedSavings must be a non-negative number, got {}",
                self.estimated_savings
            )));
        }

        if self.chart_data.len() != COMPARISON_YEARS as usize {
            return Err(DomainError::InvariantViolation(format!(
                "chartData must contain {COMPARISON_YEARS} points, got {}",
                self.chart_data.len()
            )));
        }

        let mut previous: Option<&CostPoint> = None;
        for (index, point) in self.chart_data.iter().enumerate() {
            let expected_year = index as u32 + 1;
            if point.year != expected_year {
                return Err(DomainError::InvariantViolation(format!(
                    "chartData[{index}].year must be {expected_year}, got {}",
                    point.year
                )));
            }
            if !point.standard_paint_cost.is_finite() || !point.tbl_paint_cost.is_finite() {
                return Err(DomainError::InvariantViolation(format!(
                    "chartData[{index}] costs must be finite"
                )));
            }
            if let Some(previous) = previous {
                if point.standard_paint_cost < previous.standard_paint_cost
                    || point.tbl_paint_cost < previous.tbl_paint_cost
                {
                    return Err(DomainError::InvariantViolation(format!(
                        "chartData[{index}] cumulative cost decreased"
                    )));
                }
            }
            previous = Some(point);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CostPoint, EstimationRequest, EstimationResult, PaintCondition};
    use crate::errors::DomainError;
    use rust_decimal::Decimal;

    fn series(values: &[(f64, f64)]) -> Vec<CostPoint> {
        values
            .iter()
            .enumerate()
            .map(|(index, (standard, tbl))| CostPoint {
                year: index as u32 + 1,
                standard_paint_cost: *standard,
                tbl_paint_cost: *tbl,
            })
            .collect()
    }

    #[test]
    fn paint_condition_parses_case_insensitively() {
        assert_eq!(" Poor ".parse::<PaintCondition>(), Ok(PaintCondition::Poor));
        assert_eq!("FAIR".parse::<PaintCondition>(), Ok(PaintCondition::Fair));
        assert!(matches!(
            "excellent".parse::<PaintCondition>(),
            Err(DomainError::UnknownPaintCondition(ref value)) if value == "excellent"
        ));
    }

    #[test]
    fn request_uses_camel_case_wire_names() {
        let request: EstimationRequest = serde_json::from_value(serde_json::json!({
            "lotSizeAcres": 2.5,
            "currentPaintCondition": "poor",
            "numberOfSpaces": 200,
            "repaintFrequencyYears": 2
        }))
        .expect("request should deserialize");

        assert_eq!(request.lot_size_acres, Decimal::new(25, 1));
        assert_eq!(request.current_paint_condition, PaintCondition::Poor);
        assert_eq!(request.number_of_spaces, 200);
    }

    #[test]
    fn conforming_result_passes() {
        let result = EstimationResult {
            estimated_savings: 6000.0,
            roi_explanation: "ok".to_string(),
            chart_data: series(&[(1.0, 2.0); 6]),
        };
        assert!(result.conforms().is_ok());
    }

    #[test]
    fn short_series_is_rejected() {
        let result = EstimationResult {
            estimated_savings: 0.0,
            roi_explanation: String::new(),
            chart_data: series(&[(1.0, 1.0); 5]),
        };
        assert!(result.conforms().is_err());
    }

    #[test]
    fn decreasing_costs_are_rejected() {
        let result = EstimationResult {
            estimated_savings: 10.0,
            roi_explanation: String::new(),
            chart_data: series(&[(1.0, 1.0), (2.0, 1.0), (1.5, 1.0), (2.0, 1.0), (3.0, 1.0), (3.0, 1.0)]),
        };
        assert!(result.conforms().is_err());
    }

    #[test]
    fn negative_savings_are_rejected() {
        let result = EstimationResult {
            estimated_savings: -1.0,
            roi_explanation: String::new(),
            chart_data: series(&[(1.0, 1.0); 6]),
        };
        assert!(result.conforms().is_err());
    }
}
