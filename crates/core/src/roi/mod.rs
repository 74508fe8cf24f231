//! Deterministic ROI model used whenever the text-generation collaborator
//! cannot produce an estimate.
//!
//! All currency arithmetic runs on [`Decimal`]; values are converted to `f64`
//! only when the [`EstimationResult`] is assembled. Rounding is
//! half-to-even on whole currency units. Products and sums saturate at
//! [`Decimal::MAX`], so every request yields an estimate.

pub mod explanation;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::estimate::{
    CostPoint, EstimationRequest, EstimationResult, PaintCondition, COMPARISON_YEARS,
};

/// Fixed cost assumptions of the fallback model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CostAssumptions {
    pub standard_cost_per_acre: Decimal,
    pub tbl_cost_per_acre: Decimal,
    /// Lost rent, ADA-fine exposure and similar disruption per repaint event.
    pub ancillary_cost_per_acre: Decimal,
    pub tbl_lifespan_years: u32,
    pub analysis_years: u32,
}

impl Default for CostAssumptions {
    fn default() -> Self {
        Self {
            standard_cost_per_acre: Decimal::from(5_000),
            tbl_cost_per_acre: Decimal::from(12_000),
            ancillary_cost_per_acre: Decimal::from(1_000),
            tbl_lifespan_years: 3,
            analysis_years: 3,
        }
    }
}

/// Every intermediate figure of one fallback computation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoiBreakdown {
    pub lot_size_acres: Decimal,
    pub condition: PaintCondition,
    pub number_of_spaces: u32,
    pub repaint_frequency_years: u32,
    pub ancillary_cost: Decimal,
    pub standard_per_repaint: Decimal,
    pub tbl_per_repaint: Decimal,
    pub standard_repaints: u32,
    pub tbl_repaints: u32,
    pub standard_total: Decimal,
    pub tbl_total: Decimal,
    pub raw_savings: Decimal,
    pub condition_multiplier: Decimal,
    pub estimated_savings: Decimal,
}

#[derive(Clone, Debug, Default)]
pub struct FallbackModel {
    assumptions: CostAssumptions,
}

impl FallbackModel {
    pub fn new(assumptions: CostAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &CostAssumptions {
        &self.assumptions
    }

    pub fn breakdown(&self, request: &EstimationRequest) -> RoiBreakdown {
        let assumptions = &self.assumptions;
        let lot = request.lot_size_acres;
        let frequency = effective_frequency(request.repaint_frequency_years);

        let ancillary_cost = saturating_mul(assumptions.ancillary_cost_per_acre, lot);
        let standard_per_repaint =
            saturating_add(saturating_mul(assumptions.standard_cost_per_acre, lot), ancillary_cost);
        let tbl_per_repaint =
            saturating_add(saturating_mul(assumptions.tbl_cost_per_acre, lot), ancillary_cost);

        let standard_repaints = div_ceil(assumptions.analysis_years, frequency);
        let tbl_repaints =
            div_ceil(assumptions.analysis_years, effective_frequency(assumptions.tbl_lifespan_years));

        let standard_total = saturating_mul(standard_per_repaint, Decimal::from(standard_repaints));
        let tbl_total = saturating_mul(tbl_per_repaint, Decimal::from(tbl_repaints));
        // Both totals are non-negative, so the difference always fits.
        let raw_savings = standard_total - tbl_total;

        let condition_multiplier = request.current_paint_condition.multiplier();
        let estimated_savings =
            saturating_mul(raw_savings, condition_multiplier).round().max(Decimal::ZERO);

        RoiBreakdown {
            lot_size_acres: lot,
            condition: request.current_paint_condition,
            number_of_spaces: request.number_of_spaces,
            repaint_frequency_years: request.repaint_frequency_years,
            ancillary_cost,
            standard_per_repaint,
            tbl_per_repaint,
            standard_repaints,
            tbl_repaints,
            standard_total,
            tbl_total,
            raw_savings,
            condition_multiplier,
            estimated_savings,
        }
    }

    /// Cumulative cost of both paint types for years `1..=6`.
    pub fn comparison_series(&self, breakdown: &RoiBreakdown) -> Vec<CostPoint> {
        let standard_frequency = effective_frequency(breakdown.repaint_frequency_years);
        let tbl_frequency = effective_frequency(self.assumptions.tbl_lifespan_years);

        let mut standard_cumulative = Decimal::ZERO;
        let mut tbl_cumulative = Decimal::ZERO;

        (1..=COMPARISON_YEARS)
            .map(|year| {
                if repaints_in_year(year, standard_frequency) {
                    standard_cumulative =
                        saturating_add(standard_cumulative, breakdown.standard_per_repaint);
                }
                if repaints_in_year(year, tbl_frequency) {
                    tbl_cumulative = saturating_add(tbl_cumulative, breakdown.tbl_per_repaint);
                }
                CostPoint {
                    year,
                    standard_paint_cost: to_currency(standard_cumulative),
                    tbl_paint_cost: to_currency(tbl_cumulative),
                }
            })
            .collect()
    }

    pub fn estimate(&self, request: &EstimationRequest) -> EstimationResult {
        let breakdown = self.breakdown(request);
        let chart_data = self.comparison_series(&breakdown);
        let roi_explanation = explanation::render(&breakdown, &self.assumptions);

        EstimationResult {
            estimated_savings: to_currency(breakdown.estimated_savings),
            roi_explanation,
            chart_data,
        }
    }
}

/// Fallback estimate with the default cost assumptions.
pub fn fallback_estimate(request: &EstimationRequest) -> EstimationResult {
    FallbackModel::default().estimate(request)
}

fn repaints_in_year(year: u32, frequency: u32) -> bool {
    year == 1 || (year - 1) % frequency == 0
}

// Zero frequencies are rejected by validation; clamp so the model stays total.
fn effective_frequency(years: u32) -> u32 {
    years.max(1)
}

fn div_ceil(numerator: u32, denominator: u32) -> u32 {
    numerator / denominator + u32::from(numerator % denominator != 0)
}

fn saturating_mul(left: Decimal, right: Decimal) -> Decimal {
    left.checked_mul(right).unwrap_or_else(|| {
        if left.is_sign_negative() == right.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

fn saturating_add(left: Decimal, right: Decimal) -> Decimal {
    left.checked_add(right).unwrap_or(if right.is_sign_negative() { Decimal::MIN } else { Decimal::MAX })
}

fn to_currency(value: Decimal) -> f64 {
    value.round().to_f64().unwrap_or_default()
}
