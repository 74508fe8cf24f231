use rust_decimal::Decimal;

use super::{CostAssumptions, RoiBreakdown};

/// Renders the fixed explanation for a fallback estimate.
///
/// The condition multiplier only scales the savings line; the two three-year
/// totals are reported before the adjustment, so under `fair` and `poor` the
/// stated totals and the stated savings do not subtract exactly.
pub fn render(breakdown: &RoiBreakdown, assumptions: &CostAssumptions) -> String {
    let spaces = breakdown.number_of_spaces;
    let per_space = |total: Decimal| {
        if spaces == 0 {
            Decimal::ZERO
        } else {
            total / Decimal::from(spaces)
        }
    };

    format!(
        "ROI Analysis for {lot}-acre parking lot ({spaces} spaces), current paint condition: {condition}

COST BREAKDOWN ({years}-Year Period):
• Standard Paint: {standard_rate}/acre every {frequency}
• TBL® Paint: {tbl_rate}/acre every {lifespan}+ years
• Ancillary Costs: {ancillary_rate}/acre per repaint ({ancillary} per repaint for this lot: lost rent, ADA-fine exposure)
• Condition Adjustment: {multiplier:.1}x multiplier on savings for {condition} condition

REPAINT SCHEDULE:
• Standard Paint: {standard_repaints} needed in {years} years
• TBL® Paint: {tbl_repaints} needed in {years} years

TOTAL COSTS:
• Standard Paint Total: {standard_total}
• TBL® Paint Total: {tbl_total}
• Your {years}-Year Savings: {savings}

COST PER SPACE:
• Standard: {standard_per_space} per space over {years} years
• TBL®: {tbl_per_space} per space over {years} years

ADDITIONAL BENEFITS:
• Reduced business disruption from fewer repaints
• Enhanced curb appeal and property value
• Improved ADA compliance longevity
• Lower environmental impact",
        lot = breakdown.lot_size_acres.normalize(),
        condition = breakdown.condition,
        years = assumptions.analysis_years,
        standard_rate = format_currency(assumptions.standard_cost_per_acre),
        tbl_rate = format_currency(assumptions.tbl_cost_per_acre),
        ancillary_rate = format_currency(assumptions.ancillary_cost_per_acre),
        ancillary = format_currency(breakdown.ancillary_cost),
        frequency = plural(breakdown.repaint_frequency_years, "year", "years"),
        lifespan = assumptions.tbl_lifespan_years,
        multiplier = breakdown.condition_multiplier,
        standard_repaints = plural(breakdown.standard_repaints, "repaint", "repaints"),
        tbl_repaints = plural(breakdown.tbl_repaints, "repaint", "repaints"),
        standard_total = format_currency(breakdown.standard_total),
        tbl_total = format_currency(breakdown.tbl_total),
        savings = format_currency(breakdown.estimated_savings),
        standard_per_space = format_currency(per_space(breakdown.standard_total)),
        tbl_per_space = format_currency(per_space(breakdown.tbl_total)),
    )
}

/// `$12,345` style whole-unit currency.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn plural(count: u32, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
