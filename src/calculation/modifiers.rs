//! Percentage modifiers applied to the base price.
//!
//! The stages run in a fixed order, each on the previous stage's result:
//!
//! 1. broker-or-tagline discount (mutually exclusive, broker wins)
//! 2. exact-size markup
//! 3. turnaround markup
//!
//! Add-on costs are never passed through these stages.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AuditStep, DiscountDecision, TurnaroundTime};

use super::checked;

/// Discount granted for printing the shop's tagline, as a percentage.
pub const TAGLINE_DISCOUNT_PERCENTAGE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Markup for trimming to an exact size, as a percentage (12.5%).
pub const EXACT_SIZE_MARKUP_PERCENTAGE: Decimal = Decimal::from_parts(125, 0, 0, false, 1);

/// Chooses the discount for the base price.
///
/// An applicable broker discount always wins; the tagline discount is only
/// considered when no broker discount applies.
///
/// # Examples
///
/// ```
/// use print_pricing::calculation::decide_discount;
/// use print_pricing::models::DiscountDecision;
/// use rust_decimal::Decimal;
///
/// let broker = decide_discount(Some(Decimal::from(20)), true);
/// assert_eq!(broker, DiscountDecision::Broker { percentage: Decimal::from(20) });
///
/// let tagline = decide_discount(None, true);
/// assert_eq!(tagline, DiscountDecision::Tagline { percentage: Decimal::from(5) });
///
/// assert_eq!(decide_discount(None, false), DiscountDecision::NoDiscount);
/// ```
pub fn decide_discount(
    broker_discount_percentage: Option<Decimal>,
    tagline_selected: bool,
) -> DiscountDecision {
    match broker_discount_percentage {
        Some(percentage) => DiscountDecision::Broker { percentage },
        None if tagline_selected => DiscountDecision::Tagline {
            percentage: TAGLINE_DISCOUNT_PERCENTAGE,
        },
        None => DiscountDecision::NoDiscount,
    }
}

/// The result of applying the base discount.
#[derive(Debug, Clone)]
pub struct BaseDiscountResult {
    /// Base price after the discount.
    pub adjusted_base_price: Decimal,
    /// Amount removed by the discount.
    pub discount_amount: Decimal,
    /// The audit step recording this stage.
    pub audit_step: AuditStep,
}

/// Applies the chosen discount to the base paper/print price.
///
/// Broker: `base × (1 − pct/100)`. Tagline: `base − base × pct/100`.
/// Every stage in this module fails with `CalculationError` on overflow.
pub fn apply_base_discount(
    base_paper_print_price: Decimal,
    decision: DiscountDecision,
    step_number: u32,
) -> EngineResult<BaseDiscountResult> {
    let (adjusted_base_price, reasoning) = match decision {
        DiscountDecision::Broker { percentage } => {
            let adjusted = checked::marked_up(
                base_paper_print_price,
                -percentage,
                "broker discounted price",
            )?;
            let reasoning = format!(
                "Broker category discount: ${} × (1 - {}%) = ${}",
                base_paper_print_price.normalize(),
                percentage.normalize(),
                adjusted.normalize()
            );
            (adjusted, reasoning)
        }
        DiscountDecision::Tagline { percentage } => {
            let reduction =
                checked::percent_of(base_paper_print_price, percentage, "tagline discount")?;
            let adjusted =
                checked::sub(base_paper_print_price, reduction, "tagline discounted price")?;
            let reasoning = format!(
                "Tagline discount: ${} - ${} ({}%) = ${}",
                base_paper_print_price.normalize(),
                reduction.normalize(),
                percentage.normalize(),
                adjusted.normalize()
            );
            (adjusted, reasoning)
        }
        DiscountDecision::NoDiscount => (
            base_paper_print_price,
            "No broker or tagline discount applies".to_string(),
        ),
    };

    let discount_amount =
        checked::sub(base_paper_print_price, adjusted_base_price, "discount amount")?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_discount".to_string(),
        rule_name: "Broker or Tagline Discount".to_string(),
        input: serde_json::json!({
            "base_paper_print_price": base_paper_print_price.normalize().to_string(),
            "decision": decision
        }),
        output: serde_json::json!({
            "discount_applied": decision != DiscountDecision::NoDiscount,
            "discount_percentage": decision.percentage().normalize().to_string(),
            "discount_amount": discount_amount.normalize().to_string(),
            "adjusted_base_price": adjusted_base_price.normalize().to_string()
        }),
        reasoning,
    };

    Ok(BaseDiscountResult {
        adjusted_base_price,
        discount_amount,
        audit_step,
    })
}

/// The result of a markup stage.
#[derive(Debug, Clone)]
pub struct MarkupResult {
    /// Whether the markup changed the price.
    pub applied: bool,
    /// The markup percentage used (recorded even when not applied).
    pub percentage: Decimal,
    /// Price after the stage.
    pub price: Decimal,
    /// The audit step recording this stage.
    pub audit_step: AuditStep,
}

/// Applies the 12.5% exact-size markup when selected.
pub fn apply_exact_size_markup(
    adjusted_base_price: Decimal,
    exact_size_selected: bool,
    step_number: u32,
) -> EngineResult<MarkupResult> {
    let percentage = EXACT_SIZE_MARKUP_PERCENTAGE;
    let (price, reasoning) = if exact_size_selected {
        let price = checked::marked_up(adjusted_base_price, percentage, "exact size price")?;
        let reasoning = format!(
            "Exact size markup: ${} × (1 + {}%) = ${}",
            adjusted_base_price.normalize(),
            percentage.normalize(),
            price.normalize()
        );
        (price, reasoning)
    } else {
        (
            adjusted_base_price,
            "Exact size not selected - no markup".to_string(),
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "exact_size_markup".to_string(),
        rule_name: "Exact Size Markup".to_string(),
        input: serde_json::json!({
            "adjusted_base_price": adjusted_base_price.normalize().to_string(),
            "exact_size_selected": exact_size_selected
        }),
        output: serde_json::json!({
            "markup_applied": exact_size_selected,
            "markup_percentage": percentage.normalize().to_string(),
            "price_after_base_percentage_modifiers": price.normalize().to_string()
        }),
        reasoning,
    };

    Ok(MarkupResult {
        applied: exact_size_selected,
        percentage,
        price,
        audit_step,
    })
}

/// Applies the turnaround markup. Always runs, even at 0%.
pub fn apply_turnaround_markup(
    price_after_base_percentage_modifiers: Decimal,
    turnaround: &TurnaroundTime,
    step_number: u32,
) -> EngineResult<MarkupResult> {
    let percentage = turnaround.markup_percentage;
    let price = checked::marked_up(
        price_after_base_percentage_modifiers,
        percentage,
        "price after turnaround",
    )?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "turnaround_markup".to_string(),
        rule_name: "Turnaround Markup".to_string(),
        input: serde_json::json!({
            "price_after_base_percentage_modifiers":
                price_after_base_percentage_modifiers.normalize().to_string(),
            "turnaround_id": turnaround.id,
            "turnaround_name": turnaround.name,
            "business_days": turnaround.business_days
        }),
        output: serde_json::json!({
            "markup_applied": !percentage.is_zero(),
            "markup_percentage": percentage.normalize().to_string(),
            "price_after_turnaround": price.normalize().to_string()
        }),
        reasoning: format!(
            "{} turnaround: ${} × (1 + {}%) = ${}",
            turnaround.name,
            price_after_base_percentage_modifiers.normalize(),
            percentage.normalize(),
            price.normalize()
        ),
    };

    Ok(MarkupResult {
        applied: !percentage.is_zero(),
        percentage,
        price,
        audit_step,
    })
}
