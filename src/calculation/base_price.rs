//! Base paper/print price calculation.
//!
//! The base price is `quantity × area × price_per_unit_area × sides_factor`,
//! where the sides factor comes from the paper stock's second-side markup.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{AuditStep, Dimensions, PaperStock, Sides};

use super::checked;

/// The result of the base price calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct BasePriceResult {
    /// `width × height`.
    pub area: Decimal,
    /// The sides multiplier taken from the paper stock.
    pub sides_factor: Decimal,
    /// The base paper/print price.
    pub base_paper_print_price: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the base paper/print price.
///
/// No bounds checking happens here; the orchestrator validates quantity and
/// dimensions before calling.
///
/// # Errors
///
/// Returns `CalculationError` when the area or the price overflows.
///
/// # Examples
///
/// ```
/// use print_pricing::calculation::calculate_base_price;
/// use print_pricing::models::{Dimensions, PaperStock, Sides};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let stock = PaperStock {
///     id: "16pt_c2s".to_string(),
///     name: "16pt C2S Cardstock".to_string(),
///     price_per_unit_area: Decimal::from_str("0.008").unwrap(),
///     second_side_markup_percentage: Decimal::from(30),
/// };
/// let dims = Dimensions {
///     width: Decimal::from_str("3.5").unwrap(),
///     height: Decimal::from(2),
/// };
///
/// let result = calculate_base_price(500, &dims, &stock, Sides::Double, 1)?;
/// assert_eq!(result.base_paper_print_price, Decimal::from_str("36.40").unwrap());
/// # Ok::<(), print_pricing::error::EngineError>(())
/// ```
pub fn calculate_base_price(
    quantity: u32,
    dimensions: &Dimensions,
    paper_stock: &PaperStock,
    sides: Sides,
    step_number: u32,
) -> EngineResult<BasePriceResult> {
    let area = dimensions.area()?;
    let sides_factor = paper_stock.sides_factor(sides);
    let base_paper_print_price = [area, paper_stock.price_per_unit_area, sides_factor]
        .into_iter()
        .try_fold(Decimal::from(quantity), |price, factor| {
            checked::mul(price, factor, "base paper/print price")
        })?;

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_price".to_string(),
        rule_name: "Base Paper/Print Price".to_string(),
        input: serde_json::json!({
            "quantity": quantity,
            "width": dimensions.width.normalize().to_string(),
            "height": dimensions.height.normalize().to_string(),
            "paper_stock_id": paper_stock.id,
            "price_per_unit_area": paper_stock.price_per_unit_area.normalize().to_string(),
            "sides": sides.as_str(),
            "second_side_markup_percentage":
                paper_stock.second_side_markup_percentage.normalize().to_string()
        }),
        output: serde_json::json!({
            "area": area.normalize().to_string(),
            "sides_factor": sides_factor.normalize().to_string(),
            "base_paper_print_price": base_paper_print_price.normalize().to_string()
        }),
        reasoning: format!(
            "{} pieces × {} sq in × ${} × {} ({}-sided) = ${}",
            quantity,
            area.normalize(),
            paper_stock.price_per_unit_area.normalize(),
            sides_factor.normalize(),
            sides.as_str(),
            base_paper_print_price.normalize()
        ),
    };

    Ok(BasePriceResult {
        area,
        sides_factor,
        base_paper_print_price,
        audit_step,
    })
}
