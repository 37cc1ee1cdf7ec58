//! The pricing orchestrator.
//!
//! [`calculate_price`] runs the full pipeline for one product configuration:
//! validation, add-on resolution, base price, the modifier stages, add-on
//! costs, and the final subtotal.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::EngineResult;
use crate::models::{AuditStep, DocumentationPriceCalculation, ProductConfiguration};

use super::add_on_costs::resolve_add_on_costs;
use super::base_price::calculate_base_price;
use super::checked;
use super::modifiers::{
    apply_base_discount, apply_exact_size_markup, apply_turnaround_markup, decide_discount,
};
use super::validation::{check_add_on_prerequisites, validate_configuration};

/// Prices a product configuration.
///
/// The function is pure: the same configuration always produces an equal
/// breakdown, and the configuration is never modified.
///
/// # Errors
///
/// - `InvalidConfiguration` for a zero quantity, missing or non-positive
///   dimensions, negative rates or markups, an out-of-range broker discount,
///   or an unmet add-on prerequisite
/// - `MissingAddOnParameter` when a selected add-on lacks a required field
/// - `CalculationError` when an intermediate amount overflows `Decimal`
///
/// # Examples
///
/// ```no_run
/// use print_pricing::calculation::calculate_price;
/// use print_pricing::config::ConfigLoader;
/// use print_pricing::models::{AddOnConfiguration, ProductConfiguration, Sides};
///
/// let loader = ConfigLoader::load("./config/catalog")?;
/// let config = ProductConfiguration {
///     paper_stock: loader.get_paper_stock("16pt_c2s")?.clone(),
///     print_size: loader.get_print_size("business_card")?.clone(),
///     custom_dimensions: None,
///     quantity: 500,
///     sides: Sides::Double,
///     turnaround_time: loader.get_turnaround_time("standard")?.clone(),
///     add_ons: AddOnConfiguration::default(),
///     is_broker: false,
///     broker_discounts: vec![],
///     category_id: None,
/// };
///
/// let breakdown = calculate_price(&config)?;
/// println!("Subtotal: ${}", breakdown.calculated_product_subtotal_before_shipping_tax);
/// # Ok::<(), print_pricing::error::EngineError>(())
/// ```
pub fn calculate_price(config: &ProductConfiguration) -> EngineResult<DocumentationPriceCalculation> {
    let dimensions = validate_configuration(config)?;
    let add_ons = config.add_ons.resolve()?;
    check_add_on_prerequisites(&add_ons, &dimensions)?;

    let mut audit_steps: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    let base = calculate_base_price(
        config.quantity,
        &dimensions,
        &config.paper_stock,
        config.sides,
        step_number,
    )?;
    audit_steps.push(base.audit_step);
    step_number += 1;

    let decision = decide_discount(config.applicable_broker_discount(), add_ons.tagline);
    let discount = apply_base_discount(base.base_paper_print_price, decision, step_number)?;
    audit_steps.push(discount.audit_step);
    step_number += 1;

    let exact_size =
        apply_exact_size_markup(discount.adjusted_base_price, add_ons.exact_size, step_number)?;
    audit_steps.push(exact_size.audit_step);
    step_number += 1;

    let turnaround =
        apply_turnaround_markup(exact_size.price, &config.turnaround_time, step_number)?;
    audit_steps.push(turnaround.audit_step);
    step_number += 1;

    let add_on_costs = resolve_add_on_costs(&add_ons.priced, config.quantity, step_number)?;
    step_number += add_on_costs.audit_steps.len() as u32;
    audit_steps.extend(add_on_costs.audit_steps);

    let subtotal = checked::add(turnaround.price, add_on_costs.total, "subtotal")?;
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "subtotal".to_string(),
        rule_name: "Product Subtotal".to_string(),
        input: serde_json::json!({
            "price_after_turnaround": turnaround.price.normalize().to_string(),
            "total_addon_cost": add_on_costs.total.normalize().to_string()
        }),
        output: serde_json::json!({
            "calculated_product_subtotal_before_shipping_tax": subtotal.normalize().to_string()
        }),
        reasoning: format!(
            "${} + ${} add-ons = ${}",
            turnaround.price.normalize(),
            add_on_costs.total.normalize(),
            subtotal.normalize()
        ),
    });

    debug!(
        quantity = config.quantity,
        paper_stock = %config.paper_stock.id,
        print_size = %config.print_size.id,
        add_ons = add_on_costs.costs.len(),
        subtotal = %subtotal,
        "Priced product configuration"
    );

    Ok(DocumentationPriceCalculation {
        quantity: config.quantity,
        width: dimensions.width,
        height: dimensions.height,
        area: base.area,
        paper_price_per_unit_area: config.paper_stock.price_per_unit_area,
        sides: config.sides,
        sides_factor: base.sides_factor,
        base_paper_print_price: base.base_paper_print_price,
        discount: decision,
        broker_discount_applied: decision.is_broker(),
        tagline_discount_applied: decision.is_tagline(),
        discount_amount: discount.discount_amount,
        adjusted_base_price: discount.adjusted_base_price,
        exact_size_markup_applied: exact_size.applied,
        exact_size_markup_percentage: exact_size.percentage,
        price_after_base_percentage_modifiers: exact_size.price,
        turnaround_name: config.turnaround_time.name.clone(),
        turnaround_markup_percentage: turnaround.percentage,
        price_after_turnaround: turnaround.price,
        add_on_costs: add_on_costs.costs,
        total_addon_cost: add_on_costs.total,
        calculated_product_subtotal_before_shipping_tax: subtotal,
        audit_steps,
    })
}

/// Returns the subtotal a breakdown should report, recomputed from its parts.
pub fn expected_subtotal(calculation: &DocumentationPriceCalculation) -> Decimal {
    calculation.price_after_turnaround
        + calculation
            .add_on_costs
            .iter()
            .map(|c| c.cost)
            .sum::<Decimal>()
}
