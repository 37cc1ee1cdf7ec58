//! Calculation logic for the print pricing engine.
//!
//! This module contains the pricing pipeline: base paper/print price, the
//! broker-or-tagline discount, exact-size and turnaround markups, add-on
//! costs, and the orchestrator that runs them in order. The broker/volume
//! discount calculator lives alongside as a separate engine.

mod add_on_costs;
mod base_price;
mod broker_discount;
mod calculate_price;
mod checked;
mod modifiers;
mod validation;

pub use add_on_costs::{
    AddOnCostsResult, BINDER_PUNCH_PER_PIECE, FOLDING_CARD_STOCK_BASE,
    FOLDING_CARD_STOCK_PER_PIECE, FOLDING_TEXT_BASE, FOLDING_TEXT_PER_PIECE,
    HOLE_DRILLING_PER_HOLE, bundle_count, calculate_add_on_cost, design_price,
    resolve_add_on_costs,
};
pub use base_price::{BasePriceResult, calculate_base_price};
pub use broker_discount::calculate_broker_price;
pub use calculate_price::{calculate_price, expected_subtotal};
pub use modifiers::{
    BaseDiscountResult, EXACT_SIZE_MARKUP_PERCENTAGE, MarkupResult, TAGLINE_DISCOUNT_PERCENTAGE,
    apply_base_discount, apply_exact_size_markup, apply_turnaround_markup, decide_discount,
};
pub use validation::{FOLDING_MINIMUM_SIZE, check_add_on_prerequisites, validate_configuration};
