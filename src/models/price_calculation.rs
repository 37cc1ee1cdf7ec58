//! Price breakdown models produced by the pricing engine.
//!
//! This module contains [`DocumentationPriceCalculation`], the fully itemised
//! breakdown of a single product line, together with the audit trail and the
//! [`PriceQuote`] envelope used when a breakdown leaves the process.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Sides;

/// A single step in the audit trail recording a pricing decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The cost of one selected add-on.
///
/// `calculation_details` reproduces the arithmetic behind `cost` and is shown
/// verbatim on invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnCost {
    /// The add-on's configuration key (e.g. "perforation").
    pub key: String,
    /// Display name (e.g. "Perforation").
    pub name: String,
    /// The computed cost.
    pub cost: Decimal,
    /// Human-readable trace of the arithmetic.
    pub calculation_details: String,
}

/// The percentage discount chosen for the base price.
///
/// Broker and tagline discounts are mutually exclusive; a broker with an
/// applicable category discount never also receives the tagline discount.
///
/// # Example
///
/// ```
/// use print_pricing::models::DiscountDecision;
/// use rust_decimal::Decimal;
///
/// let decision = DiscountDecision::Broker { percentage: Decimal::new(15, 0) };
/// assert_eq!(decision.percentage(), Decimal::new(15, 0));
/// assert_eq!(DiscountDecision::NoDiscount.percentage(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountDecision {
    /// No discount applies.
    NoDiscount,
    /// The broker's category discount.
    Broker {
        /// Discount percentage.
        percentage: Decimal,
    },
    /// The "Our Tagline" discount.
    Tagline {
        /// Discount percentage.
        percentage: Decimal,
    },
}

impl DiscountDecision {
    /// Returns the discount percentage, or zero when no discount applies.
    pub fn percentage(&self) -> Decimal {
        match self {
            DiscountDecision::NoDiscount => Decimal::ZERO,
            DiscountDecision::Broker { percentage } | DiscountDecision::Tagline { percentage } => {
                *percentage
            }
        }
    }

    /// Returns true if this is a broker discount.
    pub fn is_broker(&self) -> bool {
        matches!(self, DiscountDecision::Broker { .. })
    }

    /// Returns true if this is the tagline discount.
    pub fn is_tagline(&self) -> bool {
        matches!(self, DiscountDecision::Tagline { .. })
    }
}

/// The complete, itemised price of one product configuration.
///
/// Every intermediate value of the pipeline is kept so the breakdown can be
/// displayed or audited. The following always hold:
///
/// - `calculated_product_subtotal_before_shipping_tax == price_after_turnaround + total_addon_cost`
/// - `price_after_turnaround == price_after_base_percentage_modifiers × (1 + turnaround_markup_percentage / 100)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationPriceCalculation {
    /// Number of pieces priced.
    pub quantity: u32,
    /// Width used for pricing.
    pub width: Decimal,
    /// Height used for pricing.
    pub height: Decimal,
    /// `width × height`.
    pub area: Decimal,
    /// The paper stock's price per unit area.
    pub paper_price_per_unit_area: Decimal,
    /// Printed sides.
    pub sides: Sides,
    /// `1` for single-sided, `1 + second_side_markup / 100` for double-sided.
    pub sides_factor: Decimal,
    /// `quantity × area × rate × sides_factor`.
    pub base_paper_print_price: Decimal,
    /// Which percentage discount was applied to the base price.
    pub discount: DiscountDecision,
    /// Whether the broker discount applied.
    pub broker_discount_applied: bool,
    /// Whether the tagline discount applied.
    pub tagline_discount_applied: bool,
    /// Amount taken off the base price by the discount.
    pub discount_amount: Decimal,
    /// Base price after the broker or tagline discount.
    pub adjusted_base_price: Decimal,
    /// Whether the exact-size markup applied.
    pub exact_size_markup_applied: bool,
    /// The exact-size markup percentage (recorded even when not applied).
    pub exact_size_markup_percentage: Decimal,
    /// Adjusted base price after the exact-size markup.
    pub price_after_base_percentage_modifiers: Decimal,
    /// Name of the selected turnaround.
    pub turnaround_name: String,
    /// The turnaround markup percentage (may be zero).
    pub turnaround_markup_percentage: Decimal,
    /// Price after the turnaround markup.
    pub price_after_turnaround: Decimal,
    /// Individual add-on costs in key order.
    pub add_on_costs: Vec<AddOnCost>,
    /// Sum of all add-on costs.
    pub total_addon_cost: Decimal,
    /// `price_after_turnaround + total_addon_cost`.
    pub calculated_product_subtotal_before_shipping_tax: Decimal,
    /// Ordered record of every pricing step.
    pub audit_steps: Vec<AuditStep>,
}

/// A breakdown stamped with an identity for storage or transport.
///
/// The breakdown itself is a pure value; the quote adds the id, time and
/// engine version that make each response distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote<T> {
    /// Unique identifier for this quote.
    pub quote_id: Uuid,
    /// When the quote was produced.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the quote.
    pub engine_version: String,
    /// Time spent computing, in microseconds.
    pub duration_us: u64,
    /// The breakdown being quoted.
    pub calculation: T,
}

impl<T> PriceQuote<T> {
    /// Wraps a breakdown with a fresh id and the current time.
    pub fn new(calculation: T, duration_us: u64) -> Self {
        Self {
            quote_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            duration_us,
            calculation,
        }
    }
}
