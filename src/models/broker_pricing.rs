//! Input and output models for the broker/volume discount calculator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AuditStep;

/// Broker program tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrokerTier {
    /// Entry tier.
    Bronze,
    /// Second tier.
    Silver,
    /// Third tier.
    Gold,
    /// Top tier.
    Platinum,
}

impl BrokerTier {
    /// Returns the wire name of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            BrokerTier::Bronze => "bronze",
            BrokerTier::Silver => "silver",
            BrokerTier::Gold => "gold",
            BrokerTier::Platinum => "platinum",
        }
    }
}

/// A broker's discount for one category, gated by order size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDiscount {
    /// The category the discount applies to.
    pub category_id: String,
    /// Discount off the total base price, as a percentage.
    pub discount_percentage: Decimal,
    /// Smallest order quantity that qualifies.
    #[serde(default)]
    pub minimum_quantity: u32,
}

/// A broker enrolled in the program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerProfile {
    /// The broker's tier.
    pub tier: BrokerTier,
    /// Spend accumulated this year, compared to the tier's annual target.
    #[serde(default)]
    pub annual_volume: Decimal,
    /// Category-specific discounts.
    #[serde(default)]
    pub category_discounts: Vec<CategoryDiscount>,
}

/// Input to the broker/volume discount calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerPricingInput {
    /// Unit price before discounts.
    pub base_price: Decimal,
    /// Number of units ordered.
    pub quantity: u32,
    /// The product's category.
    #[serde(default)]
    pub category_id: Option<String>,
    /// Whether the order is a rush order.
    #[serde(default)]
    pub is_rush: bool,
    /// The broker placing the order, if any.
    #[serde(default)]
    pub broker: Option<BrokerProfile>,
}

/// Breakdown produced by the broker/volume discount calculator.
///
/// `final_price == total_base_price - total_discount + rush_surcharge`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerPriceCalculation {
    /// `base_price × quantity`.
    pub total_base_price: Decimal,
    /// Volume bracket percentage for the quantity.
    pub volume_discount_percentage: Decimal,
    /// Quantity-based discount available to every customer.
    pub volume_discount: Decimal,
    /// The broker's tier, if any.
    pub broker_tier: Option<BrokerTier>,
    /// Tier base discount.
    pub tier_discount: Decimal,
    /// Category discount, zero unless the minimum quantity is met.
    pub category_discount: Decimal,
    /// Bonus from the tier's volume multiplier, applied to tier + category discount.
    pub volume_multiplier_bonus: Decimal,
    /// Bonus earned by progress toward the tier's annual target.
    pub annual_volume_bonus: Decimal,
    /// Sum of all discounts, capped at the total base price.
    pub total_discount: Decimal,
    /// Whether the cap reduced the discount.
    pub discount_capped: bool,
    /// `total_base_price - total_discount`.
    pub discounted_price: Decimal,
    /// Rush surcharge percentage after the tier's rush discount.
    pub rush_surcharge_percentage: Decimal,
    /// Rush surcharge amount.
    pub rush_surcharge: Decimal,
    /// Price after discounts and surcharge.
    pub final_price: Decimal,
    /// Ordered record of every pricing step.
    pub audit_steps: Vec<AuditStep>,
}
