//! Broker and volume discount calculation.
//!
//! This is a separate engine from [`calculate_price`](super::calculate_price).
//! It prices `base_price × quantity` under the broker program: a volume
//! discount every customer receives, tier and category discounts for
//! brokers, two broker bonuses, and a rush surcharge.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::BrokerProgram;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, BrokerPriceCalculation, BrokerPricingInput};

use super::checked::{self, percent_of};

fn validate_input(input: &BrokerPricingInput) -> EngineResult<()> {
    if input.quantity == 0 {
        return Err(EngineError::invalid("quantity", "must be at least 1"));
    }
    if input.base_price < Decimal::ZERO {
        return Err(EngineError::invalid(
            "base_price",
            format!("must not be negative (got {})", input.base_price),
        ));
    }
    if let Some(broker) = &input.broker {
        if broker.annual_volume < Decimal::ZERO {
            return Err(EngineError::invalid(
                "broker.annual_volume",
                format!("must not be negative (got {})", broker.annual_volume),
            ));
        }
    }
    Ok(())
}

struct BrokerDiscounts {
    tier: Decimal,
    category: Decimal,
    volume_multiplier_bonus: Decimal,
    annual_volume_bonus: Decimal,
    rush_discount_percentage: Decimal,
}

/// Calculates a broker/volume discounted price.
///
/// # Errors
///
/// Returns `InvalidConfiguration` for a zero quantity or negative amounts,
/// `CatalogEntryNotFound` when the broker's tier has no terms in the
/// program, and `CalculationError` when an amount overflows.
///
/// # Examples
///
/// ```no_run
/// use print_pricing::calculation::calculate_broker_price;
/// use print_pricing::config::ConfigLoader;
/// use print_pricing::models::BrokerPricingInput;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/catalog")?;
/// let input = BrokerPricingInput {
///     base_price: Decimal::new(50, 2),
///     quantity: 1000,
///     category_id: None,
///     is_rush: false,
///     broker: None,
/// };
///
/// let result = calculate_broker_price(&input, loader.broker_program())?;
/// assert_eq!(result.final_price, Decimal::from(460));
/// # Ok::<(), print_pricing::error::EngineError>(())
/// ```
pub fn calculate_broker_price(
    input: &BrokerPricingInput,
    program: &BrokerProgram,
) -> EngineResult<BrokerPriceCalculation> {
    validate_input(input)?;

    let mut audit_steps: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    let total_base_price =
        checked::mul(input.base_price, Decimal::from(input.quantity), "total base price")?;
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "total_base_price".to_string(),
        rule_name: "Total Base Price".to_string(),
        input: serde_json::json!({
            "base_price": input.base_price.normalize().to_string(),
            "quantity": input.quantity
        }),
        output: serde_json::json!({
            "total_base_price": total_base_price.normalize().to_string()
        }),
        reasoning: format!(
            "${} × {} units = ${}",
            input.base_price.normalize(),
            input.quantity,
            total_base_price.normalize()
        ),
    });
    step_number += 1;

    let volume_discount_percentage = program.volume_discount_percentage(input.quantity);
    let volume_discount =
        percent_of(total_base_price, volume_discount_percentage, "volume discount")?;
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "volume_discount".to_string(),
        rule_name: "Volume Discount".to_string(),
        input: serde_json::json!({
            "quantity": input.quantity,
            "total_base_price": total_base_price.normalize().to_string()
        }),
        output: serde_json::json!({
            "volume_discount_percentage": volume_discount_percentage.normalize().to_string(),
            "volume_discount": volume_discount.normalize().to_string()
        }),
        reasoning: format!(
            "{} units qualifies for {}%: ${}",
            input.quantity,
            volume_discount_percentage.normalize(),
            volume_discount.normalize()
        ),
    });
    step_number += 1;

    let broker = match &input.broker {
        Some(profile) => {
            let terms = program.tier_terms(profile.tier)?;

            let tier =
                percent_of(total_base_price, terms.base_discount_percentage, "tier discount")?;

            let category_entry = input.category_id.as_deref().and_then(|category_id| {
                profile
                    .category_discounts
                    .iter()
                    .find(|c| c.category_id == category_id)
            });
            let category = match category_entry {
                Some(entry) if input.quantity >= entry.minimum_quantity => percent_of(
                    total_base_price,
                    entry.discount_percentage,
                    "category discount",
                )?,
                _ => Decimal::ZERO,
            };

            let multiplier_earned = input.quantity >= terms.volume_multiplier_min_quantity;
            let volume_multiplier_bonus = if multiplier_earned {
                checked::mul(
                    checked::add(tier, category, "volume multiplier bonus")?,
                    checked::sub(terms.volume_multiplier, Decimal::ONE, "volume multiplier bonus")?,
                    "volume multiplier bonus",
                )?
            } else {
                Decimal::ZERO
            };

            let progress = if terms.annual_volume_target > Decimal::ZERO {
                checked::div(
                    profile.annual_volume,
                    terms.annual_volume_target,
                    "annual volume progress",
                )?
                .min(Decimal::ONE)
            } else {
                Decimal::ZERO
            };
            let annual_volume_bonus = checked::mul(
                percent_of(
                    total_base_price,
                    terms.annual_bonus_percentage,
                    "annual volume bonus",
                )?,
                progress,
                "annual volume bonus",
            )?;

            audit_steps.push(AuditStep {
                step_number,
                rule_id: "broker_tier_discount".to_string(),
                rule_name: "Broker Tier Discount".to_string(),
                input: serde_json::json!({
                    "tier": profile.tier,
                    "base_discount_percentage": terms.base_discount_percentage.normalize().to_string()
                }),
                output: serde_json::json!({
                    "tier_discount": tier.normalize().to_string()
                }),
                reasoning: format!(
                    "{} tier: {}% of ${} = ${}",
                    profile.tier.as_str(),
                    terms.base_discount_percentage.normalize(),
                    total_base_price.normalize(),
                    tier.normalize()
                ),
            });
            step_number += 1;

            let category_reasoning = match category_entry {
                Some(entry) if input.quantity >= entry.minimum_quantity => format!(
                    "Category '{}': {}% of ${} = ${}",
                    entry.category_id,
                    entry.discount_percentage.normalize(),
                    total_base_price.normalize(),
                    category.normalize()
                ),
                Some(entry) => format!(
                    "Category '{}' requires {} units, order has {}",
                    entry.category_id, entry.minimum_quantity, input.quantity
                ),
                None => "No category discount for this product".to_string(),
            };
            audit_steps.push(AuditStep {
                step_number,
                rule_id: "broker_category_discount".to_string(),
                rule_name: "Broker Category Discount".to_string(),
                input: serde_json::json!({
                    "category_id": input.category_id,
                    "quantity": input.quantity
                }),
                output: serde_json::json!({
                    "category_discount": category.normalize().to_string()
                }),
                reasoning: category_reasoning,
            });
            step_number += 1;

            audit_steps.push(AuditStep {
                step_number,
                rule_id: "volume_multiplier_bonus".to_string(),
                rule_name: "Volume Multiplier Bonus".to_string(),
                input: serde_json::json!({
                    "volume_multiplier": terms.volume_multiplier.normalize().to_string(),
                    "min_quantity": terms.volume_multiplier_min_quantity,
                    "quantity": input.quantity
                }),
                output: serde_json::json!({
                    "applied": multiplier_earned,
                    "volume_multiplier_bonus": volume_multiplier_bonus.normalize().to_string()
                }),
                reasoning: if multiplier_earned {
                    format!(
                        "(${} + ${}) × ({} - 1) = ${}",
                        tier.normalize(),
                        category.normalize(),
                        terms.volume_multiplier.normalize(),
                        volume_multiplier_bonus.normalize()
                    )
                } else {
                    format!(
                        "{} units is below the {} unit multiplier threshold",
                        input.quantity, terms.volume_multiplier_min_quantity
                    )
                },
            });
            step_number += 1;

            audit_steps.push(AuditStep {
                step_number,
                rule_id: "annual_volume_bonus".to_string(),
                rule_name: "Annual Volume Bonus".to_string(),
                input: serde_json::json!({
                    "annual_volume": profile.annual_volume.normalize().to_string(),
                    "annual_volume_target": terms.annual_volume_target.normalize().to_string(),
                    "annual_bonus_percentage": terms.annual_bonus_percentage.normalize().to_string()
                }),
                output: serde_json::json!({
                    "progress": progress.normalize().to_string(),
                    "annual_volume_bonus": annual_volume_bonus.normalize().to_string()
                }),
                reasoning: format!(
                    "{}% of ${} × {} progress = ${}",
                    terms.annual_bonus_percentage.normalize(),
                    total_base_price.normalize(),
                    progress.normalize(),
                    annual_volume_bonus.normalize()
                ),
            });
            step_number += 1;

            Some(BrokerDiscounts {
                tier,
                category,
                volume_multiplier_bonus,
                annual_volume_bonus,
                rush_discount_percentage: terms.rush_discount_percentage,
            })
        }
        None => None,
    };

    let broker_total = match &broker {
        Some(b) => [b.category, b.volume_multiplier_bonus, b.annual_volume_bonus]
            .into_iter()
            .try_fold(b.tier, |sum, amount| {
                checked::add(sum, amount, "broker discounts")
            })?,
        None => Decimal::ZERO,
    };
    let uncapped_discount = checked::add(volume_discount, broker_total, "total discount")?;
    let discount_capped = uncapped_discount > total_base_price;
    let total_discount = uncapped_discount.min(total_base_price);
    let discounted_price =
        checked::sub(total_base_price, total_discount, "discounted price")?;

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "total_discount".to_string(),
        rule_name: "Total Discount".to_string(),
        input: serde_json::json!({
            "volume_discount": volume_discount.normalize().to_string(),
            "broker_discounts": broker_total.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_discount": total_discount.normalize().to_string(),
            "discount_capped": discount_capped,
            "discounted_price": discounted_price.normalize().to_string()
        }),
        reasoning: if discount_capped {
            format!(
                "Discounts of ${} capped at the total of ${}",
                uncapped_discount.normalize(),
                total_base_price.normalize()
            )
        } else {
            format!(
                "${} - ${} = ${}",
                total_base_price.normalize(),
                total_discount.normalize(),
                discounted_price.normalize()
            )
        },
    });
    step_number += 1;

    let rush_surcharge_percentage = if input.is_rush {
        let reduction = broker
            .as_ref()
            .map_or(Decimal::ZERO, |b| b.rush_discount_percentage);
        checked::sub(
            program.rush_surcharge_percentage,
            reduction,
            "rush surcharge percentage",
        )?
        .max(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };
    let rush_surcharge =
        percent_of(discounted_price, rush_surcharge_percentage, "rush surcharge")?;
    let final_price = checked::add(discounted_price, rush_surcharge, "final price")?;

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "rush_surcharge".to_string(),
        rule_name: "Rush Surcharge".to_string(),
        input: serde_json::json!({
            "is_rush": input.is_rush,
            "discounted_price": discounted_price.normalize().to_string()
        }),
        output: serde_json::json!({
            "rush_surcharge_percentage": rush_surcharge_percentage.normalize().to_string(),
            "rush_surcharge": rush_surcharge.normalize().to_string(),
            "final_price": final_price.normalize().to_string()
        }),
        reasoning: if input.is_rush {
            format!(
                "${} × {}% rush = ${}, final ${}",
                discounted_price.normalize(),
                rush_surcharge_percentage.normalize(),
                rush_surcharge.normalize(),
                final_price.normalize()
            )
        } else {
            "Not a rush order".to_string()
        },
    });

    debug!(
        quantity = input.quantity,
        broker_tier = ?input.broker.as_ref().map(|b| b.tier),
        total_discount = %total_discount,
        final_price = %final_price,
        "Calculated broker price"
    );

    let (tier_discount, category_discount, volume_multiplier_bonus, annual_volume_bonus) =
        broker.as_ref().map_or(
            (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
            |b| {
                (
                    b.tier,
                    b.category,
                    b.volume_multiplier_bonus,
                    b.annual_volume_bonus,
                )
            },
        );

    Ok(BrokerPriceCalculation {
        total_base_price,
        volume_discount_percentage,
        volume_discount,
        broker_tier: input.broker.as_ref().map(|b| b.tier),
        tier_discount,
        category_discount,
        volume_multiplier_bonus,
        annual_volume_bonus,
        total_discount,
        discount_capped,
        discounted_price,
        rush_surcharge_percentage,
        rush_surcharge,
        final_price,
        audit_steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BrokerTierTerms, ConfigLoader, VolumeBracket};
    use crate::models::{BrokerProfile, BrokerTier, CategoryDiscount};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn program() -> BrokerProgram {
        ConfigLoader::load("./config/catalog")
            .expect("Failed to load config")
            .broker_program()
            .clone()
    }

    fn create_input(base_price: &str, quantity: u32) -> BrokerPricingInput {
        BrokerPricingInput {
            base_price: dec(base_price),
            quantity,
            category_id: None,
            is_rush: false,
            broker: None,
        }
    }

    fn broker(tier: BrokerTier) -> BrokerProfile {
        BrokerProfile {
            tier,
            annual_volume: Decimal::ZERO,
            category_discounts: vec![],
        }
    }

    /// BD-001: retail customers still get the volume bracket
    #[test]
    fn test_volume_discount_for_non_broker() {
        let result = calculate_broker_price(&create_input("0.50", 1000), &program()).unwrap();

        assert_eq!(result.total_base_price, dec("500"));
        assert_eq!(result.volume_discount_percentage, dec("8"));
        assert_eq!(result.volume_discount, dec("40"));
        assert_eq!(result.broker_tier, None);
        assert_eq!(result.final_price, dec("460"));
    }

    #[test]
    fn test_bracket_boundaries() {
        let program = program();
        assert_eq!(program.volume_discount_percentage(99), dec("0"));
        assert_eq!(program.volume_discount_percentage(100), dec("2"));
        assert_eq!(program.volume_discount_percentage(2499), dec("8"));
        assert_eq!(program.volume_discount_percentage(25000), dec("18"));
        assert_eq!(program.volume_discount_percentage(1_000_000), dec("18"));
    }

    /// BD-002: platinum broker with every component
    #[test]
    fn test_platinum_broker_full_breakdown() {
        let mut input = create_input("0.50", 1000);
        input.category_id = Some("flyers".to_string());
        input.broker = Some(BrokerProfile {
            tier: BrokerTier::Platinum,
            annual_volume: dec("50000"),
            category_discounts: vec![CategoryDiscount {
                category_id: "flyers".to_string(),
                discount_percentage: dec("3"),
                minimum_quantity: 500,
            }],
        });

        let result = calculate_broker_price(&input, &program()).unwrap();

        assert_eq!(result.volume_discount, dec("40"));
        assert_eq!(result.tier_discount, dec("100"));
        assert_eq!(result.category_discount, dec("15"));
        // (100 + 15) × 0.25
        assert_eq!(result.volume_multiplier_bonus, dec("28.75"));
        // 5% of 500 × 0.5 progress
        assert_eq!(result.annual_volume_bonus, dec("12.5"));
        assert_eq!(result.total_discount, dec("196.25"));
        assert!(!result.discount_capped);
        assert_eq!(result.final_price, dec("303.75"));
    }

    #[test]
    fn test_category_minimum_quantity_not_met() {
        let mut input = create_input("1.00", 100);
        input.category_id = Some("flyers".to_string());
        input.broker = Some(BrokerProfile {
            category_discounts: vec![CategoryDiscount {
                category_id: "flyers".to_string(),
                discount_percentage: dec("3"),
                minimum_quantity: 500,
            }],
            ..broker(BrokerTier::Silver)
        });

        let result = calculate_broker_price(&input, &program()).unwrap();

        assert_eq!(result.category_discount, Decimal::ZERO);
        assert_eq!(result.tier_discount, dec("10"));
    }

    #[test]
    fn test_multiplier_below_threshold() {
        let mut input = create_input("1.00", 999);
        input.broker = Some(broker(BrokerTier::Gold));

        let result = calculate_broker_price(&input, &program()).unwrap();

        assert_eq!(result.volume_multiplier_bonus, Decimal::ZERO);
    }

    #[test]
    fn test_annual_bonus_progress_is_capped_at_target() {
        let mut input = create_input("1.00", 100);
        input.broker = Some(BrokerProfile {
            annual_volume: dec("30000"),
            ..broker(BrokerTier::Bronze)
        });

        let result = calculate_broker_price(&input, &program()).unwrap();

        // Bronze target is 10000; 1% of 100 at full progress
        assert_eq!(result.annual_volume_bonus, dec("1"));
    }

    /// BD-003: gold tier reduces the rush surcharge by 10 points
    #[test]
    fn test_rush_surcharge_reduced_by_tier() {
        let mut input = create_input("1.00", 100);
        input.is_rush = true;
        input.broker = Some(broker(BrokerTier::Gold));

        let result = calculate_broker_price(&input, &program()).unwrap();

        assert_eq!(result.discounted_price, dec("83"));
        assert_eq!(result.rush_surcharge_percentage, dec("5"));
        assert_eq!(result.rush_surcharge, dec("4.15"));
        assert_eq!(result.final_price, dec("87.15"));
    }

    #[test]
    fn test_platinum_rush_is_free() {
        let mut input = create_input("1.00", 100);
        input.is_rush = true;
        input.broker = Some(broker(BrokerTier::Platinum));

        let result = calculate_broker_price(&input, &program()).unwrap();

        assert_eq!(result.rush_surcharge_percentage, Decimal::ZERO);
        assert_eq!(result.rush_surcharge, Decimal::ZERO);
    }

    #[test]
    fn test_non_broker_rush_pays_full_surcharge() {
        let mut input = create_input("2.00", 50);
        input.is_rush = true;

        let result = calculate_broker_price(&input, &program()).unwrap();

        assert_eq!(result.rush_surcharge_percentage, dec("15"));
        assert_eq!(result.final_price, dec("115"));
    }

    #[test]
    fn test_total_discount_is_capped() {
        let program = BrokerProgram::new(
            dec("15"),
            vec![VolumeBracket {
                min_quantity: 1,
                discount_percentage: dec("50"),
            }],
            vec![BrokerTierTerms {
                tier: BrokerTier::Gold,
                base_discount_percentage: dec("60"),
                rush_discount_percentage: dec("0"),
                volume_multiplier: dec("1"),
                volume_multiplier_min_quantity: 1,
                annual_volume_target: dec("0"),
                annual_bonus_percentage: dec("0"),
            }],
        );
        let mut input = create_input("1.00", 10);
        input.broker = Some(broker(BrokerTier::Gold));

        let result = calculate_broker_price(&input, &program).unwrap();

        assert!(result.discount_capped);
        assert_eq!(result.total_discount, dec("10"));
        assert_eq!(result.final_price, Decimal::ZERO);
    }

    #[test]
    fn test_final_price_invariant() {
        let mut input = create_input("0.35", 2500);
        input.is_rush = true;
        input.broker = Some(broker(BrokerTier::Silver));

        let result = calculate_broker_price(&input, &program()).unwrap();

        assert_eq!(
            result.final_price,
            result.total_base_price - result.total_discount + result.rush_surcharge
        );
        assert_eq!(result.audit_steps.len(), 8);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let err = calculate_broker_price(&create_input("1.00", 0), &program()).unwrap_err();
        assert!(err.is_configuration_error());
    }

    /// BD-004: a unit price beyond the decimal range is an error
    #[test]
    fn test_overflowing_total_is_calculation_error() {
        let input = create_input("10000000000000000000000000", 100_000);

        match calculate_broker_price(&input, &program()) {
            Err(EngineError::CalculationError { message }) => {
                assert!(message.contains("total base price"))
            }
            other => panic!("Expected CalculationError, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_category_discount_is_calculation_error() {
        let mut input = create_input("1000000000000000000000", 1000);
        input.category_id = Some("flyers".to_string());
        input.broker = Some(BrokerProfile {
            tier: BrokerTier::Silver,
            annual_volume: Decimal::ZERO,
            category_discounts: vec![CategoryDiscount {
                category_id: "flyers".to_string(),
                discount_percentage: dec("1000000000000000000000"),
                minimum_quantity: 1,
            }],
        });

        let err = calculate_broker_price(&input, &program()).unwrap_err();
        assert!(matches!(err, EngineError::CalculationError { .. }));
    }

    #[test]
    fn test_unknown_tier_terms() {
        let program = BrokerProgram::new(dec("15"), vec![], vec![]);
        let mut input = create_input("1.00", 10);
        input.broker = Some(broker(BrokerTier::Gold));

        match calculate_broker_price(&input, &program) {
            Err(EngineError::CatalogEntryNotFound { kind, id }) => {
                assert_eq!(kind, "Broker tier");
                assert_eq!(id, "gold");
            }
            other => panic!("Expected CatalogEntryNotFound error, got {:?}", other),
        }
    }
}
