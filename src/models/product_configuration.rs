//! The input aggregate priced by the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    AddOnConfiguration, BrokerDiscount, Dimensions, PaperStock, PrintSize, Sides, TurnaroundTime,
};

/// Everything needed to price one product line.
///
/// Catalog records are held by value; the engine never mutates the
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductConfiguration {
    /// The selected paper stock.
    pub paper_stock: PaperStock,
    /// The selected print size.
    pub print_size: PrintSize,
    /// Caller-supplied dimensions; required when `print_size.is_custom`.
    #[serde(default)]
    pub custom_dimensions: Option<Dimensions>,
    /// Number of pieces ordered.
    pub quantity: u32,
    /// Printed sides.
    pub sides: Sides,
    /// The selected turnaround.
    pub turnaround_time: TurnaroundTime,
    /// Add-on selections.
    #[serde(default)]
    pub add_ons: AddOnConfiguration,
    /// Whether the customer is a broker.
    #[serde(default)]
    pub is_broker: bool,
    /// The broker's per-category discounts.
    #[serde(default)]
    pub broker_discounts: Vec<BrokerDiscount>,
    /// The product's category.
    #[serde(default)]
    pub category_id: Option<String>,
}

impl ProductConfiguration {
    /// Returns the dimensions used for pricing.
    ///
    /// Custom sizes use `custom_dimensions` when present; everything else uses
    /// the catalog size. Returns `None` for a custom size without dimensions.
    pub fn effective_dimensions(&self) -> Option<Dimensions> {
        if self.print_size.is_custom {
            self.custom_dimensions
        } else {
            Some(self.print_size.dimensions())
        }
    }

    /// Returns the broker discount percentage that applies to this order.
    ///
    /// Only brokers qualify, and only when an entry's `category_id` matches
    /// the order's category. The first matching entry wins.
    pub fn applicable_broker_discount(&self) -> Option<Decimal> {
        if !self.is_broker {
            return None;
        }
        let category_id = self.category_id.as_deref()?;
        self.broker_discounts
            .iter()
            .find(|d| d.category_id == category_id)
            .map(|d| d.discount_percentage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_configuration() -> ProductConfiguration {
        ProductConfiguration {
            paper_stock: PaperStock {
                id: "16pt".to_string(),
                name: "16pt Cardstock".to_string(),
                price_per_unit_area: dec("0.008"),
                second_side_markup_percentage: dec("30"),
            },
            print_size: PrintSize {
                id: "business_card".to_string(),
                name: "3.5 x 2".to_string(),
                width: dec("3.5"),
                height: dec("2"),
                is_custom: false,
            },
            custom_dimensions: None,
            quantity: 500,
            sides: Sides::Double,
            turnaround_time: TurnaroundTime {
                id: "standard".to_string(),
                name: "Standard".to_string(),
                markup_percentage: Decimal::ZERO,
                business_days: 5,
            },
            add_ons: AddOnConfiguration::default(),
            is_broker: true,
            broker_discounts: vec![
                BrokerDiscount {
                    category_id: "flyers".to_string(),
                    discount_percentage: dec("10"),
                },
                BrokerDiscount {
                    category_id: "business_cards".to_string(),
                    discount_percentage: dec("20"),
                },
                BrokerDiscount {
                    category_id: "business_cards".to_string(),
                    discount_percentage: dec("35"),
                },
            ],
            category_id: Some("business_cards".to_string()),
        }
    }

    #[test]
    fn test_catalog_dimensions_for_standard_size() {
        let config = create_test_configuration();
        assert_eq!(config.effective_dimensions().unwrap().area().unwrap(), dec("7.0"));
    }

    #[test]
    fn test_custom_dimensions_override_catalog() {
        let mut config = create_test_configuration();
        config.print_size.is_custom = true;
        config.custom_dimensions = Some(Dimensions {
            width: dec("4"),
            height: dec("6"),
        });
        assert_eq!(config.effective_dimensions().unwrap().area().unwrap(), dec("24"));
    }

    #[test]
    fn test_custom_size_without_dimensions() {
        let mut config = create_test_configuration();
        config.print_size.is_custom = true;
        assert!(config.effective_dimensions().is_none());
    }

    #[test]
    fn test_first_matching_broker_discount_wins() {
        let config = create_test_configuration();
        assert_eq!(config.applicable_broker_discount(), Some(dec("20")));
    }

    #[test]
    fn test_non_broker_never_gets_broker_discount() {
        let mut config = create_test_configuration();
        config.is_broker = false;
        assert_eq!(config.applicable_broker_discount(), None);
    }

    #[test]
    fn test_broker_without_matching_category() {
        let mut config = create_test_configuration();
        config.category_id = Some("banners".to_string());
        assert_eq!(config.applicable_broker_discount(), None);

        config.category_id = None;
        assert_eq!(config.applicable_broker_discount(), None);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "paper_stock": {
                "id": "100lb_gloss_text",
                "name": "100lb Gloss Text",
                "price_per_unit_area": "0.0045",
                "second_side_markup_percentage": "25"
            },
            "print_size": {"id": "flyer", "name": "8.5 x 11", "width": "8.5", "height": "11"},
            "quantity": 1000,
            "sides": "single",
            "turnaround_time": {
                "id": "standard",
                "name": "Standard",
                "markup_percentage": "0",
                "business_days": 5
            }
        }"#;

        let config: ProductConfiguration = serde_json::from_str(json).unwrap();
        assert_eq!(config.quantity, 1000);
        assert!(!config.is_broker);
        assert!(config.broker_discounts.is_empty());
        assert_eq!(config.add_ons, AddOnConfiguration::default());
    }
}
