//! Catalog reference records consumed by the pricing engine.
//!
//! Paper stocks, print sizes, turnaround times and broker discounts are owned
//! by the catalog and are read-only to the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A paper stock with its area rate and double-sided markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperStock {
    /// Unique identifier for the paper stock.
    pub id: String,
    /// Display name (e.g. "16pt C2S Cardstock").
    pub name: String,
    /// Price per square unit of printed area.
    pub price_per_unit_area: Decimal,
    /// Markup applied when printing both sides, as a percentage.
    pub second_side_markup_percentage: Decimal,
}

impl PaperStock {
    /// Returns the multiplier applied to the base price for the given sides.
    ///
    /// Single-sided printing is always `1`. Double-sided printing is
    /// `1 + second_side_markup_percentage / 100`, so a stock with a 30%
    /// markup yields `1.3`.
    ///
    /// # Examples
    ///
    /// ```
    /// use print_pricing::models::{PaperStock, Sides};
    /// use rust_decimal::Decimal;
    ///
    /// let stock = PaperStock {
    ///     id: "16pt".to_string(),
    ///     name: "16pt Cardstock".to_string(),
    ///     price_per_unit_area: Decimal::new(8, 3),
    ///     second_side_markup_percentage: Decimal::new(30, 0),
    /// };
    /// assert_eq!(stock.sides_factor(Sides::Single), Decimal::ONE);
    /// assert_eq!(stock.sides_factor(Sides::Double), Decimal::new(13, 1));
    /// ```
    pub fn sides_factor(&self, sides: Sides) -> Decimal {
        match sides {
            Sides::Single => Decimal::ONE,
            Sides::Double => {
                Decimal::ONE + self.second_side_markup_percentage / Decimal::ONE_HUNDRED
            }
        }
    }
}

/// Width and height of a printed piece, in the catalog's linear unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width of the piece.
    pub width: Decimal,
    /// Height of the piece.
    pub height: Decimal,
}

impl Dimensions {
    /// Returns `width × height`.
    ///
    /// Fails with a `CalculationError` when the product does not fit in a
    /// `Decimal`.
    pub fn area(&self) -> EngineResult<Decimal> {
        self.width
            .checked_mul(self.height)
            .ok_or_else(|| EngineError::overflow("area"))
    }

    /// Returns true if the piece covers `min` in either orientation.
    pub fn fits_minimum(&self, min: &Dimensions) -> bool {
        (self.width >= min.width && self.height >= min.height)
            || (self.width >= min.height && self.height >= min.width)
    }
}

/// A print size offered by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintSize {
    /// Unique identifier for the size.
    pub id: String,
    /// Display name (e.g. "3.5 x 2").
    pub name: String,
    /// Catalog width. Ignored for custom sizes.
    pub width: Decimal,
    /// Catalog height. Ignored for custom sizes.
    pub height: Decimal,
    /// Whether the caller supplies the dimensions.
    #[serde(default)]
    pub is_custom: bool,
}

impl PrintSize {
    /// Returns the catalog dimensions of this size.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }
}

/// A production speed option and its markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnaroundTime {
    /// Unique identifier for the turnaround.
    pub id: String,
    /// Display name (e.g. "Rush").
    pub name: String,
    /// Markup applied to the modified base price, as a percentage. May be zero.
    pub markup_percentage: Decimal,
    /// Lead time in business days.
    pub business_days: u32,
}

/// A broker's discount for one product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerDiscount {
    /// The category the discount applies to.
    pub category_id: String,
    /// Discount off the base paper/print price, as a percentage.
    pub discount_percentage: Decimal,
}

/// Which sides of the sheet are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sides {
    /// Front only.
    Single,
    /// Front and back.
    Double,
}

impl Sides {
    /// Returns the wire name of the variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sides::Single => "single",
            Sides::Double => "double",
        }
    }
}
