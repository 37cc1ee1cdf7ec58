//! Configuration types for the print shop catalog.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{BrokerTier, PaperStock, PrintSize, TurnaroundTime};

/// Metadata about the shop whose catalog is loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopMetadata {
    /// Short code for the shop.
    pub code: String,
    /// The human-readable name of the shop.
    pub name: String,
    /// The catalog version or effective date.
    pub version: String,
    /// ISO currency code used for all prices.
    pub currency: String,
}

/// Paper stocks configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PaperStocksConfig {
    /// Available paper stocks.
    pub paper_stocks: Vec<PaperStock>,
}

/// Print sizes configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PrintSizesConfig {
    /// Available print sizes.
    pub print_sizes: Vec<PrintSize>,
}

/// Turnaround times configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TurnaroundTimesConfig {
    /// Available turnaround times.
    pub turnaround_times: Vec<TurnaroundTime>,
}

/// One bracket of the volume discount schedule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VolumeBracket {
    /// Smallest quantity in the bracket.
    pub min_quantity: u32,
    /// Discount percentage for quantities in the bracket.
    pub discount_percentage: Decimal,
}

/// Terms of one broker tier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BrokerTierTerms {
    /// The tier these terms belong to.
    pub tier: BrokerTier,
    /// Discount off the total base price, as a percentage.
    pub base_discount_percentage: Decimal,
    /// Percentage points taken off the rush surcharge.
    pub rush_discount_percentage: Decimal,
    /// Multiplier applied to tier + category discounts on large orders.
    pub volume_multiplier: Decimal,
    /// Smallest order quantity that earns the multiplier.
    pub volume_multiplier_min_quantity: u32,
    /// Annual spend the tier targets.
    pub annual_volume_target: Decimal,
    /// Bonus percentage earned at 100% of the annual target.
    pub annual_bonus_percentage: Decimal,
}

/// The broker/volume discount program.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BrokerProgram {
    /// Rush surcharge before any tier reduction, as a percentage.
    pub rush_surcharge_percentage: Decimal,
    /// Volume discount schedule (sorted by `min_quantity` on construction).
    pub volume_brackets: Vec<VolumeBracket>,
    /// Terms for each tier.
    pub tiers: Vec<BrokerTierTerms>,
}

impl BrokerProgram {
    /// Creates a program, sorting the volume brackets by minimum quantity.
    pub fn new(
        rush_surcharge_percentage: Decimal,
        volume_brackets: Vec<VolumeBracket>,
        tiers: Vec<BrokerTierTerms>,
    ) -> Self {
        let mut program = Self {
            rush_surcharge_percentage,
            volume_brackets,
            tiers,
        };
        program.normalize();
        program
    }

    pub(crate) fn normalize(&mut self) {
        self.volume_brackets.sort_by_key(|b| b.min_quantity);
    }

    /// Returns the volume discount percentage for a quantity.
    ///
    /// The bracket with the largest `min_quantity` not above `quantity` wins;
    /// quantities below every bracket get no discount.
    pub fn volume_discount_percentage(&self, quantity: u32) -> Decimal {
        self.volume_brackets
            .iter()
            .rfind(|b| b.min_quantity <= quantity)
            .map(|b| b.discount_percentage)
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns the terms for a tier.
    pub fn tier_terms(&self, tier: BrokerTier) -> EngineResult<&BrokerTierTerms> {
        self.tiers
            .iter()
            .find(|t| t.tier == tier)
            .ok_or_else(|| EngineError::CatalogEntryNotFound {
                kind: "Broker tier".to_string(),
                id: tier.as_str().to_string(),
            })
    }
}

/// The complete catalog configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    metadata: ShopMetadata,
    paper_stocks: Vec<PaperStock>,
    print_sizes: Vec<PrintSize>,
    turnaround_times: Vec<TurnaroundTime>,
    broker_program: BrokerProgram,
}

impl CatalogConfig {
    /// Creates a new CatalogConfig from its component parts.
    pub fn new(
        metadata: ShopMetadata,
        paper_stocks: Vec<PaperStock>,
        print_sizes: Vec<PrintSize>,
        turnaround_times: Vec<TurnaroundTime>,
        broker_program: BrokerProgram,
    ) -> Self {
        let mut broker_program = broker_program;
        broker_program.normalize();
        Self {
            metadata,
            paper_stocks,
            print_sizes,
            turnaround_times,
            broker_program,
        }
    }

    /// Returns the shop metadata.
    pub fn shop(&self) -> &ShopMetadata {
        &self.metadata
    }

    /// Returns all paper stocks.
    pub fn paper_stocks(&self) -> &[PaperStock] {
        &self.paper_stocks
    }

    /// Returns all print sizes.
    pub fn print_sizes(&self) -> &[PrintSize] {
        &self.print_sizes
    }

    /// Returns all turnaround times.
    pub fn turnaround_times(&self) -> &[TurnaroundTime] {
        &self.turnaround_times
    }

    /// Returns the broker program.
    pub fn broker_program(&self) -> &BrokerProgram {
        &self.broker_program
    }
}
