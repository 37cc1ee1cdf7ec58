//! Core data models for the print pricing engine.
//!
//! This module contains the catalog records, the product configuration the
//! engine prices, and the breakdowns it produces.

mod add_on;
mod broker_pricing;
mod catalog;
mod price_calculation;
mod product_configuration;

pub use add_on::{
    AddOn, AddOnConfiguration, BundleOption, Bundling, DesignOption, DesignService,
    DesignServiceType, DesignSides, FlatFeeOption, FoldingOption, FoldingPaperType,
    HoleDrillingOption, HolePattern, HoleType, PostalDeliveryOption, ResolvedAddOns,
    ScoreOnlyOption, SetupPerPieceOption, ToggleOption,
};
pub use broker_pricing::{
    BrokerPriceCalculation, BrokerPricingInput, BrokerProfile, BrokerTier, CategoryDiscount,
};
pub use catalog::{BrokerDiscount, Dimensions, PaperStock, PrintSize, Sides, TurnaroundTime};
pub use price_calculation::{
    AddOnCost, AuditStep, DiscountDecision, DocumentationPriceCalculation, PriceQuote,
};
pub use product_configuration::ProductConfiguration;
