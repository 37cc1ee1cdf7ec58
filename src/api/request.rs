//! Request types for the print pricing API.
//!
//! The `/calculate` endpoint takes catalog ids rather than full catalog
//! records; [`PriceRequest::into_configuration`] looks them up in the loaded
//! catalog. The `/calculate/broker` endpoint takes a
//! [`BrokerPricingInput`](crate::models::BrokerPricingInput) as-is.

use serde::{Deserialize, Serialize};

use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::models::{AddOnConfiguration, BrokerDiscount, Dimensions, ProductConfiguration, Sides};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRequest {
    /// Paper stock id (e.g. "16pt_c2s").
    pub paper_stock_id: String,
    /// Print size id (e.g. "business_card" or "custom").
    pub print_size_id: String,
    /// Dimensions for the custom print size.
    #[serde(default)]
    pub custom_dimensions: Option<Dimensions>,
    /// Number of pieces.
    pub quantity: u32,
    /// Printed sides.
    pub sides: Sides,
    /// Turnaround id (e.g. "standard").
    pub turnaround_id: String,
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

impl PriceRequest {
    /// Resolves the catalog ids into a [`ProductConfiguration`].
    ///
    /// Fails with `CatalogEntryNotFound` for an unknown id.
    pub fn into_configuration(self, loader: &ConfigLoader) -> EngineResult<ProductConfiguration> {
        Ok(ProductConfiguration {
            paper_stock: loader.get_paper_stock(&self.paper_stock_id)?.clone(),
            print_size: loader.get_print_size(&self.print_size_id)?.clone(),
            custom_dimensions: self.custom_dimensions,
            quantity: self.quantity,
            sides: self.sides,
            turnaround_time: loader.get_turnaround_time(&self.turnaround_id)?.clone(),
            add_ons: self.add_ons,
            is_broker: self.is_broker,
            broker_discounts: self.broker_discounts,
            category_id: self.category_id,
        })
    }
}
