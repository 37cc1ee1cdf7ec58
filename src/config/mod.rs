//! Configuration loading and management for the print pricing engine.
//!
//! This module loads the shop catalog from YAML files: paper stocks, print
//! sizes, turnaround times and the broker program.
//!
//! # Example
//!
//! ```no_run
//! use print_pricing::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/catalog").unwrap();
//! println!("Loaded catalog: {}", config.shop().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BrokerProgram, BrokerTierTerms, CatalogConfig, PaperStocksConfig, PrintSizesConfig,
    ShopMetadata, TurnaroundTimesConfig, VolumeBracket,
};
