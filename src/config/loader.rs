//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the print shop
//! catalog from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{PaperStock, PrintSize, TurnaroundTime};

use super::types::{
    BrokerProgram, CatalogConfig, PaperStocksConfig, PrintSizesConfig, ShopMetadata,
    TurnaroundTimesConfig,
};

/// Loads and provides access to the catalog configuration.
///
/// # Directory Structure
///
/// ```text
/// config/catalog/
/// ├── shop.yaml              # Shop metadata
/// ├── paper_stocks.yaml      # Paper stocks and their area rates
/// ├── print_sizes.yaml       # Standard and custom print sizes
/// ├── turnaround_times.yaml  # Turnaround options and markups
/// └── broker_program.yaml    # Broker tiers and volume brackets
/// ```
///
/// # Example
///
/// ```no_run
/// use print_pricing::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/catalog")?;
/// let stock = loader.get_paper_stock("16pt_c2s")?;
/// println!("{} at ${}/sq in", stock.name, stock.price_per_unit_area);
/// # Ok::<(), print_pricing::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: CatalogConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<ShopMetadata>(&path.join("shop.yaml"))?;
        let paper_stocks = Self::load_yaml::<PaperStocksConfig>(&path.join("paper_stocks.yaml"))?;
        let print_sizes = Self::load_yaml::<PrintSizesConfig>(&path.join("print_sizes.yaml"))?;
        let turnaround_times =
            Self::load_yaml::<TurnaroundTimesConfig>(&path.join("turnaround_times.yaml"))?;
        let broker_program = Self::load_yaml::<BrokerProgram>(&path.join("broker_program.yaml"))?;

        debug!(
            shop = %metadata.code,
            paper_stocks = paper_stocks.paper_stocks.len(),
            print_sizes = print_sizes.print_sizes.len(),
            turnaround_times = turnaround_times.turnaround_times.len(),
            "Loaded catalog configuration"
        );

        let config = CatalogConfig::new(
            metadata,
            paper_stocks.paper_stocks,
            print_sizes.print_sizes,
            turnaround_times.turnaround_times,
            broker_program,
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying catalog configuration.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Returns the shop metadata.
    pub fn shop(&self) -> &ShopMetadata {
        self.config.shop()
    }

    /// Returns the broker program.
    pub fn broker_program(&self) -> &BrokerProgram {
        self.config.broker_program()
    }

    /// Gets a paper stock by id.
    pub fn get_paper_stock(&self, id: &str) -> EngineResult<&PaperStock> {
        self.config
            .paper_stocks()
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| not_found("Paper stock", id))
    }

    /// Gets a print size by id.
    pub fn get_print_size(&self, id: &str) -> EngineResult<&PrintSize> {
        self.config
            .print_sizes()
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| not_found("Print size", id))
    }

    /// Gets a turnaround time by id.
    pub fn get_turnaround_time(&self, id: &str) -> EngineResult<&TurnaroundTime> {
        self.config
            .turnaround_times()
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found("Turnaround time", id))
    }
}

fn not_found(kind: &str, id: &str) -> EngineError {
    EngineError::CatalogEntryNotFound {
        kind: kind.to_string(),
        id: id.to_string(),
    }
}
