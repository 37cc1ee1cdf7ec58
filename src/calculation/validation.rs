//! Checks run before any price is computed.
//!
//! A configuration either passes every check or is rejected outright; the
//! engine never returns a partial breakdown.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{Dimensions, ProductConfiguration, ResolvedAddOns};

/// Smallest piece that can be folded, in either orientation.
pub const FOLDING_MINIMUM_SIZE: Dimensions = Dimensions {
    width: Decimal::from_parts(5, 0, 0, false, 0),
    height: Decimal::from_parts(6, 0, 0, false, 0),
};

fn non_negative(value: Decimal, field: &str) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid(
            field,
            format!("must not be negative (got {})", value),
        ));
    }
    Ok(())
}

/// Validates a configuration and returns the dimensions it will be priced at.
///
/// # Errors
///
/// Returns `InvalidConfiguration` when the quantity is zero, the dimensions
/// are missing or not positive, a rate or markup is negative, or the
/// applicable broker discount lies outside `0..=100`.
pub fn validate_configuration(config: &ProductConfiguration) -> EngineResult<Dimensions> {
    if config.quantity == 0 {
        return Err(EngineError::invalid("quantity", "must be at least 1"));
    }

    let dimensions = config.effective_dimensions().ok_or_else(|| {
        EngineError::invalid(
            "custom_dimensions",
            format!(
                "required for custom print size '{}'",
                config.print_size.id
            ),
        )
    })?;

    if dimensions.width <= Decimal::ZERO || dimensions.height <= Decimal::ZERO {
        return Err(EngineError::invalid(
            "dimensions",
            format!(
                "width and height must be positive (got {} x {})",
                dimensions.width, dimensions.height
            ),
        ));
    }

    non_negative(
        config.paper_stock.price_per_unit_area,
        "paper_stock.price_per_unit_area",
    )?;
    non_negative(
        config.paper_stock.second_side_markup_percentage,
        "paper_stock.second_side_markup_percentage",
    )?;
    non_negative(
        config.turnaround_time.markup_percentage,
        "turnaround_time.markup_percentage",
    )?;

    if let Some(percentage) = config.applicable_broker_discount() {
        if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
            return Err(EngineError::invalid(
                "broker_discounts.discount_percentage",
                format!("must be between 0 and 100 (got {})", percentage),
            ));
        }
    }

    Ok(dimensions)
}

/// Enforces add-on prerequisites.
///
/// Folding needs a piece of at least 5×6 in either orientation, and EDDM
/// cannot be ordered without banding.
pub fn check_add_on_prerequisites(
    add_ons: &ResolvedAddOns,
    dimensions: &Dimensions,
) -> EngineResult<()> {
    if add_ons.contains("folding") && !dimensions.fits_minimum(&FOLDING_MINIMUM_SIZE) {
        return Err(EngineError::invalid(
            "add_ons.folding",
            format!(
                "requires at least {} x {} (got {} x {})",
                FOLDING_MINIMUM_SIZE.width,
                FOLDING_MINIMUM_SIZE.height,
                dimensions.width.normalize(),
                dimensions.height.normalize()
            ),
        ));
    }

    if add_ons.contains("eddm") && !add_ons.contains("banding") {
        return Err(EngineError::invalid(
            "add_ons.eddm",
            "requires banding to be selected",
        ));
    }

    Ok(())
}
