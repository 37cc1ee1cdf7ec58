//! Add-on cost resolution.
//!
//! Each priced add-on has its own formula. The cost and the invoice trace are
//! produced together so the displayed arithmetic always matches the charge.
//! Add-ons are charged at full rate: broker, tagline, exact-size and
//! turnaround modifiers never touch them.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    AddOn, AddOnCost, AuditStep, Bundling, DesignService, DesignSides, FoldingPaperType,
    HolePattern,
};

use super::checked;

/// Folding on text paper: base charge.
pub const FOLDING_TEXT_BASE: Decimal = Decimal::from_parts(17, 0, 0, false, 2);
/// Folding on text paper: per-piece rate.
pub const FOLDING_TEXT_PER_PIECE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
/// Folding on card stock: base charge.
pub const FOLDING_CARD_STOCK_BASE: Decimal = Decimal::from_parts(34, 0, 0, false, 2);
/// Folding on card stock: per-piece rate.
pub const FOLDING_CARD_STOCK_PER_PIECE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);
/// Custom hole drilling: rate per hole per piece.
pub const HOLE_DRILLING_PER_HOLE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);
/// Binder punch: rate per piece.
pub const BINDER_PUNCH_PER_PIECE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

fn money(amount: Decimal) -> String {
    format!("${}", amount.normalize())
}

/// Returns the fixed price of a design service, or `None` when it is free.
pub fn design_price(service: DesignService) -> Option<Decimal> {
    match service {
        DesignService::UploadArtwork => None,
        DesignService::StandardCustom(DesignSides::OneSide) => Some(Decimal::new(90, 0)),
        DesignService::StandardCustom(DesignSides::TwoSides) => Some(Decimal::new(135, 0)),
        DesignService::RushCustom(DesignSides::OneSide) => Some(Decimal::new(160, 0)),
        DesignService::RushCustom(DesignSides::TwoSides) => Some(Decimal::new(240, 0)),
        DesignService::MinorChanges => Some(Decimal::new(2250, 2)),
        DesignService::MajorChanges => Some(Decimal::new(4500, 2)),
    }
}

fn design_label(service: DesignService) -> &'static str {
    match service {
        DesignService::UploadArtwork => "Upload artwork",
        DesignService::StandardCustom(DesignSides::OneSide) => "Standard custom design, one side",
        DesignService::StandardCustom(DesignSides::TwoSides) => {
            "Standard custom design, two sides"
        }
        DesignService::RushCustom(DesignSides::OneSide) => "Rush custom design, one side",
        DesignService::RushCustom(DesignSides::TwoSides) => "Rush custom design, two sides",
        DesignService::MinorChanges => "Minor design changes",
        DesignService::MajorChanges => "Major design changes",
    }
}

/// Returns `ceil(quantity / items_per_bundle)`.
pub fn bundle_count(quantity: u32, bundling: &Bundling) -> u32 {
    quantity.div_ceil(bundling.items_per_bundle)
}

fn bundle_cost(quantity: u32, bundling: &Bundling) -> EngineResult<(Decimal, String)> {
    let bundles = bundle_count(quantity, bundling);
    let cost = checked::mul(Decimal::from(bundles), bundling.price_per_bundle, "bundle cost")?;
    let details = format!(
        "ceil({} pieces / {} per bundle) = {} bundles × {} = {}",
        quantity,
        bundling.items_per_bundle,
        bundles,
        money(bundling.price_per_bundle),
        money(cost)
    );
    Ok((cost, details))
}

/// `setup_fee + per_piece × quantity`
fn setup_plus(
    setup_fee: Decimal,
    per_piece: Decimal,
    quantity: u32,
    amount: &str,
) -> EngineResult<Decimal> {
    let run = checked::mul(per_piece, Decimal::from(quantity), amount)?;
    checked::add(setup_fee, run, amount)
}

fn setup_plus_per_piece(
    setup_fee: Decimal,
    price_per_piece: Decimal,
    quantity: u32,
    amount: &str,
) -> EngineResult<(Decimal, String)> {
    let cost = setup_plus(setup_fee, price_per_piece, quantity, amount)?;
    let details = format!(
        "{} setup + {} × {} pieces = {}",
        money(setup_fee),
        money(price_per_piece),
        quantity,
        money(cost)
    );
    Ok((cost, details))
}

/// Calculates the cost of one add-on for an order quantity.
///
/// Returns `None` for add-ons that carry no charge (artwork upload), and
/// `CalculationError` when the cost overflows.
///
/// # Examples
///
/// ```
/// use print_pricing::calculation::calculate_add_on_cost;
/// use print_pricing::models::AddOn;
/// use rust_decimal::Decimal;
///
/// let perforation = AddOn::Perforation {
///     setup_fee: Decimal::from(20),
///     price_per_piece: Decimal::new(1, 2),
/// };
/// let cost = calculate_add_on_cost(&perforation, 1000)?.unwrap();
/// assert_eq!(cost.cost, Decimal::from(30));
/// assert_eq!(cost.calculation_details, "$20 setup + $0.01 × 1000 pieces = $30");
/// # Ok::<(), print_pricing::error::EngineError>(())
/// ```
pub fn calculate_add_on_cost(add_on: &AddOn, quantity: u32) -> EngineResult<Option<AddOnCost>> {
    let amount = add_on.display_name();

    let (cost, calculation_details) = match add_on {
        AddOn::DigitalProof { price } | AddOn::QrCode { price } => {
            (*price, format!("Flat fee: {}", money(*price)))
        }
        AddOn::Perforation {
            setup_fee,
            price_per_piece,
        } => setup_plus_per_piece(*setup_fee, *price_per_piece, quantity, amount)?,
        AddOn::ScoreOnly {
            setup_fee,
            price_per_score_per_piece,
            number_of_scores,
        } => {
            let per_piece = checked::mul(
                *price_per_score_per_piece,
                Decimal::from(*number_of_scores),
                amount,
            )?;
            let cost = setup_plus(*setup_fee, per_piece, quantity, amount)?;
            let details = format!(
                "{} setup + {} × {} scores × {} pieces = {}",
                money(*setup_fee),
                money(*price_per_score_per_piece),
                number_of_scores,
                quantity,
                money(cost)
            );
            (cost, details)
        }
        AddOn::Folding {
            paper_type,
            fold_type,
        } => {
            let (base, per_piece, label, note) = match paper_type {
                FoldingPaperType::Text => {
                    (FOLDING_TEXT_BASE, FOLDING_TEXT_PER_PIECE, "Text paper", "")
                }
                FoldingPaperType::CardStock => (
                    FOLDING_CARD_STOCK_BASE,
                    FOLDING_CARD_STOCK_PER_PIECE,
                    "Card stock",
                    " (includes mandatory basic score)",
                ),
            };
            let cost = setup_plus(base, per_piece, quantity, amount)?;
            let fold = fold_type
                .as_deref()
                .map(|f| format!(" [{}]", f))
                .unwrap_or_default();
            let details = format!(
                "{}{}: {} + {} × {} pieces = {}{}",
                label,
                fold,
                money(base),
                money(per_piece),
                quantity,
                money(cost),
                note
            );
            (cost, details)
        }
        AddOn::Design { service } => {
            let Some(price) = design_price(*service) else {
                return Ok(None);
            };
            (price, format!("{}: {}", design_label(*service), money(price)))
        }
        AddOn::Banding(bundling) | AddOn::ShrinkWrapping(bundling) => {
            bundle_cost(quantity, bundling)?
        }
        AddOn::PostalDelivery {
            number_of_boxes,
            price_per_box,
        } => {
            let cost = checked::mul(Decimal::from(*number_of_boxes), *price_per_box, amount)?;
            let details = format!(
                "{} boxes × {} = {}",
                number_of_boxes,
                money(*price_per_box),
                money(cost)
            );
            (cost, details)
        }
        AddOn::Eddm {
            setup_fee,
            price_per_piece,
        } => {
            let (cost, details) =
                setup_plus_per_piece(*setup_fee, *price_per_piece, quantity, amount)?;
            (
                cost,
                format!("{} (requires banding, charged separately)", details),
            )
        }
        AddOn::HoleDrilling { setup_fee, pattern } => {
            let (per_piece, label) = match pattern {
                HolePattern::Custom { number_of_holes } => {
                    let per_piece = checked::mul(
                        Decimal::from(*number_of_holes),
                        HOLE_DRILLING_PER_HOLE,
                        amount,
                    )?;
                    (
                        per_piece,
                        format!(
                            "({} holes × {})",
                            number_of_holes,
                            money(HOLE_DRILLING_PER_HOLE)
                        ),
                    )
                }
                HolePattern::BinderPunch => (
                    BINDER_PUNCH_PER_PIECE,
                    format!("{} binder punch", money(BINDER_PUNCH_PER_PIECE)),
                ),
            };
            let cost = setup_plus(*setup_fee, per_piece, quantity, amount)?;
            let details = format!(
                "{} setup + {} × {} pieces = {}",
                money(*setup_fee),
                label,
                quantity,
                money(cost)
            );
            (cost, details)
        }
    };

    Ok(Some(AddOnCost {
        key: add_on.key().to_string(),
        name: add_on.display_name().to_string(),
        cost,
        calculation_details,
    }))
}

/// The result of resolving all add-on costs.
#[derive(Debug, Clone)]
pub struct AddOnCostsResult {
    /// Individual costs, in the order the add-ons were given.
    pub costs: Vec<AddOnCost>,
    /// Sum of all costs.
    pub total: Decimal,
    /// One audit step per charged add-on.
    pub audit_steps: Vec<AuditStep>,
}

/// Resolves the cost of every add-on and sums them.
///
/// Audit steps are numbered consecutively from `first_step_number`. The
/// first add-on whose cost overflows fails the whole resolution.
pub fn resolve_add_on_costs(
    add_ons: &[AddOn],
    quantity: u32,
    first_step_number: u32,
) -> EngineResult<AddOnCostsResult> {
    let mut costs: Vec<AddOnCost> = Vec::with_capacity(add_ons.len());
    for add_on in add_ons {
        if let Some(cost) = calculate_add_on_cost(add_on, quantity)? {
            costs.push(cost);
        }
    }

    let audit_steps = costs
        .iter()
        .zip(first_step_number..)
        .map(|(cost, step_number)| AuditStep {
            step_number,
            rule_id: format!("add_on_{}", cost.key),
            rule_name: cost.name.clone(),
            input: serde_json::json!({
                "add_on": cost.key,
                "quantity": quantity
            }),
            output: serde_json::json!({
                "cost": cost.cost.normalize().to_string()
            }),
            reasoning: cost.calculation_details.clone(),
        })
        .collect();

    let total = costs.iter().try_fold(Decimal::ZERO, |total, c| {
        checked::add(total, c.cost, "total add-on cost")
    })?;

    Ok(AddOnCostsResult {
        costs,
        total,
        audit_steps,
    })
}
