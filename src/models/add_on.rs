//! Add-on selections and their typed representation.
//!
//! Callers send add-ons as a map of optional entries, each with a `selected`
//! flag and loosely-typed parameters. [`AddOnConfiguration::resolve`] turns
//! the selected entries into [`AddOn`] values that carry exactly the fields
//! their formula needs, reporting any missing parameter up front.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An add-on that only needs to be switched on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleOption {
    /// Whether the add-on is selected.
    #[serde(default)]
    pub selected: bool,
}

/// An add-on charged as a single flat price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatFeeOption {
    /// Whether the add-on is selected.
    #[serde(default)]
    pub selected: bool,
    /// The flat price.
    pub price: Option<Decimal>,
}

/// An add-on charged as a setup fee plus a per-piece rate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupPerPieceOption {
    /// Whether the add-on is selected.
    #[serde(default)]
    pub selected: bool,
    /// One-off setup fee.
    pub setup_fee: Option<Decimal>,
    /// Rate charged for every piece in the order.
    pub price_per_piece: Option<Decimal>,
}

/// Scoring without folding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOnlyOption {
    /// Whether the add-on is selected.
    #[serde(default)]
    pub selected: bool,
    /// One-off setup fee.
    pub setup_fee: Option<Decimal>,
    /// Rate per score line per piece.
    pub price_per_score_per_piece: Option<Decimal>,
    /// Number of score lines on each piece.
    pub number_of_scores: Option<u32>,
}

/// Folding, priced by paper type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldingOption {
    /// Whether the add-on is selected.
    #[serde(default)]
    pub selected: bool,
    /// Text paper or card stock.
    pub paper_type: Option<FoldingPaperType>,
    /// Free-form fold style (e.g. "tri_fold"), carried into the trace.
    pub fold_type: Option<String>,
}

/// Design services.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignOption {
    /// Whether the add-on is selected.
    #[serde(default)]
    pub selected: bool,
    /// The requested design service.
    pub service_type: Option<DesignServiceType>,
    /// Sides to design; required for custom design services.
    pub sides: Option<DesignSides>,
}

/// Bundling add-ons (banding, shrink wrapping).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleOption {
    /// Whether the add-on is selected.
    #[serde(default)]
    pub selected: bool,
    /// How many pieces go in each bundle.
    pub items_per_bundle: Option<u32>,
    /// Price charged per bundle.
    pub price_per_bundle: Option<Decimal>,
}

/// Postal delivery, charged per box.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalDeliveryOption {
    /// Whether the add-on is selected.
    #[serde(default)]
    pub selected: bool,
    /// Number of boxes shipped.
    pub number_of_boxes: Option<u32>,
    /// Price charged per box.
    pub price_per_box: Option<Decimal>,
}

/// Hole drilling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleDrillingOption {
    /// Whether the add-on is selected.
    #[serde(default)]
    pub selected: bool,
    /// One-off setup fee.
    pub setup_fee: Option<Decimal>,
    /// Custom holes or a standard binder punch.
    pub hole_type: Option<HoleType>,
    /// Number of holes; required for custom holes.
    pub number_of_holes: Option<u32>,
}

/// Paper category used by the folding formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoldingPaperType {
    /// Text-weight paper.
    Text,
    /// Card stock; folding requires a basic score.
    CardStock,
}

/// Design service options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignServiceType {
    /// Customer supplies artwork.
    UploadArtwork,
    /// Custom design at standard speed.
    StandardCustom,
    /// Custom design at rush speed.
    RushCustom,
    /// Minor changes to supplied artwork.
    MinorChanges,
    /// Major changes to supplied artwork.
    MajorChanges,
}

/// Number of sides covered by a custom design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignSides {
    /// Front only.
    OneSide,
    /// Front and back.
    TwoSides,
}

/// Hole drilling pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoleType {
    /// Caller-specified number of holes.
    Custom,
    /// Standard binder punch.
    BinderPunch,
}

/// The add-on map sent with a product configuration.
///
/// Keys missing from the map, entries with `selected: false` and keys the
/// engine does not know are all ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnConfiguration {
    /// "Our Tagline" printed on the piece in exchange for a discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<ToggleOption>,
    /// Trimming to an exact size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exact_size: Option<ToggleOption>,
    /// Digital proof.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digital_proof: Option<FlatFeeOption>,
    /// Perforation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perforation: Option<SetupPerPieceOption>,
    /// Score only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_only: Option<ScoreOnlyOption>,
    /// Folding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folding: Option<FoldingOption>,
    /// Design services.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub design: Option<DesignOption>,
    /// Banding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banding: Option<BundleOption>,
    /// Shrink wrapping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shrink_wrapping: Option<BundleOption>,
    /// QR code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<FlatFeeOption>,
    /// Postal delivery (DDU).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_delivery: Option<PostalDeliveryOption>,
    /// EDDM process and postage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eddm: Option<SetupPerPieceOption>,
    /// Hole drilling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hole_drilling: Option<HoleDrillingOption>,
}

/// Bundle parameters shared by banding and shrink wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundling {
    /// Pieces per bundle; never zero.
    pub items_per_bundle: u32,
    /// Price charged per bundle.
    pub price_per_bundle: Decimal,
}

/// Design service with its priced variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "service_type", content = "sides", rename_all = "snake_case")]
pub enum DesignService {
    /// Customer supplies artwork; no charge.
    UploadArtwork,
    /// Standard custom design.
    StandardCustom(DesignSides),
    /// Rush custom design.
    RushCustom(DesignSides),
    /// Minor changes.
    MinorChanges,
    /// Major changes.
    MajorChanges,
}

/// Hole pattern with its required parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "hole_type", rename_all = "snake_case")]
pub enum HolePattern {
    /// Custom holes.
    Custom {
        /// Number of holes per piece.
        number_of_holes: u32,
    },
    /// Standard binder punch.
    BinderPunch,
}

/// A selected, fully-parameterised add-on that carries a cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AddOn {
    /// Digital proof at a flat price.
    DigitalProof {
        /// Flat price.
        price: Decimal,
    },
    /// Perforation.
    Perforation {
        /// Setup fee.
        setup_fee: Decimal,
        /// Per-piece rate.
        price_per_piece: Decimal,
    },
    /// Score only.
    ScoreOnly {
        /// Setup fee.
        setup_fee: Decimal,
        /// Rate per score per piece.
        price_per_score_per_piece: Decimal,
        /// Scores per piece.
        number_of_scores: u32,
    },
    /// Folding.
    Folding {
        /// Paper category.
        paper_type: FoldingPaperType,
        /// Optional fold style for the trace.
        fold_type: Option<String>,
    },
    /// Design services.
    Design {
        /// The service and, for custom work, the sides.
        service: DesignService,
    },
    /// Banding.
    Banding(Bundling),
    /// Shrink wrapping.
    ShrinkWrapping(Bundling),
    /// QR code at a flat price.
    QrCode {
        /// Flat price.
        price: Decimal,
    },
    /// Postal delivery (DDU).
    PostalDelivery {
        /// Number of boxes.
        number_of_boxes: u32,
        /// Price per box.
        price_per_box: Decimal,
    },
    /// EDDM process and postage.
    Eddm {
        /// Setup fee.
        setup_fee: Decimal,
        /// Per-piece rate.
        price_per_piece: Decimal,
    },
    /// Hole drilling.
    HoleDrilling {
        /// Setup fee.
        setup_fee: Decimal,
        /// Hole pattern.
        pattern: HolePattern,
    },
}

impl AddOn {
    /// Returns the configuration key of the add-on.
    pub fn key(&self) -> &'static str {
        match self {
            AddOn::DigitalProof { .. } => "digital_proof",
            AddOn::Perforation { .. } => "perforation",
            AddOn::ScoreOnly { .. } => "score_only",
            AddOn::Folding { .. } => "folding",
            AddOn::Design { .. } => "design",
            AddOn::Banding(_) => "banding",
            AddOn::ShrinkWrapping(_) => "shrink_wrapping",
            AddOn::QrCode { .. } => "qr_code",
            AddOn::PostalDelivery { .. } => "postal_delivery",
            AddOn::Eddm { .. } => "eddm",
            AddOn::HoleDrilling { .. } => "hole_drilling",
        }
    }

    /// Returns the display name used on invoices.
    pub fn display_name(&self) -> &'static str {
        match self {
            AddOn::DigitalProof { .. } => "Digital Proof",
            AddOn::Perforation { .. } => "Perforation",
            AddOn::ScoreOnly { .. } => "Score Only",
            AddOn::Folding { .. } => "Folding",
            AddOn::Design { .. } => "Design",
            AddOn::Banding(_) => "Banding",
            AddOn::ShrinkWrapping(_) => "Shrink Wrapping",
            AddOn::QrCode { .. } => "QR Code",
            AddOn::PostalDelivery { .. } => "Postal Delivery (DDU)",
            AddOn::Eddm { .. } => "EDDM Process & Postage",
            AddOn::HoleDrilling { .. } => "Hole Drilling",
        }
    }
}

/// The outcome of resolving an [`AddOnConfiguration`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAddOns {
    /// Whether the tagline discount was requested.
    pub tagline: bool,
    /// Whether the exact-size markup was requested.
    pub exact_size: bool,
    /// Priced add-ons in key order.
    pub priced: Vec<AddOn>,
}

impl ResolvedAddOns {
    /// Returns true if a priced add-on with the given key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.priced.iter().any(|add_on| add_on.key() == key)
    }
}

fn required<T>(value: Option<T>, add_on: &str, field: &str) -> EngineResult<T> {
    value.ok_or_else(|| EngineError::MissingAddOnParameter {
        add_on: add_on.to_string(),
        field: field.to_string(),
    })
}

fn required_amount(value: Option<Decimal>, add_on: &str, field: &str) -> EngineResult<Decimal> {
    let amount = required(value, add_on, field)?;
    if amount < Decimal::ZERO {
        return Err(EngineError::invalid(
            format!("add_ons.{}.{}", add_on, field),
            format!("must not be negative (got {})", amount),
        ));
    }
    Ok(amount)
}

fn selected<T>(entry: &Option<T>, is_selected: impl Fn(&T) -> bool) -> Option<&T> {
    entry.as_ref().filter(|e| is_selected(e))
}

impl AddOnConfiguration {
    /// Returns true if the tagline add-on is selected.
    pub fn tagline_selected(&self) -> bool {
        self.tagline.as_ref().is_some_and(|t| t.selected)
    }

    /// Returns true if the exact-size add-on is selected.
    pub fn exact_size_selected(&self) -> bool {
        self.exact_size.as_ref().is_some_and(|t| t.selected)
    }

    /// Converts the selected entries into typed add-ons.
    ///
    /// # Errors
    ///
    /// Returns `MissingAddOnParameter` when a selected add-on lacks a field its
    /// formula requires, and `InvalidConfiguration` for negative amounts or a
    /// zero bundle size.
    pub fn resolve(&self) -> EngineResult<ResolvedAddOns> {
        let mut priced = Vec::new();

        if let Some(opt) = selected(&self.digital_proof, |o| o.selected) {
            priced.push(AddOn::DigitalProof {
                price: required_amount(opt.price, "digital_proof", "price")?,
            });
        }

        if let Some(opt) = selected(&self.perforation, |o| o.selected) {
            priced.push(AddOn::Perforation {
                setup_fee: required_amount(opt.setup_fee, "perforation", "setup_fee")?,
                price_per_piece: required_amount(
                    opt.price_per_piece,
                    "perforation",
                    "price_per_piece",
                )?,
            });
        }

        if let Some(opt) = selected(&self.score_only, |o| o.selected) {
            priced.push(AddOn::ScoreOnly {
                setup_fee: required_amount(opt.setup_fee, "score_only", "setup_fee")?,
                price_per_score_per_piece: required_amount(
                    opt.price_per_score_per_piece,
                    "score_only",
                    "price_per_score_per_piece",
                )?,
                number_of_scores: required(opt.number_of_scores, "score_only", "number_of_scores")?,
            });
        }

        if let Some(opt) = selected(&self.folding, |o| o.selected) {
            priced.push(AddOn::Folding {
                paper_type: required(opt.paper_type, "folding", "paper_type")?,
                fold_type: opt.fold_type.clone(),
            });
        }

        if let Some(opt) = selected(&self.design, |o| o.selected) {
            let service = match required(opt.service_type, "design", "service_type")? {
                DesignServiceType::UploadArtwork => DesignService::UploadArtwork,
                DesignServiceType::StandardCustom => {
                    DesignService::StandardCustom(required(opt.sides, "design", "sides")?)
                }
                DesignServiceType::RushCustom => {
                    DesignService::RushCustom(required(opt.sides, "design", "sides")?)
                }
                DesignServiceType::MinorChanges => DesignService::MinorChanges,
                DesignServiceType::MajorChanges => DesignService::MajorChanges,
            };
            priced.push(AddOn::Design { service });
        }

        if let Some(opt) = selected(&self.banding, |o| o.selected) {
            priced.push(AddOn::Banding(Self::bundling(opt, "banding")?));
        }

        if let Some(opt) = selected(&self.shrink_wrapping, |o| o.selected) {
            priced.push(AddOn::ShrinkWrapping(Self::bundling(opt, "shrink_wrapping")?));
        }

        if let Some(opt) = selected(&self.qr_code, |o| o.selected) {
            priced.push(AddOn::QrCode {
                price: required_amount(opt.price, "qr_code", "price")?,
            });
        }

        if let Some(opt) = selected(&self.postal_delivery, |o| o.selected) {
            priced.push(AddOn::PostalDelivery {
                number_of_boxes: required(
                    opt.number_of_boxes,
                    "postal_delivery",
                    "number_of_boxes",
                )?,
                price_per_box: required_amount(
                    opt.price_per_box,
                    "postal_delivery",
                    "price_per_box",
                )?,
            });
        }

        if let Some(opt) = selected(&self.eddm, |o| o.selected) {
            priced.push(AddOn::Eddm {
                setup_fee: required_amount(opt.setup_fee, "eddm", "setup_fee")?,
                price_per_piece: required_amount(opt.price_per_piece, "eddm", "price_per_piece")?,
            });
        }

        if let Some(opt) = selected(&self.hole_drilling, |o| o.selected) {
            let pattern = match required(opt.hole_type, "hole_drilling", "hole_type")? {
                HoleType::Custom => HolePattern::Custom {
                    number_of_holes: required(
                        opt.number_of_holes,
                        "hole_drilling",
                        "number_of_holes",
                    )?,
                },
                HoleType::BinderPunch => HolePattern::BinderPunch,
            };
            priced.push(AddOn::HoleDrilling {
                setup_fee: required_amount(opt.setup_fee, "hole_drilling", "setup_fee")?,
                pattern,
            });
        }

        Ok(ResolvedAddOns {
            tagline: self.tagline_selected(),
            exact_size: self.exact_size_selected(),
            priced,
        })
    }

    fn bundling(opt: &BundleOption, key: &str) -> EngineResult<Bundling> {
        let items_per_bundle = required(opt.items_per_bundle, key, "items_per_bundle")?;
        if items_per_bundle == 0 {
            return Err(EngineError::invalid(
                format!("add_ons.{}.items_per_bundle", key),
                "must be at least 1",
            ));
        }
        Ok(Bundling {
            items_per_bundle,
            price_per_bundle: required_amount(opt.price_per_bundle, key, "price_per_bundle")?,
        })
    }
}
