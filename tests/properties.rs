//! Property tests for the pricing pipeline.

use proptest::prelude::*;
use proptest::test_runner::Config;
use rust_decimal::Decimal;

use print_pricing::calculation::{bundle_count, calculate_price, expected_subtotal};
use print_pricing::models::{
    AddOnConfiguration, BrokerDiscount, BundleOption, Bundling, FlatFeeOption, FoldingOption,
    FoldingPaperType, HoleDrillingOption, HoleType, PaperStock, PrintSize, ProductConfiguration,
    SetupPerPieceOption, Sides, ToggleOption, TurnaroundTime,
};

fn configuration(
    quantity: u32,
    width_hundredths: i64,
    height_hundredths: i64,
    rate_ten_thousandths: i64,
    second_side_markup: i64,
    sides: Sides,
) -> ProductConfiguration {
    ProductConfiguration {
        paper_stock: PaperStock {
            id: "stock".to_string(),
            name: "Stock".to_string(),
            price_per_unit_area: Decimal::new(rate_ten_thousandths, 4),
            second_side_markup_percentage: Decimal::from(second_side_markup),
        },
        print_size: PrintSize {
            id: "size".to_string(),
            name: "Size".to_string(),
            width: Decimal::new(width_hundredths, 2),
            height: Decimal::new(height_hundredths, 2),
            is_custom: false,
        },
        custom_dimensions: None,
        quantity,
        sides,
        turnaround_time: TurnaroundTime {
            id: "standard".to_string(),
            name: "Standard".to_string(),
            markup_percentage: Decimal::ZERO,
            business_days: 5,
        },
        add_ons: AddOnConfiguration::default(),
        is_broker: false,
        broker_discounts: vec![],
        category_id: None,
    }
}

fn toggle(selected: bool) -> Option<ToggleOption> {
    Some(ToggleOption { selected })
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn double_sided_is_single_times_sides_factor(
        quantity in 1_u32..50_000,
        width in 100_i64..2_000,
        height in 100_i64..2_000,
        rate in 1_i64..200,
        markup in 0_i64..100
    ) {
        let single = calculate_price(
            &configuration(quantity, width, height, rate, markup, Sides::Single),
        ).unwrap();
        let double = calculate_price(
            &configuration(quantity, width, height, rate, markup, Sides::Double),
        ).unwrap();

        let factor = Decimal::ONE + Decimal::from(markup) / Decimal::ONE_HUNDRED;
        prop_assert_eq!(double.base_paper_print_price, single.base_paper_print_price * factor);
    }

    #[test]
    fn broker_discount_makes_tagline_irrelevant(
        quantity in 1_u32..10_000,
        discount in 0_i64..=100
    ) {
        let mut with_tagline = configuration(quantity, 350, 200, 80, 30, Sides::Double);
        with_tagline.is_broker = true;
        with_tagline.category_id = Some("cards".to_string());
        with_tagline.broker_discounts = vec![BrokerDiscount {
            category_id: "cards".to_string(),
            discount_percentage: Decimal::from(discount),
        }];
        let mut without_tagline = with_tagline.clone();
        with_tagline.add_ons.tagline = toggle(true);
        without_tagline.add_ons.tagline = toggle(false);

        let a = calculate_price(&with_tagline).unwrap();
        let b = calculate_price(&without_tagline).unwrap();

        prop_assert!(!a.tagline_discount_applied);
        prop_assert_eq!(a.adjusted_base_price, b.adjusted_base_price);
        prop_assert_eq!(
            a.calculated_product_subtotal_before_shipping_tax,
            b.calculated_product_subtotal_before_shipping_tax
        );
    }

    #[test]
    fn add_on_costs_ignore_modifiers(
        quantity in 1_u32..10_000,
        turnaround_markup in 0_i64..100,
        exact_size in any::<bool>(),
        tagline in any::<bool>()
    ) {
        let mut plain = configuration(quantity, 850, 1100, 45, 25, Sides::Single);
        plain.add_ons.digital_proof = Some(FlatFeeOption {
            selected: true,
            price: Some(Decimal::new(500, 2)),
        });
        plain.add_ons.perforation = Some(SetupPerPieceOption {
            selected: true,
            setup_fee: Some(Decimal::from(20)),
            price_per_piece: Some(Decimal::new(1, 2)),
        });

        let mut modified = plain.clone();
        modified.turnaround_time.markup_percentage = Decimal::from(turnaround_markup);
        modified.add_ons.exact_size = toggle(exact_size);
        modified.add_ons.tagline = toggle(tagline);

        let a = calculate_price(&plain).unwrap();
        let b = calculate_price(&modified).unwrap();

        prop_assert_eq!(a.add_on_costs, b.add_on_costs);
        prop_assert_eq!(a.total_addon_cost, b.total_addon_cost);
    }

    #[test]
    fn removing_add_ons_lowers_subtotal_by_their_cost(
        quantity in 1_u32..10_000,
        turnaround_markup in 0_i64..100,
        exact_size in any::<bool>(),
        tagline in any::<bool>(),
        proof_cents in 0_i64..10_000,
        items_per_bundle in 1_u32..500,
        holes in 1_u32..8
    ) {
        let mut without = configuration(quantity, 850, 1100, 45, 25, Sides::Double);
        without.turnaround_time.markup_percentage = Decimal::from(turnaround_markup);
        without.add_ons.exact_size = toggle(exact_size);
        without.add_ons.tagline = toggle(tagline);

        let mut with = without.clone();
        with.add_ons.digital_proof = Some(FlatFeeOption {
            selected: true,
            price: Some(Decimal::new(proof_cents, 2)),
        });
        with.add_ons.folding = Some(FoldingOption {
            selected: true,
            paper_type: Some(FoldingPaperType::Text),
            fold_type: None,
        });
        with.add_ons.banding = Some(BundleOption {
            selected: true,
            items_per_bundle: Some(items_per_bundle),
            price_per_bundle: Some(Decimal::new(50, 2)),
        });
        with.add_ons.hole_drilling = Some(HoleDrillingOption {
            selected: true,
            setup_fee: Some(Decimal::from(10)),
            hole_type: Some(HoleType::Custom),
            number_of_holes: Some(holes),
        });

        let priced = calculate_price(&with).unwrap();
        let bare = calculate_price(&without).unwrap();

        prop_assert!(bare.add_on_costs.is_empty());
        prop_assert_eq!(priced.price_after_turnaround, bare.price_after_turnaround);
        prop_assert_eq!(
            priced.calculated_product_subtotal_before_shipping_tax
                - bare.calculated_product_subtotal_before_shipping_tax,
            priced.total_addon_cost
        );
    }

    #[test]
    fn bundle_count_is_ceiling(
        quantity in 1_u32..1_000_000,
        items_per_bundle in 1_u32..10_000
    ) {
        let bundling = Bundling {
            items_per_bundle,
            price_per_bundle: Decimal::ONE,
        };
        let bundles = bundle_count(quantity, &bundling);

        prop_assert!(u64::from(bundles) * u64::from(items_per_bundle) >= u64::from(quantity));
        prop_assert!(u64::from(bundles - 1) * u64::from(items_per_bundle) < u64::from(quantity));
    }

    #[test]
    fn calculation_is_idempotent_and_consistent(
        quantity in 1_u32..50_000,
        exact_size in any::<bool>(),
        tagline in any::<bool>(),
        turnaround_markup in 0_i64..100
    ) {
        let mut config = configuration(quantity, 400, 600, 65, 30, Sides::Double);
        config.add_ons.exact_size = toggle(exact_size);
        config.add_ons.tagline = toggle(tagline);
        config.add_ons.qr_code = Some(FlatFeeOption {
            selected: true,
            price: Some(Decimal::from(2)),
        });
        config.turnaround_time.markup_percentage = Decimal::from(turnaround_markup);

        let first = calculate_price(&config).unwrap();
        let second = calculate_price(&config).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            first.calculated_product_subtotal_before_shipping_tax,
            expected_subtotal(&first)
        );
        prop_assert_eq!(
            first.price_after_turnaround,
            first.price_after_base_percentage_modifiers
                * (Decimal::ONE + first.turnaround_markup_percentage / Decimal::ONE_HUNDRED)
        );
    }
}
