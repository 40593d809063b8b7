//! Property checks for the PAYE engine and chart geometry across a spread of
//! incomes and pension rates.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use paye_core::calculations::{BreakdownSegment, PayeCalculator};
use paye_core::{TaxInput, compute, derive_chart_geometry};

fn incomes() -> Vec<Decimal> {
    vec![
        dec!(0),
        dec!(1),
        dec!(99999.99),
        dec!(250000),
        dec!(500000),
        dec!(1000000),
        dec!(1234567.89),
        dec!(3000000),
        dec!(5000000),
        dec!(12500000),
        dec!(20000000),
        dec!(48000000),
        dec!(250000000),
    ]
}

fn rates() -> Vec<Decimal> {
    vec![dec!(0), dec!(2.5), dec!(8), dec!(10), dec!(18), dec!(20), dec!(55.5), dec!(100)]
}

#[test]
fn net_pension_and_tax_add_up_to_gross() {
    for gross in incomes() {
        for rate in rates() {
            let result = compute(gross, rate);

            assert_eq!(
                result.annual_net + result.annual_pension + result.annual_tax,
                gross,
                "identity broken for gross={gross} rate={rate}"
            );
            assert!(result.is_balanced());
        }
    }
}

#[test]
fn taxable_income_is_never_negative() {
    for gross in incomes() {
        for rate in rates() {
            let result = compute(gross, rate);

            assert!(
                result.taxable_income >= Decimal::ZERO,
                "negative taxable income for gross={gross} rate={rate}"
            );
            assert!(result.annual_tax >= Decimal::ZERO);
        }
    }
}

#[test]
fn tax_is_monotonic_in_taxable_income() {
    let calculator = PayeCalculator::new();
    let mut previous = Decimal::ZERO;

    let mut taxable = Decimal::ZERO;
    while taxable <= dec!(6000000) {
        let tax = calculator.tax_on_taxable_income(taxable);
        assert!(tax >= previous, "tax fell from {previous} to {tax} at {taxable}");
        previous = tax;
        taxable += dec!(25000);
    }
}

#[test]
fn band_charges_sum_to_annual_tax() {
    let calculator = PayeCalculator::new();

    for gross in incomes() {
        let result = calculator.compute(gross, dec!(8));
        let charged: Decimal = calculator
            .band_breakdown(result.taxable_income)
            .iter()
            .map(|c| c.tax)
            .sum();

        assert_eq!(charged, result.annual_tax);
    }
}

#[test]
fn band_boundaries_match_published_figures() {
    let calculator = PayeCalculator::new();

    assert_eq!(calculator.tax_on_taxable_income(dec!(300000)), dec!(21000));
    assert_eq!(calculator.tax_on_taxable_income(dec!(600000)), dec!(54000));
    assert_eq!(calculator.tax_on_taxable_income(dec!(1100000)), dec!(129000));
    assert_eq!(calculator.tax_on_taxable_income(dec!(1600000)), dec!(224000));
    assert_eq!(calculator.tax_on_taxable_income(dec!(3200000)), dec!(560000));
}

#[test]
fn validated_input_computes_same_result() {
    let calculator = PayeCalculator::new();

    for gross in incomes() {
        for rate in rates() {
            let input = TaxInput::new(gross, rate).unwrap();
            assert_eq!(calculator.calculate(&input), compute(gross, rate));
        }
    }
}

#[test]
fn chart_percentages_cover_the_ring() {
    for gross in incomes().into_iter().filter(|g| *g > Decimal::ZERO) {
        for rate in rates() {
            let chart = derive_chart_geometry(&compute(gross, rate));
            let drawn: f64 = BreakdownSegment::ALL
                .iter()
                .map(|s| chart.arcs.get(*s).arc_length(chart.circumference))
                .sum();

            assert!((chart.percentages.total() - 100.0).abs() < 1e-6);
            assert!((drawn - chart.circumference).abs() < 1e-6);
        }
    }
}

#[test]
fn tax_segment_ends_back_at_twelve_o_clock() {
    let chart = derive_chart_geometry(&compute(dec!(5000000), dec!(8)));
    let tax_end = chart.arcs.tax.start_angle + chart.percentages.tax * 3.6;

    assert!((tax_end - 270.0).abs() < 1e-6);
}
