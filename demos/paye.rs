use rust_decimal_macros::dec;
use taxverify::compliance::format_zmw;
use taxverify::rates::*;

fn main() {
    for income in [dec!(4000), dec!(6000), dec!(12500), dec!(45000)] {
        let calc = calculate_paye(income).expect("non-negative income");
        println!(
            "ZMW {:>10}  tax {:>9}  effective {}%",
            format_zmw(calc.gross_income),
            format_zmw(calc.tax_amount),
            calc.effective_rate
        );
        for band in calc.breakdown.iter().filter(|b| b.tax > dec!(0)) {
            println!("    {}% on {}", band.rate, format_zmw(band.taxable));
        }
    }

    for turnover in [dec!(650000), dec!(950000)] {
        let check = check_vat_registration(turnover);
        println!(
            "turnover {} -> VAT registration required: {}",
            format_zmw(turnover),
            check.required
        );
    }
}
