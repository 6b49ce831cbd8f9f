/// Fixed two-decimal rendering with ECMAScript `Number.prototype.toFixed(2)`
/// rounding: exact ties round away from zero, everything else rounds to the
/// nearest representable value, and negative zero prints unsigned.
///
/// Magnitudes of 1e21 and above fall back to [`format_number`], as
/// `toFixed` does.
pub fn to_fixed_2(value: f64) -> String {
    if !value.is_finite() || value.abs() >= 1e21 {
        return format_number(value);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    // A tie at two decimals is an odd multiple of 0.005, which only exists in
    // binary when magnitude * 200 is exactly an odd integer.
    let scaled = magnitude * 200.0;
    let exact = magnitude.mul_add(200.0, -scaled) == 0.0;
    if exact && scaled.fract() == 0.0 && scaled % 2.0 == 1.0 && scaled < 9.0e15 {
        let cents = (scaled as u64 + 1) / 2;
        return format!("{sign}{}.{:02}", cents / 100, cents % 100);
    }

    format!("{sign}{magnitude:.2}")
}

/// `symbol` followed by the amount with exactly two decimals.
pub fn format_currency(value: f64, symbol: &str) -> String {
    format!("{symbol}{}", to_fixed_2(value))
}

/// Shortest text that reads back as the same number (`7`, `7.5`, `0.1`).
///
/// Follows ECMAScript `Number::toString`: plain decimals for exponents in
/// `-7 < e < 21`, otherwise `1.5e-7` / `1e+21`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // covers -0
        return "0".to_string();
    }

    let scientific = format!("{value:e}");
    match scientific.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) if !(-7 < exp && exp < 21) => {
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{}", exp.abs())
            }
            _ => format!("{value}"),
        },
        None => format!("{value}"),
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{}%", format_number(value))
}

/// Download name for an invoice PDF.
pub fn invoice_filename(invoice_number: &str) -> String {
    let number = if invoice_number.is_empty() {
        "unnamed"
    } else {
        invoice_number
    };
    format!("Invoice-{number}.pdf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_has_symbol_and_two_decimals() {
        assert_eq!(format_currency(0.0, "£"), "£0.00");
        assert_eq!(format_currency(220.0, "£"), "£220.00");
        assert_eq!(format_currency(-5.0, "£"), "£-5.00");
        assert_eq!(format_currency(1234.5, "£"), "£1234.50");
    }

    #[test]
    fn currency_rounds_like_to_fixed() {
        // exact binary ties round up
        assert_eq!(to_fixed_2(0.125), "0.13");
        assert_eq!(to_fixed_2(2.675), "2.67"); // 2.67499999...
        assert_eq!(to_fixed_2(1.005), "1.00"); // 1.00499999...
        assert_eq!(to_fixed_2(10.375), "10.38");
        assert_eq!(to_fixed_2(-0.125), "-0.13");
        assert_eq!(to_fixed_2(99.999), "100.00");
        assert_eq!(to_fixed_2(0.3333333), "0.33");
    }

    #[test]
    fn negative_zero_prints_unsigned() {
        assert_eq!(to_fixed_2(-0.0), "0.00");
        assert_eq!(to_fixed_2(-0.001), "-0.00");
    }

    #[test]
    fn percent_keeps_source_precision() {
        assert_eq!(format_percent(7.5), "7.5%");
        assert_eq!(format_percent(7.0), "7%");
        assert_eq!(format_percent(0.0), "0%");
        assert_eq!(format_percent(12.25), "12.25%");
    }

    #[test]
    fn large_and_tiny_magnitudes_use_exponents() {
        assert_eq!(to_fixed_2(1e21), "1e+21");
        assert_eq!(to_fixed_2(-2.5e22), "-2.5e+22");
        assert_eq!(to_fixed_2(1e20), "100000000000000000000.00");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_percent(1e-7), "1e-7%");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(to_fixed_2(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn filename_falls_back_to_unnamed() {
        assert_eq!(invoice_filename("INV-042"), "Invoice-INV-042.pdf");
        assert_eq!(invoice_filename(""), "Invoice-unnamed.pdf");
    }
}
