//! Rupee formatting with Indian digit grouping (12,34,567)

const RUPEE: char = '₹';

/// Group an integer digit string as `xx,xx,xxx`
fn group_indian(digits: &str) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(len - 3);
    let mut result = String::with_capacity(len + len / 2);

    for (i, ch) in head.bytes().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            result.push(',');
        }
        result.push(ch as char);
    }
    result.push(',');
    result.push_str(tail);
    result
}

/// Split a non-negative fixed-point rendering into grouped integer and fraction parts
fn grouped(fixed: &str) -> (String, Option<&str>) {
    match fixed.split_once('.') {
        Some((int, frac)) => (group_indian(int), Some(frac)),
        None => (group_indian(fixed), None),
    }
}

/// Aggregate total, e.g. `₹1,23,456.5`: up to three fraction digits, trailing zeros dropped
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{}NaN", RUPEE);
    }

    let fixed = format!("{:.3}", amount.abs());
    let (int, frac) = grouped(&fixed);
    let frac = frac.map(|f| f.trim_end_matches('0')).unwrap_or("");
    let negative = amount < 0.0 && (int != "0" || !frac.is_empty());

    let mut result = String::new();
    result.push(RUPEE);
    if negative {
        result.push('-');
    }
    result.push_str(&int);
    if !frac.is_empty() {
        result.push('.');
        result.push_str(frac);
    }
    result
}

/// Cell amount, e.g. `₹1,23,456.50`: always two fraction digits
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{}NaN", RUPEE);
    }

    let fixed = format!("{:.2}", amount.abs());
    let (int, frac) = grouped(&fixed);
    let frac = frac.unwrap_or("00");
    let negative = amount < 0.0 && fixed != "0.00";

    format!(
        "{}{}{}.{}",
        if negative { "-" } else { "" },
        RUPEE,
        int,
        frac
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_indian() {
        assert_eq!(group_indian("0"), "0");
        assert_eq!(group_indian("999"), "999");
        assert_eq!(group_indian("1000"), "1,000");
        assert_eq!(group_indian("100000"), "1,00,000");
        assert_eq!(group_indian("1234567"), "12,34,567");
        assert_eq!(group_indian("123456789"), "12,34,56,789");
    }

    #[test]
    fn test_format_currency_whole() {
        assert_eq!(format_currency(350.0), "₹350");
        assert_eq!(format_currency(123456.0), "₹1,23,456");
        assert_eq!(format_currency(0.0), "₹0");
    }

    #[test]
    fn test_format_currency_fraction() {
        assert_eq!(format_currency(1234.5), "₹1,234.5");
        assert_eq!(format_currency(0.1234), "₹0.123");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-1500.0), "₹-1,500");
        assert_eq!(format_currency(-0.0001), "₹0");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(99.99), "₹99.99");
        assert_eq!(format_amount(123456.5), "₹1,23,456.50");
        assert_eq!(format_amount(-20.0), "-₹20.00");
        assert_eq!(format_amount(f64::NAN), "₹NaN");
    }
}
