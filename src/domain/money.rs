use std::fmt;

/// Money is represented as whole minor units (yen, cents) to keep sums exact.
pub type Amount = i64;

/// Largest amount a single entry may carry.
/// Keeps any realistic monthly total far away from `i64` overflow.
pub const MAX_AMOUNT: Amount = 999_999_999_999;

/// Format an amount with thousands separators.
/// Example: 1700 -> "1,700", 999 -> "999"
pub fn format_amount(amount: Amount) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let digits = amount.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}", sign, grouped)
}

/// Parse a user-typed amount. Accepts plain digits with optional `,` or `_`
/// group separators.
/// Example: "1,200" -> 1200, "500" -> 500
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.starts_with('-') {
        return Err(ParseAmountError::Negative);
    }

    let digits: String = input.chars().filter(|c| *c != ',' && *c != '_').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseAmountError::InvalidFormat);
    }

    let amount: Amount = digits.parse().map_err(|_| ParseAmountError::TooLarge)?;
    if amount > MAX_AMOUNT {
        return Err(ParseAmountError::TooLarge);
    }
    Ok(amount)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
    Negative,
    TooLarge,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid amount format"),
            ParseAmountError::Negative => write!(f, "amount must not be negative"),
            ParseAmountError::TooLarge => write!(f, "amount exceeds {}", MAX_AMOUNT),
        }
    }
}

impl std::error::Error for ParseAmountError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(500), "500");
        assert_eq!(format_amount(1700), "1,700");
        assert_eq!(format_amount(123456), "123,456");
        assert_eq!(format_amount(1234567), "1,234,567");
        assert_eq!(format_amount(-1200), "-1,200");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("500"), Ok(500));
        assert_eq!(parse_amount(" 1,200 "), Ok(1200));
        assert_eq!(parse_amount("1_000_000"), Ok(1_000_000));
        assert_eq!(parse_amount("0"), Ok(0));
    }

    #[test]
    fn test_parse_amount_invalid() {
        assert_eq!(parse_amount("abc"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount(""), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount("12.5"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount("-5"), Err(ParseAmountError::Negative));
        assert_eq!(
            parse_amount("1000000000000"),
            Err(ParseAmountError::TooLarge)
        );
    }
}
