use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::{Amount, MAX_AMOUNT};

/// Store-assigned identifier. Ids grow monotonically and are never reused.
pub type SpendingId = i64;

/// Date format accepted on input and used for storage.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single recorded expenditure. Entries are immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spending {
    pub id: SpendingId,
    pub date: NaiveDate,
    pub location: String,
    pub item: String,
    pub amount: Amount,
}

/// A validated entry that has not been stored yet (no id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSpending {
    pub date: NaiveDate,
    pub location: String,
    pub item: String,
    pub amount: Amount,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("field must not be empty: {0}")]
    EmptyField(&'static str),

    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("amount must be a number")]
    AmountNotNumeric,

    #[error("amount must be a whole number")]
    AmountNotWhole,

    #[error("amount must not be negative")]
    NegativeAmount,

    #[error("amount must not exceed {}", MAX_AMOUNT)]
    AmountTooLarge,
}

impl NewSpending {
    /// Validate raw field values into an entry ready to be stored.
    pub fn new(
        date: &str,
        location: &str,
        item: &str,
        amount: Amount,
    ) -> Result<Self, ValidationError> {
        let date = parse_date(date)?;
        let location = required_text("location", location)?;
        let item = required_text("item", item)?;
        let amount = check_amount(amount)?;

        Ok(Self {
            date,
            location,
            item,
            amount,
        })
    }
}

/// Unvalidated create request as it arrives from a client.
/// Every field is optional so that a missing one surfaces as a
/// `ValidationError` instead of a decoding failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpendingDraft {
    pub date: Option<String>,
    pub location: Option<String>,
    pub item: Option<String>,
    pub amount: Option<Value>,
}

impl SpendingDraft {
    pub fn validate(&self) -> Result<NewSpending, ValidationError> {
        let date = self
            .date
            .as_deref()
            .ok_or(ValidationError::MissingField("date"))?;
        let location = self
            .location
            .as_deref()
            .ok_or(ValidationError::MissingField("location"))?;
        let item = self
            .item
            .as_deref()
            .ok_or(ValidationError::MissingField("item"))?;
        let amount = match &self.amount {
            None | Some(Value::Null) => return Err(ValidationError::MissingField("amount")),
            Some(value) => amount_from_json(value)?,
        };

        NewSpending::new(date, location, item, amount)
    }
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ValidationError::EmptyField("date"));
    }

    let date = NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))?;

    // chrono tolerates unpadded fields ("2024-1-5"); only the canonical form is accepted
    if date.format(DATE_FORMAT).to_string() != input {
        return Err(ValidationError::InvalidDate(input.to_string()));
    }

    // signed or five-digit years cannot be written as YYYY
    if !(0..=9999).contains(&date.year()) {
        return Err(ValidationError::InvalidDate(input.to_string()));
    }

    Ok(date)
}

fn required_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

fn check_amount(amount: Amount) -> Result<Amount, ValidationError> {
    if amount < 0 {
        return Err(ValidationError::NegativeAmount);
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(amount)
}

fn amount_from_json(value: &Value) -> Result<Amount, ValidationError> {
    let Value::Number(number) = value else {
        return Err(ValidationError::AmountNotNumeric);
    };

    if let Some(amount) = number.as_i64() {
        return Ok(amount);
    }
    if number.is_u64() {
        return Err(ValidationError::AmountTooLarge);
    }

    let float = number.as_f64().ok_or(ValidationError::AmountNotNumeric)?;
    if float < 0.0 {
        return Err(ValidationError::NegativeAmount);
    }
    if float.fract() != 0.0 {
        return Err(ValidationError::AmountNotWhole);
    }
    if float > MAX_AMOUNT as f64 {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(float as Amount)
}
