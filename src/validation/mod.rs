// Request payload validation
//
// Every inbound payload implements `Validate`, turning raw JSON input into a
// checked value (parsing dates, times and enums along the way). Validators are
// plain functions over the payload; nothing here holds state.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fmt::Display;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// `NUMERIC(14, 3)`: recipe and inventory quantities
pub const QUANTITY_COLUMN: NumericColumn = NumericColumn { precision: 14, scale: 3 };
/// `NUMERIC(12, 2)`: menu prices
pub const PRICE_COLUMN: NumericColumn = NumericColumn { precision: 12, scale: 2 };

/// Shape of a Postgres `NUMERIC(precision, scale)` column
#[derive(Debug, Clone, Copy)]
pub struct NumericColumn {
    pub precision: u32,
    pub scale: u32,
}

/// Field-level failures collected from one payload
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors {
    pub message: String,
    pub field_errors: HashMap<String, String>,
}

impl ValidationErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::default();
        errors.add(field, message);
        ValidationErrors {
            message: "Validation failed".to_string(),
            field_errors: errors.0,
        }
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut fields: Vec<_> = self.field_errors.keys().map(String::as_str).collect();
        fields.sort_unstable();
        write!(f, "{} ({})", self.message, fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Turns a raw request payload into its validated form
pub trait Validate {
    type Valid;

    fn validate(self) -> Result<Self::Valid, ValidationErrors>;
}

/// Collector used inside `Validate` impls; first error per field wins
#[derive(Debug, Default)]
pub struct FieldErrors(HashMap<String, String>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn required(&mut self, field: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.add(field, "This field is required");
            return false;
        }
        true
    }

    pub fn required_some<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.add(field, "This field is required");
        }
        value
    }

    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize) {
        let len = value.chars().count();
        if len < min || len > max {
            self.add(field, format!("Must be between {} and {} characters", min, max));
        }
    }

    pub fn max_length(&mut self, field: &str, value: Option<&str>, max: usize) {
        if let Some(value) = value {
            if value.chars().count() > max {
                self.add(field, format!("Must be at most {} characters", max));
            }
        }
    }

    pub fn at_least<T: PartialOrd + Display>(&mut self, field: &str, value: T, min: T) {
        if value < min {
            self.add(field, format!("Must be at least {}", min));
        }
    }

    pub fn non_negative(&mut self, field: &str, value: Decimal) {
        if value < Decimal::ZERO {
            self.add(field, "Must not be negative");
        }
    }

    pub fn positive(&mut self, field: &str, value: Decimal) {
        if value <= Decimal::ZERO {
            self.add(field, "Must be greater than 0");
        }
    }

    /// The value must be stored as-is by the column: no rounding, no overflow
    pub fn fits(&mut self, field: &str, value: Decimal, column: NumericColumn) {
        if value.normalize().scale() > column.scale {
            self.add(field, format!("At most {} decimal places", column.scale));
            return;
        }
        let limit = Decimal::from(10u64.pow(column.precision - column.scale));
        if value.trunc().abs() >= limit {
            self.add(field, format!("Must be less than {}", limit));
        }
    }

    pub fn one_of<'a>(&mut self, field: &str, value: &'a str, allowed: &[&str]) -> Option<&'a str> {
        if allowed.contains(&value) {
            Some(value)
        } else {
            self.add(field, format!("Must be one of: {}", allowed.join(", ")));
            None
        }
    }

    pub fn email(&mut self, field: &str, value: &str) {
        let valid = match value.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
            }
            None => false,
        };
        if !valid {
            self.add(field, "Invalid email format");
        }
    }

    /// Parse a `YYYY-MM-DD` calendar date
    pub fn date(&mut self, field: &str, value: &str) -> Option<NaiveDate> {
        if !self.required(field, value) {
            return None;
        }
        match parse_date(value) {
            Some(date) => Some(date),
            None => {
                self.add(field, format!("Invalid date format: {} (expected YYYY-MM-DD)", value));
                None
            }
        }
    }

    /// Parse an `HH:MM:SS` time of day
    pub fn time(&mut self, field: &str, value: &str) -> Option<NaiveTime> {
        if !self.required(field, value) {
            return None;
        }
        match parse_time(value) {
            Some(time) => Some(time),
            None => {
                self.add(field, format!("Invalid time format: {} (expected HH:MM:SS)", value));
                None
            }
        }
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                message: "Validation failed".to_string(),
                field_errors: self.0,
            })
        }
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub fn parse_time(value: &str) -> Option<NaiveTime> {
    if value.len() != 8 {
        return None;
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_must_be_zero_padded_iso() {
        assert_eq!(parse_date("2024-06-01"), NaiveDate::from_ymd_opt(2024, 6, 1));
        assert!(parse_date("2024-6-1").is_none());
        assert!(parse_date("01/06/2024").is_none());
        assert!(parse_date("2024-02-30").is_none());
    }

    #[test]
    fn times_require_seconds() {
        assert_eq!(parse_time("18:00:00"), NaiveTime::from_hms_opt(18, 0, 0));
        assert!(parse_time("18:00").is_none());
        assert!(parse_time("25:00:00").is_none());
    }

    #[test]
    fn first_error_per_field_is_kept() {
        let mut errors = FieldErrors::default();
        errors.date("reservation_date", "");
        errors.add("reservation_date", "second message");
        let err = errors.finish().unwrap_err();
        assert_eq!(err.field_errors["reservation_date"], "This field is required");
    }

    #[test]
    fn email_shape() {
        let mut errors = FieldErrors::default();
        errors.email("a", "chef@bistro.example");
        errors.email("b", "chef@localhost");
        errors.email("c", "@bistro.example");
        let err = errors.finish().unwrap_err();
        assert!(!err.field_errors.contains_key("a"));
        assert!(err.field_errors.contains_key("b"));
        assert!(err.field_errors.contains_key("c"));
    }

    #[test]
    fn decimal_bounds() {
        let mut errors = FieldErrors::default();
        errors.non_negative("stock", Decimal::ZERO);
        errors.positive("per_portion", Decimal::ZERO);
        errors.non_negative("negative_stock", Decimal::new(-5, 1));
        let err = errors.finish().unwrap_err();
        assert!(!err.field_errors.contains_key("stock"));
        assert!(err.field_errors.contains_key("per_portion"));
        assert!(err.field_errors.contains_key("negative_stock"));
    }

    #[test]
    fn decimals_must_fit_their_column() {
        let mut errors = FieldErrors::default();
        errors.fits("grams", Decimal::new(1250, 3), QUANTITY_COLUMN);
        errors.fits("trailing_zeros", Decimal::new(15000, 4), QUANTITY_COLUMN);
        errors.fits("too_fine", Decimal::new(4, 4), QUANTITY_COLUMN);
        errors.fits("largest", Decimal::new(99_999_999_999_999, 3), QUANTITY_COLUMN);
        errors.fits("too_large", Decimal::from(100_000_000_000u64), QUANTITY_COLUMN);
        errors.fits("cents", Decimal::new(1999, 3), PRICE_COLUMN);
        let err = errors.finish().unwrap_err();
        assert!(!err.field_errors.contains_key("grams"));
        assert!(!err.field_errors.contains_key("trailing_zeros"));
        assert_eq!(err.field_errors["too_fine"], "At most 3 decimal places");
        assert!(!err.field_errors.contains_key("largest"));
        assert!(err.field_errors.contains_key("too_large"));
        assert!(err.field_errors.contains_key("cents"));
    }
}
