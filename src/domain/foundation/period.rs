//! Billing period value object (calendar month + year).

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Timestamp, ValidationError};

/// A calendar month+year unit against which payment coverage is evaluated.
///
/// Serialized as `"YYYY-MM"`. Ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BillingPeriod {
    year: i32,
    month: u32,
}

impl BillingPeriod {
    /// Creates a billing period, validating the month.
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::invalid_format(
                "period",
                format!("month must be 1-12, got {}", month),
            ));
        }
        Ok(Self { year, month })
    }

    /// The period containing the given timestamp.
    pub fn containing(ts: &Timestamp) -> Self {
        let dt = ts.as_datetime();
        Self {
            year: dt.year(),
            month: dt.month(),
        }
    }

    /// The current billing period.
    pub fn current() -> Self {
        Self::containing(&Timestamp::now())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for BillingPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s.split_once('-').ok_or_else(|| {
            ValidationError::invalid_format("period", "expected YYYY-MM")
        })?;
        let year: i32 = year
            .parse()
            .map_err(|_| ValidationError::invalid_format("period", "invalid year"))?;
        let month: u32 = month
            .parse()
            .map_err(|_| ValidationError::invalid_format("period", "invalid month"))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for BillingPeriod {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BillingPeriod> for String {
    fn from(p: BillingPeriod) -> Self {
        p.to_string()
    }
}
