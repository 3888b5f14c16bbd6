use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{CareError, CareResult};

/// Longest generation window, in months.
pub const MAX_WINDOW_MONTHS: u32 = 24;

/// A calendar month, `month` in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> CareResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(CareError::Validation(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        // Reject years chrono cannot represent up front.
        NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| CareError::Validation(format!("year {} is out of range", year)))?;
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month `offset` months after this one, carrying into following years.
    pub fn plus_months(&self, offset: u32) -> CareResult<Self> {
        let out_of_range =
            || CareError::Validation(format!("{} plus {} months is out of range", self, offset));

        let zero_based = self
            .month
            .checked_sub(1)
            .and_then(|zero_month| zero_month.checked_add(offset))
            .ok_or_else(out_of_range)?;
        let years = i32::try_from(zero_based / 12).map_err(|_| out_of_range())?;
        let year = self.year.checked_add(years).ok_or_else(out_of_range)?;
        Self::new(year, zero_based % 12 + 1).map_err(|_| out_of_range())
    }

    pub fn first_day(&self) -> CareResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .ok_or_else(|| CareError::Validation(format!("invalid month {}", self)))
    }

    pub fn last_day(&self) -> CareResult<NaiveDate> {
        let next = self.plus_months(1)?.first_day()?;
        next.pred_opt()
            .ok_or_else(|| CareError::Validation(format!("invalid month {}", self)))
    }

    /// Every date of the month, in order.
    pub fn days(&self) -> CareResult<Vec<NaiveDate>> {
        let first = self.first_day()?;
        Ok(first
            .iter_days()
            .take_while(|date| date.month() == self.month)
            .collect())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// The `months` consecutive months starting at `start_month`/`start_year`.
///
/// `months` must be in `1..=MAX_WINDOW_MONTHS`.
pub fn month_window(start_month: u32, start_year: i32, months: u32) -> CareResult<Vec<YearMonth>> {
    validate_window(months)?;
    let start = YearMonth::new(start_year, start_month)?;
    (0..months).map(|offset| start.plus_months(offset)).collect()
}

pub fn validate_window(months: u32) -> CareResult<u32> {
    if !(1..=MAX_WINDOW_MONTHS).contains(&months) {
        return Err(CareError::Validation(format!(
            "months to generate must be between 1 and {}, got {}",
            MAX_WINDOW_MONTHS, months
        )));
    }
    Ok(months)
}
