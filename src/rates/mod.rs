pub mod cache;
pub mod provider;

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::decimal::Rate;
use crate::errors::{InterestError, Result};

pub use cache::{CacheDocument, CacheMetadata, RateCache};
pub use provider::{BaseRateProvider, BUNDESBANK_API_URL};

/// year-month validity key for base rate records
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RateMonth {
    year: i32,
    month: u32,
}

impl RateMonth {
    /// create a key; `month` must be 1..=12
    pub fn new(year: i32, month: u32) -> Self {
        assert!((1..=12).contains(&month), "month out of range: {month}");
        Self { year, month }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// first calendar day of the month
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("month is validated to 1..=12")
    }
}

impl fmt::Display for RateMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for RateMonth {
    type Err = InterestError;

    /// parse a `YYYY-MM` key as used by the upstream series and the cache
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || InterestError::ParseError {
            message: format!("invalid year-month key: {s}"),
        };

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }

        Ok(Self { year, month })
    }
}

/// single base rate change, effective from the first day of its month
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateChangeRecord {
    pub month: RateMonth,
    pub rate: Rate,
}

impl RateChangeRecord {
    pub fn new(month: RateMonth, rate: Rate) -> Self {
        Self { month, rate }
    }
}

/// ascending series of base rate changes, deduplicated by the provider
#[derive(Debug, Clone, PartialEq)]
pub struct RateSeries {
    records: Vec<RateChangeRecord>,
}

impl RateSeries {
    /// build from ascending records; fails on empty or unordered input
    pub fn new(records: Vec<RateChangeRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(InterestError::EmptyRateSeries);
        }
        for pair in records.windows(2) {
            if pair[1].month <= pair[0].month {
                return Err(InterestError::UnorderedRateSeries {
                    month: pair[1].month,
                });
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[RateChangeRecord] {
        &self.records
    }

    /// earliest month covered by the series
    pub fn first_month(&self) -> RateMonth {
        self.records[0].month
    }

    /// base rate in effect on a date: the latest record whose month is not
    /// after the date's year-month
    pub fn rate_at(&self, date: NaiveDate) -> Result<Rate> {
        let month = RateMonth::from_date(date);
        let idx = self.records.partition_point(|r| r.month <= month);
        if idx == 0 {
            return Err(InterestError::RateNotFound { date });
        }
        Ok(self.records[idx - 1].rate)
    }

    /// first day of the next change month strictly after the date's
    /// year-month, capped at `upper_bound`
    pub fn next_change_after(&self, date: NaiveDate, upper_bound: NaiveDate) -> NaiveDate {
        let month = RateMonth::from_date(date);
        let idx = self.records.partition_point(|r| r.month <= month);
        match self.records.get(idx) {
            Some(record) => {
                let change = record.month.first_day();
                if change > upper_bound {
                    upper_bound
                } else {
                    change
                }
            }
            None => upper_bound,
        }
    }
}
