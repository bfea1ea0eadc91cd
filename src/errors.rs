use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

use crate::decimal::Money;
use crate::rates::RateMonth;

#[derive(Error, Debug)]
pub enum InterestError {
    #[error("amount must be greater than zero: {amount}")]
    InvalidAmount {
        amount: Money,
    },

    #[error("invalid partial payment format: {message}")]
    InvalidPaymentFormat {
        message: String,
    },

    #[error("invalid partial payment date: {message}")]
    InvalidPaymentDate {
        message: String,
    },

    #[error("partial payment amount must be greater than zero: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("no base rate found for date: {date}")]
    RateNotFound {
        date: NaiveDate,
    },

    #[error("base rate series is empty")]
    EmptyRateSeries,

    #[error("base rate series is not in ascending order at {month}")]
    UnorderedRateSeries {
        month: RateMonth,
    },

    #[error("failed to fetch base rates: {message}")]
    SourceUnavailable {
        message: String,
    },

    #[error("failed to parse base rate data: {message}")]
    ParseError {
        message: String,
    },

    #[error("base rate cache file not found: {}", .path.display())]
    CacheMissing {
        path: PathBuf,
    },

    #[error("invalid base rate cache format: {}: {message}", .path.display())]
    InvalidCacheFormat {
        path: PathBuf,
        message: String,
    },

    #[error("base rate cache i/o failed: {}: {message}", .path.display())]
    CacheIo {
        path: PathBuf,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, InterestError>;
