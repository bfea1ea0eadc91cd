pub mod config;
pub mod decimal;
pub mod errors;
pub mod interest;
pub mod payments;
pub mod rates;

// re-export key types
pub use config::Config;
pub use decimal::{Money, Rate};
pub use errors::{InterestError, Result};
pub use interest::{
    AccrualEngine, CalculationResult, InterestCalculator, Period, PeriodSegmenter, Segment,
};
pub use payments::{payments_from_json, PartialPayment};
pub use rates::{
    BaseRateProvider, CacheDocument, RateCache, RateChangeRecord, RateMonth, RateSeries,
    BUNDESBANK_API_URL,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
