pub mod accrual;
pub mod calculator;
pub mod segmenter;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::payments::PartialPayment;

pub use accrual::AccrualEngine;
pub use calculator::InterestCalculator;
pub use segmenter::{PeriodSegmenter, Segment};

/// single accrual period of a calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: u32,
    pub base_rate: Rate,
    pub interest_rate: Rate,
    pub interest: Money,
    pub principal: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_payment: Option<PartialPayment>,
}

/// complete calculation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub total_interest: Money,
    pub total_days: u32,
    pub amount: Money,
    pub is_consumer: bool,
    pub periods: Vec<Period>,
    pub partial_payments: Vec<PartialPayment>,
}

impl CalculationResult {
    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
