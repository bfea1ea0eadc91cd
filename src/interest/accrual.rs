use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::segmenter::Segment;
use super::Period;
use crate::decimal::{Money, Rate};

/// engine computing simple default interest per sub-period
///
/// Day counts follow the actual/365 convention: the divisor is always 365,
/// regardless of leap years. Interest never compounds (§289 BGB); every
/// sub-period accrues against the currently outstanding principal only.
pub struct AccrualEngine {
    surcharge: Rate,
}

impl AccrualEngine {
    pub fn new(surcharge: Rate) -> Self {
        Self { surcharge }
    }

    pub fn surcharge(&self) -> Rate {
        self.surcharge
    }

    /// whole days between two calendar dates
    pub fn day_count(start: NaiveDate, end: NaiveDate) -> u32 {
        (end - start).num_days().max(0) as u32
    }

    /// simple interest for one sub-period:
    /// `principal x (base rate + surcharge) x days / (100 x 365)`,
    /// rounded to cents half away from zero
    pub fn period_interest(&self, principal: Money, base_rate: Rate, days: u32) -> Money {
        let rate = base_rate + self.surcharge;
        let interest = principal.as_decimal() * rate.percent() * Decimal::from(days)
            / (Decimal::from(100) * Decimal::from(365));
        Money::from_decimal(interest)
    }

    /// fold segments into periods, reducing the running principal at each
    /// partial-payment boundary; the principal is clamped at zero
    pub fn accrue(&self, segments: &[Segment], initial_principal: Money) -> Vec<Period> {
        let mut principal = initial_principal;
        let mut periods = Vec::with_capacity(segments.len());

        for segment in segments {
            if principal > Money::ZERO {
                let days = segment.days();
                periods.push(Period {
                    from: segment.from,
                    to: segment.to,
                    days,
                    base_rate: segment.base_rate,
                    interest_rate: segment.base_rate + self.surcharge,
                    interest: self.period_interest(principal, segment.base_rate, days),
                    principal,
                    partial_payment: segment.payment,
                });
            }

            if let Some(payment) = segment.payment {
                principal = (principal - payment.amount).max(Money::ZERO);
            }
        }

        periods
    }
}
