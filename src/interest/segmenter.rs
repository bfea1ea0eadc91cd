use chrono::{Datelike, Duration, NaiveDate};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::payments::PartialPayment;
use crate::rates::RateSeries;

/// one sub-period produced by the segmentation walk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: NaiveDate,
    /// inclusive end date
    pub to: NaiveDate,
    pub base_rate: Rate,
    /// payment consumed at this segment's end boundary
    pub payment: Option<PartialPayment>,
}

impl Segment {
    /// whole days covered by the segment
    pub fn days(&self) -> u32 {
        (self.to - self.from).num_days() as u32
    }
}

/// partitions a date range at rate changes, calendar-year ends, and
/// partial-payment dates
pub struct PeriodSegmenter<'a> {
    rates: &'a RateSeries,
    split_by_year: bool,
}

impl<'a> PeriodSegmenter<'a> {
    pub fn new(rates: &'a RateSeries, split_by_year: bool) -> Self {
        Self {
            rates,
            split_by_year,
        }
    }

    /// walk from `start` to `end`, emitting a gap-free, non-overlapping
    /// sequence of segments; `payments` must be validated and sorted
    pub fn segments(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        payments: &[PartialPayment],
    ) -> Result<Vec<Segment>> {
        let mut segments = Vec::new();
        let mut cursor = start;
        let mut payment_index = 0;

        while cursor < end {
            // payments already passed by the cursor can no longer split a
            // boundary; skip them so later payments still apply
            while payments
                .get(payment_index)
                .is_some_and(|p| p.date <= cursor)
            {
                payment_index += 1;
            }

            let base_rate = self.rates.rate_at(cursor)?;
            let mut to = self.rates.next_change_after(cursor, end);

            if self.split_by_year {
                let year_end = year_end(cursor);
                if year_end < to && year_end < end {
                    to = year_end;
                }
            }

            if let Some(payment) = payments.get(payment_index) {
                if payment.date <= to {
                    to = payment.date;
                }
            }

            // consume every validated payment landing on this boundary,
            // combining their amounts into a single reduction
            let mut payment: Option<PartialPayment> = None;
            while let Some(next) = payments.get(payment_index) {
                if next.date != to {
                    break;
                }
                let amount = payment.map_or(Money::ZERO, |p| p.amount) + next.amount;
                payment = Some(PartialPayment::new(to, amount));
                payment_index += 1;
            }

            // breakpoints can coincide; zero-day segments are never emitted
            if cursor < to {
                segments.push(Segment {
                    from: cursor,
                    to,
                    base_rate,
                    payment,
                });
            }

            cursor = to + Duration::days(1);
        }

        Ok(segments)
    }
}

fn year_end(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 12, 31).expect("december 31st exists in every year")
}
