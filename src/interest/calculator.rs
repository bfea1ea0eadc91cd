use chrono::NaiveDate;

use super::accrual::AccrualEngine;
use super::segmenter::PeriodSegmenter;
use super::CalculationResult;
use crate::config::Config;
use crate::decimal::Money;
use crate::errors::{InterestError, Result};
use crate::payments::{self, PartialPayment};
use crate::rates::RateSeries;

/// default interest calculator for BGB §288
///
/// Holds a read-only rate series snapshot; every calculation is a pure
/// function of its arguments and leaves the calculator untouched.
pub struct InterestCalculator {
    rates: RateSeries,
    config: Config,
}

impl InterestCalculator {
    /// calculator with the statutory default surcharges
    /// (base rate + 5 points for consumers, + 9 points for businesses)
    pub fn new(rates: RateSeries) -> Self {
        Self {
            rates,
            config: Config::default(),
        }
    }

    pub fn with_config(rates: RateSeries, config: Config) -> Self {
        Self { rates, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rates(&self) -> &RateSeries {
        &self.rates
    }

    /// calculate default interest over `[due_date, payment_date]`
    pub fn calculate(
        &self,
        amount: Money,
        due_date: NaiveDate,
        payment_date: NaiveDate,
        is_consumer: bool,
        split_by_year: bool,
    ) -> Result<CalculationResult> {
        self.calculate_with_partial_payments(
            amount,
            due_date,
            payment_date,
            is_consumer,
            &[],
            split_by_year,
        )
    }

    /// calculate default interest, applying partial payments that reduce
    /// the principal mid-stream
    pub fn calculate_with_partial_payments(
        &self,
        amount: Money,
        due_date: NaiveDate,
        payment_date: NaiveDate,
        is_consumer: bool,
        partial_payments: &[PartialPayment],
        split_by_year: bool,
    ) -> Result<CalculationResult> {
        if amount <= Money::ZERO {
            return Err(InterestError::InvalidAmount { amount });
        }

        let validated = payments::validate_and_sort(partial_payments, due_date, payment_date)?;

        if due_date >= payment_date {
            return Ok(CalculationResult {
                total_interest: Money::ZERO,
                total_days: 0,
                amount,
                is_consumer,
                periods: Vec::new(),
                partial_payments: validated,
            });
        }

        let surcharge = if is_consumer {
            self.config.consumer_surcharge()
        } else {
            self.config.business_surcharge()
        };

        let segmenter = PeriodSegmenter::new(&self.rates, split_by_year);
        let segments = segmenter.segments(due_date, payment_date, &validated)?;

        let engine = AccrualEngine::new(surcharge);
        let periods = engine.accrue(&segments, amount);

        let total_interest = periods
            .iter()
            .fold(Money::ZERO, |sum, period| sum + period.interest);

        Ok(CalculationResult {
            total_interest,
            total_days: AccrualEngine::day_count(due_date, payment_date),
            amount,
            is_consumer,
            periods,
            partial_payments: validated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::rates::{RateChangeRecord, RateMonth};
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn money(s: &str) -> Money {
        Money::from_str_exact(s).unwrap()
    }

    fn series() -> RateSeries {
        RateSeries::new(vec![
            RateChangeRecord::new(RateMonth::new(2023, 1), Rate::from_percent(dec!(1.62))),
            RateChangeRecord::new(RateMonth::new(2023, 7), Rate::from_percent(dec!(3.12))),
            RateChangeRecord::new(RateMonth::new(2024, 1), Rate::from_percent(dec!(3.62))),
            RateChangeRecord::new(RateMonth::new(2024, 7), Rate::from_percent(dec!(3.37))),
            RateChangeRecord::new(RateMonth::new(2025, 1), Rate::from_percent(dec!(2.27))),
        ])
        .unwrap()
    }

    fn calculator() -> InterestCalculator {
        InterestCalculator::new(series())
    }

    #[test]
    fn test_consumer_calculation() {
        let result = calculator()
            .calculate(
                Money::from_major(10_000),
                date(2023, 1, 1),
                date(2023, 7, 1),
                true,
                false,
            )
            .unwrap();

        assert_eq!(result.amount, Money::from_major(10_000));
        assert!(result.is_consumer);
        assert_eq!(result.total_days, 181);
        // base rate 1.62% + 5 points = 6.62%
        assert_eq!(result.total_interest, money("328.28"));
        assert_eq!(result.periods.len(), 1);
        assert_eq!(result.periods[0].interest_rate, Rate::from_percent(dec!(6.62)));
    }

    #[test]
    fn test_business_calculation() {
        let result = calculator()
            .calculate(
                Money::from_major(10_000),
                date(2023, 1, 1),
                date(2023, 7, 1),
                false,
                false,
            )
            .unwrap();

        assert!(!result.is_consumer);
        // base rate 1.62% + 9 points = 10.62%
        assert_eq!(result.total_interest, money("526.64"));
    }

    #[test]
    fn test_calculation_across_rate_change() {
        let result = calculator()
            .calculate(
                Money::from_major(10_000),
                date(2023, 1, 1),
                date(2024, 1, 1),
                true,
                false,
            )
            .unwrap();

        assert_eq!(result.total_days, 365);
        assert_eq!(result.periods.len(), 2);

        assert_eq!(result.periods[0].from, date(2023, 1, 1));
        assert_eq!(result.periods[0].to, date(2023, 7, 1));
        assert_eq!(result.periods[0].days, 181);
        assert_eq!(result.periods[0].base_rate, Rate::from_percent(dec!(1.62)));
        assert_eq!(result.periods[0].interest_rate, Rate::from_percent(dec!(6.62)));

        assert_eq!(result.periods[1].from, date(2023, 7, 2));
        assert_eq!(result.periods[1].to, date(2024, 1, 1));
        assert_eq!(result.periods[1].days, 183);
        assert_eq!(result.periods[1].base_rate, Rate::from_percent(dec!(3.12)));
        assert_eq!(result.periods[1].interest_rate, Rate::from_percent(dec!(8.12)));
    }

    #[test]
    fn test_total_is_sum_of_period_interests() {
        let result = calculator()
            .calculate(
                Money::from_major(10_000),
                date(2023, 1, 1),
                date(2025, 2, 1),
                true,
                false,
            )
            .unwrap();

        assert!(result.periods.len() > 2);
        let sum = result
            .periods
            .iter()
            .fold(Money::ZERO, |sum, p| sum + p.interest);
        assert_eq!(result.total_interest, sum.round_dp(2));
    }

    #[test]
    fn test_period_contiguity() {
        let result = calculator()
            .calculate(
                Money::from_major(10_000),
                date(2023, 1, 1),
                date(2025, 2, 1),
                true,
                true,
            )
            .unwrap();

        for pair in result.periods.windows(2) {
            assert_eq!(pair[1].from, pair[0].to + Duration::days(1));
        }
    }

    #[test]
    fn test_zero_interest_when_payment_not_late() {
        let calculator = calculator();

        for (due, paid) in [
            (date(2023, 7, 1), date(2023, 1, 1)),
            (date(2023, 7, 1), date(2023, 7, 1)),
        ] {
            let result = calculator
                .calculate(Money::from_major(10_000), due, paid, true, false)
                .unwrap();

            assert_eq!(result.total_interest, Money::ZERO);
            assert_eq!(result.total_days, 0);
            assert!(result.periods.is_empty());
        }
    }

    #[test]
    fn test_year_split() {
        let result = calculator()
            .calculate(
                Money::from_major(10_000),
                date(2023, 6, 15),
                date(2024, 3, 15),
                true,
                true,
            )
            .unwrap();

        let year_split = result
            .periods
            .iter()
            .position(|p| p.to == date(2023, 12, 31))
            .expect("a period must end on december 31st");
        assert_eq!(result.periods[year_split + 1].from, date(2024, 1, 1));
    }

    #[test]
    fn test_custom_surcharges() {
        let mut config = Config::new();
        config
            .set_consumer_surcharge(Rate::from_percent(dec!(10.0)))
            .set_business_surcharge(Rate::from_percent(dec!(15.0)));
        let calculator = InterestCalculator::with_config(series(), config);

        let consumer = calculator
            .calculate(
                Money::from_major(10_000),
                date(2023, 1, 1),
                date(2023, 7, 1),
                true,
                false,
            )
            .unwrap();
        assert_eq!(
            consumer.periods[0].interest_rate,
            Rate::from_percent(dec!(11.62))
        );

        let business = calculator
            .calculate(
                Money::from_major(10_000),
                date(2023, 1, 1),
                date(2023, 7, 1),
                false,
                false,
            )
            .unwrap();
        assert_eq!(
            business.periods[0].interest_rate,
            Rate::from_percent(dec!(16.62))
        );
    }

    #[test]
    fn test_invalid_amount_rejected() {
        let calculator = calculator();

        for amount in [Money::ZERO, Money::from_major(-1_000)] {
            let result =
                calculator.calculate(amount, date(2023, 1, 1), date(2023, 7, 1), true, false);
            assert!(matches!(result, Err(InterestError::InvalidAmount { .. })));
        }
    }

    #[test]
    fn test_partial_payment_reduces_interest() {
        let calculator = calculator();
        let payment = PartialPayment::new(date(2023, 4, 2), Money::from_major(500));

        let result = calculator
            .calculate_with_partial_payments(
                Money::from_major(1_000),
                date(2023, 2, 1),
                date(2023, 6, 1),
                false,
                &[payment],
                false,
            )
            .unwrap();

        assert_eq!(result.periods.len(), 2);
        assert_eq!(result.periods[0].days, 60);
        assert_eq!(result.periods[0].principal, Money::from_major(1_000));
        assert_eq!(result.periods[0].interest, money("17.46"));
        assert_eq!(result.periods[0].partial_payment, Some(payment));
        assert_eq!(result.periods[1].days, 59);
        assert_eq!(result.periods[1].principal, Money::from_major(500));
        assert_eq!(result.periods[1].interest, money("8.58"));
        assert_eq!(result.total_interest, money("26.04"));
        assert_eq!(result.partial_payments, vec![payment]);

        let without_payment = calculator
            .calculate(
                Money::from_major(1_000),
                date(2023, 2, 1),
                date(2023, 6, 1),
                false,
                false,
            )
            .unwrap();
        assert_eq!(without_payment.total_interest, money("34.92"));
        assert!(result.total_interest < without_payment.total_interest);
    }

    #[test]
    fn test_partial_payments_never_increase_interest() {
        let calculator = calculator();
        let baseline = calculator
            .calculate(
                Money::from_major(10_000),
                date(2023, 1, 1),
                date(2024, 1, 1),
                true,
                false,
            )
            .unwrap();

        let payment_sets: Vec<Vec<PartialPayment>> = vec![
            vec![PartialPayment::new(date(2023, 2, 1), Money::from_major(1))],
            vec![PartialPayment::new(date(2023, 12, 31), Money::from_major(9_999))],
            vec![
                PartialPayment::new(date(2023, 3, 1), Money::from_major(2_500)),
                PartialPayment::new(date(2023, 9, 1), Money::from_major(2_500)),
            ],
            vec![PartialPayment::new(date(2023, 2, 1), Money::from_major(20_000))],
        ];

        for payments in payment_sets {
            let result = calculator
                .calculate_with_partial_payments(
                    Money::from_major(10_000),
                    date(2023, 1, 1),
                    date(2024, 1, 1),
                    true,
                    &payments,
                    false,
                )
                .unwrap();
            assert!(result.total_interest <= baseline.total_interest);
        }
    }

    #[test]
    fn test_out_of_window_payments_are_ignored() {
        let calculator = calculator();
        let payments = vec![
            PartialPayment::new(date(2022, 12, 1), Money::from_major(500)),
            PartialPayment::new(date(2023, 8, 1), Money::from_major(500)),
        ];

        let result = calculator
            .calculate_with_partial_payments(
                Money::from_major(10_000),
                date(2023, 1, 1),
                date(2023, 7, 1),
                true,
                &payments,
                false,
            )
            .unwrap();

        assert!(result.partial_payments.is_empty());
        assert_eq!(result.total_interest, money("328.28"));
    }

    #[test]
    fn test_invalid_payment_amount_rejected() {
        let calculator = calculator();
        let payments = vec![PartialPayment::new(date(2023, 3, 1), Money::ZERO)];

        let result = calculator.calculate_with_partial_payments(
            Money::from_major(10_000),
            date(2023, 1, 1),
            date(2023, 7, 1),
            true,
            &payments,
            false,
        );

        assert!(matches!(
            result,
            Err(InterestError::InvalidPaymentAmount { .. })
        ));
    }

    #[test]
    fn test_payment_covering_full_principal_stops_accrual() {
        let calculator = calculator();
        let payment = PartialPayment::new(date(2023, 4, 2), Money::from_major(1_000));

        let result = calculator
            .calculate_with_partial_payments(
                Money::from_major(1_000),
                date(2023, 2, 1),
                date(2023, 6, 1),
                true,
                &[payment],
                false,
            )
            .unwrap();

        assert_eq!(result.periods.len(), 1);
        assert_eq!(result.periods[0].days, 60);
        // 1000 x 6.62 x 60 / 36500
        assert_eq!(result.total_interest, money("10.88"));
        // the full span is still reported even though accrual stopped early
        assert_eq!(result.total_days, 120);
    }

    #[test]
    fn test_validated_payments_echoed_for_degenerate_span() {
        let calculator = calculator();
        let payments = vec![PartialPayment::new(date(2023, 3, 1), Money::from_major(500))];

        let result = calculator
            .calculate_with_partial_payments(
                Money::from_major(10_000),
                date(2023, 7, 1),
                date(2023, 7, 1),
                true,
                &payments,
                false,
            )
            .unwrap();

        assert_eq!(result.total_interest, Money::ZERO);
        assert!(result.periods.is_empty());
        // the window (due, paid] is empty, so no payment survives validation
        assert!(result.partial_payments.is_empty());
    }
}
