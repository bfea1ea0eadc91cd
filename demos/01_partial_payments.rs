/// partial payments - principal reductions mid-stream lower the accrual base
use bgb_interest_rs::chrono::NaiveDate;
use bgb_interest_rs::{
    InterestCalculator, Money, PartialPayment, Rate, RateChangeRecord, RateMonth, RateSeries,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rates = RateSeries::new(vec![RateChangeRecord::new(
        RateMonth::new(2023, 1),
        Rate::from_percent(dec!(1.62)),
    )])?;
    let calculator = InterestCalculator::new(rates);

    let due_date = NaiveDate::from_ymd_opt(2023, 2, 1).unwrap();
    let payment_date = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
    let payments = vec![PartialPayment::new(
        NaiveDate::from_ymd_opt(2023, 4, 2).unwrap(),
        Money::from_major(500),
    )];

    let result = calculator.calculate_with_partial_payments(
        Money::from_major(1_000),
        due_date,
        payment_date,
        false,
        &payments,
        false,
    )?;

    for period in &result.periods {
        println!(
            "{} .. {}  {:>3} days  principal {:>8}  rate {}  interest {}",
            period.from, period.to, period.days, period.principal, period.interest_rate,
            period.interest
        );
        if let Some(payment) = period.partial_payment {
            println!("  partial payment of {} EUR on {}", payment.amount, payment.date);
        }
    }
    println!("total: {} EUR over {} days", result.total_interest, result.total_days);

    Ok(())
}
