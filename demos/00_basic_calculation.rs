/// basic calculation - default interest for a consumer and a business debtor
use bgb_interest_rs::chrono::NaiveDate;
use bgb_interest_rs::{InterestCalculator, Money, Rate, RateChangeRecord, RateMonth, RateSeries};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // base rate changes as published by the Bundesbank
    let rates = RateSeries::new(vec![
        RateChangeRecord::new(RateMonth::new(2023, 1), Rate::from_percent(dec!(1.62))),
        RateChangeRecord::new(RateMonth::new(2023, 7), Rate::from_percent(dec!(3.12))),
    ])?;
    let calculator = InterestCalculator::new(rates);

    let amount = Money::from_major(10_000);
    let due_date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let payment_date = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();

    let consumer = calculator.calculate(amount, due_date, payment_date, true, false)?;
    println!(
        "consumer:  {} EUR over {} days at {}",
        consumer.total_interest, consumer.total_days, consumer.periods[0].interest_rate
    );

    let business = calculator.calculate(amount, due_date, payment_date, false, false)?;
    println!(
        "business:  {} EUR over {} days at {}",
        business.total_interest, business.total_days, business.periods[0].interest_rate
    );

    Ok(())
}
