/// json round trip - untyped payment input and a serialized result document
use bgb_interest_rs::chrono::NaiveDate;
use bgb_interest_rs::{
    payments_from_json, InterestCalculator, Money, Rate, RateChangeRecord, RateMonth, RateSeries,
};
use rust_decimal_macros::dec;
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rates = RateSeries::new(vec![
        RateChangeRecord::new(RateMonth::new(2023, 1), Rate::from_percent(dec!(1.62))),
        RateChangeRecord::new(RateMonth::new(2023, 7), Rate::from_percent(dec!(3.12))),
    ])?;
    let calculator = InterestCalculator::new(rates);

    // payments as they might arrive from an api request body
    let payments = payments_from_json(&json!([
        { "date": "2023-03-15", "amount": 2500.0 },
        { "date": "2023-09-01", "amount": "1500.00" },
    ]))?;

    let result = calculator.calculate_with_partial_payments(
        Money::from_major(10_000),
        NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        true,
        &payments,
        false,
    )?;

    println!("{}", result.to_json_pretty()?);

    Ok(())
}
