/// year split - break periods at calendar-year boundaries for bookkeeping
use bgb_interest_rs::chrono::{Datelike, NaiveDate};
use bgb_interest_rs::{InterestCalculator, Money, Rate, RateChangeRecord, RateMonth, RateSeries};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rates = RateSeries::new(vec![
        RateChangeRecord::new(RateMonth::new(2023, 1), Rate::from_percent(dec!(1.62))),
        RateChangeRecord::new(RateMonth::new(2023, 7), Rate::from_percent(dec!(3.12))),
        RateChangeRecord::new(RateMonth::new(2024, 1), Rate::from_percent(dec!(3.62))),
    ])?;
    let calculator = InterestCalculator::new(rates);

    let result = calculator.calculate(
        Money::from_major(10_000),
        NaiveDate::from_ymd_opt(2023, 6, 15).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        true,
        true, // split by calendar year
    )?;

    let mut year = 0;
    for period in &result.periods {
        if period.from.year() != year {
            year = period.from.year();
            println!("-- {year} --");
        }
        println!(
            "{} .. {}  {:>3} days  rate {}  interest {}",
            period.from, period.to, period.days, period.interest_rate, period.interest
        );
    }
    println!("total: {} EUR", result.total_interest);

    Ok(())
}
