/// fetch base rates - download the Bundesbank series and populate the cache
use bgb_interest_rs::chrono::Duration;
use bgb_interest_rs::{BaseRateProvider, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let provider = BaseRateProvider::new(std::env::temp_dir());
    let time = SafeTimeProvider::new(TimeSource::System);

    println!("updating {} ...", provider.cache().path().display());
    let series = provider.update_cache(&time)?;

    println!("{} rate changes cached", series.records().len());
    for record in series.records().iter().rev().take(5) {
        println!("{}  {}", record.month, record.rate);
    }

    // subsequent runs only refetch when the cache has gone stale
    let series = provider.refresh_if_stale(Duration::days(30), &time)?;
    println!("series starts at {}", series.first_month());

    Ok(())
}
