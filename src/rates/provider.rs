use std::path::Path;
use std::str::FromStr;

use chrono::Duration;
use hourglass_rs::SafeTimeProvider;
use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use rust_decimal::Decimal;

use super::cache::{CacheDocument, RateCache};
use super::{RateChangeRecord, RateMonth, RateSeries};
use crate::decimal::Rate;
use crate::errors::{InterestError, Result};

/// bundesbank download endpoint for the base interest rate series (BBKBAS2)
pub const BUNDESBANK_API_URL: &str = "https://api.statistiken.bundesbank.de/rest/download/BBIN1/M.DE.BBK.BBKBAS2.EUR.ME?format=sdmx&lang=de";

/// fetches and caches base interest rates from Deutsche Bundesbank
pub struct BaseRateProvider {
    cache: RateCache,
    api_url: String,
}

impl BaseRateProvider {
    pub fn new(cache_directory: impl AsRef<Path>) -> Self {
        Self {
            cache: RateCache::new(cache_directory),
            api_url: BUNDESBANK_API_URL.to_string(),
        }
    }

    /// override the download endpoint
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn cache(&self) -> &RateCache {
        &self.cache
    }

    /// download the raw SDMX document
    pub fn fetch_xml(&self) -> Result<String> {
        debug!("fetching base rates from {}", self.api_url);

        let response =
            ureq::get(&self.api_url)
                .call()
                .map_err(|e| InterestError::SourceUnavailable {
                    message: e.to_string(),
                })?;

        response
            .into_string()
            .map_err(|e| InterestError::SourceUnavailable {
                message: e.to_string(),
            })
    }

    /// parse an SDMX-ML document into ascending rate change records,
    /// collapsing consecutive equal rates
    pub fn parse_sdmx(xml: &str) -> Result<Vec<RateChangeRecord>> {
        let mut reader = Reader::from_str(xml);
        let mut observations: Vec<(RateMonth, Rate)> = Vec::new();
        let mut current_month: Option<RateMonth> = None;

        loop {
            match reader.read_event() {
                Err(e) => {
                    return Err(InterestError::ParseError {
                        message: e.to_string(),
                    })
                }
                Ok(Event::Eof) => break,
                Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                    match element.local_name().as_ref() {
                        b"ObsDimension" => {
                            let value = attribute_value(&element, "value")?;
                            current_month = Some(value.parse()?);
                        }
                        b"ObsValue" => {
                            let value = attribute_value(&element, "value")?;
                            let rate = Decimal::from_str(&value).map_err(|e| {
                                InterestError::ParseError {
                                    message: format!("invalid rate value {value:?}: {e}"),
                                }
                            })?;
                            if let Some(month) = current_month.take() {
                                observations.push((month, Rate::from_percent(rate)));
                            }
                        }
                        _ => {}
                    }
                }
                Ok(_) => {}
            }
        }

        if observations.is_empty() {
            return Err(InterestError::ParseError {
                message: "no observations found in SDMX document".to_string(),
            });
        }

        observations.sort_by_key(|(month, _)| *month);

        let mut records: Vec<RateChangeRecord> = Vec::new();
        for (month, rate) in observations {
            if records.last().map(|r| r.rate) != Some(rate) {
                records.push(RateChangeRecord::new(month, rate));
            }
        }

        Ok(records)
    }

    /// fetch, parse, and persist the series
    pub fn update_cache(&self, time: &SafeTimeProvider) -> Result<RateSeries> {
        let xml = self.fetch_xml()?;
        let records = Self::parse_sdmx(&xml)?;

        let document =
            CacheDocument::from_records(&records, &self.api_url, time.now().naive_utc());
        self.cache.write(&document)?;
        debug!(
            "cached {} base rate changes at {}",
            records.len(),
            self.cache.path().display()
        );

        RateSeries::new(records)
    }

    /// load the cached series without touching the network
    pub fn load(&self) -> Result<RateSeries> {
        self.cache.read()?.to_series()
    }

    /// load the cached series, refreshing it first when older than
    /// `max_age`; keeps the previously cached series if the refresh fails
    pub fn refresh_if_stale(&self, max_age: Duration, time: &SafeTimeProvider) -> Result<RateSeries> {
        let document = self.cache.read()?;
        let series = document.to_series()?;

        let stale = match document.last_updated() {
            Ok(last_updated) => time.now().naive_utc() - last_updated > max_age,
            Err(_) => true,
        };
        if !stale {
            return Ok(series);
        }

        match self.update_cache(time) {
            Ok(fresh) => Ok(fresh),
            Err(err) => {
                warn!("base rate refresh failed, keeping cached series: {err}");
                Ok(series)
            }
        }
    }
}

fn attribute_value(element: &BytesStart<'_>, name: &str) -> Result<String> {
    let attribute = element
        .try_get_attribute(name)
        .map_err(|e| InterestError::ParseError {
            message: e.to_string(),
        })?
        .ok_or_else(|| InterestError::ParseError {
            message: format!(
                "missing {name} attribute on {}",
                String::from_utf8_lossy(element.name().as_ref())
            ),
        })?;

    let value = attribute
        .unescape_value()
        .map_err(|e| InterestError::ParseError {
            message: e.to_string(),
        })?;

    Ok(value.into_owned())
}
