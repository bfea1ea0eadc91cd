use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{RateChangeRecord, RateMonth, RateSeries};
use crate::decimal::Rate;
use crate::errors::{InterestError, Result};

pub const CACHE_FILENAME: &str = "base_rates.json";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// metadata block of the cache document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheMetadata {
    pub source_url: String,
    pub last_updated: String,
}

/// on-disk cache document: metadata plus a year-month to rate mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheDocument {
    pub metadata: CacheMetadata,
    pub data: BTreeMap<String, Decimal>,
}

impl CacheDocument {
    /// assemble a document from rate records
    pub fn from_records(
        records: &[RateChangeRecord],
        source_url: &str,
        last_updated: NaiveDateTime,
    ) -> Self {
        let data = records
            .iter()
            .map(|r| (r.month.to_string(), r.rate.percent()))
            .collect();

        Self {
            metadata: CacheMetadata {
                source_url: source_url.to_string(),
                last_updated: last_updated.format(TIMESTAMP_FORMAT).to_string(),
            },
            data,
        }
    }

    /// parse the data mapping into an ascending rate series
    pub fn to_series(&self) -> Result<RateSeries> {
        let mut records = Vec::with_capacity(self.data.len());
        for (key, rate) in &self.data {
            let month: RateMonth = key.parse()?;
            records.push(RateChangeRecord::new(month, Rate::from_percent(*rate)));
        }
        records.sort_by_key(|r| r.month);
        RateSeries::new(records)
    }

    /// parsed last-updated timestamp
    pub fn last_updated(&self) -> Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.metadata.last_updated, TIMESTAMP_FORMAT).map_err(|e| {
            InterestError::ParseError {
                message: format!(
                    "invalid last_updated timestamp {:?}: {e}",
                    self.metadata.last_updated
                ),
            }
        })
    }
}

/// file-backed store for the base rate cache document
#[derive(Debug, Clone)]
pub struct RateCache {
    path: PathBuf,
}

impl RateCache {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            path: directory.as_ref().join(CACHE_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// read and deserialize the cache document
    pub fn read(&self) -> Result<CacheDocument> {
        if !self.path.exists() {
            return Err(InterestError::CacheMissing {
                path: self.path.clone(),
            });
        }

        let content = fs::read_to_string(&self.path).map_err(|e| InterestError::CacheIo {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| InterestError::InvalidCacheFormat {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// persist a document, creating the cache directory if needed
    pub fn write(&self, document: &CacheDocument) -> Result<()> {
        let io_err = |e: std::io::Error| InterestError::CacheIo {
            path: self.path.clone(),
            message: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json =
            serde_json::to_string_pretty(document).map_err(|e| InterestError::CacheIo {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        fs::write(&self.path, json).map_err(io_err)
    }
}
