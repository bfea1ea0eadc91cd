use std::env;
use std::path::{Path, PathBuf};

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Rate;

/// package configuration: cache location and §288 surcharges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    cache_directory: PathBuf,
    consumer_surcharge: Rate,
    business_surcharge: Rate,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// configuration with an explicit cache directory
    pub fn with_cache_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            cache_directory: directory.into(),
            ..Self::default()
        }
    }

    /// directory holding the base rate cache file
    pub fn cache_directory(&self) -> &Path {
        &self.cache_directory
    }

    pub fn set_cache_directory(&mut self, directory: impl Into<PathBuf>) -> &mut Self {
        self.cache_directory = directory.into();
        self
    }

    /// additional percentage points for consumers (§288 BGB: base rate + 5)
    pub fn consumer_surcharge(&self) -> Rate {
        self.consumer_surcharge
    }

    pub fn set_consumer_surcharge(&mut self, surcharge: Rate) -> &mut Self {
        self.consumer_surcharge = surcharge;
        self
    }

    /// additional percentage points for businesses (§288 BGB: base rate + 9)
    pub fn business_surcharge(&self) -> Rate {
        self.business_surcharge
    }

    pub fn set_business_surcharge(&mut self, surcharge: Rate) -> &mut Self {
        self.business_surcharge = surcharge;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_directory: env::temp_dir(),
            consumer_surcharge: Rate::from_percent(dec!(5.0)),
            business_surcharge: Rate::from_percent(dec!(9.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_surcharges() {
        let config = Config::new();

        assert_eq!(config.consumer_surcharge(), Rate::from_percent(dec!(5.0)));
        assert_eq!(config.business_surcharge(), Rate::from_percent(dec!(9.0)));
        assert_eq!(config.cache_directory(), env::temp_dir());
    }

    #[test]
    fn test_setters_chain() {
        let mut config = Config::with_cache_directory("/var/cache/rates");
        config
            .set_consumer_surcharge(Rate::from_percent(dec!(10.0)))
            .set_business_surcharge(Rate::from_percent(dec!(15.0)));

        assert_eq!(config.cache_directory(), Path::new("/var/cache/rates"));
        assert_eq!(config.consumer_surcharge(), Rate::from_percent(dec!(10.0)));
        assert_eq!(config.business_surcharge(), Rate::from_percent(dec!(15.0)));
    }
}
