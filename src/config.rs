use std::path::PathBuf;

use crate::errors::Error;

pub const DEFAULT_MIN_SUPPORT: f64 = 0.01;
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_TOP_N: usize = 5;

/// Run configuration, passed explicitly into the pipeline entry point.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub min_support: f64,
    pub min_confidence: f64,
    pub top_n: usize,
}

impl Config {
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.min_support > 0.0 && self.min_support <= 1.0) {
            return Err(Error::InvalidParameter(format!(
                "min_support must be in range (0,1], got {}",
                self.min_support
            )));
        }
        if !(self.min_confidence > 0.0 && self.min_confidence <= 1.0) {
            return Err(Error::InvalidParameter(format!(
                "min_confidence must be in range (0,1], got {}",
                self.min_confidence
            )));
        }
        Ok(())
    }
}
