use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, DEFAULT_MIN_CONFIDENCE, DEFAULT_MIN_SUPPORT, DEFAULT_TOP_N};

#[derive(Parser, Debug)]
#[command(
    name = "basket-verify",
    about = "Mines a food-consumption survey for association rules and \
             compares the results against the reference analysis document."
)]
pub struct Cli {
    /// Input survey dataset in CSV format.
    #[arg(long, value_name = "file_path")]
    pub input: PathBuf,

    /// Minimum itemset support threshold, in range (0,1].
    #[arg(long, default_value_t = DEFAULT_MIN_SUPPORT, value_name = "threshold")]
    pub min_support: f64,

    /// Minimum rule confidence threshold, in range (0,1].
    #[arg(long, default_value_t = DEFAULT_MIN_CONFIDENCE, value_name = "threshold")]
    pub min_confidence: f64,

    /// Number of top rules, ordered by lift, to print.
    #[arg(long, default_value_t = DEFAULT_TOP_N, value_name = "count")]
    pub top: usize,
}

impl Cli {
    pub fn into_config(self) -> Config {
        Config {
            data_path: self.input,
            min_support: self.min_support,
            min_confidence: self.min_confidence,
            top_n: self.top,
        }
    }
}
