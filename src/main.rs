mod apriori;
mod command_line_args;
mod config;
mod encoder;
mod errors;
mod fptree;
mod items;
mod loader;
mod miner;
mod report;
mod rules;
mod transactions;

use std::io;
use std::process;
use std::time::Instant;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use apriori::Apriori;
use command_line_args::Cli;
use config::Config;
use errors::Error;
use fptree::FpGrowth;
use miner::{min_count_for_support, ItemsetMiner};
use report::{StrategyRun, DOCUMENT_APRIORI_SECS, DOCUMENT_FPGROWTH_SECS};

fn run(config: &Config) -> Result<(), Error> {
    config.validate()?;

    let records = loader::load_records(&config.data_path)?;
    let (transactions, counts) = transactions::build_transactions(&records);
    let matrix = encoder::encode(&transactions)?;
    let min_count = min_count_for_support(config.min_support, matrix.num_rows());

    let strategies: [(&dyn ItemsetMiner, f64); 2] = [
        (&FpGrowth, DOCUMENT_FPGROWTH_SECS),
        (&Apriori, DOCUMENT_APRIORI_SECS),
    ];
    let mut runs: Vec<StrategyRun> = vec![];
    for (miner, document_secs) in strategies {
        info!(strategy = miner.name(), "mining frequent itemsets");
        let timer = Instant::now();
        let itemsets = miner.mine(&matrix, min_count);
        let elapsed = timer.elapsed();
        info!(
            strategy = miner.name(),
            itemsets = itemsets.len(),
            secs = elapsed.as_secs_f64(),
            "mining finished"
        );
        let rules = rules::generate_rules(&itemsets, matrix.num_rows(), config.min_confidence);
        runs.push(StrategyRun {
            name: miner.name(),
            elapsed,
            itemsets,
            rules,
            document_secs,
        });
    }

    let strategies_agree = {
        let mut sets: Vec<Vec<miner::ItemSet>> = runs
            .iter()
            .map(|run| {
                let mut itemsets = run.itemsets.clone();
                itemsets.sort();
                itemsets
            })
            .collect();
        let first = sets.remove(0);
        sets.iter().all(|other| *other == first)
    };

    let stdout = io::stdout();
    report::write_report(
        &mut stdout.lock(),
        config,
        &counts,
        &matrix,
        &runs,
        strategies_agree,
    )?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = cli.into_config();
    if let Err(err) = run(&config) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
