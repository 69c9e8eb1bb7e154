use std::io::Write;
use std::time::Duration;

use crate::config::Config;
use crate::encoder::IndicatorMatrix;
use crate::items::Item;
use crate::miner::ItemSet;
use crate::rules::Rule;
use crate::transactions::GroupCounts;

/// Figures reported in the analysis document this tool verifies against.
pub const DOCUMENT_TRANSACTION_COUNT: usize = 207_849;
pub const DOCUMENT_FPGROWTH_SECS: f64 = 1.5103;
pub const DOCUMENT_APRIORI_SECS: f64 = 9.3182;

/// Outcome of one mining strategy, ready for reporting.
pub struct StrategyRun {
    pub name: &'static str,
    pub elapsed: Duration,
    pub itemsets: Vec<ItemSet>,
    pub rules: Vec<Rule>,
    pub document_secs: f64,
}

fn item_names(items: &[Item], matrix: &IndicatorMatrix) -> String {
    items
        .iter()
        .map(|&item| matrix.item_name(item))
        .collect::<Vec<&str>>()
        .join(", ")
}

/// Writes the human-readable comparison against the document's figures,
/// ending with the top rules of the first strategy as a markdown table.
pub fn write_report<W: Write>(
    out: &mut W,
    config: &Config,
    counts: &GroupCounts,
    matrix: &IndicatorMatrix,
    runs: &[StrategyRun],
    strategies_agree: bool,
) -> std::io::Result<()> {
    writeln!(out, "--- Verification of preprocessing ---")?;
    writeln!(out, "Initial transaction count: {}", counts.initial)?;
    writeln!(out, "Transactions with >= 2 items: {}", counts.kept)?;
    writeln!(
        out,
        "Document transaction count: {}",
        DOCUMENT_TRANSACTION_COUNT
    )?;

    writeln!(
        out,
        "\n--- Verification of results (min_support={}, min_confidence={}) ---",
        config.min_support, config.min_confidence
    )?;
    for run in runs {
        writeln!(
            out,
            "{}: {} frequent itemsets, {} rules in {:.4}s (document: {:.4}s)",
            run.name,
            run.itemsets.len(),
            run.rules.len(),
            run.elapsed.as_secs_f64(),
            run.document_secs
        )?;
    }
    writeln!(
        out,
        "Strategies agree on frequent itemsets: {}",
        if strategies_agree { "yes" } else { "NO" }
    )?;

    if let Some(run) = runs.first() {
        writeln!(
            out,
            "\nTop {} rules ({}, sorted by lift):",
            config.top_n, run.name
        )?;
        writeln!(
            out,
            "| antecedents | consequents | support | confidence | lift |"
        )?;
        writeln!(out, "|---|---|---|---|---|")?;
        for rule in run.rules.iter().take(config.top_n) {
            writeln!(
                out,
                "| {} | {} | {:.4} | {:.4} | {:.4} |",
                item_names(&rule.antecedent, matrix),
                item_names(&rule.consequent, matrix),
                rule.support,
                rule.confidence,
                rule.lift
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;
    use crate::fptree::FpGrowth;
    use crate::miner::ItemsetMiner;
    use crate::rules::generate_rules;
    use crate::transactions::Transaction;
    use std::path::PathBuf;

    fn render() -> String {
        let transactions: Vec<Transaction> = [
            &["bread", "butter"][..],
            &["bread", "butter", "jam"][..],
            &["bread", "jam"][..],
            &["butter", "jam"][..],
        ]
        .iter()
        .enumerate()
        .map(|(i, items)| Transaction {
            key: format!("t{}", i),
            items: items.iter().map(|s| s.to_string()).collect(),
        })
        .collect();
        let matrix = encode(&transactions).unwrap();
        let itemsets = FpGrowth.mine(&matrix, 2);
        let rules = generate_rules(&itemsets, matrix.num_rows(), 0.5);
        let run = StrategyRun {
            name: "FP-Growth",
            elapsed: Duration::from_millis(1234),
            itemsets,
            rules,
            document_secs: DOCUMENT_FPGROWTH_SECS,
        };
        let config = Config {
            data_path: PathBuf::from("unused.csv"),
            min_support: 0.5,
            min_confidence: 0.5,
            top_n: 5,
        };
        let counts = GroupCounts {
            initial: 5,
            kept: 4,
        };

        let mut out: Vec<u8> = vec![];
        write_report(&mut out, &config, &counts, &matrix, &[run], true).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_report_mentions_counts_and_reference() {
        let report = render();
        assert!(report.contains("Initial transaction count: 5"));
        assert!(report.contains("Transactions with >= 2 items: 4"));
        assert!(report.contains("Document transaction count: 207849"));
        assert!(report.contains("Strategies agree on frequent itemsets: yes"));
    }

    #[test]
    fn test_report_formats_timings_and_table() {
        let report = render();
        assert!(report.contains("in 1.2340s (document: 1.5103s)"));
        assert!(report.contains("| antecedents | consequents | support | confidence | lift |"));
        // Rule metrics are printed at 4 decimals, e.g. support 0.5000.
        assert!(report.contains("| 0.5000 |"));
    }
}
