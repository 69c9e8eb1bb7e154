use itertools::Itertools;

use crate::encoder::IndicatorMatrix;
use crate::items::Item;

/// A frequent itemset: items sorted ascending by id, plus the number of
/// transactions containing all of them.
#[derive(Clone, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub struct ItemSet {
    pub items: Vec<Item>,
    pub count: u32,
}

impl ItemSet {
    pub fn new(items: Vec<Item>, count: u32) -> ItemSet {
        ItemSet {
            items: items.into_iter().sorted().collect(),
            count,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn support(&self, num_transactions: usize) -> f64 {
        self.count as f64 / num_transactions as f64
    }
}

/// A frequent-itemset mining strategy. Every implementation must produce
/// the same itemsets, with the same counts, for the same matrix and
/// threshold; only how it gets there differs.
pub trait ItemsetMiner {
    fn name(&self) -> &'static str;

    /// Returns all itemsets contained in at least `min_count` rows of the
    /// matrix. An empty result is not an error.
    fn mine(&self, matrix: &IndicatorMatrix, min_count: u32) -> Vec<ItemSet>;
}

/// Smallest absolute count satisfying `count / rows >= min_support`.
pub fn min_count_for_support(min_support: f64, num_rows: usize) -> u32 {
    (min_support * num_rows as f64).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apriori::Apriori;
    use crate::encoder::encode;
    use crate::fptree::FpGrowth;
    use crate::transactions::Transaction;

    fn to_transactions(rows: &[&[&str]]) -> Vec<Transaction> {
        rows.iter()
            .enumerate()
            .map(|(i, items)| Transaction {
                key: format!("t{}", i),
                items: items.iter().map(|s| s.to_string()).collect(),
            })
            .collect()
    }

    fn sorted(mut itemsets: Vec<ItemSet>) -> Vec<ItemSet> {
        itemsets.sort();
        itemsets
    }

    // Census-style fixture carried over from the FP-Growth reference runs.
    fn census_rows() -> Vec<Transaction> {
        to_transactions(&[
            &["a", "b", "c"],
            &["d", "b", "c"],
            &["a", "b", "e"],
            &["f", "g", "c"],
            &["d", "g", "e"],
            &["f", "b", "c"],
            &["f", "b", "c"],
            &["a", "b", "e"],
            &["a", "b", "c"],
            &["a", "b", "e"],
            &["a", "b", "e"],
        ])
    }

    #[test]
    fn test_min_count_for_support() {
        assert_eq!(min_count_for_support(0.25, 4), 1);
        assert_eq!(min_count_for_support(0.5, 4), 2);
        assert_eq!(min_count_for_support(0.01, 1000), 10);
        assert_eq!(min_count_for_support(0.01, 150), 2);
        assert_eq!(min_count_for_support(1.0, 7), 7);
    }

    #[test]
    fn test_strategies_agree_on_census_fixture() {
        let matrix = encode(&census_rows()).unwrap();
        for min_count in 1..=4 {
            let fp = sorted(FpGrowth.mine(&matrix, min_count));
            let ap = sorted(Apriori.mine(&matrix, min_count));
            assert_eq!(fp, ap, "divergence at min_count {}", min_count);
            assert!(!fp.is_empty());
        }
    }

    #[test]
    fn test_strategies_agree_on_four_basket_scenario() {
        // One single-item row was dropped before encoding, leaving 4 rows.
        let transactions = to_transactions(&[
            &["A", "B"],
            &["A", "B", "C"],
            &["B", "C"],
            &["A", "C"],
        ]);
        let matrix = encode(&transactions).unwrap();
        let min_count = min_count_for_support(0.25, matrix.num_rows());

        let fp = sorted(FpGrowth.mine(&matrix, min_count));
        let ap = sorted(Apriori.mine(&matrix, min_count));
        assert_eq!(fp, ap);

        let a = Item::with_id(1);
        let b = Item::with_id(2);
        let ab = fp
            .iter()
            .find(|set| set.items == vec![a, b])
            .expect("{A,B} must be frequent");
        assert_eq!(ab.count, 2);
        assert!((ab.support(matrix.num_rows()) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_no_itemset_meets_support_yields_empty_result() {
        let matrix = encode(&to_transactions(&[&["a", "b"], &["c", "d"]])).unwrap();
        assert!(FpGrowth.mine(&matrix, 5).is_empty());
        assert!(Apriori.mine(&matrix, 5).is_empty());
    }
}
