use std::cmp::Reverse;

use fnv::FnvHashMap;
use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::items::Item;
use crate::miner::ItemSet;

/// An association rule antecedent => consequent with its metrics. Both
/// sides are sorted, disjoint, non-empty item lists.
#[derive(Clone, Debug)]
pub struct Rule {
    pub antecedent: Vec<Item>,
    pub consequent: Vec<Item>,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
}

/// Derives all rules with confidence >= `min_confidence` from the frequent
/// itemsets, splitting each itemset of size >= 2 into every disjoint
/// non-empty (antecedent, consequent) pair.
///
/// Every subset of a frequent itemset is itself frequent, so all the
/// supports needed for confidence and lift are available from the itemset
/// table; no further pass over the transactions is required.
///
/// The result is sorted by descending lift; ties keep generation order.
pub fn generate_rules(
    itemsets: &[ItemSet],
    num_transactions: usize,
    min_confidence: f64,
) -> Vec<Rule> {
    let support_of: FnvHashMap<&[Item], f64> = itemsets
        .iter()
        .map(|set| (set.items.as_slice(), set.support(num_transactions)))
        .collect();

    let mut rules: Vec<Rule> = vec![];
    for itemset in itemsets.iter().filter(|set| set.len() > 1) {
        let support = itemset.support(num_transactions);
        for size in 1..itemset.len() {
            for antecedent in itemset.items.iter().copied().combinations(size) {
                let consequent: Vec<Item> = itemset
                    .items
                    .iter()
                    .copied()
                    .filter(|item| !antecedent.contains(item))
                    .collect();
                let antecedent_support = match support_of.get(antecedent.as_slice()) {
                    Some(&s) => s,
                    None => continue,
                };
                let consequent_support = match support_of.get(consequent.as_slice()) {
                    Some(&s) => s,
                    None => continue,
                };
                let confidence = support / antecedent_support;
                if confidence < min_confidence {
                    continue;
                }
                rules.push(Rule {
                    antecedent,
                    consequent,
                    support,
                    confidence,
                    lift: confidence / consequent_support,
                });
            }
        }
    }

    rules.sort_by_key(|rule| Reverse(OrderedFloat(rule.lift)));
    rules
}
