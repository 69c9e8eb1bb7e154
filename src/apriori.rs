use fnv::FnvHashSet;

use crate::encoder::IndicatorMatrix;
use crate::items::{Item, ItemCounter};
use crate::miner::{ItemSet, ItemsetMiner};

/// Level-wise frequent-itemset mining: candidates of size k are joined from
/// frequent (k-1)-itemsets, pruned by the downward-closure property, then
/// counted in one scan over the matrix per level.
pub struct Apriori;

impl ItemsetMiner for Apriori {
    fn name(&self) -> &'static str {
        "Apriori"
    }

    fn mine(&self, matrix: &IndicatorMatrix, min_count: u32) -> Vec<ItemSet> {
        let rows: Vec<Vec<Item>> = (0..matrix.num_rows())
            .map(|row| matrix.row_items(row))
            .collect();

        let mut counter = ItemCounter::new();
        for row in &rows {
            for item in row {
                counter.add(item, 1);
            }
        }

        let mut frequent: Vec<ItemSet> = vec![];
        // Frequent 1-itemsets, ascending by item id, so every `current`
        // generation below stays lexicographically sorted.
        let mut current: Vec<Vec<Item>> = counter
            .items_with_count_at_least(min_count)
            .into_iter()
            .map(|item| vec![item])
            .collect();
        for itemset in &current {
            frequent.push(ItemSet::new(itemset.clone(), counter.get(&itemset[0])));
        }

        while !current.is_empty() {
            let candidates = prune(join(&current), &current);

            let mut counts = vec![0u32; candidates.len()];
            for row in &rows {
                for (i, candidate) in candidates.iter().enumerate() {
                    if contains_sorted(row, candidate) {
                        counts[i] += 1;
                    }
                }
            }

            let mut next: Vec<Vec<Item>> = vec![];
            for (candidate, count) in candidates.into_iter().zip(counts) {
                if count >= min_count {
                    frequent.push(ItemSet::new(candidate.clone(), count));
                    next.push(candidate);
                }
            }
            current = next;
        }

        frequent
    }
}

/// Joins pairs of k-itemsets sharing their first k-1 items into (k+1)-item
/// candidates. Relies on `current` being lexicographically sorted, which
/// makes equal-prefix entries contiguous.
fn join(current: &[Vec<Item>]) -> Vec<Vec<Item>> {
    let mut candidates = vec![];
    for i in 0..current.len() {
        let prefix_len = current[i].len() - 1;
        for j in (i + 1)..current.len() {
            if current[i][..prefix_len] != current[j][..prefix_len] {
                break;
            }
            let mut candidate = current[i].clone();
            candidate.push(current[j][prefix_len]);
            candidates.push(candidate);
        }
    }
    candidates
}

/// Drops candidates with any (k-1)-subset missing from the previous
/// generation; such candidates cannot be frequent.
fn prune(candidates: Vec<Vec<Item>>, current: &[Vec<Item>]) -> Vec<Vec<Item>> {
    let previous: FnvHashSet<&[Item]> = current.iter().map(Vec::as_slice).collect();
    candidates
        .into_iter()
        .filter(|candidate| {
            (0..candidate.len()).all(|skip| {
                let mut subset = candidate.clone();
                subset.remove(skip);
                previous.contains(subset.as_slice())
            })
        })
        .collect()
}

fn contains_sorted(row: &[Item], candidate: &[Item]) -> bool {
    candidate.iter().all(|item| row.binary_search(item).is_ok())
}
