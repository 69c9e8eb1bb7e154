use fnv::FnvHashMap;
use tracing::info;

use crate::loader::SurveyRecord;

/// Separator used when deriving a transaction key from the four key fields.
/// If a field value itself contains this separator, two distinct field
/// tuples could map to the same key. The survey export does not guard
/// against that and neither do we; the source data has numeric-ish keys in
/// practice.
const KEY_SEPARATOR: &str = "_";

/// All ingredient entries sharing one transaction key, in the order they
/// were first seen in the input. Duplicate entries are preserved here; the
/// encoder collapses them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub key: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupCounts {
    /// Distinct transaction keys before filtering.
    pub initial: usize,
    /// Keys surviving the >= 2 items filter.
    pub kept: usize,
}

fn transaction_key(record: &SurveyRecord) -> String {
    [
        record.subject.as_str(),
        record.round.as_str(),
        record.survey_day.as_str(),
        record.time_hour.as_str(),
    ]
    .join(KEY_SEPARATOR)
}

/// Groups records into transactions by key and drops groups with fewer than
/// two ingredient entries. Group order and within-group item order follow
/// first encounter in the input, so the output is deterministic for a given
/// file.
pub fn build_transactions(records: &[SurveyRecord]) -> (Vec<Transaction>, GroupCounts) {
    info!("grouping records into transactions");
    let mut position_of: FnvHashMap<String, usize> = FnvHashMap::default();
    let mut groups: Vec<Transaction> = vec![];

    for record in records {
        let key = transaction_key(record);
        match position_of.get(&key) {
            Some(&pos) => groups[pos].items.push(record.ingredient.clone()),
            None => {
                position_of.insert(key.clone(), groups.len());
                groups.push(Transaction {
                    key,
                    items: vec![record.ingredient.clone()],
                });
            }
        }
    }

    let initial = groups.len();
    let transactions: Vec<Transaction> = groups
        .into_iter()
        .filter(|t| t.items.len() >= 2)
        .collect();
    let counts = GroupCounts {
        initial,
        kept: transactions.len(),
    };
    info!(
        initial = counts.initial,
        kept = counts.kept,
        "transactions built"
    );
    (transactions, counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(subject: &str, hour: &str, ingredient: &str) -> SurveyRecord {
        SurveyRecord {
            subject: subject.into(),
            round: "1".into(),
            survey_day: "1".into(),
            time_hour: hour.into(),
            ingredient: ingredient.into(),
        }
    }

    #[test]
    fn test_grouping_partitions_records() {
        let records = vec![
            record("s1", "08", "bread"),
            record("s2", "08", "rice"),
            record("s1", "08", "butter"),
            record("s1", "13", "soup"),
            record("s2", "08", "fish"),
        ];
        let (transactions, counts) = build_transactions(&records);

        // Every record lands in exactly one group.
        let total: usize = transactions.iter().map(|t| t.items.len()).sum();
        let dropped = 1; // s1_1_1_13 has a single item
        assert_eq!(total + dropped, records.len());
        assert_eq!(counts.initial, 3);
        assert_eq!(counts.kept, 2);
    }

    #[test]
    fn test_group_order_follows_first_encounter() {
        let records = vec![
            record("s2", "08", "rice"),
            record("s1", "08", "bread"),
            record("s2", "08", "fish"),
            record("s1", "08", "butter"),
        ];
        let (transactions, _) = build_transactions(&records);
        assert_eq!(transactions[0].key, "s2_1_1_08");
        assert_eq!(transactions[0].items, vec!["rice", "fish"]);
        assert_eq!(transactions[1].key, "s1_1_1_08");
        assert_eq!(transactions[1].items, vec!["bread", "butter"]);
    }

    #[test]
    fn test_single_item_transactions_dropped() {
        let records = vec![
            record("s1", "08", "bread"),
            record("s1", "08", "bread"),
            record("s2", "08", "rice"),
        ];
        let (transactions, counts) = build_transactions(&records);
        assert_eq!(counts.initial, 2);
        assert_eq!(counts.kept, 1);
        // Two entries of the same ingredient still count as two entries.
        assert_eq!(transactions[0].items, vec!["bread", "bread"]);
    }

    #[test]
    fn test_filter_is_monotonic() {
        let records = vec![
            record("s1", "08", "bread"),
            record("s2", "09", "rice"),
            record("s3", "10", "fish"),
        ];
        let (_, counts) = build_transactions(&records);
        assert!(counts.kept <= counts.initial);
        assert_eq!(counts.kept, 0);
    }
}
