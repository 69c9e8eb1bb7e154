use std::collections::BTreeSet;

use tracing::info;

use crate::errors::Error;
use crate::items::{Item, Itemizer};
use crate::transactions::Transaction;

/// One-hot encoding of the surviving transactions. Rows are transactions,
/// columns are the distinct ingredient names observed across them, sorted
/// lexicographically so item ids and mining output are stable across runs.
pub struct IndicatorMatrix {
    itemizer: Itemizer,
    rows: Vec<Vec<bool>>,
}

pub fn encode(transactions: &[Transaction]) -> Result<IndicatorMatrix, Error> {
    if transactions.is_empty() {
        return Err(Error::EmptyTransactions);
    }

    let names: BTreeSet<&str> = transactions
        .iter()
        .flat_map(|t| t.items.iter().map(String::as_str))
        .collect();
    let mut itemizer = Itemizer::new();
    for name in &names {
        itemizer.id_of(name);
    }
    let num_columns = itemizer.len();

    let mut rows = Vec::with_capacity(transactions.len());
    for transaction in transactions {
        let mut row = vec![false; num_columns];
        for name in &transaction.items {
            // Duplicate entries within a transaction collapse here.
            row[itemizer.id_of(name).as_index() - 1] = true;
        }
        rows.push(row);
    }

    info!(
        rows = rows.len(),
        columns = num_columns,
        "transactions one-hot encoded"
    );
    Ok(IndicatorMatrix { itemizer, rows })
}

impl IndicatorMatrix {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.itemizer.len()
    }

    pub fn item_name(&self, item: Item) -> &str {
        self.itemizer.str_of(item)
    }

    /// The items present in one row, ascending by item id. Column order is
    /// lexicographic by name, so this is also ascending by name.
    pub fn row_items(&self, row: usize) -> Vec<Item> {
        self.rows[row]
            .iter()
            .enumerate()
            .filter(|&(_, &present)| present)
            .map(|(index, _)| Item::with_id((index + 1) as u32))
            .collect()
    }
}
