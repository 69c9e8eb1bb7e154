// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::cmp;

use rayon::prelude::*;

use crate::encoder::IndicatorMatrix;
use crate::items::{Item, ItemCounter};
use crate::miner::{ItemSet, ItemsetMiner};

#[derive(Debug)]
struct FPNode {
    item: Item,
    count: u32,
    children: Vec<usize>,
    parent: usize,
}

/// Prefix tree of transactions, items ordered by descending frequency.
/// Nodes live in a flat arena and refer to each other by index; node 0 is
/// the root sentinel.
pub struct FPTree {
    nodes: Vec<FPNode>,
    item_count: ItemCounter,
    // Per item, the arena indices of every node carrying that item.
    item_nodes: Vec<Vec<usize>>,
}

impl FPTree {
    pub fn new() -> FPTree {
        FPTree {
            nodes: vec![FPNode {
                item: Item::null(),
                count: 0,
                children: vec![],
                parent: 0,
            }],
            item_count: ItemCounter::new(),
            item_nodes: vec![],
        }
    }

    fn child_of(&self, id: usize, item: Item) -> Option<usize> {
        self.nodes[id]
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child].item == item)
    }

    fn add_node(&mut self, parent: usize, item: Item) -> usize {
        let id = self.nodes.len();
        self.nodes.push(FPNode {
            item,
            count: 0,
            children: Vec::with_capacity(1),
            parent,
        });
        self.nodes[parent].children.push(id);
        let index = item.as_index();
        if index >= self.item_nodes.len() {
            self.item_nodes.resize(index + 1, vec![]);
        }
        self.item_nodes[index].push(id);
        id
    }

    pub fn insert(&mut self, transaction: &[Item], count: u32) {
        let mut id = 0;
        for &item in transaction {
            self.item_count.add(&item, count);
            id = match self.child_of(id, item) {
                Some(child) => child,
                None => self.add_node(id, item),
            };
            self.nodes[id].count += count;
        }
    }

    fn item_count(&self) -> &ItemCounter {
        &self.item_count
    }

    /// Builds the tree of prefix paths leading to `item`, each path weighted
    /// by the count of the `item` node it ends at.
    fn construct_conditional_tree(&self, item: Item) -> FPTree {
        let mut conditional = FPTree::new();
        if item.as_index() >= self.item_nodes.len() {
            return conditional;
        }
        for &node_id in &self.item_nodes[item.as_index()] {
            let path = self.path_from_root_to_excluding(node_id);
            conditional.insert(&path, self.nodes[node_id].count);
        }
        conditional
    }

    fn path_from_root_to_excluding(&self, node_id: usize) -> Vec<Item> {
        let mut path = vec![];
        let mut id = self.nodes[node_id].parent;
        while !self.nodes[id].item.is_null() {
            path.push(self.nodes[id].item);
            id = self.nodes[id].parent;
        }
        path.reverse();
        path
    }
}

fn fp_growth(fptree: &FPTree, min_count: u32, path: &[Item], path_count: u32) -> Vec<ItemSet> {
    let items = fptree.item_count().items_with_count_at_least(min_count);
    items
        .par_iter()
        .flat_map(|&item| -> Vec<ItemSet> {
            let mut itemset: Vec<Item> = Vec::from(path);
            let count = cmp::min(path_count, fptree.item_count().get(&item));
            itemset.push(item);

            let conditional_tree = fptree.construct_conditional_tree(item);
            let mut result = fp_growth(&conditional_tree, min_count, &itemset, count);
            result.push(ItemSet::new(itemset, count));
            result
        })
        .collect()
}

pub struct FpGrowth;

impl ItemsetMiner for FpGrowth {
    fn name(&self) -> &'static str {
        "FP-Growth"
    }

    fn mine(&self, matrix: &IndicatorMatrix, min_count: u32) -> Vec<ItemSet> {
        // First pass over the matrix to get global item frequencies.
        let mut item_count = ItemCounter::new();
        for row in 0..matrix.num_rows() {
            for item in matrix.row_items(row) {
                item_count.add(&item, 1);
            }
        }

        // Second pass: insert each row with its items sorted by descending
        // frequency. Items below the threshold can never be part of a
        // frequent itemset, so they are dropped before insertion.
        let mut fptree = FPTree::new();
        for row in 0..matrix.num_rows() {
            let mut items = matrix.row_items(row);
            items.retain(|item| item_count.get(item) >= min_count);
            item_count.sort_descending(&mut items);
            fptree.insert(&items, 1);
        }

        fp_growth(&fptree, min_count, &[], u32::MAX)
    }
}
