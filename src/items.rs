use fnv::FnvHashMap;

/// Dense integer handle for an interned ingredient name. Id 0 is reserved
/// for the FP-tree root sentinel; real items start at 1.
#[derive(Copy, Clone, Hash, PartialOrd, PartialEq, Eq, Ord, Debug)]
pub struct Item {
    id: u32,
}

impl Item {
    pub fn null() -> Item {
        Item { id: 0 }
    }
    pub fn with_id(id: u32) -> Item {
        Item { id }
    }
    pub fn as_index(&self) -> usize {
        self.id as usize
    }
    pub fn is_null(&self) -> bool {
        self.id == 0
    }
}

/// Bidirectional map between ingredient names and item ids.
///
/// Ids are handed out in insertion order, so callers that intern names in
/// sorted order get ids whose numeric order matches lexicographic name order.
pub struct Itemizer {
    next_item_id: u32,
    item_str_to_id: FnvHashMap<String, Item>,
    item_id_to_str: Vec<String>,
}

impl Itemizer {
    pub fn new() -> Itemizer {
        Itemizer {
            next_item_id: 1,
            item_str_to_id: FnvHashMap::default(),
            item_id_to_str: vec![],
        }
    }

    pub fn id_of(&mut self, item: &str) -> Item {
        if let Some(id) = self.item_str_to_id.get(item) {
            return *id;
        }
        let id = self.next_item_id;
        self.next_item_id += 1;
        self.item_str_to_id
            .insert(String::from(item), Item::with_id(id));
        self.item_id_to_str.push(String::from(item));
        Item::with_id(id)
    }

    pub fn str_of(&self, id: Item) -> &str {
        &self.item_id_to_str[id.as_index() - 1]
    }

    pub fn len(&self) -> usize {
        self.item_id_to_str.len()
    }
}

/// Per-item occurrence counts, indexed densely by item id.
pub struct ItemCounter {
    counts: Vec<u32>,
}

impl ItemCounter {
    pub fn new() -> ItemCounter {
        ItemCounter { counts: vec![] }
    }

    pub fn add(&mut self, item: &Item, count: u32) {
        let index = item.as_index();
        if self.counts.len() <= index {
            self.counts.resize(index + 1, 0);
        }
        self.counts[index] += count;
    }

    pub fn get(&self, item: &Item) -> u32 {
        let index = item.as_index();
        if index >= self.counts.len() {
            0
        } else {
            self.counts[index]
        }
    }

    pub fn items_with_count_at_least(&self, min_count: u32) -> Vec<Item> {
        let mut v: Vec<Item> = vec![];
        for i in 1..self.counts.len() {
            if self.counts[i] >= min_count {
                v.push(Item::with_id(i as u32));
            }
        }
        v
    }

    /// Sorts by descending count; ties broken by ascending item id so the
    /// order is fully deterministic.
    pub fn sort_descending(&self, v: &mut [Item]) {
        v.sort_by(|a, b| {
            let count_a = self.get(a);
            let count_b = self.get(b);
            if count_a == count_b {
                return a.cmp(b);
            }
            count_b.cmp(&count_a)
        });
    }
}
