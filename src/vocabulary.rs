use crate::structs::Item;
use ahash::AHashMap;

/// Label <-> [`Item`] mapping. Ids are handed out in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    ids: AHashMap<String, Item>,
    labels: Vec<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, label: &str) -> Item {
        if let Some(&item) = self.ids.get(label) {
            return item;
        }
        let item = Item(self.labels.len() as u32);
        self.labels.push(label.to_owned());
        self.ids.insert(label.to_owned(), item);
        item
    }

    pub fn get(&self, label: &str) -> Option<Item> {
        self.ids.get(label).copied()
    }

    pub fn label(&self, item: Item) -> Option<&str> {
        self.labels.get(item.index()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
