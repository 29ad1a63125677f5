use std::collections::HashMap;

use crate::engine::KeyListener;
use crate::keyboard::code::{self, KeyInput};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyCount {
    pub name: String,
    pub count: u64,
}

/// Press counts per normalized key name. Entries keep the order in which each
/// name was first seen so that sorting by count is stable against it.
#[derive(Clone, Debug, Default)]
pub struct KeyPressCounter {
    entries: Vec<KeyCount>,
    index: HashMap<String, usize>,
}

impl KeyPressCounter {
    /// Count one press of `code`. Returns the new count for its normalized name.
    pub fn record(&mut self, code: &str) -> u64 {
        let name = code::stat_name(code);
        let idx = match self.index.get(&name) {
            Some(&idx) => idx,
            None => {
                self.entries.push(KeyCount {
                    name: name.clone(),
                    count: 0,
                });
                self.index.insert(name, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        let entry = &mut self.entries[idx];
        entry.count += 1;
        entry.count
    }

    pub fn get(&self, name: &str) -> u64 {
        self.index
            .get(name)
            .map(|&idx| self.entries[idx].count)
            .unwrap_or(0)
    }

    /// All entries by descending count, ties in first-seen order.
    pub fn sorted(&self) -> Vec<&KeyCount> {
        let mut sorted: Vec<&KeyCount> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.count.cmp(&a.count));
        sorted
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }
}

impl KeyListener for KeyPressCounter {
    fn key_down(&mut self, input: &KeyInput) {
        self.record(&input.code);
    }
}
