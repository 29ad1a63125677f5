use std::collections::HashSet;

use crate::engine::KeyListener;
use crate::keyboard::code::KeyInput;
use crate::keyboard::layout::KeyboardLayout;

/// Active state of the on-screen keys. Codes without an on-screen key are
/// ignored.
#[derive(Clone, Debug, Default)]
pub struct Highlighter {
    known: HashSet<&'static str>,
    active: HashSet<String>,
}

impl Highlighter {
    pub fn new(layout: &KeyboardLayout) -> Self {
        Self {
            known: layout.keys().map(|k| k.code).collect(),
            active: HashSet::new(),
        }
    }

    /// Returns whether an on-screen key exists for `code`.
    pub fn set_active(&mut self, code: &str, active: bool) -> bool {
        if !self.known.contains(code) {
            return false;
        }
        if active {
            self.active.insert(code.to_string());
        } else {
            self.active.remove(code);
        }
        true
    }

    pub fn is_active(&self, code: &str) -> bool {
        self.active.contains(code)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

impl KeyListener for Highlighter {
    fn key_down(&mut self, input: &KeyInput) {
        self.set_active(&input.code, true);
    }

    fn key_up(&mut self, input: &KeyInput) {
        self.set_active(&input.code, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_known_key() {
        let mut hl = Highlighter::new(&KeyboardLayout::ansi());
        assert!(hl.set_active("KeyQ", true));
        assert!(hl.is_active("KeyQ"));
        assert!(hl.set_active("KeyQ", false));
        assert!(!hl.is_active("KeyQ"));
    }

    #[test]
    fn test_unknown_key_is_noop() {
        let mut hl = Highlighter::new(&KeyboardLayout::ansi());
        assert!(!hl.set_active("NumpadEnter", true));
        assert!(!hl.is_active("NumpadEnter"));
        assert_eq!(hl.active_count(), 0);
    }
}
