use crate::engine::KeyListener;
use crate::keyboard::code::KeyInput;

/// Identifiers of keys pressed and not yet released, in press order.
#[derive(Clone, Debug, Default)]
pub struct HeldKeySet {
    keys: Vec<String>,
}

impl HeldKeySet {
    /// Returns false if the key was already held; its position is kept.
    pub fn insert(&mut self, code: &str) -> bool {
        if self.contains(code) {
            return false;
        }
        self.keys.push(code.to_string());
        true
    }

    pub fn remove(&mut self, code: &str) -> bool {
        match self.keys.iter().position(|k| k == code) {
            Some(idx) => {
                self.keys.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.keys.iter().any(|k| k == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

impl KeyListener for HeldKeySet {
    fn key_down(&mut self, input: &KeyInput) {
        self.insert(&input.code);
    }

    fn key_up(&mut self, input: &KeyInput) {
        self.remove(&input.code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut held = HeldKeySet::default();
        assert!(held.insert("ControlLeft"));
        assert!(held.insert("KeyA"));
        assert!(!held.insert("ControlLeft"));
        let keys: Vec<&str> = held.iter().collect();
        assert_eq!(keys, vec!["ControlLeft", "KeyA"]);
    }

    #[test]
    fn test_release_before_press_is_noop() {
        let mut held = HeldKeySet::default();
        assert!(!held.remove("KeyA"));
        assert!(held.is_empty());
    }

    #[test]
    fn test_present_iff_pressed_after_last_release() {
        let mut held = HeldKeySet::default();
        held.key_down(&KeyInput::new("KeyA", "a"));
        held.key_up(&KeyInput::new("KeyA", "a"));
        assert!(!held.contains("KeyA"));
        held.key_down(&KeyInput::new("KeyA", "a"));
        assert!(held.contains("KeyA"));
        assert_eq!(held.len(), 1);
    }
}
