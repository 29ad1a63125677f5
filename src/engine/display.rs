use crate::engine::KeyListener;
use crate::engine::held_keys::HeldKeySet;
use crate::keyboard::code::{self, KeyInput};

pub const NONE_TEXT: &str = "None";

/// The two text fields under the keyboard.
#[derive(Clone, Debug)]
pub struct KeyDisplay {
    last_key: Option<String>,
    combination: String,
}

impl Default for KeyDisplay {
    fn default() -> Self {
        Self {
            last_key: None,
            combination: NONE_TEXT.to_string(),
        }
    }
}

impl KeyDisplay {
    pub fn last_key(&self) -> &str {
        self.last_key.as_deref().unwrap_or(NONE_TEXT)
    }

    pub fn combination(&self) -> &str {
        &self.combination
    }

    pub fn refresh_combination(&mut self, held: &HeldKeySet) {
        self.combination = combination_text(held);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl KeyListener for KeyDisplay {
    fn key_down(&mut self, input: &KeyInput) {
        self.last_key = Some(code::last_key_label(input));
    }
}

pub fn combination_text(held: &HeldKeySet) -> String {
    if held.is_empty() {
        return NONE_TEXT.to_string();
    }
    held.iter()
        .map(code::combo_name)
        .collect::<Vec<_>>()
        .join(" + ")
}
