use std::collections::HashSet;

use crate::engine::KeyListener;
use crate::engine::display::KeyDisplay;
use crate::engine::held_keys::HeldKeySet;
use crate::engine::highlight::Highlighter;
use crate::engine::key_stats::KeyPressCounter;
use crate::keyboard::code::KeyInput;
use crate::keyboard::layout::KeyboardLayout;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyDownOutcome {
    /// The key is on the deny-list: the host must not run its own binding.
    pub default_prevented: bool,
}

/// Everything the widget tracks about key state, and the single path every
/// key event takes through it, physical or simulated.
pub struct KeyboardState {
    pub layout: KeyboardLayout,
    pub held: HeldKeySet,
    pub counter: KeyPressCounter,
    pub highlighter: Highlighter,
    pub display: KeyDisplay,
    suppressed: HashSet<String>,
}

impl KeyboardState {
    pub fn new(layout: KeyboardLayout, suppressed_keys: &[String]) -> Self {
        let highlighter = Highlighter::new(&layout);
        Self {
            layout,
            held: HeldKeySet::default(),
            counter: KeyPressCounter::default(),
            highlighter,
            display: KeyDisplay::default(),
            suppressed: suppressed_keys.iter().cloned().collect(),
        }
    }

    pub fn is_suppressed(&self, code: &str) -> bool {
        self.suppressed.contains(code)
    }

    pub fn key_down(&mut self, input: &KeyInput) -> KeyDownOutcome {
        let outcome = KeyDownOutcome {
            default_prevented: self.is_suppressed(&input.code),
        };
        self.held.key_down(input);
        self.counter.key_down(input);
        self.highlighter.key_down(input);
        self.display.key_down(input);
        self.display.refresh_combination(&self.held);
        outcome
    }

    pub fn key_up(&mut self, input: &KeyInput) {
        self.held.key_up(input);
        self.highlighter.key_up(input);
        self.display.key_up(input);
        self.display.refresh_combination(&self.held);
    }

    /// Back to the freshly loaded state. The layout and deny-list stay.
    pub fn reset(&mut self) {
        self.held.clear();
        self.counter.clear();
        self.highlighter.clear();
        self.display.clear();
    }
}
