pub mod display;
pub mod held_keys;
pub mod highlight;
pub mod key_stats;
pub mod pipeline;
pub mod simulator;

use crate::keyboard::code::KeyInput;

pub use pipeline::{KeyDownOutcome, KeyboardState};

/// A stage of the key pipeline. [`KeyboardState`] calls every stage in a
/// fixed order for each event.
pub trait KeyListener {
    fn key_down(&mut self, input: &KeyInput);

    fn key_up(&mut self, _input: &KeyInput) {}
}
