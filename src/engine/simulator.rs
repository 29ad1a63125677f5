use std::time::{Duration, Instant};

use crate::keyboard::code::KeyInput;
use crate::keyboard::layout::VirtualKey;

#[derive(Clone, Debug)]
struct PendingRelease {
    input: KeyInput,
    due: Instant,
    generation: u64,
}

/// Turns pointer presses on on-screen keys into key events and owns the
/// delayed key-ups that follow them.
///
/// Each scheduled release is tagged with the generation it was created in.
/// [`ClickSimulator::detach`] starts a new generation; releases from older
/// generations are dropped when they come due instead of being delivered.
#[derive(Clone, Debug)]
pub struct ClickSimulator {
    release_delay: Duration,
    pending: Vec<PendingRelease>,
    generation: u64,
    pointer: Option<&'static str>,
}

impl ClickSimulator {
    pub fn new(release_delay: Duration) -> Self {
        Self {
            release_delay,
            pending: Vec::new(),
            generation: 0,
            pointer: None,
        }
    }

    /// Pointer went down on `key`. Returns the synthetic key-down to dispatch;
    /// its key-up is scheduled `release_delay` from `now`.
    pub fn press(&mut self, key: &VirtualKey, now: Instant) -> KeyInput {
        let input = KeyInput::new(key.code, key.key);
        self.pointer = Some(key.code);
        self.schedule_release(input.clone(), now + self.release_delay);
        input
    }

    /// Pointer button released. Returns the code whose highlight should drop.
    pub fn pointer_up(&mut self) -> Option<&'static str> {
        self.pointer.take()
    }

    /// Pointer moved to `over` (the key under it, if any). Returns the code
    /// whose highlight should drop when the pointer left the pressed key.
    pub fn pointer_moved(&mut self, over: Option<&str>) -> Option<&'static str> {
        match self.pointer {
            Some(code) if over != Some(code) => self.pointer.take(),
            _ => None,
        }
    }

    pub fn schedule_release(&mut self, input: KeyInput, due: Instant) {
        self.pending.push(PendingRelease {
            input,
            due,
            generation: self.generation,
        });
    }

    /// Like [`schedule_release`](Self::schedule_release), but replaces a
    /// pending release for the same key instead of adding a second one.
    pub fn reschedule_release(&mut self, input: KeyInput, due: Instant) {
        let generation = self.generation;
        self.pending
            .retain(|p| !(p.generation == generation && p.input.code == input.code));
        self.schedule_release(input, due);
    }

    /// Remove and return every release due at `now`, in due order. Stale
    /// releases are discarded.
    pub fn take_due(&mut self, now: Instant) -> Vec<KeyInput> {
        let mut due: Vec<PendingRelease> = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due <= now {
                due.push(self.pending.remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|p| p.due);
        due.into_iter()
            .filter(|p| p.generation == self.generation)
            .map(|p| p.input)
            .collect()
    }

    #[cfg(test)]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Detach outstanding releases from the current view.
    pub fn detach(&mut self) {
        self.generation += 1;
        self.pointer = None;
    }
}
